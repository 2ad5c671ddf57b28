//! Motivational copy: rotating messages and randomly picked prompts.
//!
//! Randomness is always passed in, so callers can seed it.

use super::timer::{TimerMode, TimerSlot};
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;

/// Auto-rotation period of the message card.
pub const ROTATION_PERIOD_SECS: i64 = 8;
/// Pause after a manual "next" before auto-rotation resumes.
pub const MANUAL_PAUSE_SECS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotivationalMessage {
    pub text: &'static str,
    pub author: &'static str,
}

pub const MOTIVATIONAL_MESSAGES: &[MotivationalMessage] = &[
    MotivationalMessage {
        text: "Every small step brings you closer to your goals!",
        author: "Daily motivation",
    },
    MotivationalMessage {
        text: "Your mental health matters as much as your physical health. Take care!",
        author: "Wellbeing",
    },
    MotivationalMessage {
        text: "Breathe deeply. You have everything you need to get through today!",
        author: "Mindfulness",
    },
    MotivationalMessage {
        text: "Rest is not laziness, it is an investment in your productivity!",
        author: "Productivity",
    },
    MotivationalMessage {
        text: "Celebrate your small wins. They build great achievements!",
        author: "Success",
    },
    MotivationalMessage {
        text: "You are stronger than you think and more capable than you believe!",
        author: "Inner strength",
    },
    MotivationalMessage {
        text: "Today is a new chance to be the best version of yourself!",
        author: "Growth",
    },
    MotivationalMessage {
        text: "Gratitude turns what we have into enough, and enough into abundance!",
        author: "Gratitude",
    },
];

pub const GRATITUDE_PROMPTS: &[&str] = &[
    "What are you grateful for today?",
    "What special moment happened today?",
    "Who made a difference in your life today?",
    "Which small achievement are you celebrating today?",
    "What beauty did you notice around you?",
];

pub const GOAL_ENCOURAGEMENTS: &[&str] = &[
    "You are on the right track!",
    "Every small step counts!",
    "Your dedication is inspiring!",
    "Keep going, you can do it!",
    "Progress is progress!",
];

/// Builds the RNG used for prompt selection; `None` seeds from entropy.
pub fn seeded_rng(seed: Option<u64>) -> Mcg128Xsl64 {
    match seed {
        Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
        None => Mcg128Xsl64::from_entropy(),
    }
}

pub fn pick_gratitude_prompt<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    GRATITUDE_PROMPTS.choose(rng).copied().unwrap_or_default()
}

pub fn pick_goal_encouragement<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    GOAL_ENCOURAGEMENTS.choose(rng).copied().unwrap_or_default()
}

/// Message card that cycles through `MOTIVATIONAL_MESSAGES`.
#[derive(Debug, Clone)]
pub struct MessageRotator {
    index: usize,
    rotation: TimerSlot,
    resume: TimerSlot,
}

impl MessageRotator {
    /// Starts on the first message with auto-rotation running.
    pub fn new(now: DateTime<Utc>) -> Self {
        let mut rotation = TimerSlot::new();
        rotation.start(
            TimerMode::Repeating,
            Duration::seconds(ROTATION_PERIOD_SECS),
            now,
        );
        Self {
            index: 0,
            rotation,
            resume: TimerSlot::new(),
        }
    }

    pub fn current(&self) -> MotivationalMessage {
        MOTIVATIONAL_MESSAGES[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_auto_rotating(&self) -> bool {
        self.rotation.is_active()
    }

    /// Manual advance: shows the next message and pauses auto-rotation.
    ///
    /// Repeated presses restart the pause instead of stacking resumes.
    pub fn next(&mut self, now: DateTime<Utc>) -> MotivationalMessage {
        self.advance();
        self.rotation.cancel();
        self.resume.start(
            TimerMode::Once,
            Duration::seconds(MANUAL_PAUSE_SECS),
            now,
        );
        self.current()
    }

    /// Returns `true` when the shown message changed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        if self.resume.poll(now).is_some() {
            self.rotation.start(
                TimerMode::Repeating,
                Duration::seconds(ROTATION_PERIOD_SECS),
                now,
            );
        }
        if self.rotation.poll(now).is_some() {
            self.advance();
            return true;
        }
        false
    }

    fn advance(&mut self) {
        self.index = (self.index + 1) % MOTIVATIONAL_MESSAGES.len();
    }
}
