//! Relaxation sound player state. Audio output is the host UI's concern.

use chrono::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelaxationTrack {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub length_secs: u32,
}

impl RelaxationTrack {
    pub fn length(&self) -> Duration {
        Duration::seconds(i64::from(self.length_secs))
    }
}

pub const RELAXATION_TRACKS: [RelaxationTrack; 4] = [
    RelaxationTrack {
        id: 1,
        name: "Gentle rain",
        description: "Soothing rain sounds",
        length_secs: 15 * 60,
    },
    RelaxationTrack {
        id: 2,
        name: "Zen forest",
        description: "Nature and birdsong",
        length_secs: 20 * 60,
    },
    RelaxationTrack {
        id: 3,
        name: "Ocean waves",
        description: "Soft waves on the beach",
        length_secs: 25 * 60,
    },
    RelaxationTrack {
        id: 4,
        name: "Ambient music",
        description: "Relaxing melodies",
        length_secs: 18 * 60,
    },
];

pub const MAX_VOLUME: u8 = 100;
const DEFAULT_VOLUME: u8 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaxationPlayer {
    track_index: usize,
    playing: bool,
    volume: u8,
}

impl Default for RelaxationPlayer {
    fn default() -> Self {
        Self {
            track_index: 0,
            playing: false,
            volume: DEFAULT_VOLUME,
        }
    }
}

impl RelaxationPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&self) -> RelaxationTrack {
        RELAXATION_TRACKS[self.track_index]
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Switches track; out-of-range indexes are ignored and return `false`.
    pub fn select_track(&mut self, index: usize) -> bool {
        if index >= RELAXATION_TRACKS.len() {
            return false;
        }
        self.track_index = index;
        true
    }

    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Sets volume, clamped to `0..=MAX_VOLUME`.
    pub fn set_volume(&mut self, volume: u32) -> u8 {
        self.volume = volume.min(u32::from(MAX_VOLUME)) as u8;
        self.volume
    }
}
