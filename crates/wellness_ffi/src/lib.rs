//! Flutter bridge surface over `wellness_core`.

pub mod api;
