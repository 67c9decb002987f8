//! Stats module - Per-scene summary statistics

mod calculator;

pub use calculator::{SceneStats, StatsCalculator};
