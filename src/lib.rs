//! COVID Story - Five-scene narrative of daily COVID-19 cases in New York
//!
//! Loads the daily case CSV, slices it into five fixed date windows and shows
//! one window at a time with annotations, hover tooltips and static export.

pub mod charts;
pub mod config;
pub mod data;
pub mod export;
pub mod gui;
pub mod ppt;
pub mod scene;
pub mod stats;
