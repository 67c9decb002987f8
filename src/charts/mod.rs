//! Charts module - Interactive and static scene rendering

mod plotter;
mod renderer;

pub use plotter::{color32, ChartPlotter};
pub use renderer::{RenderError, StaticSceneRenderer};
