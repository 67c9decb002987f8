//! Scene module - Scene definitions, the active-scene controller and render-ready views

mod catalog;
mod controller;
mod definition;
mod layout;
mod view;

pub use catalog::{SceneCatalog, Y_DOMAIN};
pub use controller::{SceneController, SceneTransition, SceneVisibility};
pub use definition::{
    LineStyle, NoteBox, Phase, PointerNote, Rgb, SceneDefinition, SceneError, SceneId,
};
pub use layout::{CanvasLayout, LinearScale, Margin, SceneScales};
pub use view::{LineRun, ResolvedPointer, SceneView};
