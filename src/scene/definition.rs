//! Scene Definition Module
//! Static description of one scene: its date window, styling and annotations.

use crate::data::{DateExtent, DATE_FORMAT};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("Scene {0} does not exist (valid scenes are 1 to 5)")]
    InvalidSceneRequest(u8),
    #[error("{0} has no records in its date window")]
    EmptySceneData(SceneId),
}

/// Identifier of one of the five scenes. Always in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SceneId(pub(crate) u8);

impl SceneId {
    pub const COUNT: u8 = 5;
    pub const FIRST: SceneId = SceneId(1);

    pub fn new(id: u8) -> Result<Self, SceneError> {
        if (1..=Self::COUNT).contains(&id) {
            Ok(Self(id))
        } else {
            Err(SceneError::InvalidSceneRequest(id))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position in the catalog.
    pub(crate) fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    pub fn all() -> impl Iterator<Item = SceneId> {
        (1..=Self::COUNT).map(SceneId)
    }
}

impl TryFrom<u8> for SceneId {
    type Error = SceneError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scene {}", self.0)
    }
}

/// Plain RGB colour, converted to each backend's colour type at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    /// Note box fill (papaya whip).
    pub const NOTE_FILL: Rgb = Rgb(255, 239, 213);
}

/// Named period used to colour the overview line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    pub name: &'static str,
    /// Last day of the phase, inclusive.
    pub end: NaiveDate,
    pub color: Rgb,
}

/// How the case line is stroked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineStyle {
    Solid(Rgb),
    /// Colour each segment by the phase its end point falls in.
    Phased(Vec<Phase>),
}

/// Boxed block of explanatory text at a fixed canvas position.
///
/// Coordinates are pixels on the 1200x600 reference canvas; `text_x`/`text_y`
/// is the baseline of the first line.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub text_x: f64,
    pub text_y: f64,
    pub lines: Vec<&'static str>,
}

/// Arrow and caption pointing at the data point of a given day.
///
/// Offsets are reference-canvas pixels relative to the anchored point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerNote {
    pub anchor: NaiveDate,
    pub tail: (f64, f64),
    pub text: (f64, f64),
    pub lines: Vec<&'static str>,
}

/// One pre-authored scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDefinition {
    pub id: SceneId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub y_domain: (f64, f64),
    pub line: LineStyle,
    /// Whether per-day markers (and their hover tooltips) are drawn.
    pub show_markers: bool,
    pub notes: Vec<NoteBox>,
    pub pointers: Vec<PointerNote>,
}

impl SceneDefinition {
    pub fn title(&self) -> String {
        format!(
            "New reported cases by day in New York from {} to {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }

    pub fn window(&self) -> DateExtent {
        DateExtent::new(self.start, self.end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Stroke colour of the segment ending on `date`.
    pub fn color_at(&self, date: NaiveDate) -> Rgb {
        match &self.line {
            LineStyle::Solid(color) => *color,
            LineStyle::Phased(phases) => phases
                .iter()
                .find(|p| date <= p.end)
                .or_else(|| phases.last())
                .map(|p| p.color)
                .unwrap_or(Rgb::BLACK),
        }
    }

    /// Legend entries; only phased scenes carry a legend.
    pub fn legend(&self) -> Vec<(&'static str, Rgb)> {
        match &self.line {
            LineStyle::Solid(_) => Vec::new(),
            LineStyle::Phased(phases) => phases.iter().map(|p| (p.name, p.color)).collect(),
        }
    }
}
