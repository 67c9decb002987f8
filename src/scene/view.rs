//! Scene View Module
//! Everything a renderer needs to draw one scene, derived from its definition
//! and the filtered dataset.

use crate::data::{date_to_x, CaseRecord, DataProcessor, DateExtent, MarkerInfo};
use crate::scene::definition::{NoteBox, Rgb, SceneDefinition, SceneId};
use crate::scene::layout::{CanvasLayout, SceneScales};
use crate::stats::{SceneStats, StatsCalculator};
use tracing::{debug, warn};

/// Consecutive line segments sharing one stroke colour, in plot coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRun {
    pub color: Rgb,
    pub points: Vec<[f64; 2]>,
}

/// Pointer annotation whose anchor day was found in the data.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPointer {
    pub marker: MarkerInfo,
    /// Anchor in plot coordinates.
    pub anchor: [f64; 2],
    pub tail: (f64, f64),
    pub text: (f64, f64),
    pub lines: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct SceneView {
    pub id: SceneId,
    pub title: String,
    pub records: Vec<CaseRecord>,
    /// Data extent, or the scene window when the subset is empty.
    pub x_domain: DateExtent,
    pub y_domain: (f64, f64),
    pub runs: Vec<LineRun>,
    pub show_markers: bool,
    pub notes: Vec<NoteBox>,
    pub pointers: Vec<ResolvedPointer>,
    pub legend: Vec<(&'static str, Rgb)>,
    pub stats: SceneStats,
}

impl SceneView {
    /// `records` must already be filtered to the scene window.
    pub fn build(definition: &SceneDefinition, records: Vec<CaseRecord>) -> Self {
        let x_domain = DataProcessor::extent(&records).unwrap_or_else(|| {
            debug!(scene = %definition.id, "empty scene, using window as x domain");
            definition.window()
        });

        let pointers = if records.is_empty() {
            if !definition.pointers.is_empty() {
                warn!(scene = %definition.id, "no data in window, skipping pointer annotations");
            }
            Vec::new()
        } else {
            definition
                .pointers
                .iter()
                .filter_map(|note| match DataProcessor::find_by_date(&records, note.anchor) {
                    Some(record) => Some(ResolvedPointer {
                        marker: MarkerInfo::from(record),
                        anchor: record.plot_point(),
                        tail: note.tail,
                        text: note.text,
                        lines: note.lines.clone(),
                    }),
                    None => {
                        warn!(
                            scene = %definition.id,
                            anchor = %note.anchor,
                            "annotation anchor missing from data, skipping"
                        );
                        None
                    }
                })
                .collect()
        };

        Self {
            id: definition.id,
            title: definition.title(),
            runs: Self::line_runs(definition, &records),
            stats: StatsCalculator::scene_stats(&records),
            x_domain,
            y_domain: definition.y_domain,
            show_markers: definition.show_markers,
            notes: definition.notes.clone(),
            pointers,
            legend: definition.legend(),
            records,
        }
    }

    fn line_runs(definition: &SceneDefinition, records: &[CaseRecord]) -> Vec<LineRun> {
        let mut runs: Vec<LineRun> = Vec::new();
        for pair in records.windows(2) {
            let color = definition.color_at(pair[1].date);
            match runs.last_mut() {
                Some(run) if run.color == color => run.points.push(pair[1].plot_point()),
                _ => runs.push(LineRun {
                    color,
                    points: vec![pair[0].plot_point(), pair[1].plot_point()],
                }),
            }
        }
        runs
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn x_bounds(&self) -> (f64, f64) {
        self.x_domain.x_range()
    }

    /// X bounds for drawing; a single-day extent is widened by a day each side.
    pub fn plot_x_range(&self) -> (f64, f64) {
        let (x0, x1) = self.x_bounds();
        if x1 > x0 {
            (x0, x1)
        } else {
            (x0 - 1.0, x1 + 1.0)
        }
    }

    /// Y bounds for the interactive plot: the case domain plus headroom the
    /// size of the reference top margin, so points just above the domain
    /// stay visible.
    pub fn plot_y_range(&self) -> (f64, f64) {
        let layout = CanvasLayout::reference();
        let (bottom, top) = layout.y_range();
        let headroom = layout.margin.top / (bottom - top);
        let (y0, y1) = self.y_domain;
        (y0, y1 + (y1 - y0) * headroom)
    }

    pub fn scales(&self, layout: &CanvasLayout) -> SceneScales {
        SceneScales::new(layout, self.plot_x_range(), self.y_domain)
    }

    /// Per-day markers; none for scenes drawn without them.
    pub fn markers(&self) -> impl Iterator<Item = MarkerInfo> + '_ {
        let records: &[CaseRecord] = if self.show_markers { &self.records } else { &[] };
        records.iter().map(MarkerInfo::from)
    }

    /// Marker on the day closest to plot coordinate `x`.
    pub fn nearest_marker(&self, x: f64) -> Option<MarkerInfo> {
        if !self.show_markers {
            return None;
        }
        DataProcessor::nearest_to_x(&self.records, x).map(MarkerInfo::from)
    }

    /// Marker under a pointer at pixel `pos`, within `radius` pixels.
    pub fn marker_at(
        &self,
        scales: &SceneScales,
        pos: (f64, f64),
        radius: f64,
    ) -> Option<MarkerInfo> {
        let [x, _] = scales.to_data(pos);
        let marker = self.nearest_marker(x)?;
        let (mx, my) = scales.to_pixel([date_to_x(marker.date), marker.cases as f64]);
        let (dx, dy) = (mx - pos.0, my - pos.1);
        (dx * dx + dy * dy <= radius * radius).then_some(marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::catalog::SceneCatalog;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(date: NaiveDate, cases: u64) -> CaseRecord {
        CaseRecord::new(date, "New York", cases, 0)
    }

    #[test]
    fn resolves_pointer_on_anchor_day() {
        let catalog = SceneCatalog::new_york();
        let scene = catalog.get(SceneId::FIRST);
        let records = vec![
            record(ymd(2021, 3, 1), 100),
            record(ymd(2021, 3, 24), 20184),
            record(ymd(2021, 5, 1), 2199),
        ];
        let view = SceneView::build(scene, records);
        assert_eq!(view.x_domain, DateExtent::new(ymd(2021, 3, 1), ymd(2021, 5, 1)));
        assert_eq!(view.pointers.len(), 1);
        assert_eq!(view.pointers[0].marker.cases, 20184);
        assert_eq!(view.runs.len(), 1);
        assert_eq!(view.runs[0].points.len(), 3);
    }

    #[test]
    fn missing_anchor_skips_pointer_only() {
        let catalog = SceneCatalog::new_york();
        let scene = catalog.get(SceneId::FIRST);
        let view = SceneView::build(scene, vec![record(ymd(2021, 3, 1), 100)]);
        assert!(view.pointers.is_empty());
        assert_eq!(view.notes.len(), 1);
        assert!(view.runs.is_empty());
        assert_eq!(view.markers().count(), 1);
    }

    #[test]
    fn empty_scene_falls_back_to_window() {
        let catalog = SceneCatalog::new_york();
        let scene = catalog.get(SceneId::new(3).unwrap());
        let view = SceneView::build(scene, Vec::new());
        assert!(view.is_empty());
        assert_eq!(view.x_domain, scene.window());
        assert!(view.runs.is_empty());
        assert!(view.stats.is_empty());
        assert!(view.nearest_marker(0.0).is_none());
    }

    #[test]
    fn single_day_scene_gets_a_drawable_axis() {
        let catalog = SceneCatalog::new_york();
        let scene = catalog.get(SceneId::new(2).unwrap());
        let view = SceneView::build(scene, vec![record(ymd(2021, 6, 1), 600)]);
        let x = date_to_x(ymd(2021, 6, 1));
        assert_eq!(view.x_bounds(), (x, x));
        assert_eq!(view.plot_x_range(), (x - 1.0, x + 1.0));
    }

    #[test]
    fn plot_leaves_room_above_the_case_domain() {
        let catalog = SceneCatalog::new_york();
        let scene = catalog.get(SceneId::new(4).unwrap());
        let view = SceneView::build(scene, vec![record(ymd(2022, 1, 8), 90132)]);
        let (y0, y1) = view.plot_y_range();
        assert_eq!(y0, 0.0);
        assert!((y1 - 90_000.0 * (1.0 + 30.0 / 520.0)).abs() < 1e-6);
        assert!(y1 > 90132.0);
        assert_eq!(view.y_domain, (0.0, 90_000.0));
    }

    #[test]
    fn overview_splits_line_at_phase_boundaries() {
        let catalog = SceneCatalog::new_york();
        let overview = catalog.get(SceneId::new(5).unwrap());
        let records = vec![
            record(ymd(2021, 4, 30), 3000),
            record(ymd(2021, 5, 1), 2199),
            record(ymd(2021, 5, 2), 2000),
            record(ymd(2021, 5, 3), 1900),
        ];
        let view = SceneView::build(overview, records);
        assert_eq!(view.runs.len(), 2);
        assert_eq!(view.runs[0].points.len(), 2);
        // The second run starts on the last recession day so the line stays connected.
        assert_eq!(view.runs[1].points.len(), 3);
        assert_eq!(view.runs[0].points[1], view.runs[1].points[0]);
        assert_eq!(view.legend.len(), 4);
        assert_eq!(view.markers().count(), 0);
        assert!(view.nearest_marker(view.runs[0].points[0][0]).is_none());
    }

    #[test]
    fn hover_hits_only_near_markers() {
        let catalog = SceneCatalog::new_york();
        let scene = catalog.get(SceneId::FIRST);
        let records = vec![
            record(ymd(2021, 3, 1), 100),
            record(ymd(2021, 3, 24), 20184),
            record(ymd(2021, 5, 1), 2199),
        ];
        let view = SceneView::build(scene, records);
        let scales = view.scales(&CanvasLayout::reference());
        let target = scales.to_pixel([date_to_x(ymd(2021, 3, 24)), 20184.0]);

        let hit = view.marker_at(&scales, (target.0 + 2.0, target.1 - 2.0), 7.0);
        assert_eq!(hit.map(|m| m.cases), Some(20184));
        assert!(view.marker_at(&scales, (target.0, target.1 + 60.0), 7.0).is_none());
    }
}
