//! Scene Controller Module
//! Owns the active scene and turns the dataset into per-scene views.

use crate::data::{CaseRecord, DataProcessor, DateExtent};
use crate::scene::catalog::SceneCatalog;
use crate::scene::definition::{SceneDefinition, SceneError, SceneId};
use crate::scene::view::SceneView;
use tracing::{debug, info};

/// A change of active scene the renderer should animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneTransition {
    pub from: SceneId,
    pub to: SceneId,
}

/// Target presentation state of one scene group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneVisibility {
    pub opacity: f32,
    pub markers_visible: bool,
}

/// Holds the scene catalog and which scene is on screen.
#[derive(Debug, Clone)]
pub struct SceneController {
    catalog: SceneCatalog,
    active: SceneId,
}

impl Default for SceneController {
    fn default() -> Self {
        Self::new(SceneCatalog::new_york())
    }
}

impl SceneController {
    /// Starts on the first scene.
    pub fn new(catalog: SceneCatalog) -> Self {
        Self {
            catalog,
            active: SceneId::FIRST,
        }
    }

    pub fn catalog(&self) -> &SceneCatalog {
        &self.catalog
    }

    pub fn definition(&self, id: SceneId) -> &SceneDefinition {
        self.catalog.get(id)
    }

    pub fn active_scene(&self) -> SceneId {
        self.active
    }

    /// Switch the visible scene.
    ///
    /// Returns `Ok(None)` when `scene_id` is already active. Ids outside
    /// `1..=5` are rejected and leave the active scene untouched.
    pub fn activate_scene(&mut self, scene_id: u8) -> Result<Option<SceneTransition>, SceneError> {
        let to = SceneId::new(scene_id)?;
        if to == self.active {
            debug!(scene = %to, "scene already active");
            return Ok(None);
        }

        let transition = SceneTransition {
            from: self.active,
            to,
        };
        self.active = to;
        info!(from = %transition.from, to = %transition.to, "scene activated");
        Ok(Some(transition))
    }

    /// Full opacity and markers for the active scene, hidden otherwise.
    pub fn visibility(&self, id: SceneId) -> SceneVisibility {
        let active = id == self.active;
        SceneVisibility {
            opacity: if active { 1.0 } else { 0.0 },
            markers_visible: active,
        }
    }

    /// Records inside the scene's inclusive date window, in dataset order.
    pub fn scene_data(&self, id: SceneId, dataset: &[CaseRecord]) -> Vec<CaseRecord> {
        let scene = self.catalog.get(id);
        DataProcessor::filter_window(dataset, scene.start, scene.end)
    }

    /// Date extent of a scene's data; empty subsets have none.
    pub fn extent(id: SceneId, scene_data: &[CaseRecord]) -> Result<DateExtent, SceneError> {
        DataProcessor::extent(scene_data).ok_or(SceneError::EmptySceneData(id))
    }

    pub fn build_view(&self, id: SceneId, dataset: &[CaseRecord]) -> SceneView {
        SceneView::build(self.catalog.get(id), self.scene_data(id, dataset))
    }

    /// Views for all five scenes, in id order.
    pub fn build_views(&self, dataset: &[CaseRecord]) -> Vec<SceneView> {
        SceneId::all().map(|id| self.build_view(id, dataset)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(date: NaiveDate, cases: u64) -> CaseRecord {
        CaseRecord::new(date, "New York", cases, 0)
    }

    #[test]
    fn activation_is_idempotent() {
        let mut controller = SceneController::default();
        assert_eq!(controller.active_scene().get(), 1);

        let first = controller.activate_scene(3).unwrap();
        assert_eq!(
            first,
            Some(SceneTransition {
                from: SceneId::FIRST,
                to: SceneId::new(3).unwrap(),
            })
        );
        assert_eq!(controller.activate_scene(3).unwrap(), None);
        assert_eq!(controller.active_scene().get(), 3);
    }

    #[test]
    fn invalid_scene_leaves_state_alone() {
        let mut controller = SceneController::default();
        controller.activate_scene(2).unwrap();
        assert_eq!(
            controller.activate_scene(6),
            Err(SceneError::InvalidSceneRequest(6))
        );
        assert_eq!(
            controller.activate_scene(0),
            Err(SceneError::InvalidSceneRequest(0))
        );
        assert_eq!(controller.active_scene().get(), 2);
    }

    #[test]
    fn only_active_scene_is_visible() {
        let mut controller = SceneController::default();
        controller.activate_scene(4).unwrap();
        for id in SceneId::all() {
            let vis = controller.visibility(id);
            if id.get() == 4 {
                assert_eq!(vis.opacity, 1.0);
                assert!(vis.markers_visible);
            } else {
                assert_eq!(vis.opacity, 0.0);
                assert!(!vis.markers_visible);
            }
        }
    }

    #[test]
    fn scene_data_uses_inclusive_window() {
        let controller = SceneController::default();
        let dataset = vec![
            record(ymd(2021, 1, 22), 1),
            record(ymd(2021, 1, 23), 2),
            record(ymd(2021, 5, 1), 3),
            record(ymd(2021, 5, 2), 4),
        ];
        let first = controller.scene_data(SceneId::FIRST, &dataset);
        let cases: Vec<u64> = first.iter().map(|r| r.new_cases).collect();
        assert_eq!(cases, [2, 3]);

        let second = controller.scene_data(SceneId::new(2).unwrap(), &dataset);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].new_cases, 4);
    }

    #[test]
    fn empty_scene_has_no_extent() {
        let controller = SceneController::default();
        let id = SceneId::new(3).unwrap();
        let data = controller.scene_data(id, &[record(ymd(2021, 1, 30), 5)]);
        assert!(data.is_empty());
        assert_eq!(
            SceneController::extent(id, &data),
            Err(SceneError::EmptySceneData(id))
        );
        assert_eq!(controller.build_views(&[]).len(), 5);
    }
}
