//! Chart Viewer Widget
//! Central panel showing the active scene, cross-faded on every scene change.

use crate::charts::ChartPlotter;
use crate::data::MarkerInfo;
use crate::scene::{SceneController, SceneId, SceneView};
use egui::{Color32, RichText};

/// What the central panel should show instead of a scene.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerState {
    Empty,
    Loading,
    Failed(String),
    Ready,
}

pub struct ChartViewer {
    views: Vec<SceneView>,
    state: ViewerState,
    transition_secs: f32,
    /// Marker under the pointer during the last frame.
    pub hovered: Option<MarkerInfo>,
}

impl ChartViewer {
    pub fn new(transition_secs: f32) -> Self {
        Self {
            views: Vec::new(),
            state: ViewerState::Empty,
            transition_secs,
            hovered: None,
        }
    }

    pub fn set_views(&mut self, views: Vec<SceneView>) {
        self.views = views;
        self.state = ViewerState::Ready;
        self.hovered = None;
    }

    pub fn set_loading(&mut self) {
        self.views.clear();
        self.state = ViewerState::Loading;
        self.hovered = None;
    }

    pub fn set_failed(&mut self, message: impl Into<String>) {
        self.views.clear();
        self.state = ViewerState::Failed(message.into());
        self.hovered = None;
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn views(&self) -> &[SceneView] {
        &self.views
    }

    pub fn view(&self, id: SceneId) -> Option<&SceneView> {
        self.views.iter().find(|v| v.id == id)
    }

    pub fn show(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, controller: &SceneController) {
        match &self.state {
            ViewerState::Empty => {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No Data").size(20.0));
                });
                return;
            }
            ViewerState::Loading => {
                ui.centered_and_justified(|ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(RichText::new("Loading dataset...").size(18.0));
                    });
                });
                return;
            }
            ViewerState::Failed(message) => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new(format!("Could not load the dataset:\n{}", message))
                            .size(16.0)
                            .color(Color32::from_rgb(220, 53, 69)),
                    );
                });
                return;
            }
            ViewerState::Ready => {}
        }

        // Every scene keeps an animation value so a newly active one starts from zero.
        let active = controller.active_scene();
        let fades: Vec<(SceneId, f32)> = SceneId::all()
            .map(|id| {
                let target = controller.visibility(id).opacity > 0.0;
                let value = ctx.animate_bool_with_time(
                    egui::Id::new(("scene_fade", id.get())),
                    target,
                    self.transition_secs,
                );
                (id, value)
            })
            .collect();
        let layers = Self::draw_order(active, &fades);

        let Some(view) = self.views.iter().find(|v| v.id == active) else {
            self.hovered = None;
            return;
        };
        let opacity = layers.last().map_or(1.0, |&(_, value)| value);

        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(&view.title)
                    .size(18.0)
                    .strong()
                    .color(ui.visuals().text_color().gamma_multiply(opacity)),
            );
        });
        if view.is_empty() {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("No data in window").color(Color32::GRAY));
            });
        }
        ui.add_space(6.0);

        // Outgoing scenes fade out underneath the incoming one in the same rect.
        let rect = ui.available_rect_before_wrap();
        let mut hovered = None;
        for &(id, value) in &layers {
            let Some(layer) = self.views.iter().find(|v| v.id == id) else {
                continue;
            };
            let markers_visible = controller.visibility(id).markers_visible;
            let mut child = ui.new_child(egui::UiBuilder::new().max_rect(rect));
            let hit = ChartPlotter::draw_scene(&mut child, layer, value, markers_visible);
            if id == active {
                hovered = hit;
            }
        }
        ui.allocate_rect(rect, egui::Sense::hover());
        self.hovered = hovered;
    }

    /// Scenes to draw this frame, bottom first: every scene still fading out,
    /// then the active scene last so it sits on top.
    pub fn draw_order(active: SceneId, fades: &[(SceneId, f32)]) -> Vec<(SceneId, f32)> {
        let mut layers: Vec<(SceneId, f32)> = fades
            .iter()
            .copied()
            .filter(|&(id, value)| id != active && value > 0.0)
            .collect();
        let incoming = fades
            .iter()
            .find(|&&(id, _)| id == active)
            .map_or(1.0, |&(_, value)| value);
        layers.push((active, incoming));
        layers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_failure_clears_views() {
        let controller = SceneController::default();
        let mut viewer = ChartViewer::new(0.5);
        assert_eq!(viewer.state(), &ViewerState::Empty);

        viewer.set_views(controller.build_views(&[]));
        assert_eq!(viewer.views().len(), 5);
        assert!(viewer.view(SceneId::FIRST).is_some());

        viewer.set_failed("Row 2: invalid date '2021-02-30'");
        assert!(viewer.views().is_empty());
        assert!(matches!(viewer.state(), ViewerState::Failed(msg) if msg.contains("Row 2")));
    }

    #[test]
    fn outgoing_scene_is_drawn_under_the_incoming_one() {
        let id = |n| SceneId::new(n).unwrap();
        let fades = [(id(1), 0.6), (id(2), 0.4), (id(3), 0.0), (id(4), 0.0), (id(5), 0.0)];
        assert_eq!(
            ChartViewer::draw_order(id(2), &fades),
            vec![(id(1), 0.6), (id(2), 0.4)]
        );

        let settled = [(id(1), 0.0), (id(2), 1.0), (id(3), 0.0), (id(4), 0.0), (id(5), 0.0)];
        assert_eq!(ChartViewer::draw_order(id(2), &settled), vec![(id(2), 1.0)]);
    }
}
