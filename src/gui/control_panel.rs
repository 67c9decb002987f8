//! Control Panel Widget
//! Left side panel: dataset, scene buttons, scene summary and export.

use crate::export::ImageFormat;
use crate::scene::SceneId;
use crate::stats::SceneStats;
use egui::{Color32, RichText};
use std::path::PathBuf;

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);
const OK_COLOR: Color32 = Color32::from_rgb(40, 167, 69);

/// Left side control panel.
pub struct ControlPanel {
    pub dataset_path: Option<PathBuf>,
    pub progress: f32,
    pub status: String,
    pub is_error: bool,
    pub exports_enabled: bool,
    pub last_export: Option<PathBuf>,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            dataset_path: None,
            progress: 0.0,
            status: "Ready".to_string(),
            is_error: false,
            exports_enabled: false,
            last_export: None,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        active: SceneId,
        stats: Option<&SceneStats>,
    ) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("COVID-19 in New York")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(RichText::new("New reported cases by day").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();

        // ===== Data Source =====
        ui.label(RichText::new("Data Source").size(14.0).strong());
        ui.add_space(5.0);
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let name = self
                        .dataset_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());
                    ui.label(RichText::new(name).size(12.0));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(10.0);
        ui.separator();

        // ===== Scenes =====
        ui.label(RichText::new("Scenes").size(14.0).strong());
        ui.add_space(5.0);
        ui.horizontal_wrapped(|ui| {
            for id in SceneId::all() {
                let button = egui::Button::new(RichText::new(id.to_string()).size(14.0))
                    .selected(id == active)
                    .min_size(egui::vec2(70.0, 28.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ActivateScene(id.get());
                }
            }
        });

        ui.add_space(10.0);
        ui.separator();

        // ===== Summary =====
        ui.label(RichText::new("Scene Summary").size(14.0).strong());
        ui.add_space(5.0);
        match stats {
            Some(stats) if !stats.is_empty() => Self::stats_grid(ui, active, stats),
            Some(_) => {
                ui.label(RichText::new("No data in window").color(Color32::GRAY));
            }
            None => {
                ui.label(RichText::new("No dataset loaded").color(Color32::GRAY));
            }
        }

        ui.add_space(10.0);
        ui.separator();

        // ===== Export =====
        ui.label(RichText::new("Export").size(14.0).strong());
        ui.add_space(5.0);
        ui.add_enabled_ui(self.exports_enabled, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Export PNG").clicked() {
                    action = ControlPanelAction::ExportImages(ImageFormat::Png);
                }
                if ui.button("Export SVG").clicked() {
                    action = ControlPanelAction::ExportImages(ImageFormat::Svg);
                }
                if ui.button("Export Deck").clicked() {
                    action = ControlPanelAction::ExportDeck;
                }
            });
        });
        if self.last_export.is_some() && ui.small_button("Open last export").clicked() {
            action = ControlPanelAction::OpenLastExport;
        }

        ui.add_space(10.0);
        ui.separator();

        // ===== Progress =====
        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );
        ui.add_space(5.0);
        let status_color = if self.is_error {
            ERROR_COLOR
        } else if self.progress >= 100.0 {
            OK_COLOR
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    fn stats_grid(ui: &mut egui::Ui, active: SceneId, stats: &SceneStats) {
        egui::Grid::new(("scene_stats", active.get()))
            .striped(true)
            .num_columns(2)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                let mut row = |name: &str, value: String| {
                    ui.label(RichText::new(name).size(11.0).strong());
                    ui.label(RichText::new(value).size(11.0));
                    ui.end_row();
                };
                row("Days", stats.days.to_string());
                row("Total cases", stats.total_cases.to_string());
                row("Total deaths", stats.total_deaths.to_string());
                row("Mean / day", format!("{:.1}", stats.mean_cases));
                row("Median / day", format!("{:.1}", stats.median_cases));
                row("Std dev", format!("{:.1}", stats.std_cases));
                if let Some(peak) = stats.peak {
                    row("Peak", format!("{} ({})", peak.cases, peak.date));
                }
                if let Some(trough) = stats.trough {
                    row("Lowest", format!("{} ({})", trough.cases, trough.date));
                }
            });
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
        self.is_error = false;
    }

    pub fn set_error(&mut self, status: &str) {
        self.progress = 0.0;
        self.status = status.to_string();
        self.is_error = true;
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    ActivateScene(u8),
    ExportImages(ImageFormat),
    ExportDeck,
    OpenLastExport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_flagged_until_next_progress() {
        let mut panel = ControlPanel::new();
        panel.set_error("Error: missing column 'cases'");
        assert!(panel.is_error);
        assert_eq!(panel.progress, 0.0);

        panel.set_progress(100.0, "Loaded 3 days");
        assert!(!panel.is_error);
        assert_eq!(panel.status, "Loaded 3 days");
    }
}
