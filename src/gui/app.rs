//! COVID Story Main Application
//! Main window with control panel and scene viewer.

use crate::config::StoryConfig;
use crate::data::{CaseRecord, DataLoader, LoadError};
use crate::export::{ImageFormat, SceneExporter};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::scene::SceneController;
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{error, info, warn};

/// CSV loading result from background thread
enum LoadResult {
    Complete {
        records: Vec<CaseRecord>,
        path: PathBuf,
    },
    Error(LoadError),
}

/// Main application window.
pub struct StoryApp {
    config: StoryConfig,
    loader: DataLoader,
    controller: SceneController,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
}

impl StoryApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: StoryConfig) -> Self {
        let mut app = Self {
            loader: DataLoader::new(),
            controller: SceneController::default(),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(config.transition_secs),
            load_rx: None,
            config,
        };
        let path = app.config.dataset_path.clone();
        app.start_load(path);
        app
    }

    fn is_loading(&self) -> bool {
        self.load_rx.is_some()
    }

    /// Load a dataset in a background thread; results arrive in `check_load_results`.
    fn start_load(&mut self, path: PathBuf) {
        if self.is_loading() {
            return;
        }

        self.control_panel.dataset_path = Some(path.clone());
        self.control_panel.exports_enabled = false;
        self.control_panel.set_progress(0.0, "Loading CSV file...");
        self.chart_viewer.set_loading();

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let result = match DataLoader::read_csv(&path) {
                Ok(records) => LoadResult::Complete { records, path },
                Err(e) => LoadResult::Error(e),
            };
            let _ = tx.send(result);
        });
    }

    fn handle_browse_csv(&mut self) {
        if self.is_loading() {
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_load(path);
        }
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete { records, path }) => {
                let days = records.len();
                self.loader.set_records(records, path);
                self.chart_viewer
                    .set_views(self.controller.build_views(self.loader.records()));
                self.control_panel.exports_enabled = true;
                self.control_panel
                    .set_progress(100.0, &format!("Loaded {} days", days));
            }
            Ok(LoadResult::Error(e)) => {
                error!(error = %e, "dataset load failed");
                self.chart_viewer.set_failed(e.to_string());
                self.control_panel.set_error(&format!("Error: {}", e));
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => self.load_rx = Some(rx),
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                error!("loader thread exited without a result");
                self.chart_viewer.set_failed("loader stopped unexpectedly");
                self.control_panel.set_error("Error: loader stopped unexpectedly");
            }
        }
    }

    fn handle_activate_scene(&mut self, scene_id: u8) {
        match self.controller.activate_scene(scene_id) {
            Ok(Some(transition)) => {
                self.chart_viewer.hovered = None;
                info!(to = %transition.to, "showing scene");
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "scene request rejected");
                self.control_panel.set_error(&e.to_string());
            }
        }
    }

    fn handle_export_images(&mut self, format: ImageFormat) {
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return; // User cancelled
        };

        self.control_panel.set_progress(10.0, "Rendering scenes...");
        match SceneExporter::write_images(
            self.chart_viewer.views(),
            &dir,
            format,
            self.config.export_width,
            self.config.export_height,
        ) {
            Ok(paths) => {
                self.control_panel.set_progress(
                    100.0,
                    &format!("Exported {} {} files", paths.len(), format.extension()),
                );
                self.control_panel.last_export = Some(dir);
            }
            Err(e) => {
                error!(error = %e, "image export failed");
                self.control_panel.set_error(&format!("Export error: {:#}", e));
            }
        }
    }

    fn handle_export_deck(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PowerPoint", &["pptx"])
            .set_file_name("covid_story.pptx")
            .save_file()
        else {
            return;
        };

        self.control_panel.set_progress(10.0, "Rendering scenes...");
        match SceneExporter::write_deck(
            self.chart_viewer.views(),
            &path,
            self.config.export_width,
            self.config.export_height,
        ) {
            Ok(()) => {
                self.control_panel.set_progress(100.0, "Deck exported");
                self.control_panel.last_export = Some(path);
            }
            Err(e) => {
                error!(error = %e, "deck export failed");
                self.control_panel.set_error(&format!("Deck error: {:#}", e));
            }
        }
    }

    fn handle_open_last_export(&mut self) {
        if let Some(path) = &self.control_panel.last_export {
            if let Err(e) = open::that(path) {
                warn!(path = %path.display(), error = %e, "could not open export");
            }
        }
    }
}

impl eframe::App for StoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();
        if self.is_loading() {
            ctx.request_repaint();
        }

        let active = self.controller.active_scene();
        let stats = self.chart_viewer.view(active).map(|v| v.stats.clone());

        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui, active, stats.as_ref()) {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::ActivateScene(id) => self.handle_activate_scene(id),
                        ControlPanelAction::ExportImages(format) => {
                            self.handle_export_images(format)
                        }
                        ControlPanelAction::ExportDeck => self.handle_export_deck(),
                        ControlPanelAction::OpenLastExport => self.handle_open_last_export(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ctx, ui, &self.controller);
        });
    }
}
