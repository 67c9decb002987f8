//! Chart Plotter Module
//! Draws the active scene interactively using egui_plot.

use crate::charts::renderer::StaticSceneRenderer;
use crate::data::{date_to_x, MarkerInfo};
use crate::scene::{CanvasLayout, Rgb, SceneScales, SceneView};
use egui::{Align2, Color32, RichText, Stroke};
use egui_plot::{Arrows, Line, Plot, PlotBounds, PlotPoint, PlotPoints, PlotUi, Points, Polygon, Text};

const MARKER_RADIUS: f32 = 5.0;
const HOVER_RADIUS: f32 = 7.0;
const LINE_WIDTH: f32 = 2.5;
/// Reference-canvas pixels between annotation lines.
const LINE_HEIGHT: f64 = 19.2;

pub fn color32(color: Rgb) -> Color32 {
    Color32::from_rgb(color.0, color.1, color.2)
}

/// Creates the interactive scene chart using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw one scene at `opacity` and return the marker under the pointer, if any.
    ///
    /// Zooming and panning are disabled: each scene is a fixed frame of the story.
    pub fn draw_scene(
        ui: &mut egui::Ui,
        view: &SceneView,
        opacity: f32,
        markers_visible: bool,
    ) -> Option<MarkerInfo> {
        let (x0, x1) = view.plot_x_range();
        let (y0, y1) = view.plot_y_range();
        let scales = view.scales(&CanvasLayout::reference());

        let response = Plot::new(("scene", view.id.get()))
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .show_x(false)
            .show_y(false)
            .show_grid(false)
            .x_axis_label("Date")
            .y_axis_label("Cases")
            .x_axis_formatter(|mark, _range| StaticSceneRenderer::tick_label(mark.value))
            .y_axis_formatter(|mark, _range| {
                if mark.value >= 0.0 {
                    format!("{:.0}", mark.value)
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max([x0, y0], [x1, y1]));

                for run in &view.runs {
                    plot_ui.line(
                        Line::new(PlotPoints::from(run.points.clone()))
                            .color(color32(run.color).gamma_multiply(opacity))
                            .width(LINE_WIDTH),
                    );
                }

                let hovered = if markers_visible {
                    Self::hovered_marker(plot_ui, view)
                } else {
                    None
                };

                let markers: Vec<[f64; 2]> = view
                    .markers()
                    .filter(|_| markers_visible)
                    .map(|m| [date_to_x(m.date), m.cases as f64])
                    .collect();
                if !markers.is_empty() {
                    plot_ui.points(
                        Points::new(PlotPoints::from(markers))
                            .radius(MARKER_RADIUS)
                            .filled(true)
                            .color(Color32::BLACK.gamma_multiply(opacity)),
                    );
                }
                if let Some(marker) = hovered {
                    plot_ui.points(
                        Points::new(vec![[date_to_x(marker.date), marker.cases as f64]])
                            .radius(HOVER_RADIUS)
                            .filled(true)
                            .color(Color32::BLACK),
                    );
                }

                Self::draw_legend(plot_ui, view, &scales, opacity);
                Self::draw_notes(plot_ui, view, &scales, opacity);
                Self::draw_pointers(plot_ui, view, &scales, opacity);

                hovered
            });

        let hovered = response.inner;
        if let Some(marker) = hovered {
            response.response.on_hover_ui_at_pointer(|ui| {
                ui.label(RichText::new(marker.tooltip()).monospace());
            });
        }
        hovered
    }

    /// Nearest marker to the pointer, if it lies within the hover radius on screen.
    fn hovered_marker(plot_ui: &PlotUi, view: &SceneView) -> Option<MarkerInfo> {
        let pointer = plot_ui.pointer_coordinate()?;
        let marker = view.nearest_marker(pointer.x)?;
        let at = plot_ui.screen_from_plot(PlotPoint::new(date_to_x(marker.date), marker.cases as f64));
        let distance = plot_ui.screen_from_plot(pointer).distance(at);
        (distance <= HOVER_RADIUS).then_some(marker)
    }

    fn draw_legend(plot_ui: &mut PlotUi, view: &SceneView, scales: &SceneScales, opacity: f32) {
        for (i, (name, color)) in view.legend.iter().enumerate() {
            let row = i as f64 * 20.0;
            let swatch = Self::rect(scales, (125.0, 40.0 + row), (144.0, 59.0 + row));
            plot_ui.polygon(
                Polygon::new(swatch)
                    .fill_color(color32(*color).gamma_multiply(opacity))
                    .stroke(Stroke::NONE),
            );
            plot_ui.text(
                Text::new(Self::point(scales, (150.0, 50.0 + row)), *name)
                    .color(ink(opacity))
                    .anchor(Align2::LEFT_CENTER),
            );
        }
    }

    fn draw_notes(plot_ui: &mut PlotUi, view: &SceneView, scales: &SceneScales, opacity: f32) {
        for note in &view.notes {
            let corners = Self::rect(
                scales,
                (note.x, note.y),
                (note.x + note.width, note.y + note.height),
            );
            plot_ui.polygon(
                Polygon::new(corners)
                    .fill_color(color32(Rgb::NOTE_FILL).gamma_multiply(opacity))
                    .stroke(Stroke::new(1.0, Color32::BLACK.gamma_multiply(opacity))),
            );
            Self::draw_lines(plot_ui, scales, &note.lines, (note.text_x, note.text_y), opacity);
        }
    }

    fn draw_pointers(plot_ui: &mut PlotUi, view: &SceneView, scales: &SceneScales, opacity: f32) {
        for pointer in &view.pointers {
            let (ax, ay) = scales.to_pixel(pointer.anchor);
            let tail = scales.to_data((ax + pointer.tail.0, ay + pointer.tail.1));
            plot_ui.arrows(
                Arrows::new(vec![tail], vec![pointer.anchor])
                    .color(Color32::BLACK.gamma_multiply(opacity))
                    .tip_length(10.0),
            );
            Self::draw_lines(
                plot_ui,
                scales,
                &pointer.lines,
                (ax + pointer.text.0, ay + pointer.text.1),
                opacity,
            );
        }
    }

    /// Left-aligned lines starting at the reference-canvas baseline `origin`.
    fn draw_lines(
        plot_ui: &mut PlotUi,
        scales: &SceneScales,
        lines: &[&str],
        origin: (f64, f64),
        opacity: f32,
    ) {
        for (i, line) in lines.iter().enumerate() {
            let at = Self::point(scales, (origin.0, origin.1 + i as f64 * LINE_HEIGHT));
            plot_ui.text(
                Text::new(at, RichText::new(*line).size(14.0))
                    .color(ink(opacity))
                    .anchor(Align2::LEFT_BOTTOM),
            );
        }
    }

    fn point(scales: &SceneScales, px: (f64, f64)) -> PlotPoint {
        let [x, y] = scales.to_data(px);
        PlotPoint::new(x, y)
    }

    /// Axis-aligned rectangle between two reference-canvas corners.
    fn rect(scales: &SceneScales, (x0, y0): (f64, f64), (x1, y1): (f64, f64)) -> PlotPoints {
        PlotPoints::from(vec![
            scales.to_data((x0, y0)),
            scales.to_data((x1, y0)),
            scales.to_data((x1, y1)),
            scales.to_data((x0, y1)),
        ])
    }
}

fn ink(opacity: f32) -> Color32 {
    Color32::BLACK.gamma_multiply(opacity)
}
