//! Static Scene Renderer
//! Draws a scene with plotters for export as SVG or PNG.
//!
//! Layout follows the reference canvas:
//! 1. Title centred in the top margin
//! 2. Date axis along the bottom, case axis on the left, fixed 0..90000
//! 3. Case line (phase coloured on the overview) and per-day markers
//! 4. Phase legend, note boxes and pointer annotations in canvas pixels

use crate::data::{date_to_x, x_to_date, DATE_FORMAT};
use crate::scene::{CanvasLayout, Rgb, SceneView};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;
use thiserror::Error;

const FONT: &str = "sans-serif";
const MARKER_RADIUS: f64 = 5.0;
const LINE_WIDTH: f64 = 2.5;
/// 1.2em at the 16px annotation size.
const LINE_HEIGHT: f64 = 19.2;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Pixel buffer does not match {0}x{1}")]
    Buffer(u32, u32),
}

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

pub struct StaticSceneRenderer;

impl StaticSceneRenderer {
    /// Render a scene as an SVG document.
    pub fn render_svg(view: &SceneView, width: u32, height: u32) -> Result<String, RenderError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            Self::draw_scene(&root, view).map_err(|e| RenderError::Draw(e.to_string()))?;
            root.present()
                .map_err(|e| RenderError::Draw(e.to_string()))?;
        }
        Ok(svg)
    }

    /// Render a scene to PNG bytes.
    pub fn render_png(view: &SceneView, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let mut pixels = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
            Self::draw_scene(&root, view).map_err(|e| RenderError::Draw(e.to_string()))?;
            root.present()
                .map_err(|e| RenderError::Draw(e.to_string()))?;
        }

        let img = image::RgbImage::from_raw(width, height, pixels)
            .ok_or(RenderError::Buffer(width, height))?;
        let mut png = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;
        Ok(png)
    }

    fn draw_scene<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, view: &SceneView) -> DrawResult<DB> {
        root.fill(&WHITE)?;

        let (w, h) = root.dim_in_pixel();
        let layout = CanvasLayout::scaled_to(w as f64, h as f64);
        let (sx, sy) = layout.factors();
        let font_scale = sx.min(sy);

        let (x0, x1) = view.plot_x_range();
        let (y0, y1) = view.y_domain;

        let mut chart = ChartBuilder::on(root)
            .margin_top(layout.margin.top as u32)
            .margin_right(layout.margin.right as u32)
            .x_label_area_size(layout.margin.bottom as u32)
            .y_label_area_size(layout.margin.left as u32)
            .build_cartesian_2d(x0..x1, y0..y1)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(6)
            .x_label_formatter(&|x| Self::tick_label(*x))
            .y_label_formatter(&|y| format!("{:.0}", y))
            .x_desc("Date")
            .y_desc("Cases")
            .label_style((FONT, 12.0 * font_scale))
            .axis_desc_style((FONT, 14.0 * font_scale))
            .draw()?;

        let stroke = ((LINE_WIDTH * font_scale).round() as u32).max(1);
        for run in &view.runs {
            chart.draw_series(LineSeries::new(
                run.points.iter().map(|p| (p[0], p[1])),
                rgb(run.color).stroke_width(stroke),
            ))?;
        }

        let radius = ((MARKER_RADIUS * font_scale).round() as u32).max(1);
        chart.draw_series(view.markers().map(|m| {
            Circle::new((date_to_x(m.date), m.cases as f64), radius, BLACK.filled())
        }))?;

        let title_style = (FONT, 20.0 * font_scale)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        root.draw(&Text::new(
            view.title.clone(),
            ((layout.width / 2.0) as i32, (layout.margin.top / 2.0) as i32),
            title_style,
        ))?;

        Self::draw_legend(root, view, &layout, font_scale)?;
        Self::draw_notes(root, view, &layout, font_scale)?;

        let anchors: Vec<(i32, i32)> = view
            .pointers
            .iter()
            .map(|p| chart.backend_coord(&(p.anchor[0], p.anchor[1])))
            .collect();
        for (pointer, anchor) in view.pointers.iter().zip(anchors) {
            let tail = (
                anchor.0 + (pointer.tail.0 * sx) as i32,
                anchor.1 + (pointer.tail.1 * sy) as i32,
            );
            root.draw(&PathElement::new(vec![tail, anchor], BLACK.stroke_width(2)))?;
            root.draw(&Polygon::new(
                Self::arrow_head(tail, anchor, 10.0 * font_scale).to_vec(),
                BLACK.filled(),
            ))?;

            let text_origin = (
                anchor.0 as f64 + pointer.text.0 * sx,
                anchor.1 as f64 + pointer.text.1 * sy,
            );
            Self::draw_lines(root, &pointer.lines, text_origin, font_scale)?;
        }

        Ok(())
    }

    fn draw_legend<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        view: &SceneView,
        layout: &CanvasLayout,
        font_scale: f64,
    ) -> DrawResult<DB> {
        let style = (FONT, 10.0 * font_scale)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));

        for (i, (name, color)) in view.legend.iter().enumerate() {
            let row = i as f64 * 20.0;
            let (x, y) = layout.project((125.0, 40.0 + row));
            let (x2, y2) = layout.project((144.0, 59.0 + row));
            root.draw(&Rectangle::new(
                [(x as i32, y as i32), (x2 as i32, y2 as i32)],
                rgb(*color).filled(),
            ))?;
            let (tx, ty) = layout.project((150.0, 50.0 + row));
            root.draw(&Text::new(name.to_string(), (tx as i32, ty as i32), style.clone()))?;
        }
        Ok(())
    }

    fn draw_notes<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        view: &SceneView,
        layout: &CanvasLayout,
        font_scale: f64,
    ) -> DrawResult<DB> {
        for note in &view.notes {
            let (x0, y0) = layout.project((note.x, note.y));
            let (x1, y1) = layout.project((note.x + note.width, note.y + note.height));
            let corners = [(x0 as i32, y0 as i32), (x1 as i32, y1 as i32)];
            root.draw(&Rectangle::new(corners, rgb(Rgb::NOTE_FILL).filled()))?;
            root.draw(&Rectangle::new(corners, BLACK.stroke_width(1)))?;
            Self::draw_lines(root, &note.lines, layout.project((note.text_x, note.text_y)), font_scale)?;
        }
        Ok(())
    }

    /// Left-aligned text block; `origin` is the first baseline.
    fn draw_lines<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        lines: &[&str],
        origin: (f64, f64),
        font_scale: f64,
    ) -> DrawResult<DB> {
        let style = (FONT, 16.0 * font_scale)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Bottom));
        for (i, line) in lines.iter().enumerate() {
            let y = origin.1 + i as f64 * LINE_HEIGHT * font_scale;
            root.draw(&Text::new(line.to_string(), (origin.0 as i32, y as i32), style.clone()))?;
        }
        Ok(())
    }

    pub(crate) fn tick_label(x: f64) -> String {
        x_to_date(x)
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Triangle with its point at `tip`, aligned with the `tail -> tip` direction.
    fn arrow_head(tail: (i32, i32), tip: (i32, i32), size: f64) -> [(i32, i32); 3] {
        let dx = (tip.0 - tail.0) as f64;
        let dy = (tip.1 - tail.1) as f64;
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 {
            return [tip; 3];
        }
        let (ux, uy) = (dx / len, dy / len);
        let back = (tip.0 as f64 - ux * size, tip.1 as f64 - uy * size);
        let half = size / 2.0;
        [
            tip,
            ((back.0 - uy * half).round() as i32, (back.1 + ux * half).round() as i32),
            ((back.0 + uy * half).round() as i32, (back.1 - ux * half).round() as i32),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataLoader;
    use crate::scene::SceneController;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    /// Rows in every scene window except the fluctuating one.
    fn views() -> Vec<SceneView> {
        let records = DataLoader::parse_csv(
            "date,state,cases,deaths
2021-03-24,New York,20184,88
2021-04-01,New York,9000,60
2021-06-01,New York,800,12
2021-11-16,New York,6200,22
2022-01-07,New York,90132,150
",
        )
        .unwrap();
        let views = SceneController::default().build_views(&records);
        assert!(views[2].is_empty());
        views
    }

    #[test]
    fn every_scene_renders_as_svg() {
        for view in views() {
            let svg = StaticSceneRenderer::render_svg(&view, 1200, 600).unwrap();
            assert!(svg.contains("<svg"), "scene {}", view.id);
            assert!(svg.contains(&view.title), "scene {} title missing", view.id);
        }
    }

    #[test]
    fn every_scene_renders_as_png() {
        for view in views() {
            let png = StaticSceneRenderer::render_png(&view, 1200, 600).unwrap();
            assert_eq!(&png[..8], &PNG_SIGNATURE, "scene {}", view.id);
        }
    }

    #[test]
    fn arrow_head_points_at_tip() {
        let head = StaticSceneRenderer::arrow_head((0, 0), (0, 40), 10.0);
        assert_eq!(head[0], (0, 40));
        assert_eq!(head[1], (-5, 30));
        assert_eq!(head[2], (5, 30));
        assert_eq!(StaticSceneRenderer::arrow_head((3, 3), (3, 3), 10.0), [(3, 3); 3]);
    }

    #[test]
    fn ticks_are_iso_dates() {
        let x = date_to_x(chrono::NaiveDate::from_ymd_opt(2021, 11, 16).unwrap());
        assert_eq!(StaticSceneRenderer::tick_label(x), "2021-11-16");
    }
}
