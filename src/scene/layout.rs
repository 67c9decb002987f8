//! Canvas Layout Module
//! Reference canvas geometry and linear scales shared by both renderers.
//!
//! Annotation positions are authored against a 1200x600 canvas with fixed
//! margins; other canvas sizes scale those positions proportionally.

/// Canvas margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for CanvasLayout {
    fn default() -> Self {
        Self::reference()
    }
}

impl CanvasLayout {
    pub const REFERENCE_WIDTH: f64 = 1200.0;
    pub const REFERENCE_HEIGHT: f64 = 600.0;

    /// The canvas annotations were authored on.
    pub fn reference() -> Self {
        Self {
            width: Self::REFERENCE_WIDTH,
            height: Self::REFERENCE_HEIGHT,
            margin: Margin {
                top: 30.0,
                right: 30.0,
                bottom: 50.0,
                left: 100.0,
            },
        }
    }

    /// Reference layout stretched to `width` x `height`.
    pub fn scaled_to(width: f64, height: f64) -> Self {
        let reference = Self::reference();
        let sx = width / reference.width;
        let sy = height / reference.height;
        Self {
            width,
            height,
            margin: Margin {
                top: reference.margin.top * sy,
                right: reference.margin.right * sx,
                bottom: reference.margin.bottom * sy,
                left: reference.margin.left * sx,
            },
        }
    }

    /// Horizontal and vertical factors from reference pixels to this canvas.
    pub fn factors(&self) -> (f64, f64) {
        (
            self.width / Self::REFERENCE_WIDTH,
            self.height / Self::REFERENCE_HEIGHT,
        )
    }

    /// Map a reference-canvas point onto this canvas.
    pub fn project(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let (sx, sy) = self.factors();
        (x * sx, y * sy)
    }

    /// Pixel span of the plotting area along x: left edge to right edge.
    pub fn x_range(&self) -> (f64, f64) {
        (self.margin.left, self.width - self.margin.right)
    }

    /// Pixel span along y, bottom first so larger values map higher.
    pub fn y_range(&self) -> (f64, f64) {
        (self.height - self.margin.bottom, self.margin.top)
    }
}

/// Linear mapping from a data domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// A zero-width domain maps every value to the middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return (d0 + d1) / 2.0;
        }
        d0 + (pixel - r0) / (r1 - r0) * (d1 - d0)
    }
}

/// X and y scales of one scene on one canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneScales {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl SceneScales {
    pub fn new(layout: &CanvasLayout, x_domain: (f64, f64), y_domain: (f64, f64)) -> Self {
        Self {
            x: LinearScale::new(x_domain, layout.x_range()),
            y: LinearScale::new(y_domain, layout.y_range()),
        }
    }

    pub fn to_pixel(&self, [x, y]: [f64; 2]) -> (f64, f64) {
        (self.x.map(x), self.y.map(y))
    }

    pub fn to_data(&self, (px, py): (f64, f64)) -> [f64; 2] {
        [self.x.invert(px), self.y.invert(py)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_scales_match_canvas_margins() {
        let layout = CanvasLayout::reference();
        let scales = SceneScales::new(&layout, (0.0, 100.0), (0.0, 90_000.0));
        assert_eq!(scales.to_pixel([0.0, 0.0]), (100.0, 550.0));
        assert_eq!(scales.to_pixel([100.0, 90_000.0]), (1170.0, 30.0));
        let [x, y] = scales.to_data((635.0, 290.0));
        assert!((x - 50.0).abs() < 1e-9);
        assert!((y - 45_000.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_domain_does_not_divide_by_zero() {
        let scale = LinearScale::new((5.0, 5.0), (100.0, 1170.0));
        assert_eq!(scale.map(5.0), 635.0);
        assert!(scale.map(42.0).is_finite());
    }

    #[test]
    fn scaled_layout_projects_reference_points() {
        let layout = CanvasLayout::scaled_to(600.0, 300.0);
        assert_eq!(layout.project((490.0, 70.0)), (245.0, 35.0));
        assert_eq!(layout.x_range(), (50.0, 585.0));
        assert_eq!(layout.y_range(), (275.0, 15.0));
    }
}
