use crate::coords::Vec2;

use super::pixel::pixel_triangle;

/// Sub-pixel inset/outset applied to the ortho-line triangle so exactly the
/// intended pixel row/column rasterizes.
const EDGE_INSET: f32 = 0.1;

/// One triangle covering the horizontal 1-px run `x0..=x1` on row `y`.
///
/// The triangle's top edge sits just above the row, the far corner extends
/// twice the run length so the hypotenuse stays below the row's pixel
/// centers across the whole run, and the lower-left corner stops just past
/// the row so the next row is never touched.
#[inline]
pub fn ortho_run_h(x0: f32, x1: f32, y: f32) -> [Vec2; 3] {
    let w = x1 - x0 + 1.0;
    [
        Vec2::new(x0 - EDGE_INSET, y - EDGE_INSET),
        Vec2::new(x0 + 2.0 * w + EDGE_INSET, y - EDGE_INSET),
        Vec2::new(x0 - EDGE_INSET, y + 1.0 + EDGE_INSET),
    ]
}

/// One triangle covering the vertical 1-px run `y0..=y1` on column `x`.
#[inline]
pub fn ortho_run_v(x: f32, y0: f32, y1: f32) -> [Vec2; 3] {
    let h = y1 - y0 + 1.0;
    [
        Vec2::new(x - EDGE_INSET, y0 - EDGE_INSET),
        Vec2::new(x - EDGE_INSET, y0 + 2.0 * h + EDGE_INSET),
        Vec2::new(x + 1.0 + EDGE_INSET, y0 - EDGE_INSET),
    ]
}

/// Dominant-axis heading of a line, from comparing `|dx|` against `|dy|` and
/// the dominant component's sign. Ties go to the x axis.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Heading {
    East,
    South,
    West,
    North,
}

#[inline]
pub fn classify_heading(dx: f32, dy: f32) -> Heading {
    if dx.abs() >= dy.abs() {
        if dx >= 0.0 { Heading::East } else { Heading::West }
    } else if dy >= 0.0 {
        Heading::South
    } else {
        Heading::North
    }
}

/// Geometry produced for a line segment.
#[derive(Debug, Clone, PartialEq)]
pub enum LineGeometry {
    /// 1-px-wide quad in ring order.
    Quad([Vec2; 4]),
    /// Degenerate segment drawn as a single pixel.
    Pixel([Vec2; 3]),
    /// Nothing to draw (degenerate segment with a suppressed cap).
    Empty,
}

/// Builds the quad for an arbitrary-angle 1-px line between pixels
/// `(x0, y0)` and `(x1, y1)`.
///
/// Each endpoint is offset half a unit along the unit perpendicular to give
/// the quad its 1-px width. An endpoint with its cap on extends half a unit
/// along the line direction past the pixel center, covering the endpoint
/// pixel; a suppressed cap stops at the center, shortening the line by
/// exactly one half-pixel.
///
/// Coincident endpoints degenerate to a single pixel. The start/end cap
/// flags are still honored: both ends land on that one pixel, so it draws
/// only when neither cap is suppressed.
pub fn line_quad(x0: f32, y0: f32, x1: f32, y1: f32, start_cap: bool, end_cap: bool) -> LineGeometry {
    let dx = x1 - x0;
    let dy = y1 - y0;

    if dx == 0.0 && dy == 0.0 {
        if start_cap && end_cap {
            return LineGeometry::Pixel(pixel_triangle(x0, y0));
        }
        return LineGeometry::Empty;
    }

    let c0 = Vec2::new(x0 + 0.5, y0 + 0.5);
    let c1 = Vec2::new(x1 + 0.5, y1 + 0.5);

    let d = Vec2::new(dx, dy);
    let u = d / d.length();

    // The heading decides which side the perpendicular points to, keeping
    // corner order stable (first corner on the upper/left side in screen
    // space) across all four quadrants.
    let n = match classify_heading(dx, dy) {
        Heading::East | Heading::South => u.perp(),
        Heading::West | Heading::North => -u.perp(),
    };

    let ext0 = if start_cap { 0.5 } else { 0.0 };
    let ext1 = if end_cap { 0.5 } else { 0.0 };

    let a = c0 - u * ext0;
    let b = c1 + u * ext1;
    let half = n * 0.5;

    LineGeometry::Quad([a + half, b + half, b - half, a - half])
}
