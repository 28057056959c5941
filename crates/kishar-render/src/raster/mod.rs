//! Pure primitive rasterization.
//!
//! Responsibilities:
//! - turn primitive parameters into vertex corner positions, UV rings, and
//!   scan-converted point/span lists
//! - own the sub-pixel constants that make thin geometry rasterize the
//!   intended pixels
//!
//! Nothing here owns or writes a buffer; the renderer front-end feeds the
//! results into the batch after clip rejection.

mod ellipse;
mod line;
mod nine_slice;
mod pixel;
mod quad;
mod rect;

pub use ellipse::{
    ellipse_points, fill_spans, outline_runs, EllipsePoints, OutlineRun, RowSpan, MAX_RADIUS,
};
pub use line::{classify_heading, line_quad, ortho_run_h, ortho_run_v, Heading, LineGeometry};
pub use nine_slice::{
    layout_tiles, NineSliceSource, SliceTile, BOTTOM, BOTTOM_LEFT, BOTTOM_RIGHT, CENTER, LEFT,
    RIGHT, TOP, TOP_LEFT, TOP_RIGHT,
};
pub use pixel::pixel_triangle;
pub use quad::{quad_corners, quad_uvs, QuadFlip};
pub use rect::{outline_edges, rect_corners};

use crate::coords::Vec2;

/// Axis-aligned bounding box of a corner set.
pub fn aabb(points: &[Vec2]) -> (Vec2, Vec2) {
    let mut min = points[0];
    let mut max = points[0];
    for p in &points[1..] {
        min = min.min(*p);
        max = max.max(*p);
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_of_rotated_corners() {
        let pts = [
            Vec2::new(5.0, 0.0),
            Vec2::new(10.0, 5.0),
            Vec2::new(5.0, 10.0),
            Vec2::new(0.0, 5.0),
        ];
        let (min, max) = aabb(&pts);
        assert_eq!(min, Vec2::new(0.0, 0.0));
        assert_eq!(max, Vec2::new(10.0, 10.0));
    }
}
