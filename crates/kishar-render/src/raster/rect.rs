use crate::coords::Vec2;

/// Local-space corners of a filled `w` x `h` rectangle, ring order.
#[inline]
pub fn rect_corners(w: f32, h: f32) -> [Vec2; 4] {
    [
        Vec2::new(0.0, 0.0),
        Vec2::new(w, 0.0),
        Vec2::new(w, h),
        Vec2::new(0.0, h),
    ]
}

/// The four 1-px edge bars of a rectangle outline, as local-space
/// `(x, y, w, h)` runs.
///
/// The left and right bars start one row down and stop one row early so the
/// corner pixels belong to the top/bottom bars alone and never rasterize
/// twice. Callers handle the degenerate cases (width or height <= 2 becomes
/// a fill) before asking for edges.
#[inline]
pub fn outline_edges(w: f32, h: f32) -> [(f32, f32, f32, f32); 4] {
    [
        (0.0, 0.0, w, 1.0),           // top
        (0.0, h - 1.0, w, 1.0),       // bottom
        (0.0, 1.0, 1.0, h - 2.0),     // left
        (w - 1.0, 1.0, 1.0, h - 2.0), // right
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_ring() {
        let c = rect_corners(5.0, 3.0);
        assert_eq!(c[0], Vec2::new(0.0, 0.0));
        assert_eq!(c[1], Vec2::new(5.0, 0.0));
        assert_eq!(c[2], Vec2::new(5.0, 3.0));
        assert_eq!(c[3], Vec2::new(0.0, 3.0));
    }

    #[test]
    fn edges_do_not_overlap_at_corners() {
        let [top, bottom, left, right] = outline_edges(10.0, 6.0);
        assert_eq!(top, (0.0, 0.0, 10.0, 1.0));
        assert_eq!(bottom, (0.0, 5.0, 10.0, 1.0));
        // Vertical bars cover rows 1..=4 only.
        assert_eq!(left, (0.0, 1.0, 1.0, 4.0));
        assert_eq!(right, (9.0, 1.0, 1.0, 4.0));
    }

    #[test]
    fn edge_pixel_coverage_is_exact() {
        // Sum of edge areas equals the ring pixel count: 2w + 2(h-2).
        let (w, h) = (10.0f32, 6.0f32);
        let edges = outline_edges(w, h);
        let area: f32 = edges.iter().map(|e| e.2 * e.3).sum();
        assert_eq!(area, 2.0 * w + 2.0 * (h - 2.0));
    }
}
