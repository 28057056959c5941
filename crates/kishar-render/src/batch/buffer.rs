use crate::color::Rgba8;
use crate::coords::Vec2;

use super::{Uv, Vertex, UV_ZERO};

/// CPU-side geometry accumulator between flushes.
///
/// Invariants:
/// - `vertex_len() <= max_vertices()`, `index_len() <= max_indices()`
/// - `index_len()` is always a multiple of 3
///
/// Callers check [`fits`] before every primitive write and flush first when
/// it fails; the push methods debug-assert the capacity rather than grow.
/// Storage is allocated once at renderer init and reused for the renderer's
/// lifetime; a flush only rewinds the cursors.
#[derive(Debug)]
pub struct BatchBuffer {
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
    max_vertices: usize,
    max_indices: usize,
}

impl BatchBuffer {
    /// Allocates storage for at most `max_quads` quads (4 vertices / 6
    /// indices each). Indices are 16-bit, so `max_quads` is clamped to
    /// 16384.
    pub fn new(max_quads: u32) -> Self {
        let quads = max_quads.clamp(1, u16::MAX as u32 / 4) as usize;
        Self {
            vertices: Vec::with_capacity(quads * 4),
            indices: Vec::with_capacity(quads * 6),
            max_vertices: quads * 4,
            max_indices: quads * 6,
        }
    }

    #[inline]
    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    #[inline]
    pub fn max_indices(&self) -> usize {
        self.max_indices
    }

    #[inline]
    pub fn vertex_len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn index_len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// True when `vertex_count` more vertices and `index_count` more indices
    /// fit without flushing.
    #[inline]
    pub fn fits(&self, vertex_count: usize, index_count: usize) -> bool {
        self.max_vertices - self.vertices.len() >= vertex_count
            && self.max_indices - self.indices.len() >= index_count
    }

    /// Live geometry accumulated since the last reset.
    #[inline]
    pub fn data(&self) -> (&[Vertex], &[u16]) {
        (&self.vertices, &self.indices)
    }

    /// Rewinds the cursors. Storage is retained.
    #[inline]
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Appends a quad: 4 vertices, 6 indices, fixed winding (0,1,2 / 0,2,3).
    pub fn push_quad(&mut self, corners: [Vec2; 4], z: f32, color: Rgba8, uvs: [Uv; 4]) {
        debug_assert!(self.fits(4, 6), "push_quad without capacity check");

        let base = self.vertices.len() as u16;
        for (c, t) in corners.iter().zip(uvs.iter()) {
            self.vertices.push(Vertex::new(*c, z, color, *t));
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Appends a single untextured triangle: 3 vertices, 3 indices.
    pub fn push_tri(&mut self, corners: [Vec2; 3], z: f32, color: Rgba8) {
        debug_assert!(self.fits(3, 3), "push_tri without capacity check");

        let base = self.vertices.len() as u16;
        for c in corners.iter() {
            self.vertices.push(Vertex::new(*c, z, color, UV_ZERO));
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    /// Appends pre-built vertices and indices (prepared meshes). Indices are
    /// rebased onto the current vertex cursor.
    pub fn push_raw(&mut self, vertices: &[Vertex], indices: &[u16]) {
        debug_assert!(self.fits(vertices.len(), indices.len()), "push_raw without capacity check");
        debug_assert!(indices.len() % 3 == 0, "prepared mesh index count not a triangle multiple");

        let base = self.vertices.len() as u16;
        self.vertices.extend_from_slice(vertices);
        self.indices.extend(indices.iter().map(|i| i + base));
    }

    /// Appends a filled triangle drawn twice with opposite winding.
    ///
    /// Only 3 distinct vertices are needed, but the cursor advances by 4 (the
    /// last slot repeats vertex 2) and two index triples are emitted, one per
    /// winding. Whichever winding the caller's corner order produced, one of
    /// the triples faces the screen, which removes the need for a cross
    /// product sign check at the call site. Intentional; the overdraw
    /// triangle is the price.
    pub fn push_tri_double_winding(&mut self, corners: [Vec2; 3], z: f32, color: Rgba8) {
        debug_assert!(self.fits(4, 6), "push_tri_double_winding without capacity check");

        let base = self.vertices.len() as u16;
        for c in corners.iter() {
            self.vertices.push(Vertex::new(*c, z, color, UV_ZERO));
        }
        self.vertices.push(Vertex::new(corners[2], z, color, UV_ZERO));
        self.indices.extend_from_slice(&[
            base,
            base + 1,
            base + 2,
            base,
            base + 2,
            base + 1,
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corners4() -> [Vec2; 4] {
        [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]
    }

    fn corners3() -> [Vec2; 3] {
        [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)]
    }

    // ── capacity ──────────────────────────────────────────────────────────

    #[test]
    fn fits_tracks_both_cursors() {
        let mut b = BatchBuffer::new(2);
        assert!(b.fits(8, 12));
        b.push_quad(corners4(), 0.0, Rgba8::WHITE, [UV_ZERO; 4]);
        assert!(b.fits(4, 6));
        assert!(!b.fits(5, 6));
        b.push_quad(corners4(), 0.0, Rgba8::WHITE, [UV_ZERO; 4]);
        assert!(!b.fits(1, 0));
        assert!(b.fits(0, 0));
    }

    #[test]
    fn reset_rewinds_but_keeps_capacity() {
        let mut b = BatchBuffer::new(4);
        b.push_quad(corners4(), 0.0, Rgba8::WHITE, [UV_ZERO; 4]);
        assert!(!b.is_empty());
        b.reset();
        assert!(b.is_empty());
        assert_eq!(b.max_vertices(), 16);
    }

    // ── invariants ────────────────────────────────────────────────────────

    #[test]
    fn index_len_is_multiple_of_three() {
        let mut b = BatchBuffer::new(8);
        b.push_quad(corners4(), 0.0, Rgba8::WHITE, [UV_ZERO; 4]);
        b.push_tri(corners3(), 0.0, Rgba8::WHITE);
        b.push_tri_double_winding(corners3(), 0.0, Rgba8::WHITE);
        assert_eq!(b.index_len() % 3, 0);
    }

    #[test]
    fn quad_shares_one_color_across_vertices() {
        let mut b = BatchBuffer::new(1);
        let color = Rgba8::new(10, 20, 30, 40);
        b.push_quad(corners4(), 0.0, color, [UV_ZERO; 4]);
        let (verts, _) = b.data();
        assert!(verts.iter().all(|v| v.color == color));
    }

    // ── double winding ────────────────────────────────────────────────────

    #[test]
    fn double_winding_advances_four_vertices() {
        let mut b = BatchBuffer::new(2);
        b.push_tri_double_winding(corners3(), 0.0, Rgba8::WHITE);
        assert_eq!(b.vertex_len(), 4);
        assert_eq!(b.index_len(), 6);
    }

    #[test]
    fn double_winding_emits_opposite_triples() {
        let mut b = BatchBuffer::new(2);
        b.push_tri_double_winding(corners3(), 0.0, Rgba8::WHITE);
        let (_, idx) = b.data();
        assert_eq!(&idx[0..3], &[0, 1, 2]);
        assert_eq!(&idx[3..6], &[0, 2, 1]);
    }

    #[test]
    fn bases_accumulate_across_pushes() {
        let mut b = BatchBuffer::new(4);
        b.push_quad(corners4(), 0.0, Rgba8::WHITE, [UV_ZERO; 4]);
        b.push_tri(corners3(), 0.0, Rgba8::WHITE);
        let (_, idx) = b.data();
        assert_eq!(&idx[6..9], &[4, 5, 6]);
    }
}
