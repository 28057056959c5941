//! Prepared-mesh draws.
//!
//! A mesh is pre-transformed geometry built outside the per-primitive path
//! (tilemap chunks, cached text runs). Drawing one is bracketed by a state
//! save/restore and forced flushes on both sides, so it neither inherits nor
//! leaks batch state.

use crate::batch::Vertex;
use crate::device::TextureId;
use crate::flush::FlushReason;

use super::Renderer;

/// Caller-prepared vertices and indices, already in target pixel space.
///
/// Indices are triangle triples, relative to the mesh's own vertex list.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Structural validity: triangle-multiple indices, all in bounds.
    pub fn is_valid(&self) -> bool {
        self.indices.len() % 3 == 0
            && self
                .indices
                .iter()
                .all(|&i| (i as usize) < self.vertices.len())
    }
}

impl Renderer {
    /// Draws a prepared mesh with an optional texture binding.
    ///
    /// The mesh bypasses camera offset and clip rejection (it is already in
    /// target space; the GPU scissor still applies). State is snapshotted
    /// and restored around the draw.
    pub fn draw_mesh(&mut self, mesh: &Mesh, texture: Option<TextureId>) {
        if mesh.vertices.is_empty() || mesh.indices.is_empty() {
            return;
        }
        if !mesh.is_valid() {
            log::warn!("prepared mesh rejected: malformed indices");
            return;
        }
        if mesh.vertices.len() > self.batch.max_vertices()
            || mesh.indices.len() > self.batch.max_indices()
        {
            log::error!(
                "prepared mesh ({} vertices / {} indices) exceeds batch capacity; dropped",
                mesh.vertices.len(),
                mesh.indices.len()
            );
            return;
        }

        self.flush(FlushReason::Forced);
        let snapshot = self.store_state();
        self.rebind_texture(texture, (1, 1), FlushReason::SetTexture);

        self.batch.push_raw(&mesh.vertices, &mesh.indices);

        self.flush(FlushReason::Forced);
        self.restore_state(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::UV_ZERO;
    use crate::color::Rgba8;
    use crate::coords::Vec2;
    use crate::device::recording::RecordingBackend;
    use crate::renderer::RendererConfig;

    fn renderer() -> (Renderer, std::rc::Rc<std::cell::RefCell<crate::device::recording::RecordLog>>)
    {
        let backend = RecordingBackend::new((320, 240));
        let log = backend.log();
        let mut r = Renderer::new(Box::new(backend), (320, 240), RendererConfig::default());
        r.begin_frame();
        (r, log)
    }

    fn tri_mesh() -> Mesh {
        let v = |x: f32, y: f32| Vertex::new(Vec2::new(x, y), 0.0, Rgba8::WHITE, UV_ZERO);
        Mesh {
            vertices: vec![v(0.0, 0.0), v(10.0, 0.0), v(0.0, 10.0)],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn mesh_draws_in_its_own_flush() {
        let (mut r, log) = renderer();
        r.rect_fill(0.0, 0.0, 8.0, 8.0, Rgba8::WHITE);
        r.draw_mesh(&tri_mesh(), None);
        r.end_frame();

        // Rect flushed ahead of the mesh, mesh flushed by the bracket; frame
        // end has nothing left.
        let log = log.borrow();
        assert_eq!(log.draws.len(), 2);
        assert_eq!(log.uploads[1].vertices.len(), 3);
        assert_eq!(log.uploads[1].index_count, 3);
    }

    #[test]
    fn mesh_restores_prior_state() {
        let (mut r, _log) = renderer();
        r.set_camera(Vec2::new(5.0, 5.0));
        let before = r.store_state();
        r.draw_mesh(&tri_mesh(), None);
        assert_eq!(r.store_state(), before);
    }

    #[test]
    fn malformed_mesh_is_dropped() {
        let (mut r, log) = renderer();
        let mut mesh = tri_mesh();
        mesh.indices = vec![0, 1, 7];
        r.draw_mesh(&mesh, None);
        r.end_frame();
        assert!(log.borrow().draws.is_empty());
    }

    #[test]
    fn oversized_mesh_is_dropped() {
        let (mut r, log) = renderer();
        let v = Vertex::new(Vec2::zero(), 0.0, Rgba8::WHITE, UV_ZERO);
        let mesh = Mesh {
            vertices: vec![v; 4096 * 4 + 1],
            indices: vec![0, 1, 2],
        };
        r.draw_mesh(&mesh, None);
        r.end_frame();
        assert!(log.borrow().draws.is_empty());
    }
}
