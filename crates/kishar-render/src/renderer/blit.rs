//! Pixel-buffer blits.
//!
//! Client code hands over a raw RGBA8 buffer (rows top-down); it lands in a
//! backend scratch texture that only ever grows, and draws through the
//! regular textured-quad path. A caller that knows the buffer has not
//! changed since the last blit sets `unchanged` and skips the upload cost
//! while still getting the draw.

use crate::batch::uv;
use crate::color::Rgba8;
use crate::coords::Vec2;
use crate::flush::FlushReason;
use crate::raster::quad_corners;

use super::Renderer;

/// Historical forced vertical flip: the scratch path once compensated a
/// bottom-up texture sampling convention. Scratch rows are stored top-down
/// here, matching the client buffer, so the compensation resolves to
/// identity and the caller's flag is the only live input to the XOR.
const FORCED_FLIP: bool = false;

/// Blit parameters.
#[derive(Debug, Copy, Clone, Default)]
pub struct BlitOptions {
    /// Draw the buffer vertically mirrored.
    pub flip_vertical: bool,

    /// The pixel data is byte-identical to the previous blit: skip the
    /// texture upload but still draw.
    pub unchanged: bool,
}

impl Renderer {
    /// Draws a client RGBA8 pixel buffer (rows top-down) at `(x, y)`.
    ///
    /// Upload failure is logged and drops the draw for this frame; an
    /// `unchanged` blit before any upload ever happened is a no-op.
    pub fn blit(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
        x: f32,
        y: f32,
        opts: BlitOptions,
    ) {
        if width == 0 || height == 0 {
            return;
        }

        let max = Vec2::new(x + width as f32, y + height as f32);
        if self.clip_rejects_world(Vec2::new(x, y), max) {
            return;
        }

        let info = if opts.unchanged {
            match self.backend.scratch_info() {
                Some(info) => info,
                None => return,
            }
        } else {
            match self.backend.upload_scratch(pixels, width, height) {
                Ok(info) => info,
                Err(err) => {
                    log::warn!("pixel-buffer upload failed: {err:#}");
                    return;
                }
            }
        };

        self.rebind_texture(Some(info.texture), (1, 1), FlushReason::SurfaceBlit);

        // The live pixels occupy the top-left `used` region of the grown
        // allocation.
        let u1 = info.used.0 as f32 / info.alloc.0.max(1) as f32;
        let v1 = info.used.1 as f32 / info.alloc.1.max(1) as f32;

        let (top, bottom) = if FORCED_FLIP ^ opts.flip_vertical {
            (v1, 0.0)
        } else {
            (0.0, v1)
        };
        let uvs = [uv(0.0, top), uv(u1, top), uv(u1, bottom), uv(0.0, bottom)];

        let mut corners = quad_corners(width as f32, height as f32);
        for c in &mut corners {
            *c = *c + Vec2::new(x, y);
        }
        self.push_quad_world(corners, uvs, Rgba8::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn pixels(w: u32, h: u32) -> Vec<u8> {
        vec![0xff; (w * h * 4) as usize]
    }

    // ── upload behavior ───────────────────────────────────────────────────

    #[test]
    fn blit_uploads_then_draws() {
        let (mut r, log) = renderer();
        r.blit(&pixels(8, 8), 8, 8, 10.0, 10.0, BlitOptions::default());
        r.end_frame();
        assert_eq!(log.borrow().scratch_uploads, vec![(8, 8)]);
        assert_eq!(log.borrow().draws.len(), 1);
    }

    #[test]
    fn unchanged_blit_skips_upload_but_draws() {
        let (mut r, log) = renderer();
        r.blit(&pixels(8, 8), 8, 8, 10.0, 10.0, BlitOptions::default());
        r.blit(
            &pixels(8, 8),
            8,
            8,
            40.0,
            10.0,
            BlitOptions { unchanged: true, ..Default::default() },
        );
        r.end_frame();
        assert_eq!(log.borrow().scratch_uploads.len(), 1);
        // Two quads, one batch: a single draw at frame end (the texture did
        // not change between the blits).
        assert_eq!(log.borrow().draws.len(), 1);
        assert_eq!(log.borrow().uploads[0].vertices.len(), 8);
    }

    #[test]
    fn unchanged_blit_with_no_scratch_is_noop() {
        let (mut r, log) = renderer();
        r.blit(
            &pixels(8, 8),
            8,
            8,
            10.0,
            10.0,
            BlitOptions { unchanged: true, ..Default::default() },
        );
        r.end_frame();
        assert!(log.borrow().draws.is_empty());
    }

    #[test]
    fn zero_sized_blit_is_noop() {
        let (mut r, log) = renderer();
        r.blit(&[], 0, 8, 10.0, 10.0, BlitOptions::default());
        r.end_frame();
        assert!(log.borrow().scratch_uploads.is_empty());
        assert!(log.borrow().draws.is_empty());
    }

    // ── uv mapping ────────────────────────────────────────────────────────

    #[test]
    fn uvs_cover_used_region_of_grown_scratch() {
        let (mut r, log) = renderer();
        // First blit grows the scratch to 16x16; the second, smaller one
        // must map UVs against the grown allocation.
        r.blit(&pixels(16, 16), 16, 16, 0.0, 0.0, BlitOptions::default());
        r.blit(&pixels(8, 4), 8, 4, 0.0, 0.0, BlitOptions::default());
        r.end_frame();

        let log = log.borrow();
        let verts = &log.uploads.last().unwrap().vertices;
        let quad = &verts[verts.len() - 4..];
        // Bottom-right corner of the second quad samples (8/16, 4/16).
        assert_eq!(quad[2].uv, crate::batch::uv(0.5, 0.25));
    }

    #[test]
    fn flip_vertical_mirrors_v() {
        let (mut r, log) = renderer();
        r.blit(
            &pixels(8, 8),
            8,
            8,
            0.0,
            0.0,
            BlitOptions { flip_vertical: true, ..Default::default() },
        );
        r.end_frame();
        let log = log.borrow();
        let verts = &log.uploads[0].vertices;
        // Top corners sample the bottom of the used region.
        assert_eq!(verts[0].uv, crate::batch::uv(0.0, 1.0));
        assert_eq!(verts[2].uv, crate::batch::uv(1.0, 0.0));
    }
}
