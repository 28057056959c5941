//! Diagnostic overlays, drawn through the renderer's own primitives at
//! depth hint 1.0 so they read as chrome above frame content.

use crate::color::Rgba8;
use crate::coords::Vec2;
use crate::flush::FlushReason;

use super::Renderer;

const BAR_WIDTH: f32 = 4.0;
const BAR_SPACING: f32 = 6.0;
const BAR_MAX_HEIGHT: f32 = 48.0;
/// Pixels of bar height per flush.
const BAR_SCALE: f32 = 3.0;

impl Renderer {
    /// Draws the per-reason flush tallies of the previous frame as a small
    /// bar chart anchored at `(x, y)` (top-left).
    pub fn draw_flush_overlay(&mut self, x: f32, y: f32) {
        let counts: Vec<u32> = FlushReason::ALL
            .iter()
            .map(|r| self.stats().last_frame_count(*r))
            .collect();

        let snapshot = self.store_state();
        let depth = self.state.depth;
        self.state.depth = 1.0;
        self.state.camera = Vec2::zero();
        self.state.alpha = 1.0;
        self.state.tint = Rgba8::WHITE;
        self.reset_clip();

        let width = FlushReason::ALL.len() as f32 * BAR_SPACING + 2.0;
        self.rect_fill(
            x - 1.0,
            y - 1.0,
            width,
            BAR_MAX_HEIGHT + 2.0,
            Rgba8::new(0, 0, 0, 192),
        );

        for (i, count) in counts.iter().enumerate() {
            if *count == 0 {
                continue;
            }
            let h = (*count as f32 * BAR_SCALE).min(BAR_MAX_HEIGHT);
            let bx = x + 1.0 + i as f32 * BAR_SPACING;
            self.rect_fill(
                bx,
                y + BAR_MAX_HEIGHT - h,
                BAR_WIDTH,
                h,
                Rgba8::opaque(255, 200, 40),
            );
        }

        self.restore_state(&snapshot);
        self.state.depth = depth;
    }

    /// Outlines the active clip region so clipped draws can be debugged
    /// visually. The outline sits just inside the region, so the region's
    /// own scissor does not eat it.
    pub fn draw_clip_overlay(&mut self, color: Rgba8) {
        let clip = self.clip();
        if clip.is_empty() {
            return;
        }

        let snapshot = self.store_state();
        let depth = self.state.depth;
        self.state.depth = 1.0;
        self.state.camera = Vec2::zero();
        self.state.alpha = 1.0;
        self.state.tint = Rgba8::WHITE;

        self.rect_outline(
            clip.x0 as f32,
            clip.y0 as f32,
            clip.width() as f32,
            clip.height() as f32,
            color,
        );

        self.restore_state(&snapshot);
        self.state.depth = depth;
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

    #[test]
    fn overlay_marks_geometry_with_depth_hint() {
        let (mut r, log) = renderer();
        // A frame with one batch-full reason recorded last frame.
        r.rect_fill(0.0, 0.0, 4.0, 4.0, Rgba8::WHITE);
        r.end_frame();
        r.begin_frame();

        r.draw_flush_overlay(2.0, 2.0);
        r.end_frame();

        let log = log.borrow();
        let verts = &log.uploads.last().unwrap().vertices;
        assert!(verts.iter().all(|v| v.pos[2] == 1.0));
    }

    #[test]
    fn overlay_leaves_state_untouched() {
        let (mut r, _log) = renderer();
        r.set_camera(Vec2::new(12.0, 8.0));
        r.set_alpha(0.5);
        let before = r.store_state();
        r.draw_flush_overlay(0.0, 0.0);
        r.draw_clip_overlay(Rgba8::opaque(255, 0, 255));
        assert_eq!(r.store_state(), before);
    }

    #[test]
    fn clip_overlay_outlines_the_active_region() {
        let (mut r, log) = renderer();
        r.set_clip(10, 10, 100, 80);
        r.draw_clip_overlay(Rgba8::opaque(255, 0, 255));
        r.end_frame();
        // Four 1-px edge bars, each the ortho triangle.
        let log = log.borrow();
        let verts = &log.uploads.last().unwrap().vertices;
        assert_eq!(verts.len(), 12);
    }
}
