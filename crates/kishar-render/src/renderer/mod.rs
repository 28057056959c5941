//! The renderer front-end.
//!
//! Composes the batch buffer, draw state, flush engine, front buffer chain,
//! and GPU backend behind the immediate-mode API the game loop calls:
//! lifecycle (`begin_frame` / `end_frame`), state setters with implicit
//! flushes, and the primitive set (quads, pixels, lines, triangles,
//! rectangles, ellipses, nine-slices, blits, prepared meshes).
//!
//! Everything is single-threaded and synchronous; a primitive call either
//! appends to the batch or flushes and then appends, so submission order is
//! visibility order.

mod blit;
mod mesh;
mod overlay;
mod primitives;

pub use blit::BlitOptions;
pub use mesh::Mesh;

use crate::assets::{FrameEffects, Material, ShaderAsset, SpriteSheet};
use crate::batch::{BatchBuffer, TierTable};
use crate::chain::FrontBufferChain;
use crate::color::Rgba8;
use crate::coords::{ClipRegion, Vec2};
use crate::device::{GpuBackend, RenderTarget, TargetId, TextureId};
use crate::flush::{FlushEngine, FlushReason, FlushStats};
use crate::state::{DrawState, StateSnapshot};

/// Renderer construction parameters.
///
/// Defaults are sized for sprite-heavy 2D scenes; raise `max_batch_quads`
/// only if profiling shows batch-full flushes dominating.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Batch capacity in quads (4 vertices / 6 indices each).
    pub max_batch_quads: u32,

    /// Smallest upload tier in quads; tiers double from here up to
    /// `max_batch_quads`.
    pub min_tier_quads: u32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            max_batch_quads: 4096,
            min_tier_quads: 16,
        }
    }
}

/// The immediate-mode batching renderer.
pub struct Renderer {
    pub(crate) backend: Box<dyn GpuBackend>,
    pub(crate) batch: BatchBuffer,
    pub(crate) tiers: TierTable,
    pub(crate) state: DrawState,
    pub(crate) engine: FlushEngine,
    pub(crate) chain: FrontBufferChain,
    display_size: (u32, u32),
}

impl Renderer {
    /// Builds a renderer over a backend. `display_size` is the window
    /// surface size in pixels; front buffers are created at this size.
    pub fn new(
        mut backend: Box<dyn GpuBackend>,
        display_size: (u32, u32),
        config: RendererConfig,
    ) -> Self {
        backend.set_screen_size(display_size.0, display_size.1);
        let tiers = TierTable::new(
            config.min_tier_quads.min(config.max_batch_quads),
            config.max_batch_quads,
        );
        Self {
            batch: BatchBuffer::new(config.max_batch_quads),
            tiers,
            state: DrawState::new(display_size),
            engine: FlushEngine::new(),
            chain: FrontBufferChain::new(display_size),
            display_size,
            backend,
        }
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Starts a frame: rotates the flush tallies, rewinds the front buffer
    /// chain, and binds buffer 0 as the render target with a full-surface
    /// clip.
    pub fn begin_frame(&mut self) {
        self.engine.stats_mut().begin_frame();
        self.chain.reset();

        let Self { chain, backend, .. } = self;
        match chain.ensure_first(backend.as_mut()) {
            Some(target) => {
                let size = self.chain.size();
                self.state.set_target(RenderTarget::Offscreen(target), size);
            }
            None => {
                // No front buffer; draw straight to the surface.
                let size = self.backend.target_size(RenderTarget::Screen);
                self.state.set_target(RenderTarget::Screen, size);
            }
        }
        self.state.reset_clip();
    }

    /// Ends the frame: flushes whatever is batched.
    pub fn end_frame(&mut self) {
        self.flush(FlushReason::FrameEnd);
    }

    /// Like [`end_frame`](Self::end_frame), additionally capturing the
    /// current front buffer's effect snapshot for the presentation pass.
    pub fn end_frame_with(&mut self, effects: &mut dyn FrameEffects) {
        self.flush(FlushReason::FrameEnd);
        self.chain.frame_end(effects);
    }

    /// Announces a new window surface size. Front buffers are recreated at
    /// the new size; the active one stays active.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.flush(FlushReason::Forced);
        self.display_size = (width, height);
        self.backend.set_screen_size(width, height);

        // Let the chain see which of its buffers is active so the
        // replacement gets bound in its place.
        self.backend.bind_target(self.state.target());
        let Self { chain, backend, .. } = self;
        chain.resize(backend.as_mut(), (width, height));

        let target = self.backend.bound_target();
        let size = self.backend.target_size(target);
        self.state.set_target(target, size);
        self.state.reset_clip();
    }

    /// Uploads and draws the current batch. Public so collaborators (e.g. a
    /// tilemap renderer finishing a chunk) can force a boundary.
    pub fn flush(&mut self, reason: FlushReason) {
        let Self { engine, batch, tiers, state, backend, .. } = self;
        engine.flush(reason, batch, tiers, state, backend.as_mut());
    }

    // ── state: camera / alpha / tint / depth ──────────────────────────────

    #[inline]
    pub fn camera(&self) -> Vec2 {
        self.state.camera
    }

    /// Sets the camera offset subtracted from every primitive position.
    #[inline]
    pub fn set_camera(&mut self, camera: Vec2) {
        self.state.camera = camera;
    }

    #[inline]
    pub fn alpha(&self) -> f32 {
        self.state.alpha
    }

    /// Global alpha multiplier folded into vertex colors, clamped to `0..=1`.
    #[inline]
    pub fn set_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    #[inline]
    pub fn tint(&self) -> Rgba8 {
        self.state.tint
    }

    /// Multiplicative tint folded into vertex colors (and exposed to custom
    /// materials as a uniform at flush time).
    #[inline]
    pub fn set_tint(&mut self, tint: Rgba8) {
        self.state.tint = tint;
    }

    /// Whether flushes reach the GPU. While disabled, geometry is discarded
    /// at flush time.
    #[inline]
    pub fn set_render_enabled(&mut self, enabled: bool) {
        self.state.render_enabled = enabled;
    }

    #[inline]
    pub fn render_enabled(&self) -> bool {
        self.state.render_enabled
    }

    // ── state: clip ───────────────────────────────────────────────────────

    #[inline]
    pub fn clip(&self) -> ClipRegion {
        self.state.clip()
    }

    /// Sets the clip region from an origin + size request in the active
    /// target's pixel space.
    ///
    /// Negative sizes leave the region unchanged (silent no-op). A change
    /// flushes first, so already-batched geometry keeps the clip it was
    /// drawn under.
    pub fn set_clip(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let Some(clip) = ClipRegion::from_rect(x, y, w, h) else {
            return;
        };
        if clip != self.state.clip() {
            self.flush(FlushReason::ClipChange);
            self.state.set_clip(clip);
        }
    }

    /// Resets the clip to the full active target.
    pub fn reset_clip(&mut self) {
        let full = ClipRegion::full_surface(self.state.target_size().0, self.state.target_size().1);
        if full != self.state.clip() {
            self.flush(FlushReason::ClipChange);
            self.state.set_clip(full);
        }
    }

    // ── state: sheet / texture ────────────────────────────────────────────

    /// Binds a sprite sheet for subsequent textured quads.
    ///
    /// A sheet change flushes first so no draw call mixes geometry from two
    /// sheets.
    pub fn set_sheet(&mut self, sheet: &SpriteSheet) {
        self.rebind_texture(Some(sheet.texture()), sheet.size(), FlushReason::SheetChange);
    }

    /// Unbinds the sprite sheet; untextured primitives are unaffected.
    pub fn clear_sheet(&mut self) {
        self.rebind_texture(None, (1, 1), FlushReason::SheetChange);
    }

    /// The texture the next draw call will sample, if any.
    #[inline]
    pub fn current_texture(&self) -> Option<TextureId> {
        self.state.texture()
    }

    /// Change-detecting texture rebind: flushes only when the binding
    /// actually changes, then records it.
    pub(crate) fn rebind_texture(
        &mut self,
        texture: Option<TextureId>,
        sheet_size: (u32, u32),
        reason: FlushReason,
    ) {
        if self.state.texture() != texture {
            self.flush(reason);
        }
        self.state.set_texture(texture, sheet_size);
    }

    // ── state: material / shader ──────────────────────────────────────────

    /// Applies a shader asset: its material plus its per-target filter
    /// overrides. Always flushes; re-applying a shader is a draw boundary
    /// even when the material id matches.
    pub fn set_shader(&mut self, shader: &ShaderAsset) {
        self.flush(FlushReason::ShaderApply);
        self.state.set_material(shader.material);
        self.state.set_filter_overrides(&shader.filter_overrides);
    }

    /// Returns to the built-in material and clears filter overrides.
    pub fn reset_shader(&mut self) {
        self.flush(FlushReason::ShaderReset);
        self.state.set_material(Material::default());
        self.state.set_filter_overrides(&[]);
    }

    /// Change-detecting material bind.
    pub fn set_material(&mut self, material: Material) {
        if self.state.material().id != material.id {
            self.flush(FlushReason::SetMaterial);
        }
        self.state.set_material(material);
    }

    #[inline]
    pub fn material(&self) -> Material {
        self.state.material()
    }

    // ── state: render target ──────────────────────────────────────────────

    /// Redirects drawing into an offscreen target. Flushes on change and
    /// resets the clip to the new target's full surface.
    pub fn set_target_offscreen(&mut self, target: TargetId) {
        let size = self.backend.target_size(RenderTarget::Offscreen(target));
        if size == (0, 0) {
            log::warn!("binding unknown offscreen target {target:?}; ignored");
            return;
        }
        if self.state.target() != RenderTarget::Offscreen(target) {
            self.flush(FlushReason::TargetChange);
        }
        self.state.set_target(RenderTarget::Offscreen(target), size);
        self.state.reset_clip();
    }

    /// Returns drawing to the frame's front buffer (or the raw surface when
    /// no frame is active). Flushes on change and resets the clip.
    pub fn set_target_default(&mut self) {
        let (target, size) = match self.chain.current_target() {
            Some(id) => (RenderTarget::Offscreen(id), self.chain.size()),
            None => (
                RenderTarget::Screen,
                self.backend.target_size(RenderTarget::Screen),
            ),
        };
        if self.state.target() != target {
            self.flush(FlushReason::TargetChange);
        }
        self.state.set_target(target, size);
        self.state.reset_clip();
    }

    #[inline]
    pub fn target(&self) -> RenderTarget {
        self.state.target()
    }

    // ── state: save / restore ─────────────────────────────────────────────

    /// Captures alpha, camera, clip, tint, render target, and material.
    pub fn store_state(&self) -> StateSnapshot {
        self.state.snapshot()
    }

    /// Restores a snapshot, flushing first when it moves the render target
    /// or clip so batched geometry keeps its draw conditions.
    pub fn restore_state(&mut self, snapshot: &StateSnapshot) {
        if self.state.target() != snapshot.target {
            self.flush(FlushReason::TargetChange);
        } else if self.state.clip() != snapshot.clip {
            self.flush(FlushReason::ClipChange);
        }
        self.state.apply_snapshot(snapshot);
    }

    // ── effects ───────────────────────────────────────────────────────────

    /// Applies one post-render effect pass.
    ///
    /// Flushes the current front buffer, advances the chain (capturing the
    /// outgoing buffer's effect snapshot), and calls `effects` with the
    /// vacated buffer's texture so it can draw the processed result into the
    /// new buffer. The caller's draw state is bracketed and restored.
    pub fn apply_frame_effects(&mut self, effects: &mut dyn FrameEffects) {
        self.flush(FlushReason::EffectApply);

        let Some(current) = self.chain.current_target() else {
            log::warn!("effect apply with no front buffer; ignored");
            return;
        };
        let Some(source) = self.backend.offscreen_texture(current) else {
            return;
        };

        let mut snapshot = self.store_state();

        let Self { chain, backend, .. } = self;
        let Some(next) = chain.next_buffer(backend.as_mut(), effects) else {
            return;
        };

        // Neutral state for the pass: effects draw in target pixel space.
        let size = self.chain.size();
        self.state.set_target(RenderTarget::Offscreen(next), size);
        self.state.reset_clip();
        self.state.camera = Vec2::zero();
        self.state.alpha = 1.0;
        self.state.tint = Rgba8::WHITE;

        effects.apply(self, source);

        self.flush(FlushReason::EffectApply);

        // The chain advanced for good: transient state rolls back, but
        // subsequent drawing continues into the new front buffer (buffers
        // share a size, so the caller's clip carries over unchanged).
        snapshot.target = RenderTarget::Offscreen(next);
        snapshot.target_size = size;
        self.restore_state(&snapshot);
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn stats(&self) -> &FlushStats {
        self.engine.stats()
    }

    #[inline]
    pub fn chain(&self) -> &FrontBufferChain {
        &self.chain
    }

    #[inline]
    pub fn display_size(&self) -> (u32, u32) {
        self.display_size
    }

    /// The backend, for the external presentation pass.
    #[inline]
    pub fn backend(&mut self) -> &mut dyn GpuBackend {
        self.backend.as_mut()
    }

    // ── batching plumbing (used by the primitive impls) ───────────────────

    /// Flushes when `vertex_count`/`index_count` will not fit the batch.
    #[inline]
    pub(crate) fn ensure_room(&mut self, vertex_count: usize, index_count: usize) {
        if !self.batch.fits(vertex_count, index_count) {
            self.flush(FlushReason::BatchFull);
        }
    }

    /// The color actually written for `color` under the current tint/alpha.
    #[inline]
    pub(crate) fn vertex_color(&self, color: Rgba8) -> Rgba8 {
        color.modulate(self.state.tint, self.state.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::assets::{EffectSnapshot, MaterialId};
    use crate::device::recording::{RecordLog, RecordingBackend};
    use crate::device::TextureId;

    fn renderer_with(config: RendererConfig) -> (Renderer, Rc<RefCell<RecordLog>>) {
        let backend = RecordingBackend::new((320, 240));
        let log = backend.log();
        let mut r = Renderer::new(Box::new(backend), (320, 240), config);
        r.begin_frame();
        (r, log)
    }

    fn renderer() -> (Renderer, Rc<RefCell<RecordLog>>) {
        renderer_with(RendererConfig::default())
    }

    fn sheet(texture: u32) -> SpriteSheet {
        SpriteSheet::new(TextureId(texture), 64, 64, Vec::new())
    }

    fn src() -> crate::assets::AtlasRegion {
        crate::assets::AtlasRegion::new(0.0, 0.0, 16.0, 16.0)
    }

    struct NullEffects;

    impl FrameEffects for NullEffects {
        fn apply(&mut self, _renderer: &mut Renderer, _source: TextureId) {}
        fn copy_state(&self, _snapshot: &mut EffectSnapshot) {}
    }

    // ── flush counting ────────────────────────────────────────────────────

    #[test]
    fn sequence_within_capacity_flushes_once() {
        let (mut r, log) = renderer();
        for i in 0..10 {
            r.quad(i as f32 * 20.0, 10.0, src(), Rgba8::WHITE);
        }
        r.end_frame();
        assert_eq!(log.borrow().draws.len(), 1);
        assert_eq!(r.stats().frame_count(FlushReason::FrameEnd), 1);
        assert_eq!(r.stats().frame_count(FlushReason::BatchFull), 0);
    }

    #[test]
    fn capacity_plus_one_flushes_twice_with_full_first_batch() {
        let config = RendererConfig { max_batch_quads: 8, min_tier_quads: 4 };
        let (mut r, log) = renderer_with(config);
        for _ in 0..9 {
            r.quad(10.0, 10.0, src(), Rgba8::WHITE);
        }
        r.end_frame();

        let log = log.borrow();
        assert_eq!(log.draws.len(), 2);
        // First flush carries exactly the capacity's worth of vertices.
        assert_eq!(log.uploads[0].vertices.len(), 8 * 4);
        assert_eq!(log.uploads[1].vertices.len(), 4);
        assert_eq!(r.stats().frame_count(FlushReason::BatchFull), 1);
        assert_eq!(r.stats().frame_count(FlushReason::FrameEnd), 1);
    }

    #[test]
    fn forced_flush_reason_is_tallied() {
        let (mut r, log) = renderer();
        r.rect_fill(0.0, 0.0, 4.0, 4.0, Rgba8::WHITE);
        r.flush(FlushReason::TilemapChunk);
        r.end_frame();
        assert_eq!(log.borrow().draws.len(), 1);
        assert_eq!(r.stats().frame_count(FlushReason::TilemapChunk), 1);
    }

    // ── clip rejection ────────────────────────────────────────────────────

    #[test]
    fn clipped_out_quad_contributes_no_vertices() {
        let (mut r, log) = renderer();
        r.set_clip(0, 0, 64, 64);
        r.quad(200.0, 200.0, src(), Rgba8::WHITE);
        r.end_frame();
        assert!(log.borrow().draws.is_empty());
        assert!(log.borrow().uploads.is_empty());
    }

    #[test]
    fn camera_translation_is_applied_before_rejection() {
        let (mut r, log) = renderer();
        r.set_clip(0, 0, 64, 64);
        r.set_camera(Vec2::new(200.0, 200.0));
        // World position 200,200 lands at 0,0 after the camera offset.
        r.quad(200.0, 200.0, src(), Rgba8::WHITE);
        r.end_frame();
        let log = log.borrow();
        assert_eq!(log.draws.len(), 1);
        assert_eq!(log.uploads[0].vertices[0].pos[0], 0.0);
    }

    #[test]
    fn negative_clip_request_leaves_region_unchanged() {
        let (mut r, _log) = renderer();
        let before = r.clip();
        r.set_clip(10, 10, -5, 20);
        assert_eq!(r.clip(), before);
    }

    // ── state save / restore ──────────────────────────────────────────────

    #[test]
    fn store_restore_is_byte_identical() {
        let (mut r, _log) = renderer();
        let target = r.backend().create_offscreen(64, 64).unwrap();

        r.set_camera(Vec2::new(3.0, 4.0));
        r.set_alpha(0.25);
        r.set_tint(Rgba8::new(10, 20, 30, 255));
        r.set_clip(1, 2, 30, 40);
        r.set_target_offscreen(target);
        r.set_clip(1, 2, 10, 10);
        r.set_material(Material::new(MaterialId(5), 2));

        let snap = r.store_state();
        let before = r.store_state();

        r.set_camera(Vec2::zero());
        r.set_alpha(1.0);
        r.set_tint(Rgba8::WHITE);
        r.set_target_default();
        r.set_material(Material::default());

        r.restore_state(&snap);
        assert_eq!(r.store_state(), before);
    }

    // ── sheet switching ───────────────────────────────────────────────────

    #[test]
    fn sheet_switch_flushes_between_the_two_quads() {
        let (mut r, log) = renderer();
        let (a, b) = (sheet(1), sheet(2));

        r.set_sheet(&a);
        r.quad(0.0, 0.0, src(), Rgba8::WHITE);
        r.set_sheet(&b);
        r.quad(32.0, 0.0, src(), Rgba8::WHITE);
        r.end_frame();

        let log = log.borrow();
        assert_eq!(log.draws.len(), 2);
        assert_eq!(log.draws[0].texture, Some(TextureId(1)));
        assert_eq!(log.draws[1].texture, Some(TextureId(2)));
        assert_eq!(r.stats().frame_count(FlushReason::SheetChange), 1);
    }

    #[test]
    fn rebinding_the_same_sheet_does_not_flush() {
        let (mut r, log) = renderer();
        let a = sheet(1);
        r.set_sheet(&a);
        r.quad(0.0, 0.0, src(), Rgba8::WHITE);
        r.set_sheet(&a);
        r.quad(32.0, 0.0, src(), Rgba8::WHITE);
        r.end_frame();
        assert_eq!(log.borrow().draws.len(), 1);
        assert_eq!(r.stats().frame_count(FlushReason::SheetChange), 0);
    }

    // ── shaders ───────────────────────────────────────────────────────────

    #[test]
    fn shader_apply_draws_every_pass_with_overrides() {
        let (mut r, log) = renderer();
        let target = r.backend().create_offscreen(8, 8).unwrap();
        let shader = ShaderAsset::new(Material::new(MaterialId(2), 2))
            .with_filter_override(target, crate::device::TextureFilter::Linear);

        r.set_shader(&shader);
        r.rect_fill(0.0, 0.0, 4.0, 4.0, Rgba8::WHITE);
        r.end_frame();

        let log = log.borrow();
        // One upload, two passes, bracketed by one override set/reset pair.
        assert_eq!(log.uploads.len(), 1);
        assert_eq!(log.draws.len(), 2);
        assert_eq!(log.filter_sets.len(), 1);
        assert_eq!(log.filter_resets.len(), 1);
        assert_eq!(r.stats().frame_count(FlushReason::FrameEnd), 2);
    }

    #[test]
    fn shader_reset_returns_to_the_builtin_material() {
        let (mut r, _log) = renderer();
        let shader = ShaderAsset::new(Material::new(MaterialId(2), 3));
        r.set_shader(&shader);
        r.reset_shader();
        assert_eq!(r.material(), Material::default());
    }

    // ── render targets ────────────────────────────────────────────────────

    #[test]
    fn target_change_flushes_and_resets_clip() {
        let (mut r, log) = renderer();
        let target = r.backend().create_offscreen(100, 50).unwrap();

        r.rect_fill(0.0, 0.0, 8.0, 8.0, Rgba8::WHITE);
        r.set_target_offscreen(target);

        // The batched rect flushed under the old target with the change
        // reason, and the clip now spans the new target.
        assert_eq!(r.clip(), crate::coords::ClipRegion::full_surface(100, 50));
        assert_eq!(r.stats().frame_count(FlushReason::TargetChange), 1);
        assert_eq!(log.borrow().draws.len(), 1);
    }

    // ── effects / chain ───────────────────────────────────────────────────

    #[test]
    fn chain_rewinds_to_buffer_zero_each_frame() {
        let (mut r, _log) = renderer();
        let mut fx = NullEffects;

        r.apply_frame_effects(&mut fx);
        r.apply_frame_effects(&mut fx);
        assert_eq!(r.chain().current_index(), 2);
        r.end_frame_with(&mut fx);

        r.begin_frame();
        assert_eq!(r.chain().current_index(), 0);
        let first = r.chain().entries()[0].target;
        assert_eq!(r.target(), crate::device::RenderTarget::Offscreen(first));
    }

    #[test]
    fn effect_apply_draws_into_the_next_buffer() {
        struct CopyEffects;
        impl FrameEffects for CopyEffects {
            fn apply(&mut self, renderer: &mut Renderer, source: TextureId) {
                let (w, h) = renderer.display_size();
                renderer.texture_quad(source, 0.0, 0.0, w as f32, h as f32);
            }
            fn copy_state(&self, _snapshot: &mut EffectSnapshot) {}
        }

        let (mut r, log) = renderer();
        r.rect_fill(0.0, 0.0, 8.0, 8.0, Rgba8::WHITE);

        let buffer0 = r.chain().entries()[0].target;
        let mut fx = CopyEffects;
        r.apply_frame_effects(&mut fx);
        r.end_frame();

        let log = log.borrow();
        // Draw 1: the rect into buffer 0. Draw 2: the effect quad into
        // buffer 1, sampling buffer 0's texture.
        assert_eq!(log.draws.len(), 2);
        assert_eq!(
            log.draws[0].target,
            crate::device::RenderTarget::Offscreen(buffer0)
        );
        let buffer1 = r.chain().entries()[1].target;
        assert_eq!(
            log.draws[1].target,
            crate::device::RenderTarget::Offscreen(buffer1)
        );
        assert_ne!(log.draws[1].texture, None);
        assert_eq!(r.chain().in_use(), 2);
    }

    #[test]
    fn effect_bracket_restores_caller_state_onto_the_new_buffer() {
        let (mut r, _log) = renderer();
        r.set_camera(Vec2::new(9.0, 9.0));
        r.set_alpha(0.5);
        let before = r.store_state();

        let mut fx = NullEffects;
        r.apply_frame_effects(&mut fx);

        // Transient state rolls back; the target moves to the new buffer.
        let after = r.store_state();
        assert_eq!(after.camera, before.camera);
        assert_eq!(after.alpha, before.alpha);
        assert_eq!(after.tint, before.tint);
        assert_eq!(after.clip, before.clip);
        let next = r.chain().entries()[1].target;
        assert_eq!(after.target, crate::device::RenderTarget::Offscreen(next));
    }

    // ── disabled rendering ────────────────────────────────────────────────

    #[test]
    fn disabled_rendering_reaches_no_draws() {
        let (mut r, log) = renderer();
        r.set_render_enabled(false);
        r.rect_fill(0.0, 0.0, 8.0, 8.0, Rgba8::WHITE);
        r.end_frame();
        assert!(log.borrow().draws.is_empty());
        assert_eq!(r.stats().frame_total(), 0);
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_rebinds_the_recreated_front_buffer() {
        let (mut r, _log) = renderer();
        let before = r.chain().entries()[0].target;
        r.resize(640, 480);
        let after = r.chain().entries()[0].target;
        assert_ne!(before, after);
        assert_eq!(r.target(), crate::device::RenderTarget::Offscreen(after));
        assert_eq!(r.display_size(), (640, 480));
        assert_eq!(r.clip(), crate::coords::ClipRegion::full_surface(640, 480));
    }
}
