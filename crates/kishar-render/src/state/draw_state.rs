use crate::assets::Material;
use crate::color::Rgba8;
use crate::coords::{ClipRegion, Vec2};
use crate::device::{RenderTarget, TargetId, TextureFilter, TextureId};

use super::StateSnapshot;

/// The renderer's per-frame mutable state.
///
/// Setters here are raw: they record the value and nothing else. The
/// renderer front-end owns the change-detection and implicit-flush policy and
/// calls these after it has flushed.
#[derive(Debug)]
pub struct DrawState {
    pub camera: Vec2,
    pub alpha: f32,
    pub tint: Rgba8,
    /// Coarse draw-order hint written into `Vertex::pos[2]`; 0.0 for frame
    /// content, 1.0 for overlays.
    pub depth: f32,
    /// When false, flushes discard geometry without touching the GPU.
    pub render_enabled: bool,

    clip: ClipRegion,
    target: RenderTarget,
    target_size: (u32, u32),

    // Change-detector caches (single-owner; compared by the renderer before
    // it binds anew).
    texture: Option<TextureId>,
    sheet_size: (u32, u32),
    material: Material,
    filter_overrides: Vec<(TargetId, TextureFilter)>,
}

impl DrawState {
    pub fn new(screen_size: (u32, u32)) -> Self {
        Self {
            camera: Vec2::zero(),
            alpha: 1.0,
            tint: Rgba8::WHITE,
            depth: 0.0,
            render_enabled: true,
            clip: ClipRegion::full_surface(screen_size.0, screen_size.1),
            target: RenderTarget::Screen,
            target_size: screen_size,
            texture: None,
            sheet_size: (1, 1),
            material: Material::default(),
            filter_overrides: Vec::new(),
        }
    }

    // ── clip ──────────────────────────────────────────────────────────────

    #[inline]
    pub fn clip(&self) -> ClipRegion {
        self.clip
    }

    #[inline]
    pub fn set_clip(&mut self, clip: ClipRegion) {
        self.clip = clip;
    }

    /// Resets the clip to cover the whole active target.
    #[inline]
    pub fn reset_clip(&mut self) {
        self.clip = ClipRegion::full_surface(self.target_size.0, self.target_size.1);
    }

    // ── render target ─────────────────────────────────────────────────────

    #[inline]
    pub fn target(&self) -> RenderTarget {
        self.target
    }

    #[inline]
    pub fn target_size(&self) -> (u32, u32) {
        self.target_size
    }

    #[inline]
    pub fn set_target(&mut self, target: RenderTarget, size: (u32, u32)) {
        self.target = target;
        self.target_size = size;
    }

    // ── texture binding ───────────────────────────────────────────────────

    #[inline]
    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    /// Sheet dimensions texture coordinates are normalized against; `(1, 1)`
    /// when nothing is bound.
    #[inline]
    pub fn sheet_size(&self) -> (u32, u32) {
        self.sheet_size
    }

    #[inline]
    pub fn set_texture(&mut self, texture: Option<TextureId>, sheet_size: (u32, u32)) {
        self.texture = texture;
        self.sheet_size = sheet_size;
    }

    // ── material / shader ─────────────────────────────────────────────────

    #[inline]
    pub fn material(&self) -> Material {
        self.material
    }

    #[inline]
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    #[inline]
    pub fn filter_overrides(&self) -> &[(TargetId, TextureFilter)] {
        &self.filter_overrides
    }

    pub fn set_filter_overrides(&mut self, overrides: &[(TargetId, TextureFilter)]) {
        self.filter_overrides.clear();
        self.filter_overrides.extend_from_slice(overrides);
    }

    // ── snapshot ──────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            alpha: self.alpha,
            camera: self.camera,
            clip: self.clip,
            tint: self.tint,
            target: self.target,
            target_size: self.target_size,
            material: self.material,
        }
    }

    /// Applies a snapshot. The renderer flushes before calling this when the
    /// target differs; this method only records values.
    pub fn apply_snapshot(&mut self, snap: &StateSnapshot) {
        self.alpha = snap.alpha;
        self.camera = snap.camera;
        self.clip = snap.clip;
        self.tint = snap.tint;
        self.target = snap.target;
        self.target_size = snap.target_size;
        self.material = snap.material;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_round_trips() {
        let mut s = DrawState::new((320, 240));
        s.camera = Vec2::new(10.0, -4.0);
        s.alpha = 0.25;
        s.tint = Rgba8::new(1, 2, 3, 4);
        s.set_clip(ClipRegion::new(5, 5, 50, 50));
        s.set_target(RenderTarget::Offscreen(TargetId(7)), (64, 64));
        s.set_material(Material::new(crate::assets::MaterialId(3), 2));

        let snap = s.snapshot();

        s.camera = Vec2::zero();
        s.alpha = 1.0;
        s.tint = Rgba8::WHITE;
        s.reset_clip();
        s.set_target(RenderTarget::Screen, (320, 240));
        s.set_material(Material::default());

        s.apply_snapshot(&snap);
        assert_eq!(s.snapshot(), snap);
    }

    #[test]
    fn reset_clip_covers_active_target() {
        let mut s = DrawState::new((320, 240));
        s.set_target(RenderTarget::Offscreen(TargetId(0)), (100, 60));
        s.reset_clip();
        assert_eq!(s.clip(), ClipRegion::new(0, 0, 99, 59));
    }
}
