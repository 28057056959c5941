use crate::assets::Material;
use crate::color::Rgba8;
use crate::coords::{ClipRegion, Vec2};
use crate::device::RenderTarget;

/// Saved draw state for a save/restore bracket.
///
/// Captured immediately before an internal operation (effect application,
/// prepared-mesh draw) and applied back immediately after; never persisted
/// beyond one call.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot {
    pub alpha: f32,
    pub camera: Vec2,
    pub clip: ClipRegion,
    pub tint: Rgba8,
    pub target: RenderTarget,
    pub target_size: (u32, u32),
    pub material: Material,
}
