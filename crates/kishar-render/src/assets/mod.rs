//! Collaborator-facing asset types.
//!
//! Asset loading and packing live outside this crate; the renderer consumes
//! finished data: a sprite sheet is a texture handle plus a region table, a
//! shader asset is a material plus filter overrides, and post-render effects
//! arrive through the [`FrameEffects`] trait.

mod effects;
mod shader;
mod sprite_sheet;

pub use effects::{EffectSnapshot, FrameEffects};
pub use shader::{Material, MaterialId, ShaderAsset};
pub use sprite_sheet::{AtlasRegion, SpriteId, SpriteSheet};
