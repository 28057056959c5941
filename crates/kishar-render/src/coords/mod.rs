//! Coordinate and geometry types shared across the batching renderer.
//!
//! Canonical CPU space:
//! - Pixels, origin top-left, +X right, +Y down
//! - Draw positions are f32; clip bounds are inclusive integers
//!
//! The GPU backend converts pixel positions to NDC in the vertex shader using
//! the active render target's dimensions.

mod clip;
mod rect;
mod rotation;
mod vec2;

pub use clip::ClipRegion;
pub use rect::Rect;
pub use rotation::Rotation;
pub use vec2::Vec2;
