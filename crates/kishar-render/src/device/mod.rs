//! GPU device layer.
//!
//! Responsibilities:
//! - define the narrow seam the flush path drives ([`GpuBackend`])
//! - drive wgpu for real rendering ([`WgpuBackend`])
//! - own the window surface / swapchain ([`WindowSurface`])
//!
//! Everything above this module speaks in opaque handles ([`TextureId`],
//! [`TargetId`]); only the backend knows about actual GPU resources.

mod backend;
mod handles;
mod surface;
mod wgpu_backend;

#[cfg(test)]
pub(crate) mod recording;

pub use backend::{BatchDraw, GpuBackend, ScratchInfo};
pub use handles::{RenderTarget, TargetId, TextureFilter, TextureId};
pub use surface::{SurfaceErrorAction, SurfaceFrame, WindowSurface, WindowSurfaceInit};
pub use wgpu_backend::WgpuBackend;
