use anyhow::Result;

use crate::batch::Vertex;
use crate::color::Rgba8;
use crate::coords::ClipRegion;

use super::{RenderTarget, TargetId, TextureFilter, TextureId};

/// Scratch-texture placement information returned after an upload.
///
/// `alloc` is the allocated texture size, which only ever grows; the live
/// client pixels occupy the top-left `used` region, so texture coordinates
/// are normalized against `alloc`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ScratchInfo {
    pub texture: TextureId,
    pub alloc: (u32, u32),
    pub used: (u32, u32),
}

/// One batch draw call.
///
/// The flush path issues one of these per material pass after uploading the
/// batch into `tier`'s buffers. `clip` and `tint` are the draw state at flush
/// time; the backend applies the clip as a scissor and exposes the tint to
/// the material's shader.
#[derive(Debug, Copy, Clone)]
pub struct BatchDraw {
    pub tier: usize,
    pub index_count: u32,
    pub texture: Option<TextureId>,
    pub target: RenderTarget,
    pub clip: ClipRegion,
    pub tint: Rgba8,
}

/// The seam between the flush path and the GPU.
///
/// The real implementation is [`WgpuBackend`](super::WgpuBackend); tests use
/// a recording backend that captures calls. All methods are infallible or
/// degrade per the renderer's error policy: allocation failures surface as
/// `Err` for the caller to log-and-drop, never to propagate.
pub trait GpuBackend {
    /// Uploads the live batch prefix into the given tier's GPU buffers.
    fn upload_batch(&mut self, tier: usize, vertices: &[Vertex], indices: &[u16]);

    /// Issues one indexed draw from a previously uploaded tier.
    fn draw_batch(&mut self, draw: &BatchDraw);

    /// Binds the render target subsequent draws land in.
    fn bind_target(&mut self, target: RenderTarget);

    /// The currently bound render target.
    fn bound_target(&self) -> RenderTarget;

    /// Pixel dimensions of a target. The screen's dimensions are whatever the
    /// renderer last announced via [`set_screen_size`](Self::set_screen_size).
    fn target_size(&self, target: RenderTarget) -> (u32, u32);

    /// Announces the window surface dimensions for the coming frame.
    fn set_screen_size(&mut self, width: u32, height: u32);

    /// Creates an offscreen render target (also sampleable as a texture).
    fn create_offscreen(&mut self, width: u32, height: u32) -> Result<TargetId>;

    /// Destroys an offscreen target and its texture.
    fn destroy_offscreen(&mut self, id: TargetId);

    /// The sampleable texture behind an offscreen target.
    fn offscreen_texture(&self, id: TargetId) -> Option<TextureId>;

    /// Registers a static RGBA8 texture (sprite sheets, glyph pages).
    fn create_texture(&mut self, pixels: &[u8], width: u32, height: u32) -> Result<TextureId>;

    /// Copies client RGBA8 pixels (rows top-down) into the shared scratch
    /// texture, growing it if this is the largest buffer seen so far. The
    /// allocation never shrinks.
    fn upload_scratch(&mut self, pixels: &[u8], width: u32, height: u32) -> Result<ScratchInfo>;

    /// Placement of the most recent scratch upload, if any.
    fn scratch_info(&self) -> Option<ScratchInfo>;

    /// Overrides the sampling filter used when `target`'s texture is drawn.
    fn set_filter_override(&mut self, target: TargetId, filter: TextureFilter);

    /// Reverts [`set_filter_override`](Self::set_filter_override).
    fn reset_filter_override(&mut self, target: TargetId);
}
