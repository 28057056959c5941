/// Opaque handle to a sampleable texture owned by the backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub u32);

/// Opaque handle to an offscreen render target owned by the backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TargetId(pub u32);

/// Where draw calls land.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RenderTarget {
    /// The window surface attached for the current frame.
    Screen,
    /// A backend-owned offscreen target.
    Offscreen(TargetId),
}

/// Texture sampling filter.
///
/// The renderer's default is nearest (pixel art); shader assets may override
/// the filter per offscreen texture for the duration of their draws.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TextureFilter {
    Nearest,
    Linear,
}
