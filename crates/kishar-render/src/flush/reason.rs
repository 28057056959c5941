/// Why a flush was issued.
///
/// Closed set, purely diagnostic: the tally overlay and logs report these,
/// but no code path branches on them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FlushReason {
    /// The batch could not fit the next primitive.
    BatchFull,
    /// The bound sprite sheet changed between draws.
    SheetChange,
    /// A tilemap renderer finished a chunk.
    TilemapChunk,
    /// End of frame.
    FrameEnd,
    /// The clip region changed.
    ClipChange,
    /// The render target changed.
    TargetChange,
    /// A post-render effect pass was applied.
    EffectApply,
    /// A shader asset was applied.
    ShaderApply,
    /// The shader was reset to the built-in material.
    ShaderReset,
    /// The material changed.
    SetMaterial,
    /// A raw texture binding changed.
    SetTexture,
    /// A pixel-buffer copy was drawn.
    SurfaceBlit,
    /// Explicitly requested by the caller.
    Forced,
}

impl FlushReason {
    pub const COUNT: usize = 13;

    pub const ALL: [FlushReason; Self::COUNT] = [
        FlushReason::BatchFull,
        FlushReason::SheetChange,
        FlushReason::TilemapChunk,
        FlushReason::FrameEnd,
        FlushReason::ClipChange,
        FlushReason::TargetChange,
        FlushReason::EffectApply,
        FlushReason::ShaderApply,
        FlushReason::ShaderReset,
        FlushReason::SetMaterial,
        FlushReason::SetTexture,
        FlushReason::SurfaceBlit,
        FlushReason::Forced,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            FlushReason::BatchFull => 0,
            FlushReason::SheetChange => 1,
            FlushReason::TilemapChunk => 2,
            FlushReason::FrameEnd => 3,
            FlushReason::ClipChange => 4,
            FlushReason::TargetChange => 5,
            FlushReason::EffectApply => 6,
            FlushReason::ShaderApply => 7,
            FlushReason::ShaderReset => 8,
            FlushReason::SetMaterial => 9,
            FlushReason::SetTexture => 10,
            FlushReason::SurfaceBlit => 11,
            FlushReason::Forced => 12,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FlushReason::BatchFull => "batch full",
            FlushReason::SheetChange => "sheet change",
            FlushReason::TilemapChunk => "tilemap chunk",
            FlushReason::FrameEnd => "frame end",
            FlushReason::ClipChange => "clip change",
            FlushReason::TargetChange => "target change",
            FlushReason::EffectApply => "effect apply",
            FlushReason::ShaderApply => "shader apply",
            FlushReason::ShaderReset => "shader reset",
            FlushReason::SetMaterial => "set material",
            FlushReason::SetTexture => "set texture",
            FlushReason::SurfaceBlit => "surface blit",
            FlushReason::Forced => "forced",
        }
    }
}
