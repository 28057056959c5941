use crate::device::TextureId;
use crate::renderer::Renderer;

/// Effect parameters captured when a front buffer is vacated.
///
/// The renderer treats the contents as opaque; the effects collaborator
/// writes whatever it needs to re-create the pass later (the presentation
/// pass replays snapshots buffer by buffer).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectSnapshot {
    pub params: Vec<f32>,
}

/// Post-render effects collaborator.
///
/// Implementations draw their pass through the renderer's public primitive
/// API (typically one textured quad sampling `source`); the renderer brackets
/// the call with a state save/restore, so implementations are free to set
/// tint, alpha, shaders, and clip.
pub trait FrameEffects {
    /// Draws the render-time effect pass sampling `source` into the bound
    /// front buffer.
    fn apply(&mut self, renderer: &mut Renderer, source: TextureId);

    /// Copies the current effect parameters into `snapshot`.
    fn copy_state(&self, snapshot: &mut EffectSnapshot);
}
