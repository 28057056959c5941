use crate::device::{TargetId, TextureFilter};

/// Identifier for a backend material (pipeline + uniforms).
///
/// 0 is the renderer's built-in textured material.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct MaterialId(pub u32);

/// A drawable material: which pipeline to bind and how many passes it draws.
///
/// Multi-pass materials re-draw the uploaded batch once per pass; the flush
/// tally counts each pass.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Material {
    pub id: MaterialId,
    pub passes: u32,
}

impl Material {
    #[inline]
    pub const fn new(id: MaterialId, passes: u32) -> Self {
        Self { id, passes }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self { id: MaterialId(0), passes: 1 }
    }
}

/// A wrapped shader as delivered by the asset pipeline: the material it
/// selects plus per-offscreen-texture filter overrides applied for the
/// duration of its draws.
#[derive(Debug, Clone)]
pub struct ShaderAsset {
    pub material: Material,
    pub filter_overrides: Vec<(TargetId, TextureFilter)>,
}

impl ShaderAsset {
    pub fn new(material: Material) -> Self {
        Self { material, filter_overrides: Vec::new() }
    }

    pub fn with_filter_override(mut self, target: TargetId, filter: TextureFilter) -> Self {
        self.filter_overrides.push((target, filter));
        self
    }
}
