use bytemuck::{Pod, Zeroable};

use crate::color::Rgba8;
use crate::coords::Vec2;

/// Texture coordinate storage.
///
/// Default build: `f32` pair in `0..1`. With the `fixed-uv` feature: `u16`
/// pair scaled to `0..65535`. Both represent the same normalized coordinate
/// and the GPU reads both as normalized floats (`Float32x2` vs `Unorm16x2`),
/// so call sites and shaders are identical.
#[cfg(not(feature = "fixed-uv"))]
pub type Uv = [f32; 2];

#[cfg(feature = "fixed-uv")]
pub type Uv = [u16; 2];

/// Encodes a normalized texture coordinate into its storage form.
#[cfg(not(feature = "fixed-uv"))]
#[inline]
pub fn uv(u: f32, v: f32) -> Uv {
    [u, v]
}

/// Encodes a normalized texture coordinate into its storage form.
#[cfg(feature = "fixed-uv")]
#[inline]
pub fn uv(u: f32, v: f32) -> Uv {
    #[inline]
    fn q(v: f32) -> u16 {
        (v.clamp(0.0, 1.0) * 65535.0 + 0.5) as u16
    }
    [q(u), q(v)]
}

/// The zero texture coordinate, used by untextured primitives (which sample
/// the backend's 1x1 white texture).
#[cfg(not(feature = "fixed-uv"))]
pub const UV_ZERO: Uv = [0.0, 0.0];

#[cfg(feature = "fixed-uv")]
pub const UV_ZERO: Uv = [0, 0];

/// One batched vertex.
///
/// `pos.z` is a coarse draw-order hint only (0.0 for frame content, 1.0 for
/// overlays); ordering within a batch is submission order. `color` is already
/// modulated by the draw state's tint and alpha.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub color: Rgba8,
    pub uv: Uv,
}

impl Vertex {
    #[inline]
    pub fn new(p: Vec2, z: f32, color: Rgba8, uv: Uv) -> Self {
        Self { pos: [p.x, p.y, z], color, uv }
    }

    #[cfg(not(feature = "fixed-uv"))]
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,  // pos
        1 => Unorm8x4,   // color
        2 => Float32x2   // uv
    ];

    #[cfg(feature = "fixed-uv")]
    const ATTRS_FIXED: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Unorm8x4,
        2 => Unorm16x2
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        #[cfg(not(feature = "fixed-uv"))]
        let attributes = &Self::ATTRS;
        #[cfg(feature = "fixed-uv")]
        let attributes = &Self::ATTRS_FIXED;

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }
}
