//! Kishar rendering crate.
//!
//! Immediate-mode 2D primitive batching over wgpu. Per-frame draw calls
//! (textured quads, pixels, lines, triangles, rectangles, ellipses,
//! nine-slice composites, pixel-buffer blits) accumulate into shared
//! vertex/index buffers and flush to the GPU only on well-defined triggers:
//! buffer capacity, texture/material/target/clip changes, and frame
//! boundaries.

pub mod logging;
pub mod coords;
pub mod color;
pub mod batch;
pub mod assets;
pub mod device;
pub mod state;
pub mod flush;
pub mod raster;
pub mod chain;
pub mod renderer;

pub use renderer::{Renderer, RendererConfig};
