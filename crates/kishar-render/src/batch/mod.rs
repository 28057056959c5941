//! Batched geometry storage.
//!
//! Responsibilities:
//! - define the interleaved GPU vertex layout ([`Vertex`], [`Uv`])
//! - accumulate vertices/indices between flushes ([`BatchBuffer`])
//! - provide the capacity tiers the flush path uploads into ([`TierTable`])
//!
//! The historical split between struct-of-arrays and interleaved layouts is
//! collapsed here: there is one interleaved layout, and the only build-time
//! variation left is the texture-coordinate representation (`fixed-uv`).

mod buffer;
mod tiers;
mod vertex;

pub use buffer::BatchBuffer;
pub use tiers::{Tier, TierTable};
pub use vertex::{uv, Uv, Vertex, UV_ZERO};
