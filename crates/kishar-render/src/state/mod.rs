//! Per-frame mutable draw state.
//!
//! Responsibilities:
//! - hold camera, clip, tint/alpha, bindings, and the active render target
//! - cache the previous texture/material so the renderer can detect changes
//!   (the caches are fields here, on the one owned instance, never global)
//! - snapshot/restore for the save/restore brackets around internal
//!   operations (effect application, prepared-mesh draws)

mod draw_state;
mod snapshot;

pub use draw_state::DrawState;
pub use snapshot::StateSnapshot;
