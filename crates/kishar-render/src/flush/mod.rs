//! Flush decision and execution.
//!
//! Responsibilities:
//! - enumerate why flushes happen ([`FlushReason`]); diagnostics only,
//!   never control flow
//! - tally flushes per reason ([`FlushStats`])
//! - perform the flush itself ([`FlushEngine`]): uniforms, tier upload, one
//!   draw per material pass, cursor reset

mod engine;
mod reason;
mod stats;

pub use engine::FlushEngine;
pub use reason::FlushReason;
pub use stats::FlushStats;
