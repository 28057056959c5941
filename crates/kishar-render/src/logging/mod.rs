//! Logging initialization.
//!
//! The crate logs through the `log` facade; binaries call [`init_logging`]
//! once at startup to install an `env_logger` backend.

mod init;

pub use init::init_logging;
