//! # Observability
//!
//! Structured logging via `tracing`. Design functions never install a
//! subscriber themselves; call [`init_logging`] once from the host.

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
