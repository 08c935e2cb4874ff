//! # Busline
//!
//! A synchronous in-process event bus. Components register listeners under
//! event names or wildcard patterns and other components emit events with an
//! optional payload; matching listeners run inline before `emit` returns.
//!
//! ## Architecture
//!
//! 1. **busline-core** - Event bus, listener handles, pattern matching, config, errors
//! 2. **busline** - Logging setup and the `busline` demo binary
//!
//! ## Keys
//!
//! - `user:login` exact event name
//! - `user:*` every event in the `user` namespace
//! - `*` every event

pub use busline_core::{
    event_bus, init_event_bus, matches_wildcard, Error, EventBus, EventBusConfig, EventPattern,
    Listener, ListenerId, Result,
};
pub use busline_core::{emit, on_event};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, INFO by default
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
