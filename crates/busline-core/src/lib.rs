//! # Busline Core
//!
//! A minimal in-process event bus: listeners registered under event names or
//! wildcard patterns, invoked synchronously when a matching event is emitted.
//! Also provides the bus configuration and error types.

pub mod config;
pub mod error;
pub mod event_bus;

pub use config::EventBusConfig;
pub use error::{Error, Result};

// Re-export event bus for convenience
pub use event_bus::{
    event_bus, init_event_bus, matches_wildcard, EventBus, EventPattern, Listener, ListenerFn,
    ListenerId, ANY_EVENT,
};
