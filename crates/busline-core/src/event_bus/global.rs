//! Process-wide event bus.
//!
//! Prefer constructing an [`EventBus`] at the application's composition root
//! and handing clones to components. The global instance exists for call
//! sites that cannot be threaded a bus. It is created on first access and
//! lives for the rest of the process; every thread sees the same instance.

use std::sync::OnceLock;

use super::bus::EventBus;
use crate::config::EventBusConfig;
use crate::error::{Error, Result};

/// Global event bus instance
static EVENT_BUS: OnceLock<EventBus> = OnceLock::new();

/// Get or initialize the global event bus
pub fn event_bus() -> &'static EventBus {
    EVENT_BUS.get_or_init(|| {
        tracing::debug!("Initializing global event bus");
        EventBus::new()
    })
}

/// Initialize the global event bus with custom configuration
///
/// Must be called before any call to [`event_bus()`]. Returns
/// [`Error::AlreadyInitialized`] once the global bus exists.
pub fn init_event_bus(config: EventBusConfig) -> Result<()> {
    config.validate()?;
    EVENT_BUS
        .set(EventBus::with_config(config))
        .map_err(|_| Error::AlreadyInitialized)
}

/// Convenience macro to emit an event on the global event bus
///
/// ```rust,ignore
/// emit!("user:logout");
/// emit!("user:login", serde_json::json!({ "name": "ada" }));
/// ```
#[macro_export]
macro_rules! emit {
    ($event:expr) => {
        $crate::event_bus::event_bus().emit($event, None)
    };
    ($event:expr, $payload:expr) => {
        $crate::event_bus::event_bus().emit($event, Some(&$payload))
    };
}

/// Convenience macro to register a closure on the global event bus
///
/// Evaluates to the [`Listener`](crate::event_bus::Listener) handle so the
/// caller can pass it to `off` later.
#[macro_export]
macro_rules! on_event {
    ($key:expr, $handler:expr) => {{
        let listener = $crate::event_bus::Listener::new($handler);
        $crate::event_bus::event_bus().on($key, &listener);
        listener
    }};
}
