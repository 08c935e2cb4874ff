//! # Event Bus Module
//!
//! In-process publish/subscribe. Components register listeners under an
//! event key, other components emit events with an optional payload, and the
//! bus calls every matching listener synchronously before `emit` returns.
//!
//! ## Keys
//!
//! - `"user:login"` exact event name
//! - `"user:*"` every event in the `user` namespace
//! - `"*"` every event
//!
//! ## Usage
//!
//! ```rust,ignore
//! use busline_core::event_bus::{EventBus, Listener};
//! use serde_json::json;
//!
//! let bus = EventBus::new();
//!
//! let audit = Listener::new(|payload: Option<&serde_json::Value>| {
//!     println!("user event: {:?}", payload);
//! });
//! bus.on("user:*", &audit);
//!
//! // Fires once, then unregisters itself
//! bus.once("user:login", &Listener::new(|_| println!("first login")));
//!
//! bus.emit("user:login", Some(&json!({ "name": "ada" })));
//!
//! bus.off("user:*", &audit);
//! ```

mod bus;
mod global;
mod listener;
mod pattern;

pub use bus::*;
pub use global::*;
pub use listener::*;
pub use pattern::*;
