//! Event Bus implementation.
//!
//! Provides the [`EventBus`] registry and its synchronous dispatch.
//!
//! ## Dispatch order
//!
//! `emit(event, payload)` runs on the caller's thread:
//! 1. listeners registered under the exact key `event`
//! 2. listeners under every other key present when step 2 starts whose
//!    wildcard pattern matches `event`, in key registration order
//!
//! Each key's listener set is read when that key is visited, so changes made
//! by earlier listeners of the same emission are visible to later keys. The
//! set is copied before its members run and no lock is held while a listener
//! runs. A listener removed by an earlier listener of the same emission is
//! skipped.

use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use super::listener::{Listener, ListenerId};
use super::pattern::matches_wildcard;
use crate::config::EventBusConfig;

/// Listeners registered under one key, in registration order, without duplicates
type ListenerSet<P> = Vec<Listener<P>>;

/// Shared state behind every clone of an [`EventBus`]
struct Registry<P> {
    entries: RwLock<IndexMap<String, ListenerSet<P>>>,
    config: EventBusConfig,
}

impl<P> Registry<P> {
    fn new(config: EventBusConfig) -> Self {
        Self {
            entries: RwLock::new(IndexMap::new()),
            config,
        }
    }

    /// Add a listener under `key`. Returns false if it was already there.
    fn insert(&self, key: &str, listener: &Listener<P>) -> bool {
        let mut entries = self.entries.write();
        let set = entries.entry(key.to_string()).or_default();
        if set.contains(listener) {
            return false;
        }
        set.push(listener.clone());

        if let Some(limit) = self.config.max_listeners_per_key {
            if set.len() == limit.saturating_add(1) {
                tracing::warn!(
                    key,
                    limit,
                    "More than {} listeners registered for one key, possible listener leak",
                    limit
                );
            }
        }
        true
    }

    /// Remove the listener with `id` from `key`. Used by `off` and by one-shot wrappers.
    fn remove(&self, key: &str, id: ListenerId) -> bool {
        let mut entries = self.entries.write();
        let Some(set) = entries.get_mut(key) else {
            return false;
        };

        let before = set.len();
        set.retain(|listener| listener.id() != id);
        let removed = set.len() != before;

        if removed && set.is_empty() && self.config.prune_empty_keys {
            entries.shift_remove(key);
        }
        removed
    }

    fn contains(&self, key: &str, id: ListenerId) -> bool {
        self.entries
            .read()
            .get(key)
            .is_some_and(|set| set.iter().any(|listener| listener.id() == id))
    }

    fn snapshot(&self, key: &str) -> Option<ListenerSet<P>> {
        self.entries.read().get(key).cloned()
    }

    fn keys(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }
}

/// Deregisters a spent one-shot wrapper when dropped
struct OnceRemoval<'a, P> {
    registry: &'a Weak<Registry<P>>,
    key: &'a str,
    id: ListenerId,
}

impl<P> Drop for OnceRemoval<'_, P> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if registry.remove(self.key, self.id) {
                tracing::debug!("{} consumed for '{}'", self.id, self.key);
            }
        }
    }
}

/// Synchronous publish/subscribe bus keyed by event name or pattern.
///
/// `P` is the payload type; listeners receive `Option<&P>`. The default,
/// [`serde_json::Value`], gives an untyped payload.
///
/// Cloning is cheap and every clone shares the same registry.
pub struct EventBus<P = serde_json::Value> {
    registry: Arc<Registry<P>>,
}

impl<P> EventBus<P> {
    /// Create a new event bus with default configuration
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    /// Create a new event bus with custom configuration
    pub fn with_config(config: EventBusConfig) -> Self {
        Self {
            registry: Arc::new(Registry::new(config)),
        }
    }

    /// Get the current configuration
    pub fn config(&self) -> &EventBusConfig {
        &self.registry.config
    }

    /// Register `listener` under `key`.
    ///
    /// `key` is an exact event name, `*`, or `<namespace>:*`. Registering the
    /// same handle twice under one key has no further effect.
    pub fn on(&self, key: &str, listener: &Listener<P>) {
        if self.registry.insert(key, listener) {
            tracing::debug!("{} registered for '{}'", listener.id(), key);
        }
    }

    /// Register `listener` to run on the first matching emission only.
    ///
    /// A wrapper handle is registered under `key`; after `listener` returns
    /// the wrapper removes itself. For a wildcard key the first emission
    /// matching the pattern consumes it, whatever its concrete name. The
    /// wrapper is returned so it can be cancelled with [`EventBus::off`]
    /// before it fires.
    pub fn once(&self, key: &str, listener: &Listener<P>) -> Listener<P>
    where
        P: 'static,
    {
        let id = ListenerId::new();
        // Weak so a pending wrapper does not keep its own registry alive
        let registry = Arc::downgrade(&self.registry);
        let inner = listener.clone();
        let owned_key = key.to_string();
        let fired = AtomicBool::new(false);

        let wrapper = Listener::with_id(id, move |payload: Option<&P>| {
            // Also covers reentrant and concurrent emissions reaching the wrapper
            if fired.swap(true, Ordering::SeqCst) {
                return;
            }
            // Removes the wrapper after the callback, also when it panics
            let _consumed = OnceRemoval {
                registry: &registry,
                key: &owned_key,
                id,
            };
            inner.call(payload);
        });

        self.on(key, &wrapper);
        wrapper
    }

    /// Remove `listener` from `key`.
    ///
    /// Matches by handle identity. Does nothing if the key is unknown or the
    /// handle was never registered under it.
    pub fn off(&self, key: &str, listener: &Listener<P>) {
        if self.registry.remove(key, listener.id()) {
            tracing::debug!("{} removed from '{}'", listener.id(), key);
        }
    }

    /// Remove every listener under `key`, or the whole registry when `key` is `None`.
    pub fn off_all(&self, key: Option<&str>) {
        let mut entries = self.registry.entries.write();
        match key {
            Some(key) => {
                if let Some(set) = entries.shift_remove(key) {
                    tracing::debug!("Removed {} listeners from '{}'", set.len(), key);
                }
            }
            None => {
                tracing::debug!("Cleared {} event keys", entries.len());
                entries.clear();
            }
        }
    }

    /// Emit `event` to exact-key listeners, then to matching wildcard listeners.
    ///
    /// Listeners run inline before this returns. A panicking listener unwinds
    /// through here and the remaining listeners of this emission do not run.
    pub fn emit(&self, event: &str, payload: Option<&P>) {
        if let Some(listeners) = self.registry.snapshot(event) {
            self.dispatch(event, event, &listeners, payload);
        }

        for key in self.registry.keys() {
            if !matches_wildcard(&key, event) {
                continue;
            }
            // the key may have been removed by a listener that already ran
            if let Some(listeners) = self.registry.snapshot(&key) {
                self.dispatch(&key, event, &listeners, payload);
            }
        }
    }

    fn dispatch(&self, key: &str, event: &str, listeners: &[Listener<P>], payload: Option<&P>) {
        for listener in listeners {
            if !self.registry.contains(key, listener.id()) {
                continue;
            }
            if self.registry.config.trace_dispatch {
                tracing::trace!(event, key, listener = %listener.id(), "Dispatching event");
            }
            listener.call(payload);
        }
    }

    /// Number of listeners registered under exactly `key`
    pub fn listener_count(&self, key: &str) -> usize {
        self.registry
            .entries
            .read()
            .get(key)
            .map_or(0, |set| set.len())
    }

    /// Whether any listener is registered under exactly `key`
    pub fn has_listeners(&self, key: &str) -> bool {
        self.listener_count(key) > 0
    }

    /// Registered keys in first-registration order, including emptied ones
    pub fn keys(&self) -> Vec<String> {
        self.registry.keys()
    }

    /// Whether the registry holds no keys at all
    pub fn is_empty(&self) -> bool {
        self.registry.entries.read().is_empty()
    }
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for EventBus<P> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<P> std::fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("key_count", &self.registry.entries.read().len())
            .field("config", &self.registry.config)
            .finish()
    }
}
