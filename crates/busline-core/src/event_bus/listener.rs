//! Listener handles.
//!
//! A [`Listener`] is the unit the bus stores under an event key. Identity is
//! carried by a [`ListenerId`] assigned at construction, so clones of one
//! handle compare equal while two handles built from equivalent closures do
//! not.

use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Identity of a registered listener handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl ListenerId {
    /// Create a new unique listener ID
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({})", &self.0.simple().to_string()[..8])
    }
}

/// Callback signature shared by all listeners of a bus with payload type `P`.
///
/// The payload is `None` when an event is emitted without one.
pub type ListenerFn<P> = dyn Fn(Option<&P>) + Send + Sync;

/// An identity-comparable handle to a listener function.
///
/// Cloning is cheap and keeps the identity, which is what [`EventBus::off`]
/// matches on.
///
/// [`EventBus::off`]: super::EventBus::off
pub struct Listener<P> {
    id: ListenerId,
    func: Arc<ListenerFn<P>>,
}

impl<P> Listener<P> {
    /// Wrap a closure in a new handle with a fresh identity
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Option<&P>) + Send + Sync + 'static,
    {
        Self::with_id(ListenerId::new(), func)
    }

    pub(crate) fn with_id<F>(id: ListenerId, func: F) -> Self
    where
        F: Fn(Option<&P>) + Send + Sync + 'static,
    {
        Self {
            id,
            func: Arc::new(func),
        }
    }

    /// The identity of this handle
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Invoke the wrapped function directly, bypassing any bus
    pub fn call(&self, payload: Option<&P>) {
        (self.func)(payload)
    }
}

impl<P> Clone for Listener<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            func: Arc::clone(&self.func),
        }
    }
}

impl<P> PartialEq for Listener<P> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<P> Eq for Listener<P> {}

impl<P> std::hash::Hash for Listener<P> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<P> fmt::Debug for Listener<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener").field("id", &self.id).finish()
    }
}
