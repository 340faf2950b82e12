//! Handler maps: routing tables from event discriminants to transitions.

use super::error::ReduceError;
use super::event::Event;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// Reserved name of the fallback transition.
pub const DEFAULT: &str = "DEFAULT";

/// Reserved name of the per-field subreducer table.
pub const SUBREDUCERS: &str = "SUBREDUCERS";

/// A pure transition from one snapshot to the next.
///
/// Handlers take the prior snapshot by value and return the next one, so
/// parts of the tree a handler does not touch move through unchanged.
pub type Handler = Arc<dyn Fn(Value, &Event) -> Result<Value, ReduceError> + Send + Sync>;

/// Key under which a handler is registered in a [`HandlerMap`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RouteKey {
    /// An explicit event discriminant
    Event(String),
    /// The fallback slot
    Default,
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Event(kind) => f.write_str(kind),
            Self::Default => f.write_str(DEFAULT),
        }
    }
}

/// A table of transitions keyed by event discriminant.
///
/// Besides explicit routes a map may carry a `DEFAULT` transition for
/// every unmatched event, and a `SUBREDUCERS` table naming a transition
/// for individual fields of a record-shaped state. Maps are plain values:
/// build one per concern and merge them when composing a
/// [`Reducer`](crate::Reducer).
///
/// # Example
///
/// ```rust
/// use reducer_kit::core::{HandlerMap, RouteKey};
/// use serde_json::json;
///
/// let counter = HandlerMap::new()
///     .on("INCREMENT", |state, _event| Ok(json!(state.as_i64().unwrap_or(0) + 1)))
///     .on_default(|state, _event| Ok(state));
///
/// assert!(counter.handles("INCREMENT"));
/// assert!(counter.keys().contains(&RouteKey::Default));
/// ```
#[derive(Clone, Default)]
pub struct HandlerMap {
    pub(crate) routes: BTreeMap<String, Handler>,
    pub(crate) default: Option<Handler>,
    pub(crate) subreducers: BTreeMap<String, Handler>,
    pub(crate) reserved: Vec<String>,
}

impl HandlerMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Route events of type `kind` to `handler`.
    ///
    /// Registering under [`DEFAULT`] fills the fallback slot. [`SUBREDUCERS`]
    /// is not a routable event type and makes composition fail.
    pub fn on<F>(mut self, kind: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Value, &Event) -> Result<Value, ReduceError> + Send + Sync + 'static,
    {
        let kind = kind.into();
        match kind.as_str() {
            DEFAULT => self.default = Some(Arc::new(handler)),
            SUBREDUCERS => self.reserved.push(kind),
            _ => {
                self.routes.insert(kind, Arc::new(handler));
            }
        }
        self
    }

    /// Set the fallback transition for unmatched events.
    pub fn on_default<F>(mut self, handler: F) -> Self
    where
        F: Fn(Value, &Event) -> Result<Value, ReduceError> + Send + Sync + 'static,
    {
        self.default = Some(Arc::new(handler));
        self
    }

    /// Delegate `field` of a record-shaped state to `handler`.
    pub fn subreducer<F>(self, field: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Value, &Event) -> Result<Value, ReduceError> + Send + Sync + 'static,
    {
        self.subreducer_handler(field, Arc::new(handler))
    }

    /// Delegate `field` to an already shared handler.
    pub fn subreducer_handler(mut self, field: impl Into<String>, handler: Handler) -> Self {
        self.subreducers.insert(field.into(), handler);
        self
    }

    /// Delegate `field` to a composed reducer.
    pub fn nest(self, field: impl Into<String>, reducer: crate::Reducer) -> Self {
        self.subreducer_handler(field, reducer.into_handler())
    }

    /// Whether an explicit route exists for `kind`.
    pub fn handles(&self, kind: &str) -> bool {
        self.routes.contains_key(kind)
    }

    /// Whether a fallback transition is set.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Route keys defined by this map, excluding subreducers.
    pub fn keys(&self) -> BTreeSet<RouteKey> {
        let mut keys: BTreeSet<RouteKey> =
            self.routes.keys().cloned().map(RouteKey::Event).collect();
        if self.default.is_some() {
            keys.insert(RouteKey::Default);
        }
        keys
    }

    /// Field names delegated to subreducers.
    pub fn subreducer_fields(&self) -> BTreeSet<String> {
        self.subreducers.keys().cloned().collect()
    }

    /// Whether the map defines nothing at all.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
            && self.default.is_none()
            && self.subreducers.is_empty()
            && self.reserved.is_empty()
    }
}

impl fmt::Debug for HandlerMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerMap")
            .field("routes", &self.routes.keys().collect::<Vec<_>>())
            .field("default", &self.default.is_some())
            .field("subreducers", &self.subreducers.keys().collect::<Vec<_>>())
            .finish()
    }
}
