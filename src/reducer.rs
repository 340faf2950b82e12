//! Composed reducers: the runtime side of composition.

use crate::core::{Event, Handler, HandlerMap, ReduceError};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{trace, warn};

/// A composed state-transition function `(state, event) -> state`.
///
/// Built once by [`create_reducer`](crate::builder::create_reducer); the
/// routing table is immutable afterwards. Routing for each event, in order:
///
/// 1. an explicit route whose key equals the event discriminant,
/// 2. fan-out to every subreducer, each applied to its own field,
/// 3. the `DEFAULT` transition,
/// 4. otherwise the state is returned unchanged.
///
/// Fan-out needs a record-shaped state. Any other shape skips it and
/// continues with `DEFAULT`.
///
/// A `null` state is treated as absent and replaced by the initial state
/// before routing. An unmatched event therefore returns non-null states
/// unchanged, but turns `null` into the initial state. Cloning a reducer is
/// cheap; clones share handlers.
#[derive(Clone)]
pub struct Reducer {
    routes: Arc<HashMap<String, Handler>>,
    default: Option<Handler>,
    subreducers: Arc<Vec<(String, Handler)>>,
    initial_state: Arc<Value>,
}

impl Reducer {
    pub(crate) fn from_map(map: HandlerMap, initial_state: Value) -> Self {
        Self {
            routes: Arc::new(map.routes.into_iter().collect()),
            default: map.default,
            subreducers: Arc::new(map.subreducers.into_iter().collect()),
            initial_state: Arc::new(initial_state),
        }
    }

    /// The state used when `null` is passed in.
    pub fn initial_state(&self) -> &Value {
        &self.initial_state
    }

    /// Whether an explicit route exists for `kind`.
    pub fn handles(&self, kind: &str) -> bool {
        self.routes.contains_key(kind)
    }

    /// Compute the next state for `event`.
    pub fn reduce(&self, state: Value, event: &Event) -> Result<Value, ReduceError> {
        let state = if state.is_null() {
            Value::clone(&self.initial_state)
        } else {
            state
        };

        if let Some((kind, handler)) = event.kind().and_then(|k| self.routes.get_key_value(k)) {
            trace!(target: "reducer_kit::dispatch", kind = %kind, "Exact route");
            return handler(state, event);
        }

        let state = if self.subreducers.is_empty() {
            state
        } else {
            match state {
                Value::Object(record) => {
                    trace!(
                        target: "reducer_kit::dispatch",
                        fields = self.subreducers.len(),
                        "Subreducer fan-out"
                    );
                    return self.fan_out(record, event).map(Value::Object);
                }
                other => {
                    warn!(
                        target: "reducer_kit::dispatch",
                        kind = event.kind().unwrap_or_default(),
                        "Subreducers skipped: state is not a record"
                    );
                    other
                }
            }
        };

        if let Some(default) = &self.default {
            trace!(target: "reducer_kit::dispatch", "Default transition");
            return default(state, event);
        }

        Ok(state)
    }

    /// Apply `events` in order, starting from `state`.
    ///
    /// Stops at the first error.
    pub fn reduce_all<'a, I>(&self, state: Value, events: I) -> Result<Value, ReduceError>
    where
        I: IntoIterator<Item = &'a Event>,
    {
        events
            .into_iter()
            .try_fold(state, |state, event| self.reduce(state, event))
    }

    /// Share this reducer as a plain handler, e.g. to nest it as a subreducer.
    pub fn into_handler(self) -> Handler {
        Arc::new(move |state: Value, event: &Event| self.reduce(state, event))
    }

    fn fan_out(
        &self,
        mut record: Map<String, Value>,
        event: &Event,
    ) -> Result<Map<String, Value>, ReduceError> {
        for (field, handler) in self.subreducers.iter() {
            let current = record.remove(field).unwrap_or(Value::Null);
            record.insert(field.clone(), handler(current, event)?);
        }
        Ok(record)
    }
}

impl fmt::Debug for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut routes: Vec<&String> = self.routes.keys().collect();
        routes.sort();
        f.debug_struct("Reducer")
            .field("routes", &routes)
            .field("default", &self.default.is_some())
            .field(
                "subreducers",
                &self.subreducers.iter().map(|(f, _)| f).collect::<Vec<_>>(),
            )
            .field("initial_state", &self.initial_state)
            .finish()
    }
}
