//! Request/success/failure lifecycle tracking for one state field.

use crate::core::{Event, Handler, HandlerMap, ReduceError, ERROR_FIELD, RESULTS_FIELD};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::warn;

/// The event types emitted around one asynchronous call.
///
/// # Example
///
/// ```rust
/// use reducer_kit::handlers::AsyncTypes;
///
/// let types = AsyncTypes::new("fetch_user");
/// assert_eq!(types.request, "FETCH_USER_REQUEST");
/// assert_eq!(types.success, "FETCH_USER_SUCCESS");
/// assert_eq!(types.failure, "FETCH_USER_FAILURE");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsyncTypes {
    pub request: String,
    pub success: String,
    pub failure: String,
}

impl AsyncTypes {
    /// Derive the triple from a call name, upper-cased.
    pub fn new(name: &str) -> Self {
        let name = name.to_uppercase();
        Self {
            request: format!("{name}_REQUEST"),
            success: format!("{name}_SUCCESS"),
            failure: format!("{name}_FAILURE"),
        }
    }

    /// Event announcing that the call started.
    pub fn request(&self) -> Event {
        Event::new(self.request.clone())
    }

    /// Event carrying the call's results.
    pub fn success(&self, results: impl Into<Value>) -> Event {
        Event::new(self.success.clone()).with(RESULTS_FIELD, results)
    }

    /// Event carrying the call's error.
    pub fn failure(&self, error: impl Into<Value>) -> Event {
        Event::new(self.failure.clone()).with(ERROR_FIELD, error)
    }
}

/// Handler map tracking `<key>`, `<key>Loading` and `<key>Error` of a
/// record-shaped state across the events in `types`.
///
/// - request: `<key>Loading` becomes `true`.
/// - success: `<key>` becomes the event's `results`, `<key>Error` is
///   cleared to `null` and `<key>Loading` becomes `false`.
/// - failure: `<key>` is kept, `<key>Error` becomes the event's `error`
///   and `<key>Loading` becomes `false`.
///
/// # Example
///
/// ```rust
/// use reducer_kit::builder::create_reducer;
/// use reducer_kit::handlers::{async_handler, AsyncTypes};
/// use serde_json::json;
///
/// let types = AsyncTypes::new("load");
/// let reducer = create_reducer(async_handler("user", &types), json!({})).unwrap();
///
/// let state = reducer.reduce(json!({}), &types.request()).unwrap();
/// assert_eq!(state["userLoading"], json!(true));
///
/// let state = reducer.reduce(state, &types.success(json!({ "name": "ada" }))).unwrap();
/// assert_eq!(state["user"], json!({ "name": "ada" }));
/// assert_eq!(state["userLoading"], json!(false));
/// ```
pub fn async_handler(key: &str, types: &AsyncTypes) -> HandlerMap {
    lifecycle(key, types, None)
}

/// Like [`async_handler`], but successful results pass through
/// `transition(results, event)` before being stored.
///
/// `transition` is also registered as the subreducer for `key`, so events
/// outside the lifecycle still reach the stored value.
pub fn async_handler_with<F>(key: &str, types: &AsyncTypes, transition: F) -> HandlerMap
where
    F: Fn(Value, &Event) -> Result<Value, ReduceError> + Send + Sync + 'static,
{
    let transition: Handler = Arc::new(transition);
    lifecycle(key, types, Some(transition.clone())).subreducer_handler(key, transition)
}

fn lifecycle(key: &str, types: &AsyncTypes, transition: Option<Handler>) -> HandlerMap {
    let loading = format!("{key}Loading");
    let error = format!("{key}Error");

    let on_request = {
        let loading = loading.clone();
        move |state: Value, event: &Event| -> Result<Value, ReduceError> {
            Ok(update_record(state, event, |record| {
                record.insert(loading.clone(), Value::Bool(true));
            }))
        }
    };

    let on_success = {
        let key = key.to_string();
        let loading = loading.clone();
        let error = error.clone();
        move |state: Value, event: &Event| -> Result<Value, ReduceError> {
            let results = event.results().cloned().unwrap_or(Value::Null);
            let value = match &transition {
                Some(transition) => transition(results, event)?,
                None => results,
            };
            Ok(update_record(state, event, |record| {
                record.insert(key.clone(), value);
                record.insert(error.clone(), Value::Null);
                record.insert(loading.clone(), Value::Bool(false));
            }))
        }
    };

    let on_failure = move |state: Value, event: &Event| -> Result<Value, ReduceError> {
        let failure = event.error().cloned().unwrap_or(Value::Null);
        Ok(update_record(state, event, |record| {
            record.insert(error.clone(), failure);
            record.insert(loading.clone(), Value::Bool(false));
        }))
    };

    HandlerMap::new()
        .on(types.request.clone(), on_request)
        .on(types.success.clone(), on_success)
        .on(types.failure.clone(), on_failure)
}

/// Apply `update` to a record-shaped state. `null` starts a new record;
/// any other shape is returned unchanged.
fn update_record(
    state: Value,
    event: &Event,
    update: impl FnOnce(&mut Map<String, Value>),
) -> Value {
    let mut record = match state {
        Value::Object(record) => record,
        Value::Null => Map::new(),
        other => {
            warn!(
                target: "reducer_kit::lifecycle",
                kind = event.kind().unwrap_or_default(),
                "Lifecycle event skipped: state is not a record"
            );
            return other;
        }
    };
    update(&mut record);
    Value::Object(record)
}
