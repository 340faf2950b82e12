//! Events that drive state transitions.
//!
//! An event is an immutable record with a `type` discriminant and any number
//! of payload fields. It serializes to the flat JSON shape
//! `{ "type": "...", ...fields }`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field carrying the payload of a successful asynchronous call.
pub const RESULTS_FIELD: &str = "results";

/// Field carrying the error of a failed asynchronous call.
pub const ERROR_FIELD: &str = "error";

/// A tagged record driving a state transition.
///
/// The `type` discriminant selects routing. Events without one never match
/// an explicit route, but still reach subreducers and default handlers.
///
/// # Example
///
/// ```rust
/// use reducer_kit::core::Event;
/// use serde_json::json;
///
/// let event = Event::new("TODO_TOGGLE").with("index", 2);
///
/// assert_eq!(event.kind(), Some("TODO_TOGGLE"));
/// assert_eq!(event.get("index"), Some(&json!(2)));
/// assert!(!event.contains("id"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,

    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Event {
    /// Create an event with the given discriminant and no payload.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            fields: Map::new(),
        }
    }

    /// Create an event without a discriminant.
    pub fn untyped() -> Self {
        Self::default()
    }

    /// Add a payload field, returning the extended event.
    ///
    /// Setting `type` to a string replaces the discriminant. Any other
    /// `type` value is ignored, since the discriminant is always a string.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let field = field.into();
        match value.into() {
            Value::String(kind) if field == "type" => self.kind = Some(kind),
            _ if field == "type" => {}
            value => {
                self.fields.insert(field, value);
            }
        }
        self
    }

    /// The event discriminant, if any.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// Look up a payload field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Whether the payload carries `field`.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// The `results` payload field.
    pub fn results(&self) -> Option<&Value> {
        self.get(RESULTS_FIELD)
    }

    /// The `error` payload field.
    pub fn error(&self) -> Option<&Value> {
        self.get(ERROR_FIELD)
    }

    /// All payload fields, excluding the discriminant.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl TryFrom<Value> for Event {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}
