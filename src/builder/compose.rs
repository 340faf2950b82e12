//! Composition of handler maps into reducers.

use crate::builder::error::BuildError;
use crate::builder::overlap::{check_overlapping, duplicate_names};
use crate::core::HandlerMap;
use crate::reducer::Reducer;
use serde_json::Value;
use stillwater::validation::Validation;
use tracing::debug;

/// Handler maps accepted by [`create_reducer`].
///
/// Either a single map, used as is, or a sequence of independently
/// authored maps to be merged.
#[derive(Clone, Debug)]
pub enum Handlers {
    Single(HandlerMap),
    Many(Vec<HandlerMap>),
}

impl Default for Handlers {
    fn default() -> Self {
        Self::Single(HandlerMap::new())
    }
}

impl From<HandlerMap> for Handlers {
    fn from(map: HandlerMap) -> Self {
        Self::Single(map)
    }
}

impl From<Vec<HandlerMap>> for Handlers {
    fn from(maps: Vec<HandlerMap>) -> Self {
        Self::Many(maps)
    }
}

impl<const N: usize> From<[HandlerMap; N]> for Handlers {
    fn from(maps: [HandlerMap; N]) -> Self {
        Self::Many(maps.into())
    }
}

impl From<Option<HandlerMap>> for Handlers {
    fn from(map: Option<HandlerMap>) -> Self {
        map.map(Self::Single).unwrap_or_default()
    }
}

/// Build a reducer from one or more handler maps.
///
/// A sequence of maps is merged into one routing table. Merging fails if
/// two maps define the same subreducer field, or the same event type or
/// `DEFAULT`; every duplicate is named in the error. Registering the
/// reserved `SUBREDUCERS` name as an event type also fails.
///
/// # Example
///
/// ```rust
/// use reducer_kit::builder::create_reducer;
/// use reducer_kit::core::{Event, HandlerMap};
/// use serde_json::json;
///
/// let adds = HandlerMap::new().on("ADD", |state, event| {
///     let by = event.get("by").and_then(|v| v.as_i64()).unwrap_or(1);
///     Ok(json!(state.as_i64().unwrap_or(0) + by))
/// });
/// let resets = HandlerMap::new().on("RESET", |_state, _event| Ok(json!(0)));
///
/// let reducer = create_reducer(vec![adds, resets], json!(0)).unwrap();
///
/// let state = reducer.reduce(json!(1), &Event::new("ADD").with("by", 4)).unwrap();
/// assert_eq!(state, json!(5));
/// ```
pub fn create_reducer(
    handlers: impl Into<Handlers>,
    initial_state: Value,
) -> Result<Reducer, BuildError> {
    let map = match handlers.into() {
        Handlers::Single(map) => map,
        Handlers::Many(maps) => merge(maps)?,
    };

    if let Some(kind) = map.reserved.first() {
        return Err(BuildError::ReservedEventType { kind: kind.clone() });
    }

    debug!(
        target: "reducer_kit::compose",
        routes = map.routes.len(),
        subreducers = map.subreducers.len(),
        default = map.default.is_some(),
        "Reducer composed"
    );

    Ok(Reducer::from_map(map, initial_state))
}

fn merge(maps: Vec<HandlerMap>) -> Result<HandlerMap, BuildError> {
    if let Validation::Failure(duplicates) =
        check_overlapping(maps.iter().map(HandlerMap::subreducer_fields))
    {
        return Err(BuildError::OverlappingSubreducers {
            fields: duplicate_names(duplicates),
        });
    }

    if let Validation::Failure(duplicates) = check_overlapping(maps.iter().map(HandlerMap::keys)) {
        return Err(BuildError::OverlappingHandlers {
            keys: duplicate_names(duplicates),
        });
    }

    let mut merged = HandlerMap::new();
    for map in maps {
        merged.routes.extend(map.routes);
        merged.subreducers.extend(map.subreducers);
        merged.reserved.extend(map.reserved);
        if map.default.is_some() {
            merged.default = map.default;
        }
    }
    Ok(merged)
}
