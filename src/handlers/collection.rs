//! Handlers addressing single elements of a collection-shaped state.

use crate::core::{
    identity_key, record_identity, Event, Handler, HandlerMap, ReduceError, DEFAULT_ID_KEY,
};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Handler map that applies `item` to one element of an array state.
///
/// The element is chosen by the integer at `index_field` on the event.
/// Events without an index, or with one outside the array, leave the
/// state unchanged. Every other element is carried over untouched.
///
/// # Example
///
/// ```rust
/// use reducer_kit::builder::create_reducer;
/// use reducer_kit::core::Event;
/// use reducer_kit::handlers::array_handler;
/// use serde_json::json;
///
/// let toggle = array_handler(
///     |item, _event| Ok(json!(!item.as_bool().unwrap_or(false))),
///     "index",
/// );
/// let reducer = create_reducer(toggle, json!([])).unwrap();
///
/// let next = reducer
///     .reduce(json!([false, false, true]), &Event::new("TOGGLE").with("index", 1))
///     .unwrap();
/// assert_eq!(next, json!([false, true, true]));
/// ```
pub fn array_handler<F>(item: F, index_field: impl Into<String>) -> HandlerMap
where
    F: Fn(Value, &Event) -> Result<Value, ReduceError> + Send + Sync + 'static,
{
    let item: Handler = Arc::new(item);
    let index_field = index_field.into();
    HandlerMap::new().on_default(move |state, event| update_at(state, event, &index_field, &item))
}

/// Apply `item` to the element of `state` addressed by `index_field`.
pub(crate) fn update_at(
    state: Value,
    event: &Event,
    index_field: &str,
    item: &Handler,
) -> Result<Value, ReduceError> {
    let mut items = match state {
        Value::Array(items) => items,
        Value::Null => return Ok(Value::Array(Vec::new())),
        other => return Ok(other),
    };

    let index = event
        .get(index_field)
        .and_then(Value::as_u64)
        .and_then(|i| usize::try_from(i).ok())
        .filter(|&i| i < items.len());

    if let Some(index) = index {
        let current = std::mem::take(&mut items[index]);
        items[index] = item(current, event)?;
    }
    Ok(Value::Array(items))
}

/// Field names used by [`object_list_handler`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectListKeys {
    /// Event field carrying the identity of the addressed entry
    pub action_key: String,
    /// Record field holding each item's identity
    pub item_key: String,
}

impl Default for ObjectListKeys {
    fn default() -> Self {
        Self {
            action_key: DEFAULT_ID_KEY.to_string(),
            item_key: DEFAULT_ID_KEY.to_string(),
        }
    }
}

/// Handler map that applies `item` to one entry of a keyed-object state.
///
/// The entry is chosen by the identity at `keys.action_key` on the event.
/// An array-shaped state is first converted into the keyed shape using
/// `keys.item_key`. Unknown identities leave the entries unchanged.
pub fn object_list_handler<F>(item: F, keys: ObjectListKeys) -> HandlerMap
where
    F: Fn(Value, &Event) -> Result<Value, ReduceError> + Send + Sync + 'static,
{
    HandlerMap::new().on_default(move |state, event| {
        let mut entries = match to_object_map(state, &keys.item_key) {
            Value::Object(entries) => entries,
            Value::Null => Map::new(),
            other => return Ok(other),
        };

        let target = event.get(&keys.action_key).and_then(identity_key);
        if let Some(key) = target {
            if let Some(current) = entries.remove(&key) {
                let next = item(current, event)?;
                entries.insert(key, next);
            }
        }
        Ok(Value::Object(entries))
    })
}

/// Map an array of records to an object keyed by identity.
///
/// Non-array input is returned unchanged. Records without an identity are
/// dropped; a repeated identity keeps the last record.
pub fn to_object_map(state: Value, key: &str) -> Value {
    match state {
        Value::Array(items) => Value::Object(
            items
                .into_iter()
                .filter_map(|record| record_identity(&record, key).map(|id| (id, record)))
                .collect(),
        ),
        other => other,
    }
}

/// Map an array of records to an object from identity to position.
///
/// Non-array input is returned unchanged.
pub fn to_index_map(state: Value, key: &str) -> Value {
    match state {
        Value::Array(items) => Value::Object(
            items
                .iter()
                .enumerate()
                .filter_map(|(position, record)| {
                    record_identity(record, key).map(|id| (id, Value::from(position)))
                })
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::create_reducer;
    use serde_json::json;

    fn mark_done(item: Value, _event: &Event) -> Result<Value, ReduceError> {
        let mut item = item;
        item["done"] = json!(true);
        Ok(item)
    }

    fn todos() -> Value {
        json!([{ "id": 1 }, { "id": 2 }, { "id": 3 }])
    }

    #[test]
    fn array_handler_replaces_only_addressed_element() {
        let reducer = create_reducer(array_handler(mark_done, "index"), json!([])).unwrap();

        let next = reducer
            .reduce(todos(), &Event::new("DONE").with("index", 1))
            .unwrap();
        assert_eq!(
            next,
            json!([{ "id": 1 }, { "id": 2, "done": true }, { "id": 3 }])
        );
    }

    #[test]
    fn array_handler_ignores_out_of_bounds_index() {
        let reducer = create_reducer(array_handler(mark_done, "index"), json!([])).unwrap();

        for index in [json!(5), json!(3), json!(-1), json!(1.5), json!("1")] {
            let event = Event::new("DONE").with("index", index);
            assert_eq!(reducer.reduce(todos(), &event).unwrap(), todos());
        }
    }

    #[test]
    fn array_handler_ignores_missing_index() {
        let reducer = create_reducer(array_handler(mark_done, "index"), json!([])).unwrap();
        assert_eq!(reducer.reduce(todos(), &Event::new("DONE")).unwrap(), todos());
    }

    #[test]
    fn array_handler_uses_configured_field() {
        let reducer = create_reducer(array_handler(mark_done, "position"), json!([])).unwrap();

        let ignored = Event::new("DONE").with("index", 0);
        assert_eq!(reducer.reduce(todos(), &ignored).unwrap(), todos());

        let addressed = Event::new("DONE").with("position", 0);
        let next = reducer.reduce(todos(), &addressed).unwrap();
        assert_eq!(next[0], json!({ "id": 1, "done": true }));
    }

    #[test]
    fn array_handler_leaves_non_arrays_alone() {
        let map = array_handler(mark_done, "index");
        let handler = map.default.clone().unwrap();

        let event = Event::new("DONE").with("index", 0);
        assert_eq!(handler(json!({ "a": 1 }), &event).unwrap(), json!({ "a": 1 }));
        assert_eq!(handler(Value::Null, &event).unwrap(), json!([]));
    }

    #[test]
    fn object_list_handler_updates_addressed_entry() {
        let reducer = create_reducer(
            object_list_handler(mark_done, ObjectListKeys::default()),
            json!({}),
        )
        .unwrap();

        let state = json!({ "a": { "id": "a" }, "b": { "id": "b" } });
        let next = reducer
            .reduce(state, &Event::new("DONE").with("id", "b"))
            .unwrap();

        assert_eq!(
            next,
            json!({ "a": { "id": "a" }, "b": { "id": "b", "done": true } })
        );
    }

    #[test]
    fn object_list_handler_ignores_unknown_identity() {
        let reducer = create_reducer(
            object_list_handler(mark_done, ObjectListKeys::default()),
            json!({}),
        )
        .unwrap();

        let state = json!({ "a": { "id": "a" } });
        let next = reducer
            .reduce(state.clone(), &Event::new("DONE").with("id", "z"))
            .unwrap();
        assert_eq!(next, state);
    }

    #[test]
    fn object_list_handler_normalises_arrays() {
        let keys = ObjectListKeys {
            action_key: "todo".to_string(),
            item_key: "id".to_string(),
        };
        let reducer = create_reducer(object_list_handler(mark_done, keys), json!({})).unwrap();

        let next = reducer
            .reduce(todos(), &Event::new("DONE").with("todo", 2))
            .unwrap();
        assert_eq!(
            next,
            json!({ "1": { "id": 1 }, "2": { "id": 2, "done": true }, "3": { "id": 3 } })
        );
    }

    #[test]
    fn to_object_map_keys_records_by_identity() {
        let map = to_object_map(json!([{ "id": 10 }, { "name": "anon" }, { "id": "x" }]), "id");
        assert_eq!(map, json!({ "10": { "id": 10 }, "x": { "id": "x" } }));

        assert_eq!(to_object_map(json!({ "k": 1 }), "id"), json!({ "k": 1 }));
    }

    #[test]
    fn to_index_map_keys_positions_by_identity() {
        let map = to_index_map(json!([{ "id": 10 }, { "id": 20 }, { "id": 30 }]), "id");
        assert_eq!(map, json!({ "10": 0, "20": 1, "30": 2 }));

        assert_eq!(to_index_map(json!("scalar"), "id"), json!("scalar"));
    }
}
