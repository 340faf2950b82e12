//! Model arrays: ordered record collections with an identity index.
//!
//! A model array keeps records in insertion order alongside a map from
//! each record's identity to its position, so records can be addressed
//! either way. Its snapshot shape is `{ "objects": [...], "map": {...} }`.

use super::collection::array_handler;
use crate::builder::{create_reducer, BuildError};
use crate::core::{
    identity_key, record_identity, Event, Handler, HandlerMap, ReduceError, DEFAULT_ID_KEY,
    DEFAULT_INDEX_KEY,
};
use crate::reducer::Reducer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Snapshot field holding the ordered records.
pub const OBJECTS_FIELD: &str = "objects";

/// Snapshot field holding the identity-to-position index.
pub const MAP_FIELD: &str = "map";

/// Ordered records plus an index from identity to position.
///
/// For every identity in the index, the record at its position carries
/// that identity. Existing records keep their position; new records are
/// appended.
///
/// # Example
///
/// ```rust
/// use reducer_kit::handlers::ModelArray;
/// use serde_json::json;
///
/// let models = ModelArray::from_records(
///     vec![json!({ "id": 10 }), json!({ "id": 20 })],
///     "id",
/// )
/// .unwrap();
///
/// let models = models
///     .upsert(vec![json!({ "id": 30 }), json!({ "id": 10, "seen": true })], "id")
///     .unwrap();
///
/// assert_eq!(models.len(), 3);
/// assert_eq!(models.get(10), Some(&json!({ "id": 10, "seen": true })));
/// assert_eq!(models.position(30), Some(2));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelArray {
    objects: Vec<Value>,
    map: BTreeMap<String, usize>,
}

impl ModelArray {
    /// Create an empty model array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `records` by the identity found at `id_key`.
    ///
    /// Records are kept verbatim and in order. Fails if any record has no
    /// identity.
    pub fn from_records(records: Vec<Value>, id_key: &str) -> Result<Self, ReduceError> {
        Self::index(records, id_key, None)
    }

    /// Read a model array out of a snapshot.
    ///
    /// Missing or malformed parts are read as empty.
    pub fn from_state(state: Value) -> Self {
        let Value::Object(mut record) = state else {
            return Self::default();
        };

        let objects = match record.remove(OBJECTS_FIELD) {
            Some(Value::Array(objects)) => objects,
            _ => Vec::new(),
        };
        let map = match record.remove(MAP_FIELD) {
            Some(Value::Object(map)) => map
                .into_iter()
                .filter_map(|(key, position)| {
                    let position = usize::try_from(position.as_u64()?).ok()?;
                    Some((key, position))
                })
                .collect(),
            _ => BTreeMap::new(),
        };

        Self { objects, map }
    }

    /// Look up a record by identity in a model array snapshot.
    ///
    /// Reads only the `objects` and `map` of `state` itself, so it works on
    /// a model array embedded anywhere in a larger snapshot.
    pub fn lookup(state: &Value, identity: impl Into<Value>) -> Option<&Value> {
        let key = identity_key(&identity.into())?;
        let position = state.get(MAP_FIELD)?.get(&key)?.as_u64()?;
        state
            .get(OBJECTS_FIELD)?
            .get(usize::try_from(position).ok()?)
    }

    /// The record with the given identity.
    pub fn get(&self, identity: impl Into<Value>) -> Option<&Value> {
        self.objects.get(self.position(identity)?)
    }

    /// Position of the record with the given identity.
    pub fn position(&self, identity: impl Into<Value>) -> Option<usize> {
        let key = identity_key(&identity.into())?;
        self.map.get(&key).copied()
    }

    /// Records in order.
    pub fn objects(&self) -> &[Value] {
        &self.objects
    }

    /// Identity index.
    pub fn index_map(&self) -> &BTreeMap<String, usize> {
        &self.map
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Insert or update `records` by identity.
    ///
    /// Known identities are overwritten in place; new ones are appended in
    /// input order. A repeated identity within `records` keeps the last one.
    pub fn upsert(self, records: Vec<Value>, id_key: &str) -> Result<Self, ReduceError> {
        self.upsert_with(records, id_key, &Event::untyped(), None)
    }

    fn index(records: Vec<Value>, id_key: &str, kind: Option<&str>) -> Result<Self, ReduceError> {
        let mut map = BTreeMap::new();
        for (position, record) in records.iter().enumerate() {
            let key = record_identity(record, id_key).ok_or_else(|| ReduceError::MissingIdentity {
                kind: kind.map(str::to_string),
                field: id_key.to_string(),
                position,
            })?;
            if map.insert(key, position).is_some() {
                warn!(
                    target: "reducer_kit::model_array",
                    position,
                    "Duplicate identity in initial records"
                );
            }
        }
        Ok(Self {
            objects: records,
            map,
        })
    }

    fn upsert_with(
        mut self,
        records: Vec<Value>,
        id_key: &str,
        event: &Event,
        item: Option<&Handler>,
    ) -> Result<Self, ReduceError> {
        for (position, record) in records.into_iter().enumerate() {
            let key = record_identity(&record, id_key).ok_or_else(|| ReduceError::MissingIdentity {
                kind: event.kind().map(str::to_string),
                field: id_key.to_string(),
                position,
            })?;
            let value = match item {
                Some(item) => item(record, event)?,
                None => record,
            };

            let existing = self
                .map
                .get(&key)
                .copied()
                .filter(|&index| index < self.objects.len());
            match existing {
                Some(index) => self.objects[index] = value,
                None => {
                    self.map.insert(key, self.objects.len());
                    self.objects.push(value);
                }
            }
        }
        Ok(self)
    }
}

impl From<ModelArray> for Value {
    fn from(models: ModelArray) -> Self {
        let map: Map<String, Value> = models
            .map
            .into_iter()
            .map(|(key, position)| (key, Value::from(position)))
            .collect();

        let mut record = Map::new();
        record.insert(OBJECTS_FIELD.to_string(), Value::Array(models.objects));
        record.insert(MAP_FIELD.to_string(), Value::Object(map));
        Value::Object(record)
    }
}

/// Records carried by an event's `results`; a lone record is one record.
fn payload_records(event: &Event) -> Vec<Value> {
    match event.results() {
        Some(Value::Array(records)) => records.clone(),
        Some(Value::Null) | None => Vec::new(),
        Some(record) => vec![record.clone()],
    }
}

/// Builder for model array handler maps.
///
/// # Example
///
/// ```rust
/// use reducer_kit::core::Event;
/// use reducer_kit::handlers::{ModelArray, ModelArrayBuilder};
/// use serde_json::json;
///
/// let reducer = ModelArrayBuilder::new()
///     .initializer("USERS_LOADED")
///     .updater("USERS_SAVED")
///     .build_reducer()
///     .unwrap();
///
/// let loaded = Event::new("USERS_LOADED").with("results", json!([{ "id": 1 }, { "id": 2 }]));
/// let saved = Event::new("USERS_SAVED").with("results", json!({ "id": 3 }));
///
/// let state = reducer.reduce_all(json!(null), [&loaded, &saved]).unwrap();
/// assert_eq!(ModelArray::lookup(&state, 3), Some(&json!({ "id": 3 })));
/// ```
#[derive(Clone)]
pub struct ModelArrayBuilder {
    initializer: Option<String>,
    updater: Option<String>,
    item: Option<Handler>,
    id_key: String,
    index_key: String,
}

impl ModelArrayBuilder {
    /// Create a builder with the default `id` and `index` field names.
    pub fn new() -> Self {
        Self {
            initializer: None,
            updater: None,
            item: None,
            id_key: DEFAULT_ID_KEY.to_string(),
            index_key: DEFAULT_INDEX_KEY.to_string(),
        }
    }

    /// Event type that replaces the whole collection (required).
    pub fn initializer(mut self, kind: impl Into<String>) -> Self {
        self.initializer = Some(kind.into());
        self
    }

    /// Event type that upserts records (optional).
    pub fn updater(mut self, kind: impl Into<String>) -> Self {
        self.updater = Some(kind.into());
        self
    }

    /// Per-record transition, used on upsert and on index-addressed events.
    pub fn item<F>(mut self, item: F) -> Self
    where
        F: Fn(Value, &Event) -> Result<Value, ReduceError> + Send + Sync + 'static,
    {
        self.item = Some(Arc::new(item));
        self
    }

    /// Record field holding each record's identity.
    pub fn id_key(mut self, key: impl Into<String>) -> Self {
        self.id_key = key.into();
        self
    }

    /// Event field addressing a record by position.
    pub fn index_key(mut self, key: impl Into<String>) -> Self {
        self.index_key = key.into();
        self
    }

    /// Build the handler map.
    pub fn build(self) -> Result<HandlerMap, BuildError> {
        let initializer = self.initializer.ok_or(BuildError::MissingInitializer)?;
        if self.updater.as_ref() == Some(&initializer) {
            return Err(BuildError::OverlappingHandlers {
                keys: vec![initializer],
            });
        }

        let id_key = self.id_key.clone();
        let mut map = HandlerMap::new().on(initializer, move |_state, event| {
            let models = ModelArray::index(payload_records(event), &id_key, event.kind())?;
            debug!(
                target: "reducer_kit::model_array",
                records = models.len(),
                "Model array initialised"
            );
            Ok(models.into())
        });

        if let Some(updater) = self.updater {
            let id_key = self.id_key.clone();
            let item = self.item.clone();
            map = map.on(updater, move |state, event| {
                let records = payload_records(event);
                let count = records.len();
                let models = ModelArray::from_state(state).upsert_with(
                    records,
                    &id_key,
                    event,
                    item.as_ref(),
                )?;
                debug!(
                    target: "reducer_kit::model_array",
                    records = count,
                    total = models.len(),
                    "Model array upserted"
                );
                Ok(models.into())
            });
        }

        if let Some(item) = self.item {
            let items = create_reducer(
                array_handler(move |record, event| item(record, event), self.index_key),
                Value::Array(Vec::new()),
            )?;
            map = map.on_default(move |state, event| reduce_objects(&items, state, event));
        }

        Ok(map)
    }

    /// Build the handler map and compose it into a reducer whose initial
    /// state is an empty model array.
    pub fn build_reducer(self) -> Result<Reducer, BuildError> {
        create_reducer(self.build()?, ModelArray::new().into())
    }
}

impl Default for ModelArrayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Route an event through `items` over the `objects` of a model array
/// snapshot. The identity index is left as it is.
fn reduce_objects(items: &Reducer, state: Value, event: &Event) -> Result<Value, ReduceError> {
    match state {
        Value::Object(mut record) => {
            if let Some(objects) = record.remove(OBJECTS_FIELD) {
                record.insert(OBJECTS_FIELD.to_string(), items.reduce(objects, event)?);
            }
            Ok(Value::Object(record))
        }
        other => Ok(other),
    }
}
