//! Record identity helpers.

use serde_json::{Number, Value};

/// Default name of the identity field on records and events.
pub const DEFAULT_ID_KEY: &str = "id";

/// Default name of the position field on events addressing array elements.
pub const DEFAULT_INDEX_KEY: &str = "index";

/// Largest magnitude at which every whole `f64` is exactly representable.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Textual form of an identity value.
///
/// Identities are strings or numbers; both are keyed by their text so that
/// they can index a JSON object. Whole-number floats are keyed like the
/// equal integer, so `10` and `10.0` name the same record. Anything else has
/// no identity.
pub fn identity_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_key(n)),
        _ => None,
    }
}

fn number_key(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64().filter(|f| f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT) {
            return (f as i64).to_string();
        }
    }
    n.to_string()
}

/// Identity of `record` read from its `id_key` field.
pub fn record_identity(record: &Value, id_key: &str) -> Option<String> {
    record.get(id_key).and_then(identity_key)
}
