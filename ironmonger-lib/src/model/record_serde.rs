//! Custom serialization for Record.
//!
//! ## Write Format (Serialization)
//!
//! When serializing a Record for create/update operations, fields serialize
//! as a flat JSON object. `Null` fields are skipped — the API treats absent
//! and null identically on writes.
//!
//! ## Read Format (Deserialization)
//!
//! When deserializing from API responses, every key becomes a field. String
//! values that parse as UUIDs or RFC 3339 timestamps are promoted to
//! `Value::Guid` / `Value::DateTime`; an `id` (or Mongo-style `_id`) key
//! additionally populates `Record::id` when it holds a UUID.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;
use uuid::Uuid;

use super::Record;
use super::Value;

// =============================================================================
// Serialization (for writes)
// =============================================================================

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;

        for (key, value) in &self.fields {
            match value {
                // Null values are not serialized; absent means the same thing.
                Value::Null => {}
                Value::Bool(b) => map.serialize_entry(key, b)?,
                Value::Int(n) => map.serialize_entry(key, n)?,
                Value::Float(n) => map.serialize_entry(key, n)?,
                Value::Decimal(d) => map.serialize_entry(key, d)?,
                Value::String(s) => map.serialize_entry(key, s)?,
                Value::Guid(g) => map.serialize_entry(key, g)?,
                Value::DateTime(dt) => map.serialize_entry(key, &dt.to_rfc3339())?,
                Value::Json(j) => map.serialize_entry(key, j)?,
            }
        }

        map.end()
    }
}

// =============================================================================
// Deserialization (from reads)
// =============================================================================

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map representing a storefront record")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut fields: HashMap<String, Value> = HashMap::new();
        let mut id: Option<Uuid> = None;

        while let Some(key) = map.next_key::<String>()? {
            let raw: serde_json::Value = map.next_value()?;
            let value = json_value_to_value(raw);

            if id.is_none() && (key == "id" || key == "_id") {
                if let Value::Guid(g) = &value {
                    id = Some(*g);
                }
            }

            fields.insert(key, value);
        }

        Ok(Record { id, fields })
    }
}

/// Converts a serde_json::Value to our Value enum.
fn json_value_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::Json(serde_json::Value::Number(n))
            }
        }
        serde_json::Value::String(s) => {
            // Try to parse as UUID
            if let Ok(uuid) = Uuid::parse_str(&s) {
                Value::Guid(uuid)
            }
            // Try to parse as DateTime (ISO 8601)
            else if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&s) {
                Value::DateTime(dt.with_timezone(&chrono::Utc))
            }
            // Otherwise keep as string
            else {
                Value::String(s)
            }
        }
        // Nested arrays and objects stay as JSON.
        other => Value::Json(other),
    }
}
