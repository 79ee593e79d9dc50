//! Dataset, record and field value types
//!
//! The persisted document is a JSON object keyed by resource name, each value
//! an array of flat records:
//!
//! ```text
//! {
//!   "users": [ { "id": 1, "name": "...", "email": "..." }, ... ],
//!   "deals": [ ... ]
//! }
//! ```
//!
//! Clients may only write JSON scalars, and those are never type checked; a
//! record is whatever the client sent for the declared fields. Collections
//! and fields keep document order, with `id` first on created records.

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// Name of the identifier field present on every record
pub const ID_FIELD: &str = "id";

/// A field value.
///
/// Clients may only write scalars. `Nested` holds an array or object found in
/// a persisted document so that it survives a load/save cycle unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Nested(Value),
}

impl FieldValue {
    /// Create an integer value
    pub fn integer(n: i64) -> Self {
        FieldValue::Number(Number::from(n))
    }

    /// Create a text value
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    /// Textual form used for identifier comparison.
    ///
    /// Numbers render as their JSON text, strings verbatim, `true` as `1`,
    /// `false`, null and nested values as the empty string.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Null | FieldValue::Nested(_) => Cow::Borrowed(""),
            FieldValue::Bool(true) => Cow::Borrowed("1"),
            FieldValue::Bool(false) => Cow::Borrowed(""),
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
            FieldValue::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }

    /// Lenient integer reading used for id allocation.
    ///
    /// Floats truncate, strings contribute their leading integer prefix,
    /// anything unreadable counts as 0.
    pub fn as_integer(&self) -> i64 {
        match self {
            FieldValue::Null | FieldValue::Nested(_) => 0,
            FieldValue::Bool(b) => i64::from(*b),
            FieldValue::Number(n) => n
                .as_i64()
                .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            FieldValue::Text(s) => leading_integer(s),
        }
    }
}

fn leading_integer(s: &str) -> i64 {
    let trimmed = s.trim_start();
    let mut end = 0;
    for (i, c) in trimmed.char_indices() {
        let is_sign = i == 0 && (c == '-' || c == '+');
        if !(c.is_ascii_digit() || is_sign) {
            break;
        }
        end = i + c.len_utf8();
    }
    trimmed[..end].parse().unwrap_or(0)
}

impl TryFrom<Value> for FieldValue {
    /// The rejected array or object
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(FieldValue::Null),
            Value::Bool(b) => Ok(FieldValue::Bool(b)),
            Value::Number(n) => Ok(FieldValue::Number(n)),
            Value::String(s) => Ok(FieldValue::Text(s)),
            other => Err(other),
        }
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(b),
            FieldValue::Number(n) => Value::Number(n),
            FieldValue::Text(s) => Value::String(s),
            FieldValue::Nested(v) => v,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::integer(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::integer(i64::from(n))
    }
}

/// String-keyed map that keeps insertion order.
///
/// Replacing an existing key keeps its position, so `id` stays first and
/// fields stay in the order they were first written.
#[derive(Debug, Clone, PartialEq)]
struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    fn get(&self, key: &str) -> Option<&V> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    fn insert(&mut self, key: &str, value: V) {
        match self.position(key) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    fn get_or_default(&mut self, key: &str) -> &mut V
    where
        V: Default,
    {
        let index = match self.position(key) {
            Some(i) => i,
            None => {
                self.entries.push((key.to_string(), V::default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = OrderedMap::default();
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    map.insert(&key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// One entity instance as a flat field map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: OrderedMap<FieldValue>,
}

impl Record {
    /// Create a record holding only its identifier
    pub fn with_id(id: i64) -> Self {
        let mut record = Self::default();
        record.set(ID_FIELD, FieldValue::integer(id));
        record
    }

    /// Builder-style field assignment
    pub fn field(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.set(name, value.into());
        self
    }

    /// The record identifier, if present
    pub fn id(&self) -> Option<&FieldValue> {
        self.fields.get(ID_FIELD)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn set(&mut self, name: &str, value: FieldValue) {
        self.fields.insert(name, value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.position(name).is_some()
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(
            record
                .fields
                .entries
                .into_iter()
                .map(|(name, value)| (name, Value::from(value)))
                .collect(),
        )
    }
}

/// All resources and their records, in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    collections: OrderedMap<Vec<Record>>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records of a resource in insertion order; empty if the resource was
    /// never written
    pub fn collection(&self, resource: &str) -> &[Record] {
        self.collections
            .get(resource)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Mutable records of a resource, appending the collection if absent
    pub fn collection_mut(&mut self, resource: &str) -> &mut Vec<Record> {
        self.collections.get_or_default(resource)
    }

    /// Replace a whole collection
    pub fn insert_collection(&mut self, resource: &str, records: Vec<Record>) {
        self.collections.insert(resource, records);
    }

    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_text_matches_across_kinds() {
        assert_eq!(FieldValue::integer(7).as_text(), "7");
        assert_eq!(FieldValue::text("7").as_text(), "7");
        assert_eq!(FieldValue::Bool(true).as_text(), "1");
        assert_eq!(FieldValue::Bool(false).as_text(), "");
        assert_eq!(FieldValue::Null.as_text(), "");
    }

    #[test]
    fn test_lenient_integer() {
        assert_eq!(FieldValue::integer(42).as_integer(), 42);
        assert_eq!(FieldValue::text("12abc").as_integer(), 12);
        assert_eq!(FieldValue::text("  9").as_integer(), 9);
        assert_eq!(FieldValue::text("abc").as_integer(), 0);
        assert_eq!(FieldValue::text("-3").as_integer(), -3);
        assert_eq!(FieldValue::Null.as_integer(), 0);
        let float: FieldValue = serde_json::from_value(json!(3.9)).unwrap();
        assert_eq!(float.as_integer(), 3);
    }

    #[test]
    fn test_non_scalar_rejected() {
        assert!(FieldValue::try_from(json!([1, 2])).is_err());
        assert!(FieldValue::try_from(json!({"a": 1})).is_err());
        assert_eq!(FieldValue::try_from(json!(null)).unwrap(), FieldValue::Null);
    }

    #[test]
    fn test_dataset_serializes_as_resource_map() {
        let mut dataset = Dataset::new();
        dataset
            .collection_mut("deal-statuses")
            .push(Record::with_id(1).field("name", "Новая"));

        let value = serde_json::to_value(&dataset).unwrap();
        assert_eq!(value, json!({"deal-statuses": [{"id": 1, "name": "Новая"}]}));

        let back: Dataset = serde_json::from_value(value).unwrap();
        assert_eq!(back, dataset);
    }

    #[test]
    fn test_fields_keep_write_order() {
        let mut record = Record::with_id(1).field("name", "Новая").field("color", "#0ea5e9");
        record.set("name", FieldValue::text("Закрыта"));

        let text = serde_json::to_string(&record).unwrap();
        assert_eq!(text, r##"{"id":1,"name":"Закрыта","color":"#0ea5e9"}"##);
    }

    #[test]
    fn test_collections_keep_document_order() {
        let dataset: Dataset =
            serde_json::from_str(r#"{"deals": [], "users": [], "contacts": []}"#).unwrap();
        let names: Vec<_> = dataset.resource_names().collect();
        assert_eq!(names, vec!["deals", "users", "contacts"]);
    }

    #[test]
    fn test_nested_values_survive_round_trip() {
        let text = r#"{"users":[{"id":1,"tags":["vip"],"meta":{"a":1}}]}"#;
        let dataset: Dataset = serde_json::from_str(text).unwrap();

        let user = &dataset.collection("users")[0];
        assert_eq!(user.get("tags"), Some(&FieldValue::Nested(json!(["vip"]))));
        assert_eq!(serde_json::to_string(&dataset).unwrap(), text);
    }

    #[test]
    fn test_missing_collection_is_empty() {
        let dataset = Dataset::new();
        assert!(dataset.collection("contacts").is_empty());
    }
}
