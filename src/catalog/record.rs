//! Leaf records and their field values.
//!
//! A [`Record`] is a flat mapping of field name to [`FieldValue`] for one
//! entity occurrence: an episode, a show's metadata document, an actor. It
//! has no structure beyond key/value; typed wrappers ([`Episode`],
//! [`Actor`]) add named accessors on top.
//!
//! [`Episode`]: super::Episode

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tvindex_common::{Error, Result};

/// A single field value as delivered by the remote catalog, or derived
/// during population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    /// A list of nested records (e.g. `_actors`).
    Records(Vec<Record>),
    /// A raw array (e.g. `genre`, `aliases`).
    List(Vec<FieldValue>),
    /// A nested mapping (e.g. `_banners`).
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Borrow the text if this is a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret the value as a season or episode number.
    ///
    /// Accepts non-negative integers, integral floats (`3.0`) and digit
    /// strings. Anything else, including `1.5`, is `None`.
    pub fn as_index(&self) -> Option<u32> {
        match self {
            FieldValue::Number(n) => {
                if let Some(v) = n.as_u64() {
                    return u32::try_from(v).ok();
                }
                let f = n.as_f64()?;
                if f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX) {
                    Some(f as u32)
                } else {
                    None
                }
            }
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Text form used by substring search. `Null` renders empty.
    pub fn search_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Null => Cow::Borrowed(""),
            FieldValue::Bool(b) => Cow::Owned(b.to_string()),
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
            FieldValue::Text(s) => Cow::Borrowed(s),
            other => Cow::Owned(serde_json::to_string(other).unwrap_or_default()),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => FieldValue::Number(n),
            Value::String(s) => FieldValue::Text(s),
            Value::Array(items) => FieldValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                FieldValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        FieldValue::Number(n.into())
    }
}

impl From<Record> for FieldValue {
    fn from(record: Record) -> Self {
        FieldValue::Map(record.fields)
    }
}

impl From<Vec<Record>> for FieldValue {
    fn from(records: Vec<Record>) -> Self {
        FieldValue::Records(records)
    }
}

impl From<BTreeMap<String, FieldValue>> for FieldValue {
    fn from(map: BTreeMap<String, FieldValue>) -> Self {
        FieldValue::Map(map)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.search_text())
    }
}

/// Flat mapping of field name to value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON object. Non-object values are rejected.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(map.into()),
            other => Err(Error::validation(format!(
                "expected a JSON object for a record, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Look up a field, raising `AttributeNotFound` when absent.
    pub fn get(&self, name: &str) -> Result<&FieldValue> {
        self.fields
            .get(name)
            .ok_or_else(|| Error::attribute_not_found(name))
    }

    /// Text of a field, if present and textual.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(FieldValue::as_str)
    }

    /// Set (or overwrite) a single field.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Case-insensitive substring match of `needle` (already lowercased)
    /// against one field, or every field when `key` is `None`.
    pub(crate) fn matches(&self, needle: &str, key: Option<&str>) -> bool {
        self.fields
            .iter()
            .filter(|(name, _)| key.map_or(true, |k| k == name.as_str()))
            .any(|(_, value)| value.search_text().to_lowercase().contains(needle))
    }
}

impl From<serde_json::Map<String, Value>> for Record {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Self {
            fields: map.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One actor entry attached to a show under `_actors`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Actor {
    record: Record,
}

impl Actor {
    pub fn new(record: Record) -> Self {
        Self { record }
    }

    pub fn name(&self) -> Option<&str> {
        self.record.text("name")
    }

    pub fn role(&self) -> Option<&str> {
        self.record.text("role")
    }

    /// Absolute artwork URL of the actor's image, once population has
    /// rewritten it.
    pub fn image(&self) -> Option<&str> {
        self.record.text("image")
    }

    pub fn get(&self, name: &str) -> Result<&FieldValue> {
        self.record.get(name)
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn into_record(self) -> Record {
        self.record
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Actor {:?}>", self.name().unwrap_or_default())
    }
}
