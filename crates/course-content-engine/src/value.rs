//! Untyped content tree that keeps every object entry.
//!
//! `serde_json::Value` stores objects in a map, so a repeated key silently
//! replaces the earlier one. Authoring mistakes such as two lessons called
//! `intro` would vanish before anything could report them. `ContentValue`
//! stores objects as ordered `(key, value)` lists instead, preserving both
//! the source order and any duplicates.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Number;

#[derive(Debug, Clone, PartialEq)]
pub enum ContentValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<ContentValue>),
    Object(Vec<(String, ContentValue)>),
}

impl ContentValue {
    /// Object entries in source order, duplicates included
    pub fn as_object(&self) -> Option<&[(String, ContentValue)]> {
        match self {
            ContentValue::Object(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ContentValue]> {
        match self {
            ContentValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ContentValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up an object field. A repeated field resolves to its last
    /// occurrence, matching how JSON decoders treat it.
    pub fn get(&self, key: &str) -> Option<&ContentValue> {
        self.as_object()?
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Human name of the JSON type, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ContentValue::Null => "null",
            ContentValue::Bool(_) => "boolean",
            ContentValue::Number(_) => "number",
            ContentValue::String(_) => "string",
            ContentValue::Array(_) => "array",
            ContentValue::Object(_) => "object",
        }
    }
}

impl From<serde_json::Value> for ContentValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ContentValue::Null,
            serde_json::Value::Bool(b) => ContentValue::Bool(b),
            serde_json::Value::Number(n) => ContentValue::Number(n),
            serde_json::Value::String(s) => ContentValue::String(s),
            serde_json::Value::Array(items) => {
                ContentValue::Array(items.into_iter().map(ContentValue::from).collect())
            }
            serde_json::Value::Object(map) => ContentValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, ContentValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for ContentValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ContentValue::Null => serializer.serialize_unit(),
            ContentValue::Bool(b) => serializer.serialize_bool(*b),
            ContentValue::Number(n) => n.serialize(serializer),
            ContentValue::String(s) => serializer.serialize_str(s),
            ContentValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ContentValue::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ContentValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ContentValueVisitor)
    }
}

struct ContentValueVisitor;

impl<'de> Visitor<'de> for ContentValueVisitor {
    type Value = ContentValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<ContentValue, E> {
        Ok(ContentValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<ContentValue, E> {
        Ok(ContentValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<ContentValue, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<ContentValue, E> {
        Ok(ContentValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ContentValue, E> {
        Ok(ContentValue::Number(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ContentValue, E> {
        Ok(ContentValue::Number(v.into()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ContentValue, E> {
        Number::from_f64(v)
            .map(ContentValue::Number)
            .ok_or_else(|| E::custom("non-finite number"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ContentValue, E> {
        Ok(ContentValue::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<ContentValue, E> {
        Ok(ContentValue::String(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ContentValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(ContentValue::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ContentValue, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, ContentValue>()? {
            entries.push((key, value));
        }
        Ok(ContentValue::Object(entries))
    }
}
