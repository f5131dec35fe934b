use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt;

/// Reserved dictionary key carrying the dictionary's own language name.
pub const CULTURE_NAME_KEY: &str = "__cultureName__";

/// A localization entry: either a translated string or a nested dictionary.
///
/// Deserialization is lenient: numbers and booleans become their text form,
/// lists become dictionaries keyed by index and nulls are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Map(Dictionary),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&Dictionary> {
        match self {
            Value::Text(_) => None,
            Value::Map(m) => Some(m),
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Value::Text(s) => Some(s),
            Value::Map(_) => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Dictionary> for Value {
    fn from(m: Dictionary) -> Self {
        Value::Map(m)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

/// A language dictionary: translation keys mapped to strings or nested
/// dictionaries of arbitrary depth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Dictionary {
    entries: HashMap<String, Value>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chainable insert, handy for building dictionaries inline.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Resolves a dotted key path such as `menu.file.open`.
    ///
    /// A key stored literally at the top level (`"menu.file"` as one key)
    /// takes precedence over descending. Returns `None` as soon as a segment
    /// is missing or a text value would have to be descended into.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.entries.get(path) {
            return Some(value);
        }

        let mut segments = path.split('.');
        let mut current = self.entries.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Map(map) => map.entries.get(segment)?,
                Value::Text(_) => return None,
            };
        }
        Some(current)
    }

    /// The name declared inside the dictionary, if any. Empty or non-text
    /// values count as undeclared.
    pub fn culture_name(&self) -> Option<&str> {
        self.get(CULTURE_NAME_KEY)
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.entries.iter()
    }
}

impl From<HashMap<String, Value>> for Dictionary {
    fn from(entries: HashMap<String, Value>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = (&'a String, &'a Value);
    type IntoIter = hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl<'de> Deserialize<'de> for Dictionary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DictionaryVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, boolean, list or table")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Text(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Text(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Text(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Text(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Text(v.to_string()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut dict = Dictionary::new();
        let mut index = 0usize;
        while let Some(item) = seq.next_element::<Option<Value>>()? {
            if let Some(item) = item {
                dict.insert(index.to_string(), item);
            }
            index += 1;
        }
        Ok(Value::Map(dict))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Value, A::Error> {
        DictionaryVisitor.visit_map(map).map(Value::Map)
    }
}

struct DictionaryVisitor;

impl<'de> Visitor<'de> for DictionaryVisitor {
    type Value = Dictionary;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a table of translations")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Dictionary, A::Error> {
        let mut entries = HashMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<Value, Option<Value>>()? {
            let Value::Text(key) = key else {
                return Err(de::Error::custom("translation keys must be scalars"));
            };
            if let Some(value) = value {
                entries.insert(key, value);
            }
        }
        Ok(Dictionary { entries })
    }
}
