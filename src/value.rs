use std::{collections::BTreeMap, fmt};

use derive_more::From;
use serde::{
  de::{self, MapAccess, SeqAccess, Visitor},
  Deserialize, Deserializer, Serialize,
};

/// The decoded content of the data file: string keys to values.
pub type Records = BTreeMap<String, Value>;

/// A value that can be stored under a key.
///
/// Serializes to plain YAML without any tag, so the data file stays readable
/// and editable by hand. Scalar mapping keys (`1`, `true`, `null`) decode to
/// their string form.
#[derive(Debug, Clone, PartialEq, Default, From, Serialize)]
#[serde(untagged)]
pub enum Value {
  #[default]
  #[from(skip)]
  Null,

  Bool(bool),

  Int(i64),

  Float(f64),

  String(String),

  Sequence(Vec<Value>),

  Mapping(BTreeMap<String, Value>),
}

impl Value {
  pub fn is_null(&self) -> bool {
    matches!(self, Value::Null)
  }

  pub fn as_bool(&self) -> Option<bool> {
    match self {
      Value::Bool(b) => Some(*b),
      _ => None,
    }
  }

  pub fn as_i64(&self) -> Option<i64> {
    match self {
      Value::Int(i) => Some(*i),
      _ => None,
    }
  }

  /// Integers widen to floats; other variants yield `None`.
  pub fn as_f64(&self) -> Option<f64> {
    match self {
      Value::Float(f) => Some(*f),
      Value::Int(i) => Some(*i as f64),
      _ => None,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Value::String(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_sequence(&self) -> Option<&[Value]> {
    match self {
      Value::Sequence(seq) => Some(seq),
      _ => None,
    }
  }

  pub fn as_mapping(&self) -> Option<&BTreeMap<String, Value>> {
    match self {
      Value::Mapping(map) => Some(map),
      _ => None,
    }
  }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
  type Value = Value;

  fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str("a scalar, a sequence or a mapping")
  }

  fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
    Ok(Value::Null)
  }

  fn visit_none<E: de::Error>(self) -> Result<Value, E> {
    Ok(Value::Null)
  }

  fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
  where
    D: Deserializer<'de>,
  {
    Value::deserialize(deserializer)
  }

  fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
    Ok(Value::Bool(b))
  }

  fn visit_i64<E: de::Error>(self, i: i64) -> Result<Value, E> {
    Ok(Value::Int(i))
  }

  fn visit_u64<E: de::Error>(self, u: u64) -> Result<Value, E> {
    Ok(i64::try_from(u).map_or(Value::Float(u as f64), Value::Int))
  }

  fn visit_f64<E: de::Error>(self, f: f64) -> Result<Value, E> {
    Ok(Value::Float(f))
  }

  fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
    Ok(Value::String(s.to_string()))
  }

  fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
    Ok(Value::String(s))
  }

  fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
  where
    A: SeqAccess<'de>,
  {
    let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
    while let Some(item) = seq.next_element()? {
      items.push(item);
    }
    Ok(Value::Sequence(items))
  }

  fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
  where
    A: MapAccess<'de>,
  {
    let mut entries = BTreeMap::new();
    while let Some((MapKey(key), value)) = map.next_entry()? {
      entries.insert(key, value);
    }
    Ok(Value::Mapping(entries))
  }
}

impl<'de> Deserialize<'de> for Value {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    deserializer.deserialize_any(ValueVisitor)
  }
}

/// A mapping key: any scalar, kept in its string form.
struct MapKey(String);

struct MapKeyVisitor;

impl Visitor<'_> for MapKeyVisitor {
  type Value = MapKey;

  fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str("a scalar mapping key")
  }

  fn visit_unit<E: de::Error>(self) -> Result<MapKey, E> {
    Ok(MapKey("null".to_string()))
  }

  fn visit_bool<E: de::Error>(self, b: bool) -> Result<MapKey, E> {
    Ok(MapKey(b.to_string()))
  }

  fn visit_i64<E: de::Error>(self, i: i64) -> Result<MapKey, E> {
    Ok(MapKey(i.to_string()))
  }

  fn visit_u64<E: de::Error>(self, u: u64) -> Result<MapKey, E> {
    Ok(MapKey(u.to_string()))
  }

  fn visit_f64<E: de::Error>(self, f: f64) -> Result<MapKey, E> {
    Ok(MapKey(f.to_string()))
  }

  fn visit_str<E: de::Error>(self, s: &str) -> Result<MapKey, E> {
    Ok(MapKey(s.to_string()))
  }

  fn visit_string<E: de::Error>(self, s: String) -> Result<MapKey, E> {
    Ok(MapKey(s))
  }
}

impl<'de> Deserialize<'de> for MapKey {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    deserializer.deserialize_any(MapKeyVisitor)
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Value::String(s.to_string())
  }
}

impl From<i32> for Value {
  fn from(i: i32) -> Self {
    Value::Int(i as i64)
  }
}

impl From<u32> for Value {
  fn from(i: u32) -> Self {
    Value::Int(i as i64)
  }
}

impl<T> From<Option<T>> for Value
where
  T: Into<Value>,
{
  fn from(opt: Option<T>) -> Self {
    opt.map_or(Value::Null, Into::into)
  }
}
