use std::fmt;

use serde::ser::{Serialize, Serializer};

pub type TagId = u16;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rational {
    pub num: i64,
    pub denom: i64,
}

impl Rational {
    pub fn new(num: i64, denom: i64) -> Self {
        Self { num, denom }
    }

    /// `None` when the denominator is zero.
    pub fn to_f64(self) -> Option<f64> {
        if self.denom == 0 {
            None
        } else {
            Some(self.num as f64 / self.denom as f64)
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.denom)
    }
}

/// A value as the container hands it over, before the tag's registered type
/// is known.
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Integer(Vec<i64>),
    Float(Vec<f64>),
    Text(String),
    Bytes(Vec<u8>),
    Rational(Vec<Rational>),
    Directory(RawTagMap),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTagMap {
    entries: Vec<(TagId, RawValue)>,
}

impl RawTagMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces in place when the id is already present, so insertion order
    /// is kept.
    pub fn insert(&mut self, id: TagId, value: RawValue) {
        if let Some(existing) = self.entries.iter_mut().find(|(key, _)| *key == id) {
            existing.1 = value;
        } else {
            self.entries.push((id, value));
        }
    }

    pub fn get(&self, id: TagId) -> Option<&RawValue> {
        self.entries
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, id: TagId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TagId, &RawValue)> {
        self.entries.iter().map(|(id, value)| (*id, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(TagId, RawValue)> for RawTagMap {
    fn from_iter<I: IntoIterator<Item = (TagId, RawValue)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (id, value) in iter {
            map.insert(id, value);
        }
        map
    }
}

/// Decoded tag name. Ids with no registered name keep the raw id.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TagKey {
    Named(&'static str),
    Raw(TagId),
}

impl TagKey {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Named(value) => *value == name,
            Self::Raw(id) => name.parse::<TagId>().is_ok_and(|parsed| parsed == *id),
        }
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::Raw(id) => write!(f, "{id}"),
        }
    }
}

impl Serialize for TagKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum TagValue {
    Integer(i64),
    Integers(Vec<i64>),
    Float(Vec<f64>),
    Text(String),
    Bytes(Vec<u8>),
    Rational(Rational),
    RationalTriplet([Rational; 3]),
    Rationals(Vec<Rational>),
    Directory(TagMap),
}

impl TagValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Integers(_) => "integer list",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Rational(_) => "rational",
            Self::RationalTriplet(_) => "rational triplet",
            Self::Rationals(_) => "rational list",
            Self::Directory(_) => "directory",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_triplet(&self) -> Option<&[Rational; 3]> {
        match self {
            Self::RationalTriplet(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_directory(&self) -> Option<&TagMap> {
        match self {
            Self::Directory(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Integers(v) => write!(f, "{}", join(v)),
            Self::Float(v) => write!(f, "{}", join(v)),
            Self::Text(v) => write!(f, "{v}"),
            Self::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            Self::Rational(v) => write!(f, "{v}"),
            Self::RationalTriplet(v) => write!(f, "{}", join(v)),
            Self::Rationals(v) => write!(f, "{}", join(v)),
            Self::Directory(v) => write!(f, "<{} entries>", v.len()),
        }
    }
}

fn join<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagMap {
    entries: Vec<(TagKey, TagValue)>,
}

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: TagKey, value: TagValue) {
        if let Some(existing) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            existing.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.entries
            .iter()
            .find(|(key, _)| key.matches(name))
            .map(|(_, value)| value)
    }

    pub fn get_key(&self, key: TagKey) -> Option<&TagValue> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
    }

    pub fn gps(&self) -> Option<&TagMap> {
        self.get("GPSInfo").and_then(TagValue::as_directory)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TagKey, &TagValue)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for TagMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(key, value)| (key, value)))
    }
}

/// Decoded tags of one image. "GPSInfo" holds the GPS directory as a nested
/// map.
pub type DecodedTagMap = TagMap;
