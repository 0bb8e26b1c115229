//! Ordered YAML tree used by the merge walk.
//!
//! Unlike a hash-backed map, [`Mapping`] stores its entries in a `Vec`, so it
//! keeps document order exactly and can hold duplicate keys when the codec is
//! configured to tolerate them.

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use std::fmt;

/// A scalar leaf of the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// `null`, `~`, or an empty value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer too large for [`Scalar::Int`].
    UInt(u64),
    /// A floating point number.
    Float(f64),
    /// A string, quoted or plain.
    String(String),
}

/// A node of the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A scalar leaf.
    Scalar(Scalar),
    /// An ordered list of values. Sequences are never merged element-wise.
    Sequence(Vec<Self>),
    /// An ordered mapping.
    Mapping(Mapping),
}

/// Coarse classification of a [`Value`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// [`Scalar::Null`].
    Null,
    /// [`Scalar::Bool`].
    Bool,
    /// [`Scalar::Int`] or [`Scalar::UInt`].
    Integer,
    /// [`Scalar::Float`].
    Float,
    /// [`Scalar::String`].
    String,
    /// [`Value::Sequence`].
    Sequence,
    /// [`Value::Mapping`].
    Mapping,
}

impl ValueKind {
    /// Returns the lowercase name used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered list of key/value pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(Value, Value)>,
}

impl Mapping {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates an empty mapping with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends an entry. Existing entries with the same key are kept.
    pub fn push<K, V>(&mut self, key: K, value: V)
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        self.entries.push((key.into(), value.into()));
    }

    /// Number of entries, duplicates included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value of the first entry whose key equals `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&Value>
    where
        Q: ?Sized,
        Value: PartialEq<Q>,
    {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value)
    }

    /// Returns every value whose key equals `key`, in document order.
    pub fn get_all<'a, Q>(&'a self, key: &'a Q) -> impl Iterator<Item = &'a Value> + 'a
    where
        Q: ?Sized,
        Value: PartialEq<Q>,
    {
        self.entries
            .iter()
            .filter(move |(candidate, _)| candidate == key)
            .map(|(_, value)| value)
    }

    /// Iterates over the keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Iterates over the values in document order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Iterates over the entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    /// Iterates over the entries with mutable access to each value.
    ///
    /// Keys stay immutable so the mapping's key order and identity cannot
    /// change through this handle.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Value, &mut Value)> {
        self.entries.iter_mut().map(|(key, value)| (&*key, value))
    }

    /// Reports whether any key occurs more than once at this level.
    #[must_use]
    pub fn has_duplicate_keys(&self) -> bool {
        self.entries.iter().enumerate().any(|(index, (key, _))| {
            self.entries
                .iter()
                .skip(index.saturating_add(1))
                .any(|(other, _)| other == key)
        })
    }
}

impl<K, V> FromIterator<(K, V)> for Mapping
where
    K: Into<Value>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Mapping {
    type Item = (Value, Value);
    type IntoIter = std::vec::IntoIter<(Value, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Value {
    /// Returns the coarse kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(Scalar::Null) => ValueKind::Null,
            Self::Scalar(Scalar::Bool(_)) => ValueKind::Bool,
            Self::Scalar(Scalar::Int(_) | Scalar::UInt(_)) => ValueKind::Integer,
            Self::Scalar(Scalar::Float(_)) => ValueKind::Float,
            Self::Scalar(Scalar::String(_)) => ValueKind::String,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Mapping(_) => ValueKind::Mapping,
        }
    }

    /// Whether this value is a [`Value::Mapping`].
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    /// Borrows the inner mapping, if any.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Mutably borrows the inner mapping, if any.
    pub const fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Borrows the inner string, if this is a string scalar.
    #[must_use]
    pub const fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Follows a chain of string keys through nested mappings.
    ///
    /// The first matching entry is taken at each level. An empty path returns
    /// `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yaml_blend::{Mapping, Value};
    ///
    /// let inner: Mapping = [("port", 8080_i64)].into_iter().collect();
    /// let outer: Mapping = [("server", Value::from(inner))].into_iter().collect();
    /// let tree = Value::from(outer);
    /// assert_eq!(tree.lookup(&["server", "port"]), Some(&Value::from(8080_i64)));
    /// assert_eq!(tree.lookup(&["server", "host"]), None);
    /// ```
    #[must_use]
    pub fn lookup(&self, path: &[&str]) -> Option<&Self> {
        path.iter().try_fold(self, |node, segment| {
            node.as_mapping().and_then(|mapping| mapping.get(*segment))
        })
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<Mapping> for Value {
    fn from(mapping: Mapping) -> Self {
        Self::Mapping(mapping)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::Sequence(items)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Scalar(Scalar::String(text.to_owned()))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Scalar(Scalar::String(text))
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Scalar(Scalar::Bool(flag))
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Self::Scalar(Scalar::Int(number))
    }
}

impl From<u64> for Value {
    fn from(number: u64) -> Self {
        i64::try_from(number).map_or(Self::Scalar(Scalar::UInt(number)), Self::from)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Scalar(Scalar::Float(number))
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Scalar(Scalar::Null)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Int(number) => write!(f, "{number}"),
            Self::UInt(number) => write!(f, "{number}"),
            Self::Float(number) => write!(f, "{number}"),
            Self::String(text) => f.write_str(text),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => fmt::Display::fmt(scalar, f),
            Self::Sequence(items) => write!(f, "[{} items]", items.len()),
            Self::Mapping(mapping) => write!(f, "{{{} entries}}", mapping.len()),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("any YAML value")
    }

    fn visit_bool<E: de::Error>(self, flag: bool) -> Result<Value, E> {
        Ok(Value::from(flag))
    }

    fn visit_i64<E: de::Error>(self, number: i64) -> Result<Value, E> {
        Ok(Value::from(number))
    }

    fn visit_u64<E: de::Error>(self, number: u64) -> Result<Value, E> {
        Ok(Value::from(number))
    }

    fn visit_f64<E: de::Error>(self, number: f64) -> Result<Value, E> {
        Ok(Value::from(number))
    }

    fn visit_str<E: de::Error>(self, text: &str) -> Result<Value, E> {
        Ok(Value::from(text))
    }

    fn visit_string<E: de::Error>(self, text: String) -> Result<Value, E> {
        Ok(Value::from(text))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Scalar(Scalar::Null))
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Scalar(Scalar::Null))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_newtype_struct<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Value>()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut mapping = Mapping::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<Value, Value>()? {
            mapping.entries.push((key, value));
        }
        Ok(Value::Mapping(mapping))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::{Mapping, Scalar, Value, ValueKind};
    use rstest::rstest;

    fn sample() -> Mapping {
        [("a", 1_i64), ("b", 2_i64), ("a", 3_i64)].into_iter().collect()
    }

    #[rstest]
    fn get_returns_first_match() {
        assert_eq!(sample().get("a"), Some(&Value::from(1_i64)));
        assert_eq!(sample().get("missing"), None);
    }

    #[rstest]
    fn get_all_returns_every_match_in_order() {
        let mapping = sample();
        let found: Vec<_> = mapping.get_all("a").cloned().collect();
        assert_eq!(found, vec![Value::from(1_i64), Value::from(3_i64)]);
    }

    #[rstest]
    fn duplicate_detection() {
        assert!(sample().has_duplicate_keys());
        let unique: Mapping = [("a", 1_i64), ("b", 2_i64)].into_iter().collect();
        assert!(!unique.has_duplicate_keys());
    }

    #[rstest]
    fn keys_keep_insertion_order() {
        let keys: Vec<_> = sample().keys().filter_map(Value::as_str).map(str::to_owned).collect();
        assert_eq!(keys, ["a", "b", "a"]);
    }

    #[rstest]
    #[case(Value::Scalar(Scalar::Null), ValueKind::Null)]
    #[case(Value::from(true), ValueKind::Bool)]
    #[case(Value::from(u64::MAX), ValueKind::Integer)]
    #[case(Value::from(1.5_f64), ValueKind::Float)]
    #[case(Value::from("x"), ValueKind::String)]
    #[case(Value::Sequence(Vec::new()), ValueKind::Sequence)]
    #[case(Value::Mapping(Mapping::new()), ValueKind::Mapping)]
    fn kind_classifies_variants(#[case] value: Value, #[case] expected: ValueKind) {
        assert_eq!(value.kind(), expected);
    }

    #[rstest]
    fn small_unsigned_numbers_become_signed() {
        assert_eq!(Value::from(7_u64), Value::Scalar(Scalar::Int(7)));
        assert_eq!(
            Value::from(u64::MAX),
            Value::Scalar(Scalar::UInt(u64::MAX))
        );
    }

    #[rstest]
    fn lookup_stops_at_non_mappings() {
        let inner: Mapping = [("leaf", "x")].into_iter().collect();
        let tree = Value::from(
            [("branch", Value::from(inner))]
                .into_iter()
                .collect::<Mapping>(),
        );
        assert_eq!(tree.lookup(&["branch", "leaf"]), Some(&Value::from("x")));
        assert_eq!(tree.lookup(&["branch", "leaf", "deeper"]), None);
        assert_eq!(tree.lookup(&[]), Some(&tree));
    }
}
