//! The attribute mapping value type.
//!
//! An [`Attributes`] value is a flat, insertion-ordered mapping of HTML
//! attribute names to JSON values. It is the in-memory representation of the
//! field; the stored representation is its JSON object text (see
//! [`crate::fields::AttributesField`]).
//!
//! Ordering relies on serde_json's `preserve_order` feature, so the mapping
//! remembers the order keys were inserted (or appeared in decoded JSON).

use crate::error::{AttributesError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A flat mapping of HTML attribute names to JSON values.
///
/// # Examples
/// ```
/// use attributes_field::Attributes;
///
/// let mut attrs = Attributes::new();
/// attrs.insert("class", "btn primary").unwrap();
/// attrs.insert("data-count", 3).unwrap();
///
/// assert_eq!(attrs.len(), 2);
/// assert_eq!(attrs.get("class"), Some(&serde_json::json!("btn primary")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builds a mapping from an already-decoded JSON value.
    ///
    /// Fails when the value is not a JSON object, carrying the serde detail
    /// ("invalid type: ..., expected a map").
    pub fn from_value(value: Value) -> Result<Self> {
        let map: Map<String, Value> = serde_json::from_value(value)?;
        Ok(Self(map))
    }

    /// Inserts a key with any serializable value, converting it to JSON.
    ///
    /// Returns the previous value for the key, if any. Fails with
    /// [`AttributesError::InvalidValue`] when the value cannot be represented
    /// as JSON (for example a map with non-string keys).
    pub fn insert(&mut self, key: impl Into<String>, value: impl Serialize) -> Result<Option<Value>> {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|source| AttributesError::InvalidValue {
            key: key.clone(),
            source,
        })?;
        Ok(self.0.insert(key, value))
    }

    /// Inserts an already-JSON value. Never fails.
    pub fn insert_value(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in mapping order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Iterates keys in mapping order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Borrows the underlying JSON object map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Attributes {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Attributes {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Whether a value counts as "set" when rendering HTML attributes.
///
/// Falsy values render as a bare key (`disabled` rather than `disabled=""`):
/// null, `false`, zero, and empty strings/arrays/objects are falsy, everything
/// else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// The display form of a value for HTML output and widget inputs.
///
/// Strings render bare (no JSON quoting); everything else renders as its JSON
/// text.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_preserves_order() {
        let mut attrs = Attributes::new();
        attrs.insert("zeta", "1").unwrap();
        attrs.insert("alpha", "2").unwrap();
        attrs.insert("mid", "3").unwrap();

        let keys: Vec<&String> = attrs.keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut attrs = Attributes::new();
        attrs.insert("a", 1).unwrap();
        attrs.insert("b", 2).unwrap();
        attrs.insert("c", 3).unwrap();

        assert_eq!(attrs.remove("b"), Some(json!(2)));
        let keys: Vec<&String> = attrs.keys().collect();
        assert_eq!(keys, ["a", "c"]);
    }

    #[test]
    fn insert_rejects_unrepresentable_values() {
        use std::collections::BTreeMap;

        let mut non_string_keys = BTreeMap::new();
        non_string_keys.insert(vec![1u8], "x");

        let mut attrs = Attributes::new();
        let err = attrs.insert("data-bad", &non_string_keys).unwrap_err();
        match err {
            AttributesError::InvalidValue { key, .. } => assert_eq!(key, "data-bad"),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn from_value_requires_an_object() {
        assert!(Attributes::from_value(json!({"a": 1})).is_ok());
        assert!(matches!(
            Attributes::from_value(json!([1, 2])),
            Err(AttributesError::InvalidJson(_))
        ));
        assert!(matches!(
            Attributes::from_value(json!("text")),
            Err(AttributesError::InvalidJson(_))
        ));
    }

    #[test]
    fn serde_roundtrip_is_transparent() {
        let mut attrs = Attributes::new();
        attrs.insert("class", "foo").unwrap();
        attrs.insert("data-n", 7).unwrap();

        let text = serde_json::to_string(&attrs).unwrap();
        assert_eq!(text, r#"{"class":"foo","data-n":7}"#);

        let back: Attributes = serde_json::from_str(&text).unwrap();
        assert_eq!(back, attrs);
    }

    #[test]
    fn truthiness_follows_emptiness() {
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(["a"])));
        assert!(is_truthy(&json!({"k": 1})));

        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));
    }

    #[test]
    fn display_value_strips_json_quotes_from_strings() {
        assert_eq!(display_value(&json!("foo bar")), "foo bar");
        assert_eq!(display_value(&json!(3)), "3");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!(["a", 1])), r#"["a",1]"#);
    }
}
