//! Form-side validation of submitted attribute mappings.
//!
//! The form field layers a built-in exclusion set on top of whatever the
//! storage field configures. Attributes that load URLs or run script are not
//! something an admin form should accept even when the stored data may carry
//! them, so `src`, `href`, `data`, `action` and the whole `on*` family are
//! blocked here by default.

use crate::error::{AttributesError, Result};
use crate::keys::{self, ExcludedKeys};
use crate::model::Attributes;
use serde_json::{Map, Value};

/// Keys rejected by every form field regardless of caller configuration.
pub const DEFAULT_EXCLUDED_KEYS: [&str; 5] = ["src", "href", "data", "action", "on*"];

/// Validates user-submitted mapping data before it reaches storage.
///
/// # Examples
/// ```
/// use attributes_field::AttributesFormField;
///
/// let field = AttributesFormField::new();
/// let attrs = field.to_mapping(r#"{"class": "wide"}"#)?;
/// assert_eq!(attrs.len(), 1);
///
/// assert!(field.validate_key("class").is_ok());
/// assert!(field.validate_key("onclick").is_err());
/// # Ok::<(), attributes_field::AttributesError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AttributesFormField {
    required: bool,
    excluded_keys: ExcludedKeys,
}

impl Default for AttributesFormField {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributesFormField {
    pub fn new() -> Self {
        Self {
            required: false,
            excluded_keys: ExcludedKeys::new(DEFAULT_EXCLUDED_KEYS),
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Adds caller exclusions on top of the built-in defaults.
    pub fn with_excluded_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_keys = self.excluded_keys.merge(&ExcludedKeys::new(keys));
        self
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn excluded_keys(&self) -> &ExcludedKeys {
        &self.excluded_keys
    }

    /// Parses submitted JSON text into a mapping, passing the parser's own
    /// detail through on failure.
    pub fn to_mapping(&self, text: &str) -> Result<Attributes> {
        let map: Map<String, Value> = serde_json::from_str(text)?;
        Ok(Attributes::from(map))
    }

    /// Cleans textual input: parse, required check, then per-pair validation.
    ///
    /// Whitespace-only input counts as no input.
    pub fn clean_text(&self, input: Option<&str>) -> Result<Option<Attributes>> {
        let value = match input.map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(self.to_mapping(text)?),
        };
        self.clean(value)
    }

    /// Cleans an already-parsed mapping, the path taken for widget
    /// submissions.
    ///
    /// An empty mapping counts as missing for the required check. Validation
    /// rejects the whole mapping on the first offending key.
    pub fn clean(&self, value: Option<Attributes>) -> Result<Option<Attributes>> {
        let missing = value.as_ref().map_or(true, Attributes::is_empty);
        if missing && self.required {
            return Err(AttributesError::Required);
        }
        if let Some(attrs) = &value {
            for key in attrs.keys() {
                self.validate_key(key)?;
            }
        }
        Ok(value)
    }

    /// Validates one key against the syntax rule and the merged exclusion
    /// list.
    pub fn validate_key(&self, key: &str) -> Result<()> {
        keys::validate_key(key, &self.excluded_keys)
    }
}

/// Submitted form data as ordered name/value pairs.
///
/// Repeated names keep every occurrence in submission order, the way
/// multi-value POST bodies arrive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Decodes an `application/x-www-form-urlencoded` body.
    pub fn parse(body: &str) -> Result<Self> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(body)
            .map_err(|err| AttributesError::InvalidFormData(err.to_string()))?;
        tracing::trace!(pairs = pairs.len(), "decoded form body");
        Ok(Self { pairs })
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// The last submitted value for a name, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every submitted value for a name, in submission order.
    pub fn get_list(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
