//! Storage-side field configuration and codec.
//!
//! [`AttributesField`] is an immutable description of one attributes column:
//! its exclusion list, nullability and default. The conversion and validation
//! routines all live on it as methods taking the value explicitly, so there is
//! no hidden state between a record and its field configuration.

use crate::error::{AttributesError, Result};
use crate::html;
use crate::keys::{self, ExcludedKeys};
use crate::model::{display_value, is_truthy, Attributes};
use serde::Serialize;
use serde_json::{Map, Value};

/// A configured default for an [`AttributesField`].
///
/// Either a ready-made mapping, a JSON object as text, or a zero-argument
/// producer returning one of the former. All three normalize to the same
/// in-memory mapping when resolved.
#[derive(Debug, Clone)]
pub enum DefaultValue {
    Mapping(Attributes),
    Json(String),
    Func(fn() -> DefaultValue),
}

impl DefaultValue {
    /// Normalizes this default into a mapping.
    pub fn resolve(&self) -> Result<Attributes> {
        match self {
            DefaultValue::Mapping(attrs) => Ok(attrs.clone()),
            DefaultValue::Json(text) => {
                let map: Map<String, Value> = serde_json::from_str(text)?;
                Ok(Attributes::from(map))
            }
            DefaultValue::Func(producer) => producer().resolve(),
        }
    }
}

/// Configuration for a stored attributes column.
///
/// The stored form is a JSON object string in a text column; the in-memory
/// form is an [`Attributes`] mapping. `excluded_keys` gates which keys may be
/// written through [`validate`](Self::validate) and filters the derived HTML
/// string on the way out.
///
/// # Examples
/// ```
/// use attributes_field::{Attributes, AttributesField};
///
/// let field = AttributesField::new().with_excluded_keys(["style"]);
///
/// let mut attrs = Attributes::new();
/// attrs.insert("class", "btn btn-primary")?;
/// field.validate(Some(&attrs))?;
///
/// let stored = field.to_stored(Some(&attrs))?;
/// assert_eq!(stored.as_deref(), Some(r#"{"class":"btn btn-primary"}"#));
/// # Ok::<(), attributes_field::AttributesError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttributesField {
    excluded_keys: ExcludedKeys,
    null: bool,
    blank: bool,
    default_value: Option<DefaultValue>,
}

impl AttributesField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the exclusion list. Entries are lowercased; entries ending in `*`
    /// match by prefix.
    pub fn with_excluded_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_keys = ExcludedKeys::new(keys);
        self
    }

    /// Whether a missing mapping is acceptable (stored as SQL NULL).
    pub fn with_null(mut self, null: bool) -> Self {
        self.null = null;
        self
    }

    /// Whether a missing mapping may be stored as an empty string when nulls
    /// are disallowed.
    pub fn with_blank(mut self, blank: bool) -> Self {
        self.blank = blank;
        self
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default_value = Some(default);
        self
    }

    pub fn excluded_keys(&self) -> &ExcludedKeys {
        &self.excluded_keys
    }

    pub fn null(&self) -> bool {
        self.null
    }

    pub fn blank(&self) -> bool {
        self.blank
    }

    /// Decodes a stored text value into a mapping.
    ///
    /// `None` stays `None`. The empty string decodes to an empty mapping,
    /// since [`to_stored`](Self::to_stored) writes one for blank non-null
    /// columns. Anything else must be a JSON object.
    pub fn from_stored(&self, stored: Option<&str>) -> Result<Option<Attributes>> {
        let Some(text) = stored else {
            return Ok(None);
        };
        if text.is_empty() {
            return Ok(Some(Attributes::new()));
        }
        let map: Map<String, Value> = serde_json::from_str(text)?;
        Ok(Some(Attributes::from(map)))
    }

    /// Decodes a stored value that a driver has already parsed as JSON.
    ///
    /// `Null` means SQL NULL. A JSON string is treated as stored text and
    /// decoded again, matching drivers that return text columns verbatim.
    pub fn from_stored_value(&self, stored: Option<Value>) -> Result<Option<Attributes>> {
        match stored {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(text)) => self.from_stored(Some(&text)),
            Some(other) => Attributes::from_value(other).map(Some),
        }
    }

    /// Encodes a mapping for storage.
    ///
    /// A missing mapping becomes an empty string when the column forbids
    /// nulls but allows blanks, otherwise it stays `None`.
    pub fn to_stored(&self, value: Option<&Attributes>) -> Result<Option<String>> {
        match value {
            Some(attrs) => Ok(Some(serde_json::to_string(attrs.as_map())?)),
            None if !self.null && self.blank => Ok(Some(String::new())),
            None => Ok(None),
        }
    }

    /// Resolves the field's default into a mapping.
    ///
    /// With no configured default: `None` when nulls are allowed, an empty
    /// mapping otherwise.
    pub fn get_default(&self) -> Result<Option<Attributes>> {
        match &self.default_value {
            Some(default) => default.resolve().map(Some),
            None if self.null => Ok(None),
            None => Ok(Some(Attributes::new())),
        }
    }

    /// Validates a mapping before storage.
    ///
    /// Rejects a missing mapping unless nulls are allowed, then checks every
    /// pair. The whole mapping passes or the first offending pair fails it.
    pub fn validate(&self, value: Option<&Attributes>) -> Result<()> {
        let Some(attrs) = value else {
            if self.null {
                return Ok(());
            }
            return Err(AttributesError::NullNotAllowed);
        };
        for (key, value) in attrs.iter() {
            self.validate_key(key)?;
            self.validate_value(key, value)?;
        }
        Ok(())
    }

    /// Validates one key against the syntax rule and this field's exclusions.
    pub fn validate_key(&self, key: &str) -> Result<()> {
        keys::validate_key(key, &self.excluded_keys)
    }

    /// Validates that a value can be represented as JSON.
    pub fn validate_value<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        serde_json::to_value(value)
            .map(|_| ())
            .map_err(|source| AttributesError::InvalidValue {
                key: key.to_string(),
                source,
            })
    }

    /// Renders a mapping as HTML attribute syntax for a start tag.
    ///
    /// Excluded keys are silently skipped here: the field stops new excluded
    /// keys from being written, and this filter keeps previously stored ones
    /// from being emitted. Truthy values render as `key="escaped"`, falsy
    /// ones as a bare key. Entries keep the mapping's own order.
    pub fn html_attrs(&self, attrs: &Attributes) -> String {
        let mut parts: Vec<String> = Vec::new();
        for (key, value) in attrs.iter() {
            if self.excluded_keys.contains(key) {
                continue;
            }
            if is_truthy(value) {
                let escaped = html::escape(&display_value(value));
                parts.push(format!("{key}=\"{escaped}\""));
            } else {
                parts.push(key.clone());
            }
        }
        parts.join(" ")
    }
}

/// How a record resolves one of its field names.
#[derive(Debug)]
pub enum FieldLookup<'a> {
    /// The name is an attributes field, with its configuration and value.
    Attributes(&'a AttributesField, &'a Attributes),
    /// The name exists on the record but is not an attributes field.
    Other,
    /// The record has no field by that name.
    Missing,
}

/// Implemented by record types that carry one or more attributes fields.
pub trait AttributesRecord {
    fn lookup_field(&self, name: &str) -> FieldLookup<'_>;
}

/// Renders the named attributes field of a record as an HTML attribute
/// string.
///
/// # Examples
/// ```
/// use attributes_field::{
///     attributes_str, Attributes, AttributesField, AttributesRecord, FieldLookup,
/// };
///
/// struct Link {
///     field: AttributesField,
///     attrs: Attributes,
/// }
///
/// impl AttributesRecord for Link {
///     fn lookup_field(&self, name: &str) -> FieldLookup<'_> {
///         match name {
///             "attrs" => FieldLookup::Attributes(&self.field, &self.attrs),
///             _ => FieldLookup::Missing,
///         }
///     }
/// }
///
/// let mut attrs = Attributes::new();
/// attrs.insert("target", "_blank")?;
/// let link = Link { field: AttributesField::new(), attrs };
///
/// assert_eq!(attributes_str(&link, "attrs")?, r#"target="_blank""#);
/// assert!(attributes_str(&link, "nope").is_err());
/// # Ok::<(), attributes_field::AttributesError>(())
/// ```
pub fn attributes_str<R>(record: &R, field_name: &str) -> Result<String>
where
    R: AttributesRecord + ?Sized,
{
    match record.lookup_field(field_name) {
        FieldLookup::Attributes(field, value) => Ok(field.html_attrs(value)),
        FieldLookup::Other => Err(AttributesError::NotAnAttributesField(
            field_name.to_string(),
        )),
        FieldLookup::Missing => Err(AttributesError::UnknownField(field_name.to_string())),
    }
}
