//! Key syntax rules and exclusion lists.
//!
//! Valid keys:
//! - Must start with an ASCII letter
//! - May otherwise contain letters, digits, underscores, hyphens and colons
//!   (the colon admits namespaced names like `v-on:click` and `xml:lang`)
//!
//! Exclusion lists are matched case-insensitively. An entry ending in `*` is
//! a wildcard matching every key that starts with the prefix before the star,
//! which is how `on*` blocks the whole family of event-handler attributes.

use crate::error::{AttributesError, Result};

/// Validates a key against the permitted syntax.
///
/// # Examples
/// ```
/// use attributes_field::keys::validate_key_syntax;
///
/// assert!(validate_key_syntax("target").is_ok());
/// assert!(validate_key_syntax("data-x").is_ok());
/// assert!(validate_key_syntax("v-on:click").is_ok());
///
/// assert!(validate_key_syntax("").is_err());
/// assert!(validate_key_syntax("-abc").is_err());
/// assert!(validate_key_syntax("31-flavors").is_err());
/// assert!(validate_key_syntax("#hash").is_err());
/// ```
pub fn validate_key_syntax(key: &str) -> Result<()> {
    let mut chars = key.chars();

    let starts_with_letter = chars.next().is_some_and(|ch| ch.is_ascii_alphabetic());
    if !starts_with_letter {
        return Err(invalid_key(key));
    }

    for ch in chars {
        if !is_valid_key_char(ch) {
            return Err(invalid_key(key));
        }
    }

    Ok(())
}

fn is_valid_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | ':')
}

fn invalid_key(key: &str) -> AttributesError {
    AttributesError::InvalidKey {
        key: key.to_string(),
    }
}

/// Validates a key against both the syntax rule and an exclusion list.
///
/// The exclusion check runs first so a blocked key reports
/// [`AttributesError::ExcludedKey`] even when its syntax is also wrong.
pub fn validate_key(key: &str, excluded: &ExcludedKeys) -> Result<()> {
    if excluded.contains(key) {
        return Err(AttributesError::ExcludedKey {
            key: key.to_string(),
        });
    }
    validate_key_syntax(key)
}

/// An immutable, case-normalized list of forbidden keys.
///
/// Entries are lowercased at construction time; matching is therefore
/// case-insensitive. Entries ending in `*` match by prefix.
///
/// # Examples
/// ```
/// use attributes_field::keys::ExcludedKeys;
///
/// let excluded = ExcludedKeys::new(["Title", "on*"]);
/// assert!(excluded.contains("title"));
/// assert!(excluded.contains("TITLE"));
/// assert!(excluded.contains("onclick"));
/// assert!(excluded.contains("online")); // prefix match, by design
/// assert!(!excluded.contains("data-title"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludedKeys {
    exact: Vec<String>,
    prefixes: Vec<String>,
}

impl ExcludedKeys {
    /// Builds an exclusion list, lowercasing each entry and splitting off
    /// wildcard entries.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut exact = Vec::new();
        let mut prefixes = Vec::new();
        for key in keys {
            let key = key.into().to_lowercase();
            match key.strip_suffix('*') {
                Some(prefix) => {
                    if !prefixes.contains(&prefix.to_string()) {
                        prefixes.push(prefix.to_string());
                    }
                }
                None => {
                    if !exact.contains(&key) {
                        exact.push(key);
                    }
                }
            }
        }
        Self { exact, prefixes }
    }

    /// Case-insensitive membership test, honoring wildcard prefixes.
    pub fn contains(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.exact.contains(&key) || self.prefixes.iter().any(|p| key.starts_with(p.as_str()))
    }

    /// The union of two exclusion lists.
    pub fn merge(&self, other: &ExcludedKeys) -> ExcludedKeys {
        let mut merged = self.clone();
        for key in &other.exact {
            if !merged.exact.contains(key) {
                merged.exact.push(key.clone());
            }
        }
        for prefix in &other.prefixes {
            if !merged.prefixes.contains(prefix) {
                merged.prefixes.push(prefix.clone());
            }
        }
        merged
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.prefixes.is_empty()
    }

    /// The normalized entries, wildcards re-suffixed with `*`.
    pub fn iter(&self) -> impl Iterator<Item = String> + '_ {
        self.exact
            .iter()
            .cloned()
            .chain(self.prefixes.iter().map(|p| format!("{p}*")))
    }
}
