//! Error types.
//!
//! Every failure in this crate is a validation failure surfaced synchronously
//! to the caller. A mapping either validates entirely or is rejected as a
//! whole; individual bad keys are never silently dropped.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AttributesError {
    /// The stored value is null but the field does not allow nulls.
    #[error("this value cannot be null")]
    NullNotAllowed,

    /// Stored or submitted text is not a valid JSON object. Carries the
    /// parser detail so admin forms can show where the input went wrong.
    #[error("value must be a valid JSON object: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The key does not match the permitted syntax.
    #[error(
        "\"{key}\" is not a valid key: keys must start with a letter and \
         consist only of letters, numbers, underscores, hyphens or colons"
    )]
    InvalidKey { key: String },

    /// The key is on the configured exclusion list.
    #[error("\"{key}\" is excluded by configuration and cannot be used as a key")]
    ExcludedKey { key: String },

    /// The value under `key` cannot be represented as JSON.
    #[error("the value for key \"{key}\" cannot be represented as JSON: {source}")]
    InvalidValue {
        key: String,
        source: serde_json::Error,
    },

    /// A required form field received an empty submission.
    #[error("this field is required")]
    Required,

    /// A submitted form body could not be decoded at all.
    #[error("malformed form data: {0}")]
    InvalidFormData(String),

    /// The derived-string accessor was asked for a field the record does not
    /// have.
    #[error("\"{0}\" is not a field of this record")]
    UnknownField(String),

    /// The derived-string accessor was asked for a field that exists but is
    /// not an attributes field.
    #[error("\"{0}\" is not an attributes field")]
    NotAnAttributesField(String),
}

pub type Result<T> = std::result::Result<T, AttributesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_key() {
        let err = AttributesError::InvalidKey {
            key: "31-flavors".to_string(),
        };
        assert!(err.to_string().contains("\"31-flavors\""));

        let err = AttributesError::ExcludedKey {
            key: "style".to_string(),
        };
        assert!(err.to_string().contains("\"style\""));
    }

    #[test]
    fn invalid_json_passes_parser_detail_through() {
        let source = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let detail = source.to_string();
        let err = AttributesError::InvalidJson(source);
        assert!(err.to_string().contains(&detail));
    }

    #[test]
    fn accessor_errors_name_the_field() {
        assert_eq!(
            AttributesError::UnknownField("attrs".to_string()).to_string(),
            "\"attrs\" is not a field of this record"
        );
        assert_eq!(
            AttributesError::NotAnAttributesField("label".to_string()).to_string(),
            "\"label\" is not an attributes field"
        );
    }
}
