//! A storage field and admin widget for flat HTML attribute mappings.
//!
//! This crate stores a flat mapping of HTML attribute key/value pairs as a
//! JSON object string and edits it in an admin form as dynamic key/value
//! input rows. It is the plumbing a host CMS needs to offer an "extra
//! attributes" field on its records without accepting arbitrary markup:
//!
//! - keys must look like attribute names (`^[A-Za-z][-A-Za-z0-9_:]*`),
//! - configured exclusion lists block unsafe keys case-insensitively, with
//!   `on*`-style wildcards for whole families,
//! - values round-trip through JSON,
//! - the stored mapping renders on demand as ready-to-embed attribute syntax
//!   (`key="escaped value"`, bare key when the value is falsy).
//!
//! The pieces are deliberately separate: [`AttributesField`] describes the
//! stored column and owns the codec and validation, [`AttributesFormField`]
//! validates user submissions with a stricter built-in exclusion set, and
//! [`AttributesWidget`] renders the editing rows and parses them back out of
//! submitted form data. Nothing here talks to a database or an HTTP stack;
//! the host wires these into its own record and form lifecycle.
//!
//! # Quick start
//!
//! ```
//! use attributes_field::{
//!     Attributes, AttributesField, AttributesFormField, AttributesWidget, FormData,
//! };
//!
//! // Storage side: decode, validate, render.
//! let field = AttributesField::new().with_excluded_keys(["style"]);
//! let attrs = field
//!     .from_stored(Some(r#"{"class": "wide", "disabled": ""}"#))?
//!     .unwrap();
//! field.validate(Some(&attrs))?;
//! assert_eq!(field.html_attrs(&attrs), r#"class="wide" disabled"#);
//!
//! // Admin side: render the editing rows, then parse a submission back.
//! let widget = AttributesWidget::new();
//! let fragment = widget.render("attrs", Some(&attrs));
//! assert!(fragment.contains("attributes_key[attrs]"));
//!
//! let submitted = FormData::from_pairs([
//!     ("attributes_key[attrs]", "class"),
//!     ("attributes_value[attrs]", "narrow"),
//! ]);
//! let edited = widget.value_from_form_data(&submitted, "attrs");
//! let cleaned = AttributesFormField::new().clean(Some(edited))?;
//! assert_eq!(cleaned.unwrap().get("class"), Some(&serde_json::json!("narrow")));
//! # Ok::<(), attributes_field::AttributesError>(())
//! ```
//!
//! ## Module Overview
//!
//! - [`model`]: the [`Attributes`] mapping and value helpers
//! - [`fields`]: storage-side field configuration, codec and validation
//! - [`forms`]: form-side validation and the submitted-data carrier
//! - [`widgets`]: the key/value row widget and its bundled assets
//! - [`keys`]: key syntax rule and exclusion lists
//! - [`html`]: escaping and attribute flattening
//! - [`error`]: error types

pub mod error;
pub mod fields;
pub mod forms;
pub mod html;
pub mod keys;
pub mod model;
pub mod widgets;

pub use error::{AttributesError, Result};
pub use fields::{attributes_str, AttributesField, AttributesRecord, DefaultValue, FieldLookup};
pub use forms::{AttributesFormField, FormData, DEFAULT_EXCLUDED_KEYS};
pub use keys::ExcludedKeys;
pub use model::Attributes;
pub use widgets::{AssetMode, AttributesWidget, RowOrder, WidgetMedia};
