//! Admin widget for attribute mappings.
//!
//! Renders a mapping as editable key/value input rows and parses the repeated
//! `attributes_key[<name>]` / `attributes_value[<name>]` parameters of a
//! submission back into a mapping. Markup comes from the bundled minijinja
//! templates; the stylesheet and script that drive the add/remove controls
//! ship as bundled files and are inlined into the fragment by default, so a
//! host needs no asset registration to use the widget.

use crate::forms::FormData;
use crate::html;
use crate::model::{display_value, Attributes};
use minijinja::Environment;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub const WIDGET_CSS: &str = include_str!("static/widget.css");
pub const WIDGET_JS: &str = include_str!("static/widget.js");

/// Paths under which hosts serving the bundled assets should expose them.
pub const WIDGET_CSS_PATH: &str = "attributes_field/widget.css";
pub const WIDGET_JS_PATH: &str = "attributes_field/widget.js";

const ROW_TEMPLATE: &str = include_str!("templates/row.html");
const WIDGET_TEMPLATE: &str = include_str!("templates/widget.html");

// The .html names keep minijinja's HTML auto-escaping on for the inputs.
static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.add_template("row.html", ROW_TEMPLATE)
        .expect("bundled row template parses");
    env.add_template("widget.html", WIDGET_TEMPLATE)
        .expect("bundled widget template parses");
    env
});

static INLINE_ASSETS: Lazy<String> = Lazy::new(|| {
    tracing::debug!("building inline widget asset block");
    format!("<style>\n{WIDGET_CSS}</style>\n<script>\n{WIDGET_JS}</script>")
});

/// The `<style>`/`<script>` block appended to inline-mode fragments.
///
/// Built once per process; every call returns the same content.
pub fn inline_assets() -> &'static str {
    &INLINE_ASSETS
}

/// Order of the rendered key/value rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowOrder {
    /// Lexicographic by key.
    #[default]
    SortedKeys,
    /// The mapping's own order.
    Insertion,
}

/// How the widget ships its stylesheet and script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AssetMode {
    /// Append the style and script blocks to every rendered fragment, so
    /// hosts that never registered the bundled files still get working
    /// add/remove controls.
    #[default]
    Inline,
    /// Emit markup only and reference the bundled files through
    /// [`AttributesWidget::media`].
    Linked,
}

/// Asset references reported by a widget in linked mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetMedia {
    pub css: Vec<&'static str>,
    pub js: Vec<&'static str>,
}

/// Renders a mapping as key/value input rows and reads submissions back.
///
/// # Examples
/// ```
/// use attributes_field::{Attributes, AttributesWidget};
///
/// let mut attrs = Attributes::new();
/// attrs.insert("target", "_blank")?;
///
/// let widget = AttributesWidget::new();
/// let fragment = widget.render("attrs", Some(&attrs));
///
/// assert!(fragment.contains("attributes_key[attrs]"));
/// assert!(fragment.contains(r#"value="_blank""#));
/// # Ok::<(), attributes_field::AttributesError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttributesWidget {
    key_attrs: BTreeMap<String, String>,
    val_attrs: BTreeMap<String, String>,
    row_order: RowOrder,
    assets: AssetMode,
}

impl AttributesWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extra HTML attributes merged into every key input tag.
    pub fn with_key_attrs<I, K, V>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in attrs {
            self.key_attrs.insert(key.into(), value.into());
        }
        self
    }

    /// Extra HTML attributes merged into every value input tag.
    pub fn with_val_attrs<I, K, V>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in attrs {
            self.val_attrs.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_row_order(mut self, order: RowOrder) -> Self {
        self.row_order = order;
        self
    }

    pub fn with_assets(mut self, assets: AssetMode) -> Self {
        self.assets = assets;
        self
    }

    /// Renders the widget fragment for a field.
    ///
    /// A missing or empty mapping still renders the wrapper, the hidden
    /// template row and the add control, so the form stays editable.
    pub fn render(&self, name: &str, value: Option<&Attributes>) -> String {
        let mut entries: Vec<(&str, String)> = value
            .map(|attrs| {
                attrs
                    .iter()
                    .map(|(key, value)| (key.as_str(), display_value(value)))
                    .collect()
            })
            .unwrap_or_default();
        if self.row_order == RowOrder::SortedKeys {
            entries.sort_by(|a, b| a.0.cmp(b.0));
        }

        let mut rows = String::new();
        for (key, value) in &entries {
            rows.push_str(&self.render_row(name, key, value));
        }

        tracing::debug!(field = name, rows = entries.len(), "rendering attributes widget");
        let context = WidgetContext {
            rows,
            template_row: self.render_row(name, "", ""),
            assets: match self.assets {
                AssetMode::Inline => inline_assets().to_string(),
                AssetMode::Linked => String::new(),
            },
        };
        render_template("widget.html", &context)
    }

    fn render_row(&self, name: &str, key: &str, value: &str) -> String {
        let context = RowContext {
            name,
            key,
            value,
            key_attrs: html::flat_attrs(&self.key_attrs),
            val_attrs: html::flat_attrs(&self.val_attrs),
        };
        render_template("row.html", &context)
    }

    /// Asset references for the configured mode.
    ///
    /// Linked mode points at the bundled files; inline mode reports nothing
    /// because the content ships inside the fragment.
    pub fn media(&self) -> WidgetMedia {
        match self.assets {
            AssetMode::Linked => WidgetMedia {
                css: vec![WIDGET_CSS_PATH],
                js: vec![WIDGET_JS_PATH],
            },
            AssetMode::Inline => WidgetMedia::default(),
        }
    }

    /// Reads the mapping out of submitted form data.
    ///
    /// Zips the repeated key and value parameters positionally, dropping
    /// pairs with an empty key. A repeated key keeps its last value. When
    /// either parameter is absent the result is an empty mapping.
    pub fn value_from_form_data(&self, data: &FormData, name: &str) -> Attributes {
        let key_field = format!("attributes_key[{name}]");
        let val_field = format!("attributes_value[{name}]");
        if !data.contains(&key_field) || !data.contains(&val_field) {
            return Attributes::new();
        }

        let keys = data.get_list(&key_field);
        let values = data.get_list(&val_field);
        let mut attrs = Attributes::new();
        for (key, value) in keys.into_iter().zip(values) {
            if key.is_empty() {
                continue;
            }
            attrs.insert_value(key, Value::String(value.to_string()));
        }
        attrs
    }

    /// Always false: an empty submission is an empty mapping, not an
    /// omission.
    pub fn value_omitted(&self, _data: &FormData, _name: &str) -> bool {
        false
    }
}

fn render_template<T: Serialize>(name: &'static str, context: &T) -> String {
    TEMPLATES
        .get_template(name)
        .and_then(|tmpl| tmpl.render(context))
        .unwrap_or_else(|err| {
            tracing::error!(template = name, error = %err, "widget template failed to render");
            String::new()
        })
}

#[derive(Serialize)]
struct RowContext<'a> {
    name: &'a str,
    key: &'a str,
    value: &'a str,
    key_attrs: String,
    val_attrs: String,
}

#[derive(Serialize)]
struct WidgetContext {
    rows: String,
    template_row: String,
    assets: String,
}
