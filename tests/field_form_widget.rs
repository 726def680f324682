//! End-to-end flows across the field, form and widget layers.

use attributes_field::{
    attributes_str, AssetMode, Attributes, AttributesError, AttributesField, AttributesFormField,
    AttributesRecord, AttributesWidget, FieldLookup, FormData,
};
use serde_json::json;

#[test]
fn stored_value_survives_an_edit_cycle() {
    let field = AttributesField::new().with_blank(true);

    // Load what a previous save left in the column.
    let attrs = field
        .from_stored(Some(r#"{"class": "wide", "data-x": "1"}"#))
        .unwrap()
        .unwrap();

    // Render the admin rows for it.
    let widget = AttributesWidget::new();
    let fragment = widget.render("attributes", Some(&attrs));
    assert!(fragment.contains(r#"name="attributes_key[attributes]" value="class""#));
    assert!(fragment.contains(r#"name="attributes_value[attributes]" value="wide""#));

    // The user edits a value, adds a pair and leaves the template row empty.
    let submitted = FormData::from_pairs([
        ("attributes_key[attributes]", "class"),
        ("attributes_value[attributes]", "narrow"),
        ("attributes_key[attributes]", "data-x"),
        ("attributes_value[attributes]", "2"),
        ("attributes_key[attributes]", "target"),
        ("attributes_value[attributes]", "_blank"),
        ("attributes_key[attributes]", ""),
        ("attributes_value[attributes]", "ignored"),
    ]);
    let edited = widget.value_from_form_data(&submitted, "attributes");

    // Both validation layers accept it.
    let cleaned = AttributesFormField::new()
        .clean(Some(edited))
        .unwrap()
        .unwrap();
    field.validate(Some(&cleaned)).unwrap();

    // And it goes back to the column as JSON.
    let stored = field.to_stored(Some(&cleaned)).unwrap().unwrap();
    let reloaded = field.from_stored(Some(&stored)).unwrap().unwrap();
    assert_eq!(reloaded, cleaned);
    assert_eq!(reloaded.len(), 3);
    assert_eq!(reloaded.get("class"), Some(&json!("narrow")));
    assert_eq!(reloaded.get("target"), Some(&json!("_blank")));
}

#[test]
fn form_layer_blocks_unsafe_keys_the_field_would_store() {
    let widget = AttributesWidget::new();
    let submitted = FormData::from_pairs([
        ("attributes_key[attributes]", "onclick"),
        ("attributes_value[attributes]", "doSomething()"),
    ]);
    let edited = widget.value_from_form_data(&submitted, "attributes");

    let err = AttributesFormField::new()
        .clean(Some(edited.clone()))
        .unwrap_err();
    assert!(matches!(err, AttributesError::ExcludedKey { key } if key == "onclick"));

    // The storage field only enforces its own exclusion list.
    let field = AttributesField::new();
    assert!(field.validate(Some(&edited)).is_ok());
}

struct Plugin {
    field: AttributesField,
    attributes: Attributes,
}

impl AttributesRecord for Plugin {
    fn lookup_field(&self, name: &str) -> FieldLookup<'_> {
        match name {
            "attributes" => FieldLookup::Attributes(&self.field, &self.attributes),
            "label" => FieldLookup::Other,
            _ => FieldLookup::Missing,
        }
    }
}

#[test]
fn derived_string_is_reachable_through_records() {
    let field = AttributesField::new().with_excluded_keys(["style"]);
    let attributes = field
        .from_stored(Some(
            r#"{"data-tracking": "google", "style": "x", "hidden": ""}"#,
        ))
        .unwrap()
        .unwrap();
    let plugin = Plugin { field, attributes };

    assert_eq!(
        attributes_str(&plugin, "attributes").unwrap(),
        r#"data-tracking="google" hidden"#
    );
    assert!(matches!(
        attributes_str(&plugin, "label"),
        Err(AttributesError::NotAnAttributesField(_))
    ));
    assert!(matches!(
        attributes_str(&plugin, "missing"),
        Err(AttributesError::UnknownField(_))
    ));
}

#[test]
fn urlencoded_bodies_feed_the_widget_parser() {
    let body = "attributes_key%5Battributes%5D=data-x&attributes_value%5Battributes%5D=1\
                &attributes_key%5Battributes%5D=class&attributes_value%5Battributes%5D=a+b";
    let data = FormData::parse(body).unwrap();

    let widget = AttributesWidget::new().with_assets(AssetMode::Linked);
    let parsed = widget.value_from_form_data(&data, "attributes");

    assert_eq!(parsed.get("data-x"), Some(&json!("1")));
    assert_eq!(parsed.get("class"), Some(&json!("a b")));

    // Mapping order follows submission order.
    let keys: Vec<&str> = parsed.keys().map(String::as_str).collect();
    assert_eq!(keys, ["data-x", "class"]);
}

#[test]
fn default_resolution_feeds_a_fresh_form() {
    let field = AttributesField::new().with_default(attributes_field::DefaultValue::Json(
        r#"{"class": "initial"}"#.to_string(),
    ));

    let initial = field.get_default().unwrap().unwrap();
    let fragment = AttributesWidget::new().render("attributes", Some(&initial));
    assert!(fragment.contains(r#"value="initial""#));
}
