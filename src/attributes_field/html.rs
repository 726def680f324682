//! HTML string helpers shared by the field and the widget.

/// Escape a string for safe insertion into HTML attribute values.
///
/// Replaces the five HTML-special characters (`&`, `<`, `>`, `"`, `'`) with
/// their entities, preventing attribute breakout when user-controlled values
/// are emitted inside `value="..."` or `key="..."` positions.
///
/// # Examples
/// ```
/// use attributes_field::html::escape;
///
/// assert_eq!(escape(r#"a"b"#), "a&quot;b");
/// assert_eq!(escape("<script>"), "&lt;script&gt;");
/// ```
pub fn escape(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#x27;"),
            _ => output.push(ch),
        }
    }
    output
}

/// Flatten extra HTML attributes into a string ready to splice into a tag.
///
/// Produces ` key="escaped value"` for each pair, sorted by key so the output
/// is deterministic, with a leading space so an empty set of attributes
/// contributes nothing to the tag.
pub fn flat_attrs<I, K, V>(attrs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs: Vec<(String, String)> = attrs
        .into_iter()
        .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
        .collect();
    pairs.sort();

    let mut output = String::new();
    for (key, value) in pairs {
        output.push_str(&format!(" {}=\"{}\"", escape(&key), escape(&value)));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_five_entities() {
        assert_eq!(escape("&<>\"'"), "&amp;&lt;&gt;&quot;&#x27;");
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(escape("data-x foo_bar:baz"), "data-x foo_bar:baz");
    }

    #[test]
    fn flat_attrs_is_sorted_and_space_prefixed() {
        let attrs = [("style", "width:250px"), ("class", "wide")];
        assert_eq!(
            flat_attrs(attrs),
            " class=\"wide\" style=\"width:250px\""
        );
    }

    #[test]
    fn flat_attrs_escapes_values() {
        let attrs = [("title", "a \"quoted\" thing")];
        assert_eq!(flat_attrs(attrs), " title=\"a &quot;quoted&quot; thing\"");
    }

    #[test]
    fn flat_attrs_empty_is_empty() {
        let none: [(&str, &str); 0] = [];
        assert_eq!(flat_attrs(none), "");
    }
}
