//! Style Serializer
//!
//! Turns a style map into either a React inline-style expression (`{{ color: 'red' }}`) or a
//! CSS rule block. Property order follows the declaration order of the map.

use crate::model::{format_number, Value, ValueMap};
use crate::naming::{to_camel_case, to_kebab_case};

/// Inline-style expression, including the outer braces of the JSX attribute.
/// Empty maps produce an empty string.
pub fn to_inline(styles: &ValueMap) -> String {
    if styles.is_empty() {
        return String::new();
    }
    let props: Vec<String> = styles
        .iter()
        .map(|(key, value)| format!("{}: {}", to_camel_case(key), format_value(value)))
        .collect();
    format!("{{{{ {} }}}}", props.join(", "))
}

/// `.class-name { ... }` block. Empty maps produce an empty string.
pub fn to_block(class_name: &str, styles: &ValueMap) -> String {
    to_rule(&format!(".{}", class_name), styles)
}

/// CSS rule for an arbitrary selector. String values are written bare.
pub fn to_rule(selector: &str, styles: &ValueMap) -> String {
    if styles.is_empty() {
        return String::new();
    }
    let mut lines = Vec::with_capacity(styles.len() + 2);
    lines.push(format!("{} {{", selector));
    for (key, value) in styles {
        lines.push(format!("  {}: {};", to_kebab_case(key), format_css_value(value)));
    }
    lines.push("}".to_string());
    lines.join("\n")
}

/// JavaScript literal for a style value.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_style_number(*n),
        Value::String(s) => quote(s),
        other => quote(&other.to_string()),
    }
}

fn format_css_value(value: &Value) -> String {
    match value {
        Value::Number(n) => format_style_number(*n),
        other => other.to_string(),
    }
}

fn format_style_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 {
        format_number(n)
    } else {
        format!("{:.2}", n)
    }
}

/// Single-quoted JavaScript string literal. Functional CSS values (`var(...)`, `calc(...)`)
/// are quoted like any other string.
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' | '\u{2029}' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn styles(v: serde_json::Value) -> ValueMap {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_inline_numbers() {
        assert_eq!(to_inline(&styles(json!({ "opacity": 0.5 }))), "{{ opacity: 0.50 }}");
        assert_eq!(to_inline(&styles(json!({ "z-index": 10 }))), "{{ zIndex: 10 }}");
        assert_eq!(to_inline(&styles(json!({ "flex": 1.0 }))), "{{ flex: 1 }}");
        assert_eq!(
            to_inline(&styles(json!({ "lineHeight": 1.333 }))),
            "{{ lineHeight: 1.33 }}"
        );
    }

    #[test]
    fn test_inline_mixed_in_declaration_order() {
        let out = to_inline(&styles(json!({
            "background-color": "var(--color-primary)",
            "width": "calc(100% - 2rem)",
            "visible": true,
            "margin": 0
        })));
        assert_eq!(
            out,
            "{{ backgroundColor: 'var(--color-primary)', width: 'calc(100% - 2rem)', visible: true, margin: 0 }}"
        );
    }

    #[test]
    fn test_inline_escapes_quotes() {
        let out = to_inline(&styles(json!({ "fontFamily": "'Inter', sans-serif" })));
        assert_eq!(out, r"{{ fontFamily: '\'Inter\', sans-serif' }}");
    }

    #[test]
    fn test_inline_escapes_control_characters() {
        let out = to_inline(&styles(json!({ "content": "a\rb\tc\u{0007}d\u{2028}" })));
        assert_eq!(out, r"{{ content: 'a\rb\tc\u0007d\u2028' }}");
        assert_eq!(quote("line\r\nbreak"), r"'line\r\nbreak'");
    }

    #[test]
    fn test_json_fixture_keeps_declaration_order() {
        let from_macro = styles(json!({ "zIndex": 1, "color": "red", "margin": 0 }));
        let from_text: ValueMap =
            serde_json::from_str(r#"{ "zIndex": 1, "color": "red", "margin": 0 }"#).unwrap();
        let keys: Vec<_> = from_macro.keys().collect();
        assert_eq!(keys, ["zIndex", "color", "margin"]);
        assert_eq!(to_inline(&from_macro), to_inline(&from_text));
    }

    #[test]
    fn test_nested_value_is_quoted_text() {
        let out = to_inline(&styles(json!({ "shadow": { "x": 1 } })));
        assert_eq!(out, "{{ shadow: '{x: 1}' }}");
    }

    #[test]
    fn test_empty_maps_produce_nothing() {
        assert_eq!(to_inline(&ValueMap::new()), "");
        assert_eq!(to_block("card", &ValueMap::new()), "");
    }

    #[test]
    fn test_block() {
        let out = to_block(
            "molecule-card",
            &styles(json!({ "maxWidth": "100%", "zIndex": 2, "opacity": 0.25 })),
        );
        assert_eq!(
            out,
            ".molecule-card {\n  max-width: 100%;\n  z-index: 2;\n  opacity: 0.25;\n}"
        );
    }
}
