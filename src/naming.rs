//! Identifier and property-name casing transforms.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref JS_IDENTIFIER_RE: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap();
}

/// Upper-cases the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `main_title` / `main-title` → `MainTitle`.
///
/// Underscores and hyphens are word boundaries; empty words are dropped and the tail of each
/// word keeps its original case.
pub fn to_pascal_case(id: &str) -> String {
    id.split(|c| c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect()
}

/// `background-color` → `backgroundColor`. Names without hyphens are returned unchanged.
pub fn to_camel_case(prop: &str) -> String {
    let mut parts = prop.split('-');
    let mut out = parts.next().unwrap_or_default().to_string();
    for part in parts {
        out.push_str(&capitalize(part));
    }
    out
}

/// `backgroundColor` → `background-color`. A leading capital is kept as is.
pub fn to_kebab_case(prop: &str) -> String {
    let mut out = String::with_capacity(prop.len() + 4);
    for (i, c) in prop.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Whether `name` can be used as a JavaScript binding.
pub fn is_js_identifier(name: &str) -> bool {
    JS_IDENTIFIER_RE.is_match(name)
}
