//! Leaf Renderer
//!
//! One atom in, one element out. Each primitive reads a fixed whitelist of configuration keys;
//! absent keys are omitted, never defaulted to an empty string.

use crate::element::Element;
use crate::error::GenerateError;
use crate::model::{Atom, Primitive, Value, ValueMap};

const DEFAULT_TEXT_TAG: &str = "span";

/// Builds the element for an atom. Fails on an unknown primitive kind.
pub fn element(atom: &Atom) -> Result<Element, GenerateError> {
    let config = &atom.config;
    let el = match atom.primitive()? {
        Primitive::Image => {
            let el = Element::void("img");
            let el = string_attrs(el, config, &[("src", "src"), ("alt", "alt"), ("loading", "loading")]);
            scalar_attrs(el, config, &["width", "height"])
        }
        Primitive::Heading => Element::text(format!("h{}", heading_level(config)), content(config)),
        Primitive::Link => {
            let el = Element::text("a", content(config));
            string_attrs(
                el,
                config,
                &[("href", "href"), ("target", "target"), ("ariaLabel", "aria-label")],
            )
        }
        Primitive::Button => {
            let el = Element::text("button", content(config));
            string_attrs(
                el,
                config,
                &[
                    ("type", "type"),
                    ("dataAction", "data-action"),
                    ("dataTarget", "data-target"),
                ],
            )
        }
        Primitive::Input => {
            let el = Element::void("input");
            string_attrs(
                el,
                config,
                &[
                    ("type", "type"),
                    ("name", "name"),
                    ("placeholder", "placeholder"),
                    ("ariaLabel", "aria-label"),
                ],
            )
        }
        Primitive::Text => {
            let tag = config
                .get("tag")
                .and_then(Value::as_str)
                .filter(|t| !t.is_empty())
                .unwrap_or(DEFAULT_TEXT_TAG);
            Element::text(tag, content(config))
        }
    };
    Ok(el.style(&atom.styles))
}

/// Element text for an atom.
pub fn render(atom: &Atom) -> Result<String, GenerateError> {
    Ok(element(atom)?.to_jsx())
}

fn content(config: &ValueMap) -> String {
    config
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// `level` defaults to 1 and is clamped to the six heading tags.
fn heading_level(config: &ValueMap) -> u8 {
    config
        .get("level")
        .and_then(Value::as_f64)
        .map(|l| l.clamp(1.0, 6.0) as u8)
        .unwrap_or(1)
}

fn string_attrs(mut el: Element, config: &ValueMap, keys: &[(&str, &str)]) -> Element {
    for (key, attr) in keys {
        if let Some(v) = config.get(*key).and_then(Value::as_str) {
            el = el.attr(attr, v);
        }
    }
    el
}

/// Dimension-like attributes accept strings or numbers.
fn scalar_attrs(mut el: Element, config: &ValueMap, keys: &[&str]) -> Element {
    for key in keys {
        match config.get(*key) {
            Some(v @ (Value::String(_) | Value::Number(_))) => el = el.attr(key, v.to_string()),
            _ => {}
        }
    }
    el
}
