//! Atom Composer
//!
//! Wraps a leaf element into a standalone component. Only the first declared state gets a
//! toggle; `hover` and `focus` are the only names that get event bindings.

use log::debug;

use crate::element::Element;
use crate::error::GenerateError;
use crate::leaf;
use crate::model::Atom;
use crate::naming::to_pascal_case;
use crate::template;

/// The leaf element with interaction bindings attached.
pub fn element(atom: &Atom) -> Result<Element, GenerateError> {
    let mut el = leaf::element(atom)?;
    if let Some(state) = atom.states.keys().next() {
        let setter = format!("setIs{}", to_pascal_case(state));
        let events = match state.as_str() {
            "hover" => Some(("onMouseEnter", "onMouseLeave")),
            "focus" => Some(("onFocus", "onBlur")),
            _ => None,
        };
        if let Some((enter, leave)) = events {
            el = el
                .expr_attr(enter, format!("{{() => {}(true)}}", setter))
                .expr_attr(leave, format!("{{() => {}(false)}}", setter));
        }
    }
    Ok(el)
}

pub fn compose(atom: &Atom) -> Result<String, GenerateError> {
    let name = to_pascal_case(&atom.id);
    let el = element(atom)?;

    let mut setup = Vec::new();
    let mut hooks: &[&str] = &[];
    if let Some(state) = atom.states.keys().next() {
        let pascal = to_pascal_case(state);
        setup.push(format!(
            "const [is{0}, setIs{0}] = useState(false);",
            pascal
        ));
        hooks = &["useState"];
        if atom.states.len() > 1 {
            debug!(
                "event=inert_declaration atom={} states={} note=only_first_state_is_composed",
                atom.id,
                atom.states.len()
            );
        }
    }

    Ok(template::component(&name, hooks, &setup, &el))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn atom(v: serde_json::Value) -> Atom {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_stateless_atom() {
        let a = atom(json!({
            "id": "main_title", "subatom": "Heading",
            "config": { "level": 1, "content": "Hello" }
        }));
        let src = compose(&a).unwrap();
        assert!(src.starts_with("import React from 'react';"));
        assert!(src.contains("const MainTitle = () => {"));
        assert!(src.contains("    <h1>Hello</h1>\n"));
        assert!(src.ends_with("export default MainTitle;\n"));
        assert!(!src.contains("useState"));
    }

    #[test]
    fn test_hover_state_bindings() {
        let a = atom(json!({
            "id": "cta", "subatom": "Button",
            "config": { "content": "Go" },
            "states": { "hover": { "opacity": 0.8 } }
        }));
        let src = compose(&a).unwrap();
        assert!(src.contains("import React, { useState } from 'react';"));
        assert!(src.contains("const [isHover, setIsHover] = useState(false);"));
        assert!(src.contains(
            "<button onMouseEnter={() => setIsHover(true)} onMouseLeave={() => setIsHover(false)}>Go</button>"
        ));
    }

    #[test]
    fn test_focus_state_bindings() {
        let a = atom(json!({
            "id": "email", "subatom": "Input",
            "config": { "type": "email" },
            "states": { "focus": {} }
        }));
        let src = compose(&a).unwrap();
        assert!(src.contains(
            r#"<input type="email" onFocus={() => setIsFocus(true)} onBlur={() => setIsFocus(false)} />"#
        ));
    }

    #[test]
    fn test_only_first_state_is_composed() {
        // Later states are declared but currently inert.
        let a = atom(json!({
            "id": "cta", "subatom": "Button",
            "states": { "focus": {}, "hover": {} }
        }));
        let src = compose(&a).unwrap();
        assert!(src.contains("const [isFocus, setIsFocus]"));
        assert!(!src.contains("isHover"));
        assert!(src.contains("onFocus="));
        assert!(!src.contains("onMouseEnter"));
    }

    #[test]
    fn test_unknown_state_name_has_no_bindings() {
        let a = atom(json!({
            "id": "cta", "subatom": "Button",
            "states": { "active-press": {} }
        }));
        let src = compose(&a).unwrap();
        assert!(src.contains("const [isActivePress, setIsActivePress] = useState(false);"));
        assert!(src.contains("<button></button>"));
    }
}
