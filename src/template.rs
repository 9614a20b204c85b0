//! Source layout shared by every generated component unit.

use crate::element::{indent, Element};

/// `import React[, { hooks }] from 'react';` followed by an arrow component exporting `name`.
///
/// `setup` blocks (state, effects, helpers) are placed before the `return`, separated by a
/// blank line.
pub fn component(name: &str, hooks: &[&str], setup: &[String], jsx: &Element) -> String {
    let mut out = react_import(hooks);
    out.push_str("\n\n");
    out.push_str(&component_body(name, setup, jsx));
    out
}

/// The component declaration and its default export, without imports.
pub fn component_body(name: &str, setup: &[String], jsx: &Element) -> String {
    let mut out = format!("const {} = () => {{\n", name);
    if !setup.is_empty() {
        out.push_str(&indent(&setup.join("\n\n"), 1));
        out.push_str("\n\n");
    }
    out.push_str("  return (\n");
    out.push_str(&indent(&jsx.to_jsx(), 2));
    out.push_str("\n  );\n};\n\n");
    out.push_str(&format!("export default {};\n", name));
    out
}

pub fn react_import(hooks: &[&str]) -> String {
    if hooks.is_empty() {
        "import React from 'react';".to_string()
    } else {
        format!("import React, {{ {} }} from 'react';", hooks.join(", "))
    }
}

/// Collects hook names without duplicates, keeping first-use order.
#[derive(Debug, Default)]
pub struct Hooks(Vec<&'static str>);

impl Hooks {
    pub fn use_hook(&mut self, hook: &'static str) {
        if !self.0.contains(&hook) {
            self.0.push(hook);
        }
    }

    pub fn as_slice(&self) -> &[&'static str] {
        &self.0
    }
}
