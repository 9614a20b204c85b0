//! Minimal JSX element tree and its printer.
//!
//! Composers build `Element` values instead of concatenating strings so that nesting and
//! attribute injection stay structural. Printing is deterministic: two spaces per depth level,
//! one child per line.

use crate::model::ValueMap;
use crate::style;

#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Printed as `name="value"`, with `"` escaped.
    Literal(String),
    /// Printed verbatim as `name=<expr>`; the expression carries its own braces.
    Expression(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub name: String,
    pub value: AttrValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Self-closing element.
    Void,
    Text(String),
    Children(Vec<Element>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// An empty tag prints as a fragment (`<>...</>`).
    pub tag: String,
    pub attrs: Vec<Attr>,
    pub body: Body,
}

impl Element {
    /// Container element with no children yet.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            body: Body::Children(Vec::new()),
        }
    }

    pub fn void(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            body: Body::Void,
        }
    }

    pub fn text(tag: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            body: Body::Text(content.into()),
        }
    }

    pub fn fragment(children: Vec<Element>) -> Self {
        Self {
            tag: String::new(),
            attrs: Vec::new(),
            body: Body::Children(children),
        }
    }

    /// Reference to a generated component, e.g. `<MainHeader />`.
    pub fn component(name: &str) -> Self {
        Self::void(name)
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.push_attr(name, AttrValue::Literal(value.into()));
        self
    }

    pub fn expr_attr(mut self, name: &str, expr: impl Into<String>) -> Self {
        self.push_attr(name, AttrValue::Expression(expr.into()));
        self
    }

    /// Adds `style={{ ... }}` when the map is non-empty.
    pub fn style(self, styles: &ValueMap) -> Self {
        let inline = style::to_inline(styles);
        if inline.is_empty() {
            self
        } else {
            self.expr_attr("style", inline)
        }
    }

    pub fn class(self, class_name: &str) -> Self {
        self.attr("className", class_name)
    }

    pub fn push_attr(&mut self, name: &str, value: AttrValue) {
        self.attrs.push(Attr {
            name: name.to_string(),
            value,
        });
    }

    pub fn child(mut self, child: Element) -> Self {
        self.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        for child in children {
            self.push(child);
        }
        self
    }

    /// Appends a child. A void or text body is turned into a children body.
    pub fn push(&mut self, child: Element) {
        match &mut self.body {
            Body::Children(children) => children.push(child),
            _ => self.body = Body::Children(vec![child]),
        }
    }

    pub fn child_elements(&self) -> &[Element] {
        match &self.body {
            Body::Children(children) => children,
            _ => &[],
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.iter().find(|a| a.name == name).map(|a| &a.value)
    }

    pub fn to_jsx(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, 0);
        out
    }

    fn write(&self, out: &mut String, depth: usize) {
        let open = self.open_tag();
        match &self.body {
            Body::Void => {
                out.push_str(&open);
                out.push_str(" />");
            }
            Body::Text(text) => {
                out.push_str(&open);
                out.push('>');
                out.push_str(&escape_text(text));
                self.write_close(out);
            }
            Body::Children(children) if children.is_empty() => {
                out.push_str(&open);
                out.push('>');
                self.write_close(out);
            }
            Body::Children(children) => {
                out.push_str(&open);
                out.push('>');
                for child in children {
                    out.push('\n');
                    out.push_str(&"  ".repeat(depth + 1));
                    child.write(out, depth + 1);
                }
                out.push('\n');
                out.push_str(&"  ".repeat(depth));
                self.write_close(out);
            }
        }
    }

    fn open_tag(&self) -> String {
        let mut open = format!("<{}", self.tag);
        for attr in &self.attrs {
            open.push(' ');
            open.push_str(&attr.name);
            open.push('=');
            match &attr.value {
                AttrValue::Literal(v) => {
                    open.push('"');
                    open.push_str(&escape_attr(v));
                    open.push('"');
                }
                AttrValue::Expression(e) => open.push_str(e),
            }
        }
        open
    }

    fn write_close(&self, out: &mut String) {
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// Escapes characters that would otherwise be read as JSX syntax inside element text.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

/// Prefixes every non-blank line with `levels` two-space indents.
pub fn indent(code: &str, levels: usize) -> String {
    let pad = "  ".repeat(levels);
    code.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_element() {
        assert_eq!(Element::text("h1", "Hello").to_jsx(), "<h1>Hello</h1>");
    }

    #[test]
    fn test_void_element_with_attrs() {
        let img = Element::void("img").attr("src", "/a.png").attr("alt", "A \"quote\"");
        assert_eq!(img.to_jsx(), r#"<img src="/a.png" alt="A &quot;quote&quot;" />"#);
    }

    #[test]
    fn test_void_without_attrs() {
        assert_eq!(Element::void("input").to_jsx(), "<input />");
    }

    #[test]
    fn test_nested_printing() {
        let tree = Element::new("div").class("outer").child(
            Element::new("nav")
                .child(Element::text("a", "Home"))
                .child(Element::text("a", "About")),
        );
        assert_eq!(
            tree.to_jsx(),
            "<div className=\"outer\">\n  <nav>\n    <a>Home</a>\n    <a>About</a>\n  </nav>\n</div>"
        );
    }

    #[test]
    fn test_empty_container() {
        assert_eq!(Element::new("div").class("x").to_jsx(), "<div className=\"x\"></div>");
    }

    #[test]
    fn test_fragment() {
        let frag = Element::fragment(vec![Element::component("Header")]);
        assert_eq!(frag.to_jsx(), "<>\n  <Header />\n</>");
    }

    #[test]
    fn test_text_escaping() {
        assert_eq!(
            Element::text("p", "a {b} <c>").to_jsx(),
            "<p>a &#123;b&#125; &lt;c&gt;</p>"
        );
    }

    #[test]
    fn test_ampersand_survives_entity_decoding() {
        assert_eq!(
            Element::text("p", "A &amp; B").to_jsx(),
            "<p>A &amp;amp; B</p>"
        );
        assert_eq!(
            Element::void("a").attr("href", "/q?a=1&b=2").to_jsx(),
            r#"<a href="/q?a=1&amp;b=2" />"#
        );
    }

    #[test]
    fn test_indent_skips_blank_lines() {
        assert_eq!(indent("a\n\n  b", 2), "    a\n\n      b");
    }
}
