//! Deterministic rendering of a transformed tree as constructor-call text.
//!
//! Output is a pure function of the tree and the [`RenderConfig`]: attributes
//! keep encounter order, duplicates included.

use crate::types::{Attribute, AttributeValue, Diagnostic, Element, Node};
use std::fmt::Write;

/// Names used in emitted call text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Callee of every constructor call.
    pub factory: String,
    /// First argument of a fragment call.
    pub fragment: String,
    /// Props argument when an element has no attributes.
    pub no_props: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            factory: "React.createElement".to_string(),
            fragment: "React.Fragment".to_string(),
            no_props: "null".to_string(),
        }
    }
}

pub fn render(node: &Node, config: &RenderConfig) -> String {
    let mut out = String::new();
    render_node(&mut out, node, config);
    #[cfg(any(test, feature = "debug-stats"))]
    log::trace!(target: "jsx.render", "rendered {} bytes", out.len());
    out
}

fn render_node(out: &mut String, node: &Node, config: &RenderConfig) {
    match node {
        Node::Element(el) => render_element(out, el, config),
        Node::Fragment(children) => {
            out.push_str(&config.factory);
            out.push('(');
            out.push_str(&config.fragment);
            out.push_str(", ");
            out.push_str(&config.no_props);
            render_children(out, children, config);
            out.push(')');
        }
        Node::Expression(code) => out.push_str(code),
        Node::Text(text) => {
            out.push('\'');
            escape_into(out, text, '\'');
            out.push('\'');
        }
        Node::Diagnostic(diag) => render_error(out, diag),
    }
}

fn render_element(out: &mut String, el: &Element, config: &RenderConfig) {
    out.push_str(&config.factory);
    out.push('(');
    if el.is_component() {
        out.push_str(&el.name);
    } else {
        out.push('\'');
        out.push_str(&el.name);
        out.push('\'');
    }
    out.push_str(", ");
    if el.attributes.is_empty() {
        out.push_str(&config.no_props);
    } else {
        out.push_str("{ ");
        for (i, attr) in el.attributes.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            render_attr(out, attr);
        }
        out.push_str(" }");
    }
    render_children(out, &el.children, config);
    out.push(')');
}

fn render_children(out: &mut String, children: &[Node], config: &RenderConfig) {
    for child in children {
        out.push_str(", ");
        render_node(out, child, config);
    }
}

fn render_attr(out: &mut String, attr: &Attribute) {
    out.push_str(&attr.name);
    out.push_str(": ");
    match &attr.value {
        AttributeValue::Str(text) => {
            out.push('"');
            escape_into(out, text, '"');
            out.push('"');
        }
        AttributeValue::Expr(code) if code.is_empty() => out.push_str("undefined"),
        AttributeValue::Expr(code) => out.push_str(code),
        AttributeValue::Bool => out.push_str("true"),
        AttributeValue::Malformed(diag) => render_error(out, diag),
    }
}

/// `/* error: ... */ null`, with any comment terminator in the message broken up.
fn render_error(out: &mut String, diag: &Diagnostic) {
    out.push_str("/* error: ");
    out.push_str(&diag.message().replace("*/", "* /"));
    out.push_str(" */ null");
}

fn escape_into(out: &mut String, text: &str, quote: char) {
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch == quote => {
                out.push('\\');
                out.push(ch);
            }
            ch if ch < ' ' || ch == '\u{7f}' => {
                let _ = write!(out, "\\u{{{:02X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
}
