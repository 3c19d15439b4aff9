//! Deterministic JSON view of a transformed tree.
//!
//! Object keys are emitted in sorted order (`serde_json` default map), so two
//! snapshots of the same tree serialize byte-identically.

use jsx::{AttributeValue, Diagnostic, Node};
use serde_json::{Value, json};

pub fn tree_to_json(node: &Node) -> Value {
    match node {
        Node::Element(el) => {
            let attributes: Vec<Value> = el
                .attributes
                .iter()
                .map(|attr| {
                    let mut value = attr_value_to_json(&attr.value);
                    value["name"] = json!(attr.name);
                    value
                })
                .collect();
            let children: Vec<Value> = el.children.iter().map(tree_to_json).collect();
            json!({
                "type": "element",
                "name": el.name,
                "component": el.is_component(),
                "self_closing": el.self_closing,
                "attributes": attributes,
                "children": children,
                "span": [el.span.start, el.span.end],
            })
        }
        Node::Fragment(children) => {
            let children: Vec<Value> = children.iter().map(tree_to_json).collect();
            json!({ "type": "fragment", "children": children })
        }
        Node::Expression(code) => json!({ "type": "expression", "code": code }),
        Node::Text(text) => json!({ "type": "text", "value": text }),
        Node::Diagnostic(diag) => diagnostic_to_json(diag),
    }
}

fn attr_value_to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::Str(text) => json!({ "kind": "string", "value": text }),
        AttributeValue::Expr(code) => json!({ "kind": "expression", "value": code }),
        AttributeValue::Bool => json!({ "kind": "boolean" }),
        AttributeValue::Malformed(diag) => json!({
            "kind": "malformed",
            "diagnostic": diagnostic_to_json(diag),
        }),
    }
}

fn diagnostic_to_json(diag: &Diagnostic) -> Value {
    json!({
        "type": "diagnostic",
        "code": format!("{:?}", diag.code),
        "fragment": diag.fragment,
        "span": [diag.span.start, diag.span.end],
    })
}

/// Pretty JSON text for golden comparisons.
pub fn tree_to_json_string(node: &Node) -> String {
    serde_json::to_string_pretty(&tree_to_json(node))
        .unwrap_or_else(|err| panic!("failed to serialize tree snapshot: {err}"))
}
