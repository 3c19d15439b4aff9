use crate::types::{AttributeValue, Diagnostic, Node};

/// Total number of nodes in the tree, root included.
pub fn node_count(node: &Node) -> usize {
    1 + node.children().iter().map(node_count).sum::<usize>()
}

/// Deepest element/fragment nesting level; a leaf root is depth 1.
pub fn tree_depth(node: &Node) -> usize {
    1 + node.children().iter().map(tree_depth).max().unwrap_or(0)
}

/// All diagnostics in document order: attribute markers of an element come
/// before the diagnostics of its children.
pub fn collect_diagnostics(root: &Node) -> Vec<&Diagnostic> {
    fn walk<'a>(node: &'a Node, out: &mut Vec<&'a Diagnostic>) {
        match node {
            Node::Diagnostic(diag) => out.push(diag),
            Node::Element(el) => {
                for attr in &el.attributes {
                    if let AttributeValue::Malformed(diag) = &attr.value {
                        out.push(diag);
                    }
                }
                for c in &el.children {
                    walk(c, out);
                }
            }
            Node::Fragment(children) => {
                for c in children {
                    walk(c, out);
                }
            }
            Node::Expression(_) | Node::Text(_) => {}
        }
    }

    let mut out = Vec::new();
    walk(root, &mut out);
    out
}

pub fn has_diagnostics(root: &Node) -> bool {
    !collect_diagnostics(root).is_empty()
}
