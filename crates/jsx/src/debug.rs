use crate::types::{Attribute, AttributeValue, Node};

fn push_attr(line: &mut String, attr: &Attribute) {
    line.push(' ');
    line.push_str(&attr.name);
    match &attr.value {
        AttributeValue::Str(text) => {
            line.push_str(r#"=""#);
            line.push_str(text);
            line.push('"');
        }
        AttributeValue::Expr(code) => {
            line.push_str("={");
            push_preview_replace_newlines(line, code, PREVIEW_CHARS);
            line.push('}');
        }
        AttributeValue::Bool => {}
        AttributeValue::Malformed(_) => line.push_str("=!malformed"),
    }
}

fn push_preview_replace_newlines(out: &mut String, s: &str, max_chars: usize) {
    let mut truncated = false;
    for (i, ch) in s.chars().enumerate() {
        if i == max_chars {
            truncated = true;
            break;
        }
        out.push(if ch == '\n' { ' ' } else { ch });
    }
    if truncated {
        out.push('…');
    }
}

const INDENT_STEP: &str = "  ";
const PREVIEW_CHARS: usize = 40;

/// One line per node, indented by depth, at most `cap` nodes.
///
/// Whitespace-only text runs are skipped; other text is trimmed and previewed.
pub fn outline(root: &Node, cap: usize) -> Vec<String> {
    struct IndentGuard<'a> {
        indent: &'a mut String,
        step: usize,
    }

    impl Drop for IndentGuard<'_> {
        fn drop(&mut self) {
            let new_len = self.indent.len() - self.step;
            self.indent.truncate(new_len);
        }
    }

    fn walk_children(
        children: &[Node],
        indent: &mut String,
        out: &mut Vec<String>,
        left: &mut usize,
    ) {
        indent.push_str(INDENT_STEP);
        let mut guard = IndentGuard {
            indent,
            step: INDENT_STEP.len(),
        };
        for c in children {
            walk(c, &mut *guard.indent, out, left);
        }
    }

    fn walk(node: &Node, indent: &mut String, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        let mut line = String::with_capacity(indent.len() + 64);
        line.push_str(indent);
        match node {
            Node::Element(el) => {
                line.push('<');
                line.push_str(&el.name);
                for attr in &el.attributes {
                    push_attr(&mut line, attr);
                }
                line.push_str(if el.self_closing { "/>" } else { ">" });
                out.push(line);
                walk_children(&el.children, indent, out, left);
            }
            Node::Fragment(children) => {
                line.push_str("<>");
                out.push(line);
                walk_children(children, indent, out, left);
            }
            Node::Expression(code) => {
                line.push('{');
                push_preview_replace_newlines(&mut line, code, PREVIEW_CHARS);
                line.push('}');
                out.push(line);
            }
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    line.push('"');
                    push_preview_replace_newlines(&mut line, trimmed, PREVIEW_CHARS);
                    line.push('"');
                    out.push(line);
                }
            }
            Node::Diagnostic(diag) => {
                line.push_str("!error ");
                push_preview_replace_newlines(&mut line, &diag.message(), PREVIEW_CHARS * 2);
                out.push(line);
            }
        }
    }

    let mut out = Vec::new();
    let mut left = cap;
    let mut indent = String::new();
    walk(root, &mut indent, &mut out, &mut left);
    out
}
