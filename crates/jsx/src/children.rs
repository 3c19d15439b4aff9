//! Children parser: splits an element body into text, expression and nested
//! markup nodes, in source order.
//!
//! Invariants:
//! - Text runs are kept verbatim, whitespace included. A body made only of
//!   whitespace yields no children.
//! - A malformed child appends one diagnostic node carrying the rest of the
//!   body and ends this child list. Siblings already parsed are kept.
//! - Each iteration consumes at least one byte or ends the list.

use crate::context::TransformContext;
use crate::error::{DiagnosticCode, TransformError};
use crate::scan::{scan_element, scan_expression, starts_markup};
use crate::transform::build_node;
use crate::types::{Node, Span};
use memchr::memchr2;

/// Parse the child nodes of `src[start..end]`.
///
/// Nested constructs are measured against the whole of `src`, so results the
/// enclosing element's scan already produced are reused. One that runs past
/// `end` counts as unterminated.
pub fn parse_children(
    src: &str,
    start: usize,
    end: usize,
    ctx: &mut TransformContext,
) -> Result<Vec<Node>, TransformError> {
    if src[start..end].trim().is_empty() {
        return Ok(Vec::new());
    }
    let body = &src.as_bytes()[..end];
    let mut nodes = Vec::new();
    let mut i = start;

    while i < end {
        ctx.tick()?;
        let before = i;
        match body[i] {
            b'{' => match scan_expression(src, i, ctx)? {
                Some(expr) if expr.end <= end => {
                    if !expr.content.is_empty() {
                        ctx.record_expression();
                        nodes.push(Node::Expression(expr.content));
                    }
                    i = expr.end;
                }
                _ => {
                    nodes.push(rest_as_diagnostic(
                        ctx,
                        DiagnosticCode::UnterminatedExpression,
                        src,
                        i,
                        end,
                    ));
                    break;
                }
            },
            b'<' if starts_markup(body, i) => match scan_element(src, i, ctx)? {
                Some(child_end) if child_end <= end => {
                    nodes.push(build_node(src, i, child_end, ctx)?);
                    i = child_end;
                }
                _ => {
                    nodes.push(rest_as_diagnostic(
                        ctx,
                        DiagnosticCode::UnterminatedElement,
                        src,
                        i,
                        end,
                    ));
                    break;
                }
            },
            b'<' if body.get(i + 1) == Some(&b'/') => {
                nodes.push(rest_as_diagnostic(
                    ctx,
                    DiagnosticCode::UnexpectedClosingTag,
                    src,
                    i,
                    end,
                ));
                break;
            }
            _ => {
                let text_end = text_run_end(body, i + 1, ctx)?;
                nodes.push(Node::Text(src[i..text_end].to_string()));
                i = text_end;
            }
        }
        if i == before {
            nodes.push(rest_as_diagnostic(ctx, DiagnosticCode::NoProgress, src, i, end));
            break;
        }
    }
    Ok(nodes)
}

/// End of the text run continuing at `from`: the next `{`, or the next `<` that
/// opens markup or a closing tag. A `<` that can do neither stays in the text.
fn text_run_end(
    body: &[u8],
    mut from: usize,
    ctx: &mut TransformContext,
) -> Result<usize, TransformError> {
    let end = body.len();
    while from < end {
        ctx.tick()?;
        let Some(rel) = memchr2(b'<', b'{', &body[from..]) else {
            return Ok(end);
        };
        let at = from + rel;
        if body[at] == b'{' || starts_markup(body, at) || body.get(at + 1) == Some(&b'/') {
            return Ok(at);
        }
        from = at + 1;
    }
    Ok(end)
}

/// Diagnostic node covering `src[at..end]`.
fn rest_as_diagnostic(
    ctx: &mut TransformContext,
    code: DiagnosticCode,
    src: &str,
    at: usize,
    end: usize,
) -> Node {
    Node::Diagnostic(ctx.diagnostic(code, src, Span::new(at, end)))
}
