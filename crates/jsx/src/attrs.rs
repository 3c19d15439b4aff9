//! Attribute parser for the raw text between a tag name and its `>` (or `/>`).
//!
//! Matching is left to right without backtracking. Each iteration either
//! consumes an attribute, skips one character, or stops at a malformed value.

use crate::context::TransformContext;
use crate::error::{DiagnosticCode, TransformError};
use crate::scan::{char_len_at, ident_end, scan_expression, skip_whitespace};
use crate::types::{Attribute, AttributeValue, Span};
use memchr::memchr;

/// Parse attributes in `src[start..end]`.
///
/// A value that is neither a quoted string nor a balanced expression leaves a
/// [`AttributeValue::Malformed`] marker and ends parsing for this tag; earlier
/// attributes are kept. An expression closing past `end` is unbalanced here.
pub fn parse_attributes(
    src: &str,
    start: usize,
    end: usize,
    ctx: &mut TransformContext,
) -> Result<Vec<Attribute>, TransformError> {
    let region = &src[..end];
    let bytes = region.as_bytes();
    let mut attrs = Vec::new();
    let mut i = start;

    while i < end {
        ctx.tick()?;
        i = skip_whitespace(bytes, i);
        if i >= end {
            break;
        }
        let name_end = ident_end(bytes, i);
        if name_end == i {
            i += char_len_at(region, i);
            continue;
        }
        let name = &region[i..name_end];

        let eq = skip_whitespace(bytes, name_end);
        if bytes.get(eq) != Some(&b'=') {
            attrs.push(Attribute::new(name, AttributeValue::Bool));
            i = name_end;
            continue;
        }

        let value_start = skip_whitespace(bytes, eq + 1);
        let parsed = match bytes.get(value_start) {
            Some(&quote @ (b'"' | b'\'')) => {
                memchr(quote, &bytes[value_start + 1..]).map(|rel| {
                    let close = value_start + 1 + rel;
                    let text = region[value_start + 1..close].to_string();
                    (AttributeValue::Str(text), close + 1)
                })
            }
            Some(b'{') => scan_expression(src, value_start, ctx)?
                .filter(|expr| expr.end <= end)
                .map(|expr| (AttributeValue::Expr(expr.content), expr.end)),
            _ => None,
        };

        match parsed {
            Some((value, next)) => {
                if matches!(value, AttributeValue::Expr(_)) {
                    ctx.record_expression();
                }
                attrs.push(Attribute::new(name, value));
                i = next;
            }
            None => {
                let diag = ctx.diagnostic(
                    DiagnosticCode::MalformedAttribute,
                    region,
                    Span::new(i, end),
                );
                attrs.push(Attribute::new(name, AttributeValue::Malformed(diag)));
                break;
            }
        }
    }
    Ok(attrs)
}
