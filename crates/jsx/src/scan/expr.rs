//! Balanced-expression scanner.
//!
//! Given the offset of a `{`, finds the matching `}` while skipping braces,
//! parentheses and brackets inside single-, double- and backtick-quoted strings
//! and inside `//` and `/* */` comments.
//!
//! Every `{` met in code position opens a scan of its own that would end at the
//! same `}`, so one pass settles all of them.

use super::state::{LexState, Step};
use crate::context::{ScanKind, TransformContext};
use crate::error::TransformError;

/// Result of scanning one inline expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExprScan {
    /// Text between the braces, trimmed of surrounding whitespace.
    pub content: String,
    /// Offset one past the closing `}`.
    pub end: usize,
}

impl ExprScan {
    fn between(src: &str, open: usize, end: usize) -> Self {
        // `{` and `}` are ASCII, so both cut points are char boundaries.
        Self {
            content: src[open + 1..end - 1].trim().to_string(),
            end,
        }
    }
}

/// Scan the expression opening at `open`.
///
/// Returns `Ok(None)` if `src[open]` is not `{` or the buffer ends before the
/// braces balance. The caller decides how to surface that.
pub fn scan_expression(
    src: &str,
    open: usize,
    ctx: &mut TransformContext,
) -> Result<Option<ExprScan>, TransformError> {
    let bytes = src.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return Ok(None);
    }
    if let Some(end) = ctx.recall(ScanKind::Expression, open, src.len()) {
        return Ok(end.map(|end| ExprScan::between(src, open, end)));
    }

    let mut state = LexState::opened();
    // Braces opened in code position and not yet matched, outermost first.
    let mut pending = vec![open];
    let mut i = open + 1;
    while i < bytes.len() {
        ctx.tick()?;
        let (next, step) = state.feed(bytes[i], bytes.get(i + 1).copied());
        if next.curly > state.curly {
            pending.push(i);
        } else if next.curly < state.curly {
            if let Some(inner) = pending.pop() {
                ctx.remember(ScanKind::Expression, inner, src.len(), Some(i + 1));
            }
        }
        state = next;
        match step {
            Step::Next => i += 1,
            Step::Pair => i += 2,
            Step::Closed => {
                if !state.is_balanced() {
                    log::debug!(
                        target: "jsx.scan",
                        "expression at {open} closed with unbalanced delimiters: paren={} square={}",
                        state.paren,
                        state.square
                    );
                }
                return Ok(Some(ExprScan::between(src, open, i + 1)));
            }
        }
    }
    for unmatched in pending {
        ctx.remember(ScanKind::Expression, unmatched, src.len(), None);
    }
    #[cfg(any(test, feature = "debug-stats"))]
    log::trace!(target: "jsx.scan", "unterminated expression at {open}: {state:?}");
    Ok(None)
}
