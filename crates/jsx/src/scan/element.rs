//! Element-boundary scanner.
//!
//! Measures one complete element (`<name ...>...</name>`, `<name .../>`) or
//! fragment (`<>...</>`) starting at a `<`.
//!
//! Invariants:
//! - Quoted attribute values and inline expressions inside the opening tag are
//!   skipped, so a `>` inside them never ends the tag. An unterminated `{` there
//!   is stepped over and left for the attribute parser to mark.
//! - Inside the body, inline expressions are skipped through the expression
//!   scanner and nested elements of any name through a recursive call. The first
//!   matching closing tag seen at this level therefore belongs to this element,
//!   including when a nested element shares its name.
//! - A nested element or expression that never closes does not end the scan:
//!   its first byte is stepped over and the search for this element's closing
//!   tag goes on. The children parser reports the unclosed construct.
//! - Every loop iteration either advances the cursor or returns.

use super::expr::scan_expression;
use crate::context::{ScanKind, TransformContext};
use crate::error::TransformError;
use memchr::memchr2;

pub(crate) fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

pub(crate) fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// End of the identifier starting at `start`, or `start` if there is none.
pub(crate) fn ident_end(bytes: &[u8], start: usize) -> usize {
    if !bytes.get(start).copied().is_some_and(is_ident_start) {
        return start;
    }
    let mut i = start + 1;
    while i < bytes.len() && is_ident_char(bytes[i]) {
        i += 1;
    }
    i
}

/// Whether a `<` at `i` can open an element or fragment.
pub(crate) fn starts_markup(bytes: &[u8], i: usize) -> bool {
    bytes.get(i) == Some(&b'<')
        && bytes
            .get(i + 1)
            .copied()
            .is_some_and(|b| b == b'>' || is_ident_start(b))
}

/// Match `</name>` at `i`, allowing ASCII whitespace before `>`.
///
/// An empty `name` matches the fragment closer `</>`.
pub(crate) fn match_close_tag(bytes: &[u8], i: usize, name: &str) -> Option<usize> {
    let name = name.as_bytes();
    let after_slash = i + 2;
    if bytes.get(i..after_slash) != Some(b"</".as_slice()) {
        return None;
    }
    if bytes.get(after_slash..after_slash + name.len()) != Some(name) {
        return None;
    }
    let mut k = after_slash + name.len();
    while k < bytes.len() && bytes[k].is_ascii_whitespace() {
        k += 1;
    }
    (bytes.get(k) == Some(&b'>')).then_some(k + 1)
}

/// Opening tag located by [`scan_open_tag`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenTag {
    pub start: usize,
    pub name_start: usize,
    pub name_end: usize,
    /// Offset of the `>` ending the opening tag.
    pub gt: usize,
    pub self_closing: bool,
}

impl OpenTag {
    pub fn is_fragment(&self) -> bool {
        self.name_start == self.name_end
    }

    pub fn name<'s>(&self, src: &'s str) -> &'s str {
        &src[self.name_start..self.name_end]
    }

    /// Raw attribute region: after the name, before `>` (and before `/` when self-closing).
    pub fn attrs_range(&self) -> (usize, usize) {
        let end = if self.self_closing { self.gt - 1 } else { self.gt };
        (self.name_end, end.max(self.name_end))
    }
}

/// Locate the opening tag at `start`, including its terminating `>`.
pub fn scan_open_tag(
    src: &str,
    start: usize,
    ctx: &mut TransformContext,
) -> Result<Option<OpenTag>, TransformError> {
    let bytes = src.as_bytes();
    if !starts_markup(bytes, start) {
        return Ok(None);
    }
    let name_start = start + 1;
    if bytes[name_start] == b'>' {
        return Ok(Some(OpenTag {
            start,
            name_start,
            name_end: name_start,
            gt: name_start,
            self_closing: false,
        }));
    }
    let name_end = ident_end(bytes, name_start);
    let gt = match ctx.recall(ScanKind::OpenTag, start, src.len()) {
        Some(gt) => gt,
        None => find_tag_end(src, start, name_end, ctx)?,
    };
    Ok(gt.map(|gt| OpenTag {
        start,
        name_start,
        name_end,
        gt,
        self_closing: bytes[gt - 1] == b'/',
    }))
}

/// Offset of the `>` ending the tag opened at `start`, scanning from `from`.
///
/// A `<` passed outside quotes would find the same `>` from its own name, so
/// the result is remembered for it as well.
fn find_tag_end(
    src: &str,
    start: usize,
    from: usize,
    ctx: &mut TransformContext,
) -> Result<Option<usize>, TransformError> {
    let bytes = src.as_bytes();
    let mut openers = vec![start];
    let mut quote: Option<u8> = None;
    let mut gt = None;
    let mut i = from;
    while i < bytes.len() {
        ctx.tick()?;
        let b = bytes[i];
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }
        match b {
            b'"' | b'\'' => {
                quote = Some(b);
                i += 1;
            }
            b'{' => match scan_expression(src, i, ctx)? {
                Some(expr) => i = expr.end,
                None => i += 1,
            },
            b'<' => {
                openers.push(i);
                i += 1;
            }
            b'>' => {
                gt = Some(i);
                break;
            }
            _ => i += 1,
        }
    }
    for opener in openers {
        ctx.remember(ScanKind::OpenTag, opener, src.len(), gt);
    }
    Ok(gt)
}

/// Measure the element or fragment starting at `start`.
///
/// Returns the offset one past its end, or `Ok(None)` when the opening tag is
/// malformed or the buffer ends before the matching closing tag.
pub fn scan_element(
    src: &str,
    start: usize,
    ctx: &mut TransformContext,
) -> Result<Option<usize>, TransformError> {
    if let Some(end) = ctx.recall(ScanKind::Element, start, src.len()) {
        return Ok(end);
    }
    let end = ctx.nested(|ctx| scan_element_at_depth(src, start, ctx))?;
    ctx.remember(ScanKind::Element, start, src.len(), end);
    Ok(end)
}

fn scan_element_at_depth(
    src: &str,
    start: usize,
    ctx: &mut TransformContext,
) -> Result<Option<usize>, TransformError> {
    let Some(open) = scan_open_tag(src, start, ctx)? else {
        return Ok(None);
    };
    if open.self_closing {
        return Ok(Some(open.gt + 1));
    }
    let name = open.name(src);
    let bytes = src.as_bytes();
    let mut i = open.gt + 1;
    while i < bytes.len() {
        ctx.tick()?;
        let Some(rel) = memchr2(b'<', b'{', &bytes[i..]) else {
            break;
        };
        i += rel;
        if bytes[i] == b'{' {
            i = match scan_expression(src, i, ctx)? {
                Some(expr) => expr.end,
                None => i + 1,
            };
            continue;
        }
        if let Some(end) = match_close_tag(bytes, i, name) {
            return Ok(Some(end));
        }
        if starts_markup(bytes, i) {
            if let Some(end) = scan_element(src, i, ctx)? {
                i = end;
                continue;
            }
        }
        // Stray `<`: text like `a < b`, someone else's closing tag, or an
        // unclosed child.
        i += 1;
    }
    #[cfg(any(test, feature = "debug-stats"))]
    log::trace!(target: "jsx.scan", "unterminated <{name}> at {start}");
    Ok(None)
}
