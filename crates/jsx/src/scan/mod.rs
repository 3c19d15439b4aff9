//! Byte-level scanners shared by the attribute, children and transform layers.
//!
//! All scanners take the full input buffer plus absolute offsets, so offsets
//! stay valid across layers. Callers bound a region by checking the returned
//! end against their own rather than truncating the buffer; results are
//! remembered in the context per buffer length.

mod element;
mod expr;
mod state;

pub use element::{OpenTag, scan_element, scan_open_tag};
pub use expr::{ExprScan, scan_expression};

pub(crate) use element::{ident_end, starts_markup};

/// First offset at or after `i` that is not ASCII whitespace.
pub(crate) fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Byte length of the char starting at `i`; 1 past the end of input.
pub(crate) fn char_len_at(src: &str, i: usize) -> usize {
    debug_assert!(src.is_char_boundary(i), "offset must be a char boundary");
    src[i..].chars().next().map_or(1, char::len_utf8)
}
