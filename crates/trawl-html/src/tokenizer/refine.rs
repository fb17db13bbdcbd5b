use crate::category::TagCategory;

use super::helpers::{close_unmatched, count_openers, find_byte, self_closing, word_run};
use super::slice::{RawSlice, SliceOrigin};

/// Recover the nested occurrences inside a nestable slice.
///
/// Returns nothing unless the body after the opening tag contains another
/// opener of the slice's own name. Otherwise the slice is cut at every `<`
/// after the first; each piece that opens a tag becomes a fragment, with a
/// synthetic `</name>` per unmatched opener so it stands on its own. Void
/// and wrapper pieces keep only their opening tag.
pub(super) fn split_nested(slice: &str) -> Vec<RawSlice> {
    let bytes = slice.as_bytes();
    let name = word_run(slice, 1);
    let Some(open_end) = find_byte(bytes, b'>', 0) else {
        return Vec::new();
    };
    if count_openers(&slice[open_end + 1..], name) == 0 {
        return Vec::new();
    }

    let mut fragments = Vec::new();
    let mut at = find_byte(bytes, b'<', 1);
    while let Some(start) = at {
        let next = find_byte(bytes, b'<', start + 1);
        if let Some(fragment) = fragment_from(&slice[start..next.unwrap_or(slice.len())]) {
            fragments.push(fragment);
        }
        at = next;
    }
    fragments
}

/// Turn one `<`-delimited piece into a standalone slice. Closers, comments
/// and `<br>` yield nothing.
fn fragment_from(piece: &str) -> Option<RawSlice> {
    let name = word_run(piece, 1);
    if name.is_empty() || name.eq_ignore_ascii_case("br") {
        return None;
    }
    let open_end = find_byte(piece.as_bytes(), b'>', 0)?;

    let self_closed = self_closing(piece.as_bytes(), 1 + name.len(), open_end);
    let text = if self_closed || !TagCategory::of(name).has_body() {
        piece[..=open_end].to_string()
    } else {
        let mut text = piece.to_string();
        close_unmatched(&mut text, name);
        text
    };

    Some(RawSlice::new(text, name, SliceOrigin::Fragment))
}
