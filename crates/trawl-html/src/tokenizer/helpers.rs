//! Byte-level scanning helpers.
//!
//! Every delimiter the tokenizer cares about (`<`, `>`, `/`, quotes, tag
//! name characters) is ASCII, so positions found here are always valid
//! `str` char boundaries and slicing at them cannot panic.

/// Word characters, matching `\w` without Unicode: ASCII letters, digits and
/// underscore.
pub(crate) const fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// The run of word characters starting at byte offset `from`.
pub(crate) fn word_run(text: &str, from: usize) -> &str {
    let Some(rest) = text.get(from..) else {
        return "";
    };
    let len = rest.bytes().take_while(|&b| is_word_byte(b)).count();
    &rest[..len]
}

/// Offset of the next `needle` byte at or after `from`.
pub(crate) fn find_byte(bytes: &[u8], needle: u8, from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|offset| from + offset)
}

/// Offset of the next occurrence of `needle` at or after `from`.
pub(crate) fn find_str(text: &str, needle: &str, from: usize) -> Option<usize> {
    text.get(from..)?.find(needle).map(|offset| from + offset)
}

/// ASCII case-insensitive comparison of `bytes[at..]` against `expected`.
fn matches_at(bytes: &[u8], at: usize, expected: &[u8]) -> bool {
    bytes
        .get(at..at + expected.len())
        .is_some_and(|window| window.eq_ignore_ascii_case(expected))
}

/// Whether an opening tag `<name` starts at `at`. The name must not continue
/// with another word character, so `<a` does not match `<abbr`.
pub(crate) fn opener_at(bytes: &[u8], at: usize, name: &str) -> bool {
    bytes.get(at) == Some(&b'<')
        && matches_at(bytes, at + 1, name.as_bytes())
        && !bytes
            .get(at + 1 + name.len())
            .is_some_and(|&b| is_word_byte(b))
}

/// Whether the closing tag `</name>` starts at `at`.
pub(crate) fn closer_at(bytes: &[u8], at: usize, name: &str) -> bool {
    matches_at(bytes, at, b"</")
        && matches_at(bytes, at + 2, name.as_bytes())
        && bytes.get(at + 2 + name.len()) == Some(&b'>')
}

/// Whether the opening tag whose name ends at `name_end` and whose `>` is
/// at `open_end` closes itself. The `/` must directly follow the name or
/// whitespace: in `<a href=/x/>` it is the last character of a value.
pub(crate) fn self_closing(bytes: &[u8], name_end: usize, open_end: usize) -> bool {
    let Some(slash) = open_end.checked_sub(1).filter(|&slash| slash >= name_end) else {
        return false;
    };
    bytes.get(slash) == Some(&b'/')
        && (slash == name_end || bytes.get(slash - 1).is_some_and(u8::is_ascii_whitespace))
}

/// Number of `<name` openers in `text`.
pub(crate) fn count_openers(text: &str, name: &str) -> usize {
    let bytes = text.as_bytes();
    (0..bytes.len())
        .filter(|&at| opener_at(bytes, at, name))
        .count()
}

/// Number of `</name>` closers in `text`.
pub(crate) fn count_closers(text: &str, name: &str) -> usize {
    let bytes = text.as_bytes();
    (0..bytes.len())
        .filter(|&at| closer_at(bytes, at, name))
        .count()
}

/// Append one synthetic `</name>` per opener in `text` that has no closer,
/// so the text can be tokenized again on its own.
pub(crate) fn close_unmatched(text: &mut String, name: &str) {
    let unmatched = count_openers(text, name).saturating_sub(count_closers(text, name));
    for _ in 0..unmatched {
        text.push_str("</");
        text.push_str(name);
        text.push('>');
    }
}
