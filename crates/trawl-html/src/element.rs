use std::collections::HashSet;

use serde::{Serialize, Serializer};

use crate::category::TagCategory;
use crate::tokenizer::helpers::{close_unmatched, find_byte, is_word_byte, word_run};

/// A single `name="value"` pair from an opening tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name as written.
    pub name: String,
    /// Trimmed value; empty for bare attributes such as `disabled`.
    pub value: String,
}

/// Attribute list in source order. Lookups are ASCII case-insensitive; a
/// repeated name keeps its first position and its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<Attribute>);

impl Attributes {
    /// Value of the attribute called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
            .map(|attr| attr.value.as_str())
    }

    /// Whether an attribute called `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set `name` to `value`, keeping the original position when it exists.
    pub fn insert(&mut self, name: &str, value: &str) {
        match self.0.iter_mut().find(|attr| attr.name.eq_ignore_ascii_case(name)) {
            Some(existing) => existing.value = value.to_string(),
            None => self.0.push(Attribute {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Attributes in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.0.iter()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|attr| (&attr.name, &attr.value)))
    }
}

/// Structured result of one tag occurrence.
///
/// Immutable once built. `inner_text` is raw markup: it may contain further
/// tags and can be fed back into the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    name: String,
    attributes: Attributes,
    inner_text: String,
}

impl Element {
    /// Build an element from a raw slice.
    ///
    /// - name: the run of word characters after the first `<`
    /// - attributes: pairs scanned from the opening tag
    /// - inner text: everything between the first `>` and the last `</`,
    ///   with one synthetic `</name>` appended per unmatched `<name` opener
    ///
    /// Never fails on malformed input; returns `None` only when there is no
    /// tag name to speak of.
    #[must_use]
    pub fn from_slice(slice: &str) -> Option<Self> {
        let lt = find_byte(slice.as_bytes(), b'<', 0)?;
        let name = word_run(slice, lt + 1);
        if name.is_empty() {
            return None;
        }

        let open_end = find_byte(slice.as_bytes(), b'>', lt);
        let head_end = open_end.unwrap_or(slice.len());
        let void = TagCategory::of(name) == TagCategory::Void;
        let attributes = parse_attributes(&slice[lt + 1 + name.len()..head_end], void);

        let mut inner_text = match (open_end, slice.rfind("</")) {
            (Some(gt), Some(close)) if close > gt => slice[gt + 1..close].to_string(),
            _ => String::new(),
        };
        close_unmatched(&mut inner_text, name);

        Some(Self {
            name: name.to_string(),
            attributes,
            inner_text,
        })
    }

    /// Create an element directly.
    #[must_use]
    pub fn new(name: &str, attributes: Attributes, inner_text: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes,
            inner_text: inner_text.to_string(),
        }
    }

    /// Tag name as written.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All attributes.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Value of one attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// Markup between the opening tag and the last closing tag.
    #[must_use]
    pub fn inner_text(&self) -> &str {
        &self.inner_text
    }

    /// The `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attributes.get("id")
    }

    /// Whitespace-separated tokens of the `class` attribute.
    #[must_use]
    pub fn classes(&self) -> HashSet<&str> {
        self.attributes
            .get("class")
            .map(|classes| classes.split_whitespace().collect())
            .unwrap_or_default()
    }
}

/// Attribute names: word characters plus `-`, `:` and `.`, so `data-id`
/// and `xml:lang` stay whole.
const fn is_attr_name_byte(b: u8) -> bool {
    is_word_byte(b) || matches!(b, b'-' | b':' | b'.')
}

/// Scan an opening tag's attribute area (after the name, before `>`).
///
/// Accepts `name="value"`, `name='value'`, `name=value` and bare `name`.
/// Anything else is skipped one character at a time. For void tags a `/`
/// ending the head closes the tag rather than the last unquoted value.
fn parse_attributes(head: &str, void: bool) -> Attributes {
    let bytes = head.as_bytes();
    let mut attributes = Attributes::default();
    let mut pos = 0;

    let skip_whitespace = |mut pos: usize| {
        while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
            pos += 1;
        }
        pos
    };

    while pos < bytes.len() {
        let name_len = bytes[pos..]
            .iter()
            .take_while(|&&b| is_attr_name_byte(b))
            .count();
        if name_len == 0 {
            pos += head[pos..].chars().next().map_or(1, char::len_utf8);
            continue;
        }
        let name = &head[pos..pos + name_len];
        pos = skip_whitespace(pos + name_len);

        if bytes.get(pos) != Some(&b'=') {
            attributes.insert(name, "");
            continue;
        }
        pos = skip_whitespace(pos + 1);

        let value = match bytes.get(pos) {
            Some(&quote @ (b'"' | b'\'')) => {
                let end = find_byte(bytes, quote, pos + 1).unwrap_or(bytes.len());
                let value = &head[pos + 1..end];
                pos = end + 1;
                value
            }
            _ => {
                let len = bytes[pos..]
                    .iter()
                    .take_while(|b| !b.is_ascii_whitespace())
                    .count();
                let mut value = &head[pos..pos + len];
                pos += len;
                if void && pos == bytes.len() {
                    value = value.strip_suffix('/').unwrap_or(value);
                }
                value
            }
        };
        attributes.insert(name, value.trim());
    }

    attributes
}
