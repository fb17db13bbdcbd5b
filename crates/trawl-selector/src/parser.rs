//! Selector micro-language parser.
//!
//! ```text
//! selector  := simple (">" simple)*
//! simple    := (tag | "*")? qualifier*
//! qualifier := "#" ident | "." ident | "[" name (mode? "=" value)? "]"
//! mode      := "^" | "$" | "*" | "~" | "|"
//! ```
//!
//! Whitespace inside a simple selector is ignored, so `div .x` reads as
//! `div.x`. Attribute values may be bare or quoted with `"` or `'`.

use std::collections::BTreeSet;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use strum_macros::Display;
use trawl_common::{Error, Result};

const UNTERMINATED: &str = "unterminated `[`";

/// How an attribute predicate compares the attribute's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AttributeMode {
    /// `[name=value]`: exact equality.
    #[strum(serialize = "=")]
    Equals,
    /// `[name^=value]`: value is a prefix.
    #[strum(serialize = "^=")]
    StartsWith,
    /// `[name$=value]`: value is a suffix.
    #[strum(serialize = "$=")]
    EndsWith,
    /// `[name*=value]`: value is a substring.
    #[strum(serialize = "*=")]
    Contains,
    /// `[name~=value]`: value is one of the whitespace-separated tokens.
    #[strum(serialize = "~=")]
    ListContains,
    /// `[name|=value]`: equal, or starts with value.
    #[strum(serialize = "|=")]
    ExactOrPrefix,
    /// `[name]`: present with a non-empty value.
    #[strum(serialize = "")]
    PresenceOnly,
}

impl AttributeMode {
    /// Mode named by the character in front of `=`.
    const fn from_prefix(c: char) -> Option<Self> {
        match c {
            '^' => Some(Self::StartsWith),
            '$' => Some(Self::EndsWith),
            '*' => Some(Self::Contains),
            '~' => Some(Self::ListContains),
            '|' => Some(Self::ExactOrPrefix),
            _ => None,
        }
    }
}

/// The single `[...]` condition of a simple selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributePredicate {
    /// Attribute name; looked up case-insensitively.
    pub name: String,
    /// Value to compare against. `None` only for [`AttributeMode::PresenceOnly`].
    pub expected: Option<String>,
    /// Comparison to apply.
    pub mode: AttributeMode,
}

impl fmt::Display for AttributePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expected {
            Some(expected) => write!(f, "[{}{}{expected:?}]", self.name, self.mode),
            None => write!(f, "[{}]", self.name),
        }
    }
}

/// Parsed selector.
///
/// One simple selector plus an optional right-nested `child` for each `>`
/// in the source: `a > b > c` is `a { child: b { child: c } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    /// Required tag name; `None` (or `*` in the source) accepts any tag.
    pub tag_name: Option<String>,
    /// Required `id`. A repeated `#` keeps the last one.
    pub id: Option<String>,
    /// Classes from every `.` qualifier.
    pub class_list: BTreeSet<String>,
    /// Attribute condition. A repeated `[...]` keeps the last one.
    pub attribute: Option<AttributePredicate>,
    /// Selector applied to the inner text of each match.
    pub child: Option<Box<Selector>>,
}

impl Selector {
    /// Number of simple selectors in the `>` chain.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.child.as_ref().map_or(0, |child| child.depth())
    }

    fn has_qualifiers(&self) -> bool {
        self.id.is_some() || !self.class_list.is_empty() || self.attribute.is_some()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag_name {
            Some(tag) => f.write_str(tag)?,
            None if !self.has_qualifiers() => f.write_str("*")?,
            None => {}
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.class_list {
            write!(f, ".{class}")?;
        }
        if let Some(attribute) = &self.attribute {
            write!(f, "{attribute}")?;
        }
        if let Some(child) = &self.child {
            write!(f, " > {child}")?;
        }
        Ok(())
    }
}

/// Parse a selector string.
///
/// # Errors
///
/// Returns [`Error::InputContract`] with a `Bad selector: ...` message for
/// an empty selector, an empty link in a `>` chain, an invalid tag name, a
/// `#`/`.` with no identifier, an unterminated `[`, or a mode with no value.
pub fn parse_selector(raw: &str) -> Result<Selector> {
    if raw.trim().is_empty() {
        return Err(Error::bad_selector(raw, "empty selector"));
    }
    let links = split_chain(raw).map_err(|reason| Error::bad_selector(raw, &reason))?;

    let mut selector: Option<Selector> = None;
    for link in links.iter().rev() {
        let mut simple = parse_simple(link).map_err(|reason| Error::bad_selector(raw, &reason))?;
        simple.child = selector.map(Box::new);
        selector = Some(simple);
    }
    selector.ok_or_else(|| Error::bad_selector(raw, "empty selector"))
}

/// Split at every `>` outside `[...]` and quotes.
fn split_chain(raw: &str) -> Result<Vec<&str>, String> {
    let mut links = Vec::new();
    let mut start = 0;
    let mut in_brackets = false;
    let mut quote: Option<char> = None;

    for (at, c) in raw.char_indices() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' if in_brackets => quote = Some(c),
                '[' => in_brackets = true,
                ']' => in_brackets = false,
                '>' if !in_brackets => {
                    links.push(&raw[start..at]);
                    start = at + 1;
                }
                _ => {}
            },
        }
    }
    links.push(&raw[start..]);

    if links.iter().any(|link| link.trim().is_empty()) {
        return Err("empty link in `>` chain".to_string());
    }
    Ok(links)
}

fn parse_simple(link: &str) -> Result<Selector, String> {
    let mut selector = Selector::default();
    let mut chars = link.chars().peekable();

    skip_whitespace(&mut chars);
    match chars.peek() {
        Some('*') => {
            let _ = chars.next();
        }
        Some(c) if c.is_ascii_alphabetic() => {
            selector.tag_name = Some(take_while(&mut chars, is_ident_char));
        }
        Some(&c) if !matches!(c, '#' | '.' | '[') => {
            return Err(format!("invalid tag name starting at {c:?}"));
        }
        _ => {}
    }

    loop {
        skip_whitespace(&mut chars);
        let Some(c) = chars.next() else {
            break;
        };
        match c {
            '#' => selector.id = Some(qualifier_ident(&mut chars, c)?),
            '.' => {
                let _ = selector.class_list.insert(qualifier_ident(&mut chars, c)?);
            }
            '[' => selector.attribute = Some(parse_predicate(&mut chars)?),
            other => return Err(format!("unexpected character {other:?}")),
        }
    }

    Ok(selector)
}

/// Identifier after a `#` or `.` qualifier.
fn qualifier_ident(chars: &mut Peekable<Chars<'_>>, sigil: char) -> Result<String, String> {
    skip_whitespace(chars);
    let ident = take_while(chars, is_ident_char);
    if ident.is_empty() {
        return Err(format!("`{sigil}` without identifier"));
    }
    Ok(ident)
}

/// Everything after `[` up to and including the matching `]`.
fn parse_predicate(chars: &mut Peekable<Chars<'_>>) -> Result<AttributePredicate, String> {
    skip_whitespace(chars);
    let name = take_while(chars, is_attr_name_char);
    if name.is_empty() {
        return Err(match chars.peek() {
            None => UNTERMINATED.to_string(),
            Some(_) => "`[` without attribute name".to_string(),
        });
    }

    skip_whitespace(chars);
    let mode = match chars.next() {
        Some(']') => {
            return Ok(AttributePredicate {
                name,
                expected: None,
                mode: AttributeMode::PresenceOnly,
            });
        }
        Some('=') => AttributeMode::Equals,
        Some(c) => match (AttributeMode::from_prefix(c), chars.next()) {
            (_, None) => return Err(UNTERMINATED.to_string()),
            (Some(mode), Some('=')) => mode,
            _ => return Err(format!("unexpected character {c:?} in `[...]`")),
        },
        None => return Err(UNTERMINATED.to_string()),
    };

    skip_whitespace(chars);
    let expected = match chars.peek() {
        Some(&quote @ ('"' | '\'')) => {
            let _ = chars.next();
            let mut value = String::new();
            loop {
                match chars.next() {
                    Some(c) if c == quote => break,
                    Some(c) => value.push(c),
                    None => return Err(UNTERMINATED.to_string()),
                }
            }
            skip_whitespace(chars);
            value
        }
        _ => {
            let value = take_while(chars, |c| c != ']');
            let value = value.trim();
            if value.is_empty() {
                return Err(format!("`{mode}` without value"));
            }
            value.to_string()
        }
    };

    match chars.next() {
        Some(']') => Ok(AttributePredicate {
            name,
            expected: Some(expected),
            mode,
        }),
        Some(c) => Err(format!("unexpected character {c:?} in `[...]`")),
        None => Err(UNTERMINATED.to_string()),
    }
}

/// Tag, id and class characters: ASCII alphanumerics, `_`, `-`, and any
/// non-ASCII character that is not whitespace.
fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || (!c.is_ascii() && !c.is_whitespace())
}

const fn is_attr_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':' | '.')
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(char::is_ascii_whitespace).is_some() {}
}

fn take_while(chars: &mut Peekable<Chars<'_>>, keep: impl Fn(char) -> bool) -> String {
    let mut taken = String::new();
    while let Some(c) = chars.next_if(|&c| keep(c)) {
        taken.push(c);
    }
    taken
}
