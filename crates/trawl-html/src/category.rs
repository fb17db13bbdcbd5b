use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// Tags with no closing counterpart. Their slice ends at the first `>`.
const VOID_TAGS: [&str; 13] = [
    "img", "meta", "link", "area", "base", "col", "embed", "hr", "input", "param", "source",
    "track", "wbr",
];

/// Tags whose own body is not data; only their children are extracted.
const WRAPPER_TAGS: [&str; 12] = [
    "html", "head", "body", "section", "ul", "ol", "header", "footer", "nav", "aside", "main",
    "article",
];

/// Tags that may legally contain further occurrences of themselves.
const NESTABLE_TAGS: [&str; 5] = ["div", "span", "p", "button", "li"];

/// How the tokenizer decides where a tag's slice ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TagCategory {
    /// Self-closing: the slice is the opening tag alone.
    Void,
    /// Structural container: the slice is the opening tag alone and the
    /// children are found as slices of their own.
    Wrapper,
    /// May contain itself; the outermost balanced close wins and inner
    /// occurrences are reported as well.
    Nestable,
    /// Everything else: the slice runs to the balanced close.
    Generic,
}

impl TagCategory {
    /// Classify a tag name. Case-insensitive and total: unknown names are
    /// [`TagCategory::Generic`].
    #[must_use]
    pub fn of(name: &str) -> Self {
        let listed = |table: &[&str]| table.iter().any(|tag| tag.eq_ignore_ascii_case(name));

        if listed(VOID_TAGS.as_slice()) {
            Self::Void
        } else if listed(WRAPPER_TAGS.as_slice()) {
            Self::Wrapper
        } else if listed(NESTABLE_TAGS.as_slice()) {
            Self::Nestable
        } else {
            Self::Generic
        }
    }

    /// Whether a slice of this category runs to a balanced closing tag.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Nestable | Self::Generic)
    }
}
