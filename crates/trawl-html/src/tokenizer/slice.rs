use serde::Serialize;
use strum_macros::Display;

use crate::category::TagCategory;

/// Where a slice came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SliceOrigin {
    /// Cut directly by the scan loop.
    Scanned,
    /// Cut by the scan loop, and its nested same-name occurrences were
    /// reported as [`SliceOrigin::Fragment`] slices right after it.
    Refined,
    /// Recovered from inside a refined slice, with synthetic closers added.
    Fragment,
}

/// Substring spanning exactly one logical element occurrence, from its
/// opening `<` to its matching `>` inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawSlice {
    /// The slice text.
    pub text: String,
    /// Tag name as written in the opening tag.
    pub name: String,
    /// Category of `name`.
    pub category: TagCategory,
    /// How the slice was produced.
    pub origin: SliceOrigin,
}

impl RawSlice {
    /// Create a slice, classifying `name`.
    #[must_use]
    pub fn new(text: String, name: &str, origin: SliceOrigin) -> Self {
        Self {
            text,
            name: name.to_string(),
            category: TagCategory::of(name),
            origin,
        }
    }
}
