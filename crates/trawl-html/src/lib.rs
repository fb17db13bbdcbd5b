//! HTML tag extraction for trawl.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tag classification** - the fixed Void / Wrapper / Nestable / Generic table
//! - **Tokenizer** - a single pass that carves balanced tag slices out of raw
//!   text, followed by a refinement pass that recovers same-name nested
//!   occurrences
//! - **Element builder** - turns one slice into a name, attribute list and
//!   inner text
//!
//! # Not Implemented
//!
//! - A DOM tree. Elements are flat and carry their inner markup as text.
//! - Character references, encoding sniffing, script/style modeling.

/// Tag-name categories.
pub mod category;
/// Structured elements built from raw slices.
pub mod element;
/// Extraction entry points composing tokenizer and builder.
pub mod extract;
/// Boundary-finding tokenizer.
pub mod tokenizer;

pub use category::TagCategory;
pub use element::{Attribute, Attributes, Element};
pub use extract::{ExtractMode, extract, extract_elements, extract_elements_deep};
pub use tokenizer::{RawSlice, SliceOrigin, Tokenizer, TokenizerOptions};
