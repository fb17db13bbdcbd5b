//! Tag boundary tokenizer.
//!
//! The tokenizer never builds a tree. It walks the raw text once, cutting
//! one [`RawSlice`] per logical element occurrence: void and wrapper tags end
//! at their first `>`, everything else runs until the openers and closers of
//! its own name balance. A second pass splits nestable slices that contain
//! themselves so every nested occurrence is reported too.

/// Byte-level scanning helpers shared with the element builder.
pub(crate) mod helpers;
/// Nested-occurrence refinement for nestable slices.
mod refine;
/// Tokenizer state and the main scan loop.
pub mod scanner;
/// Raw slice type produced by the tokenizer.
pub mod slice;

pub use scanner::{Tokenizer, TokenizerOptions};
pub use slice::{RawSlice, SliceOrigin};
