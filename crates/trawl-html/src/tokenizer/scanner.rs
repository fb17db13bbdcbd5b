use std::ops::Range;

use crate::category::TagCategory;

use super::helpers::{closer_at, find_byte, find_str, opener_at, self_closing, word_run};
use super::refine::split_nested;
use super::slice::{RawSlice, SliceOrigin};

/// Knobs for a tokenizer run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Treat wrapper tags (`body`, `ul`, ...) like generic ones: their slice
    /// runs to the balanced close and their children are not reported
    /// separately. Off by default.
    pub capture_wrapper_bodies: bool,
}

/// Single-document tag boundary scanner.
///
/// All scan state lives in the value itself, so every run works on a fresh
/// buffer and separate documents can be tokenized independently (including
/// on separate threads).
///
/// ```
/// use trawl_html::Tokenizer;
///
/// let mut tokenizer = Tokenizer::new("<body><p>x</p></body>");
/// tokenizer.run();
/// let slices = tokenizer.into_slices();
/// assert_eq!(slices[0].text, "<body>");
/// assert_eq!(slices[1].text, "<p>x</p>");
/// ```
pub struct Tokenizer {
    /// Input with line feeds removed.
    input: String,
    options: TokenizerOptions,
    /// Next unconsumed byte.
    current_pos: usize,
    /// Scanning never looks at or past this byte.
    limit: usize,
    slices: Vec<RawSlice>,
    /// Inner span of each slice that closed on a balanced closer, by slice
    /// index.
    bodies: Vec<Option<Range<usize>>>,
}

impl Tokenizer {
    /// Create a tokenizer over `input` with default options.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self::with_options(input, TokenizerOptions::default())
    }

    /// Create a tokenizer over `input`.
    ///
    /// Line feeds are stripped up front; no other whitespace is touched.
    #[must_use]
    pub fn with_options(input: &str, options: TokenizerOptions) -> Self {
        let input = input.replace('\n', "");
        Self {
            limit: input.len(),
            input,
            options,
            current_pos: 0,
            slices: Vec::new(),
            bodies: Vec::new(),
        }
    }

    /// Scan the whole input.
    pub fn run(&mut self) {
        while let Some(start) = find_byte(self.window(), b'<', self.current_pos) {
            self.current_pos = self.scan_tag(start);
        }
        self.current_pos = self.limit;
    }

    /// Slices found so far, in document order.
    #[must_use]
    pub fn slices(&self) -> &[RawSlice] {
        &self.slices
    }

    /// Consume the tokenizer, returning its slices.
    #[must_use]
    pub fn into_slices(self) -> Vec<RawSlice> {
        self.slices
    }

    /// Scan only `range` of the line-feed-stripped input, taking the slices
    /// found there. Each comes with the inner span of its body when it
    /// closed on a balanced closer; spans index the same input, so they can
    /// be scanned in turn without copying.
    pub(crate) fn scan_range(
        &mut self,
        range: Range<usize>,
    ) -> Vec<(RawSlice, Option<Range<usize>>)> {
        self.current_pos = range.start;
        self.limit = range.end.min(self.input.len());
        self.run();
        let bodies = std::mem::take(&mut self.bodies);
        std::mem::take(&mut self.slices).into_iter().zip(bodies).collect()
    }

    /// Length of the line-feed-stripped input.
    #[must_use]
    pub(crate) fn input_len(&self) -> usize {
        self.input.len()
    }

    /// The part of the input this run may look at.
    fn window(&self) -> &[u8] {
        &self.input.as_bytes()[..self.limit]
    }

    /// Handle the `<` at `start`. Returns the position to resume from.
    fn scan_tag(&mut self, start: usize) -> usize {
        let text = &self.input[..self.limit];
        let bytes = text.as_bytes();

        match bytes.get(start + 1) {
            // Comments and declarations: `<!-- ... -->`, `<!DOCTYPE ...>`.
            Some(b'!') => {
                if text[start..].starts_with("<!--") {
                    return find_str(text, "-->", start + 4).map_or(self.limit, |end| end + 3);
                }
                return self.skip_past_close(start);
            }
            // Processing instructions and stray closing tags.
            Some(b'?' | b'/') => return self.skip_past_close(start),
            _ => {}
        }

        let name = word_run(text, start + 1);
        if name.is_empty() {
            // A bare `<` in text.
            return start + 1;
        }
        if name.eq_ignore_ascii_case("br") {
            return self.skip_past_close(start);
        }

        let Some(open_end) = find_byte(bytes, b'>', start) else {
            // Unterminated opening tag: nothing after it can be a tag.
            return self.limit;
        };

        let category = TagCategory::of(name);
        let ends_at_open = self_closing(bytes, start + 1 + name.len(), open_end)
            || match category {
                TagCategory::Void => true,
                TagCategory::Wrapper => !self.options.capture_wrapper_bodies,
                TagCategory::Nestable | TagCategory::Generic => false,
            };

        if ends_at_open {
            self.emit(start, open_end, SliceOrigin::Scanned, None);
            return open_end + 1;
        }

        match self.find_balanced_close(open_end, name) {
            Some(end) => {
                // `</name>` is the last `name.len() + 3` bytes of the slice.
                let body = open_end + 1..end - name.len() - 2;
                if category == TagCategory::Nestable {
                    self.emit_nestable(start, end, body);
                } else {
                    self.emit(start, end, SliceOrigin::Scanned, Some(body));
                }
                end + 1
            }
            // Never balances: drop this occurrence and keep scanning inside it.
            None => open_end + 1,
        }
    }

    /// Find the `>` of the closer that brings `name` back to depth zero.
    ///
    /// Depth starts at one for the opener that ends at `open_end` and moves
    /// with every `<name` / `</name>` after it, so same-name nesting resolves
    /// to the outermost close.
    fn find_balanced_close(&self, open_end: usize, name: &str) -> Option<usize> {
        let bytes = self.window();
        let mut depth = 1usize;
        let mut pos = open_end + 1;

        while let Some(at) = find_byte(bytes, b'<', pos) {
            if closer_at(bytes, at, name) {
                depth -= 1;
                let close_end = at + 2 + name.len();
                if depth == 0 {
                    return Some(close_end);
                }
                pos = close_end + 1;
            } else {
                if opener_at(bytes, at, name) {
                    depth += 1;
                }
                pos = at + 1;
            }
        }

        None
    }

    /// Skip to just past the next `>` after `start`.
    fn skip_past_close(&self, start: usize) -> usize {
        find_byte(self.window(), b'>', start).map_or(self.limit, |end| end + 1)
    }

    /// Record `input[start..=end]` as a slice.
    fn emit(&mut self, start: usize, end: usize, origin: SliceOrigin, body: Option<Range<usize>>) {
        let text = &self.input[start..=end];
        let name = word_run(text, 1);
        self.slices.push(RawSlice::new(text.to_string(), name, origin));
        self.bodies.push(body);
    }

    /// Record a nestable slice, followed by its nested occurrences when it
    /// contains itself.
    fn emit_nestable(&mut self, start: usize, end: usize, body: Range<usize>) {
        let fragments = split_nested(&self.input[start..=end]);
        if fragments.is_empty() {
            self.emit(start, end, SliceOrigin::Scanned, Some(body));
        } else {
            self.emit(start, end, SliceOrigin::Refined, None);
            self.bodies.extend(fragments.iter().map(|_| None));
            self.slices.extend(fragments);
        }
    }
}
