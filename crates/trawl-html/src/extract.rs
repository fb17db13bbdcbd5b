use strum_macros::{Display, EnumString};

use crate::element::Element;
use crate::tokenizer::{SliceOrigin, Tokenizer};

/// Elements whose body is not markup. Deep extraction never looks inside.
const RAW_TEXT_TAGS: [&str; 3] = ["script", "style", "textarea"];

/// How far extraction looks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ExtractMode {
    /// One element per tokenizer slice.
    #[default]
    Shallow,
    /// Shallow extraction, plus every element hidden inside a scanned
    /// element's inner text, in pre-order.
    Deep,
}

/// Extract every element of `html` in document order.
///
/// Runs a fresh [`Tokenizer`] and builds one [`Element`] per slice. Both
/// the outer and the nested occurrences of self-nesting tags are reported.
///
/// ```
/// let elements = trawl_html::extract_elements("<div>A<div>B</div>C</div>");
/// assert_eq!(elements.len(), 2);
/// assert_eq!(elements[0].inner_text(), "A<div>B</div>C");
/// assert_eq!(elements[1].inner_text(), "B");
/// ```
#[must_use]
pub fn extract_elements(html: &str) -> Vec<Element> {
    let mut tokenizer = Tokenizer::new(html);
    tokenizer.run();
    tokenizer
        .into_slices()
        .iter()
        .filter_map(|slice| Element::from_slice(&slice.text))
        .collect()
}

/// Extract elements including those nested inside other elements.
///
/// After each scanned generic or nestable element whose inner text holds
/// markup, the deep extraction of that inner text follows. Elements already
/// split by the nested refinement pass, and raw-text elements such as
/// `script`, are not descended into.
///
/// Nesting depth is bounded only by the input: inner text is scanned in
/// place from an explicit stack of pending levels.
#[must_use]
pub fn extract_elements_deep(html: &str) -> Vec<Element> {
    let mut tokenizer = Tokenizer::new(html);
    let whole = 0..tokenizer.input_len();
    let mut levels = vec![tokenizer.scan_range(whole).into_iter()];
    let mut elements = Vec::new();

    while let Some(level) = levels.last_mut() {
        let Some((slice, body)) = level.next() else {
            let _ = levels.pop();
            continue;
        };
        let Some(element) = Element::from_slice(&slice.text) else {
            continue;
        };

        let descend = slice.origin == SliceOrigin::Scanned
            && !RAW_TEXT_TAGS
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(&slice.name))
            && element.inner_text().contains('<');
        elements.push(element);

        if let Some(body) = body.filter(|_| descend) {
            levels.push(tokenizer.scan_range(body).into_iter());
        }
    }

    elements
}

/// Extract with an explicit [`ExtractMode`].
#[must_use]
pub fn extract(html: &str, mode: ExtractMode) -> Vec<Element> {
    match mode {
        ExtractMode::Shallow => extract_elements(html),
        ExtractMode::Deep => extract_elements_deep(html),
    }
}
