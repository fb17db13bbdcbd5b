use std::collections::{BTreeSet, HashSet};

use trawl_html::{Element, extract_elements};

use crate::parser::{AttributeMode, AttributePredicate, Selector};

impl AttributePredicate {
    /// Whether `element` satisfies this predicate. A missing attribute
    /// fails every mode.
    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        let Some(actual) = element.attribute(&self.name) else {
            return false;
        };
        let expected = self.expected.as_deref().unwrap_or_default();

        match self.mode {
            AttributeMode::Equals => actual == expected,
            AttributeMode::StartsWith => actual.starts_with(expected),
            AttributeMode::EndsWith => actual.ends_with(expected),
            AttributeMode::Contains => actual.contains(expected),
            AttributeMode::ListContains => actual.split_whitespace().any(|token| token == expected),
            AttributeMode::ExactOrPrefix => actual == expected || actual.starts_with(expected),
            AttributeMode::PresenceOnly => !actual.is_empty(),
        }
    }
}

impl Selector {
    /// Whether `element` satisfies this link of the chain. The `child` link
    /// is not consulted.
    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        self.tag_name
            .as_deref()
            .is_none_or(|tag| tag.eq_ignore_ascii_case(element.name()))
            && self.id.as_deref().is_none_or(|id| element.id() == Some(id))
            && classes_match(&self.class_list, &element.classes())
            && self
                .attribute
                .as_ref()
                .is_none_or(|predicate| predicate.matches(element))
    }
}

/// With as many wanted classes as the element has, the two sets must be
/// equal; otherwise one shared class is enough.
fn classes_match(wanted: &BTreeSet<String>, present: &HashSet<&str>) -> bool {
    if wanted.is_empty() {
        return true;
    }
    if wanted.len() == present.len() {
        wanted.iter().all(|class| present.contains(class.as_str()))
    } else {
        wanted.iter().any(|class| present.contains(class.as_str()))
    }
}

/// Filter `elements` against `selector`, preserving order.
///
/// For a `>` chain each surviving element is replaced by the matches of the
/// `child` selector among the elements extracted from its inner text, in
/// document order; a parent with none is dropped. There is no implicit
/// descendant search.
#[must_use]
pub fn query_elements(elements: &[Element], selector: &Selector) -> Vec<Element> {
    let matched = elements.iter().filter(|element| selector.matches(element));

    match &selector.child {
        None => matched.cloned().collect(),
        Some(child) => matched
            .flat_map(|parent| query_elements(&extract_elements(parent.inner_text()), child))
            .collect(),
    }
}
