//! Reducing matched elements to plain values.

use trawl_html::Element;

/// Key that selects an element's inner text instead of an attribute.
pub const VALUE_KEYWORD: &str = "value";

/// What to read from each element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// The element's inner text.
    InnerText,
    /// The value of the named attribute.
    Attribute(String),
}

impl Projection {
    /// Interpret a projection key. [`VALUE_KEYWORD`] means inner text;
    /// anything else names an attribute.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        if key == VALUE_KEYWORD {
            Self::InnerText
        } else {
            Self::Attribute(key.to_string())
        }
    }

    /// Read this projection from `element`.
    #[must_use]
    pub fn apply(&self, element: &Element) -> Option<String> {
        match self {
            Self::InnerText => Some(element.inner_text().to_string()),
            Self::Attribute(name) => element.attribute(name).map(str::to_string),
        }
    }
}

/// Project every element through `key`, keeping one entry per element.
/// Elements without the attribute give `None`.
///
/// ```
/// use trawl_query::project_attribute;
///
/// let elements = trawl_html::extract_elements("<a href=\"/a\">A</a><a>B</a>");
/// assert_eq!(project_attribute(&elements, "href"), [Some("/a".to_string()), None]);
/// assert_eq!(
///     project_attribute(&elements, "value"),
///     [Some("A".to_string()), Some("B".to_string())]
/// );
/// ```
#[must_use]
pub fn project_attribute(elements: &[Element], key: &str) -> Vec<Option<String>> {
    let projection = Projection::from_key(key);
    elements.iter().map(|element| projection.apply(element)).collect()
}
