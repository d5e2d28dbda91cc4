use std::collections::HashMap;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DOMElement {
    pub name: String,
    pub attributes: DOMAttributes,
    pub contents: Vec<DOMContent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DOMContent {
    Element(DOMElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DOMAttributes(pub HashMap<String, String>);

impl DOMAttributes {
    pub fn empty() -> Self {
        Self(HashMap::new())
    }
}

/// Builds a [`DOMAttributes`] from `key => value` pairs, e.g. `attributes!("lang" => "en")`
#[macro_export]
macro_rules! attributes {
    ($($k:literal => $v:literal),* $(,)?) => {
        $crate::DOMAttributes(::std::collections::HashMap::from([
            $(($k.to_string(), $v.to_string())),*
        ]))
    };
}

impl DOMElement {
    pub fn new(name: impl Display, attributes: Option<DOMAttributes>, contents: Vec<DOMContent>) -> Self {
        Self {
            name: name.to_string(),
            attributes: attributes.unwrap_or_default(),
            contents,
        }
    }
}

impl From<DOMElement> for DOMContent {
    fn from(elt: DOMElement) -> Self {
        DOMContent::Element(elt)
    }
}

impl From<&str> for DOMContent {
    fn from(s: &str) -> Self {
        DOMContent::Text(s.to_string())
    }
}

impl From<String> for DOMContent {
    fn from(s: String) -> Self {
        DOMContent::Text(s)
    }
}

/// A parsed page. The root is a synthetic `#document` element holding the
/// top-level nodes of the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: DOMElement,
}

impl Document {
    pub const ROOT_NAME: &'static str = "#document";

    pub fn from_contents(contents: Vec<DOMContent>) -> Self {
        Self {
            root: DOMElement::new(Self::ROOT_NAME, None, contents),
        }
    }

    pub fn root(&self) -> &DOMElement {
        &self.root
    }

    /// The `html` element, if the markup declared one
    pub fn document_element(&self) -> Option<&DOMElement> {
        self.root.children().find(|e| e.name == "html")
    }
}

mod builder;
mod entities;
mod parsing;
mod query;
mod select;
#[cfg(test)]
mod tests;

pub use builder::document;
pub use query::Descendants;
pub use select::{Combinator, Selector, SelectorError, SimpleSelector};
