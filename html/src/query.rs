use super::select::{Selector, SelectorError};
use super::{DOMContent, DOMElement, Document};

/// Pre-order iterator over every element below a node
pub struct Descendants<'a> {
    stack: Vec<&'a DOMElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a DOMElement;

    fn next(&mut self) -> Option<Self::Item> {
        let elt = self.stack.pop()?;
        self.stack.extend(elt.children().rev());
        Some(elt)
    }
}

impl DOMElement {
    pub fn children(&self) -> impl DoubleEndedIterator<Item = &DOMElement> {
        self.contents.iter().filter_map(|c| match c {
            DOMContent::Element(e) => Some(e),
            DOMContent::Text(_) => None,
        })
    }

    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children().rev().collect(),
        }
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.0.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.0.contains_key(name)
    }

    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id")
    }

    /// Check if the `class` attribute is present and contains the specified class
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attribute("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Concatenated text of this element and everything below it
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.push_text(&mut text);
        text
    }

    fn push_text(&self, out: &mut String) {
        for content in &self.contents {
            match content {
                DOMContent::Text(t) => out.push_str(t),
                DOMContent::Element(e) => e.push_text(out),
            }
        }
    }

    /// Elements with the given tag name, either direct children only or at any depth
    pub fn get_elements_by_name(&self, name: &str, recursive: bool) -> Vec<&DOMElement> {
        if recursive {
            self.descendants().filter(|e| e.name == name).collect()
        } else {
            self.children().filter(|e| e.name == name).collect()
        }
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&DOMElement> {
        self.descendants().find(|e| e.id() == Some(id))
    }

    /// Every element below this one matched by `selector`, in document order.
    /// Ancestors above `self` are not considered when matching.
    pub fn select(&self, selector: &Selector) -> Vec<&DOMElement> {
        let mut found = Vec::new();
        collect(self, &mut Vec::new(), selector, &mut found);
        found
    }

    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<&DOMElement>, SelectorError> {
        Ok(self.select(&selector.parse()?))
    }

    pub fn query_selector(&self, selector: &str) -> Result<Option<&DOMElement>, SelectorError> {
        Ok(self.select(&selector.parse()?).into_iter().next())
    }
}

fn collect<'a>(
    parent: &'a DOMElement,
    ancestors: &mut Vec<&'a DOMElement>,
    selector: &Selector,
    found: &mut Vec<&'a DOMElement>,
) {
    for child in parent.children() {
        if selector.matches(child, ancestors) {
            found.push(child);
        }
        ancestors.push(child);
        collect(child, ancestors, selector, found);
        ancestors.pop();
    }
}

impl Document {
    pub fn descendants(&self) -> Descendants<'_> {
        self.root().descendants()
    }

    pub fn get_elements_by_name(&self, name: &str) -> Vec<&DOMElement> {
        self.root().get_elements_by_name(name, true)
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&DOMElement> {
        self.root().get_element_by_id(id)
    }

    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<&DOMElement>, SelectorError> {
        self.root().query_selector_all(selector)
    }

    pub fn query_selector(&self, selector: &str) -> Result<Option<&DOMElement>, SelectorError> {
        self.root().query_selector(selector)
    }
}
