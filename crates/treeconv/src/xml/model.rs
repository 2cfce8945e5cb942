//! XML element tree model

use indexmap::IndexMap;

/// A parsed XML document
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub root: Element,
}

/// One node of an XML element tree
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Content>,
}

/// Child content of an element, in document order
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Element(Element),
    Text(String),
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Iterator over the element children only, skipping text nodes
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|content| match content {
            Content::Element(el) => Some(el),
            Content::Text(_) => None,
        })
    }

    /// True when the element has at least one element child
    pub fn has_child_elements(&self) -> bool {
        self.child_elements().next().is_some()
    }

    /// Concatenated text content, or `None` when the element holds no text
    pub fn text(&self) -> Option<String> {
        let mut text = String::new();
        let mut found = false;
        for content in &self.children {
            if let Content::Text(t) = content {
                text.push_str(t);
                found = true;
            }
        }
        found.then_some(text)
    }
}
