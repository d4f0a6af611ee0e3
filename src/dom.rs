use scraper::node::Node;
use scraper::ElementRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An owned node in an HTML element tree.
///
/// Built by deep-copying a `scraper::ElementRef`, so mutations never alias
/// the source document. Children are kept in document order; `text` holds
/// the element's direct text content. Boolean attributes (`checked`,
/// `selected`, `disabled`, `multiple`) are represented by presence, with an
/// empty string value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub tag_name: String,
    pub attributes: HashMap<String, String>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    /// Deep-copy a parsed element and its subtree into an owned tree.
    pub fn from_element_ref(element: ElementRef<'_>) -> Self {
        let value = element.value();
        let mut attributes = HashMap::new();
        for (name, attr_value) in value.attrs() {
            attributes.insert(name.to_string(), attr_value.to_string());
        }

        let mut text = String::new();
        let mut children = Vec::new();
        for child in element.children() {
            match child.value() {
                Node::Text(fragment) => text.push_str(&fragment.text),
                Node::Element(_) => {
                    if let Some(child_ref) = ElementRef::wrap(child) {
                        children.push(Element::from_element_ref(child_ref));
                    }
                }
                _ => {}
            }
        }

        Self {
            tag_name: value.name().to_lowercase(),
            attributes,
            text,
            children,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// All descendant elements in document order (pre-order, excluding self).
    pub fn descendants(&self) -> Vec<&Element> {
        fn collect<'a>(node: &'a Element, out: &mut Vec<&'a Element>) {
            for child in &node.children {
                out.push(child);
                collect(child, out);
            }
        }
        let mut out = Vec::new();
        collect(self, &mut out);
        out
    }

    /// Visit every descendant mutably, in document order.
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        for child in &mut self.children {
            f(child);
            child.walk_mut(f);
        }
    }

    /// First descendant matching the predicate, in document order.
    pub fn find_descendant(&self, pred: &impl Fn(&Element) -> bool) -> Option<&Element> {
        for child in &self.children {
            if pred(child) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(pred) {
                return Some(found);
            }
        }
        None
    }

    /// Mutable access to the first descendant matching the predicate.
    pub fn find_descendant_mut(
        &mut self,
        pred: &impl Fn(&Element) -> bool,
    ) -> Option<&mut Element> {
        for child in &mut self.children {
            if pred(child) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant_mut(pred) {
                return Some(found);
            }
        }
        None
    }
}
