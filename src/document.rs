// Pre-order elements with lang, leading text and tail text.

use roxmltree::{Node, NodeType};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub lang: Option<String>,
    /// Text between the start tag and the first child element.
    pub text: Option<String>,
    /// Text between the end tag and the next sibling element.
    pub tail: Option<String>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Element {
            tag: tag.to_string(),
            lang: None,
            text: None,
            tail: None,
        }
    }

    pub fn lang(mut self, lang: &str) -> Self {
        self.lang = Some(lang.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn tail(mut self, tail: &str) -> Self {
        self.tail = Some(tail.to_string());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Parse an XML string. DTDs are allowed since patent full-text files
    /// usually start with a DOCTYPE declaration.
    pub fn parse(xml: &str) -> Result<Self> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let doc = roxmltree::Document::parse_with_options(xml, options)?;

        let elements = doc
            .root_element()
            .descendants()
            .filter(|node| node.is_element())
            .map(|node| Element {
                tag: node.tag_name().name().to_string(),
                lang: node.attribute("lang").map(str::to_string),
                text: leading_text(node),
                tail: tail_text(node),
            })
            .collect();

        Ok(Document { elements })
    }

    /// Build a document from elements already in pre-order.
    pub fn from_elements(elements: Vec<Element>) -> Self {
        Document { elements }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

fn leading_text(node: Node) -> Option<String> {
    collect_text(node.first_child())
}

fn tail_text(node: Node) -> Option<String> {
    collect_text(node.next_sibling())
}

/// Concatenate text nodes starting at `start` until the next element.
/// Comments and processing instructions are skipped so the text around them
/// joins up.
fn collect_text(start: Option<Node>) -> Option<String> {
    let mut text = String::new();
    let mut found = false;
    let mut current = start;

    while let Some(node) = current {
        match node.node_type() {
            NodeType::Element => break,
            NodeType::Text => {
                if let Some(chunk) = node.text() {
                    text.push_str(chunk);
                    found = true;
                }
            }
            _ => {}
        }
        current = node.next_sibling();
    }

    found.then_some(text)
}
