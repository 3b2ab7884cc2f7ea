use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::{self, Error};
use crate::xml;

/// An element of a grammar document, before it is given any meaning.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct Node {
    pub name: String,
    pub attrs: BTreeMap<String, String>,
    pub value: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(name: &str) -> Self {
        Node {
            name: name.to_owned(),
            ..Node::default()
        }
    }

    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attrs.insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_owned());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Literal text carried by the element, if any.
    pub fn text(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

impl FromStr for Node {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_, root) = xml::document(s).map_err(|e| error::from_nom(s, e))?;
        Ok(root)
    }
}
