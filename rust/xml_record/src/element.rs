/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! An owned, namespace-resolved XML element tree.

use std::fmt;

use crate::{CodecOptions, Error, XmlName};

/// A namespace-resolved XML name.
///
/// Prefixes are a property of a particular serialization and are not kept.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    /// The namespace name (usually a URI), or `None` for names in no namespace.
    pub namespace: Option<String>,
    pub local_name: String,
}

impl QualifiedName {
    pub fn new(namespace: Option<&str>, local_name: impl Into<String>) -> Self {
        Self {
            // An empty namespace name is the XML spelling of "no namespace".
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_owned),
            local_name: local_name.into(),
        }
    }

    /// Creates a name in no namespace.
    pub fn local(local_name: impl Into<String>) -> Self {
        Self::new(None, local_name)
    }
}

impl From<XmlName> for QualifiedName {
    fn from(value: XmlName) -> Self {
        Self::new(value.namespace, value.local_name)
    }
}

impl fmt::Display for QualifiedName {
    /// Formats the name in Clark notation, i.e. `{namespace}local`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{{{namespace}}}{}", self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}

/// An attribute of an element. Namespace declarations are not attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: QualifiedName,
    pub value: String,
}

/// A content node of an element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with its attributes and content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub name: QualifiedName,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(
        mut self,
        name: impl Into<QualifiedName>,
        value: impl Into<String>,
    ) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            value: value.into(),
        });

        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));

        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(&text.into());

        self
    }

    /// Appends text, merging with a trailing text node if there is one.
    pub(crate) fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        match self.children.last_mut() {
            Some(Node::Text(existing)) => existing.push_str(text),
            _ => self.children.push(Node::Text(text.to_owned())),
        }
    }

    /// Iterates over the child elements, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Finds the first child element with the given name.
    pub fn find_child(&self, name: &QualifiedName) -> Option<&Element> {
        self.child_elements().find(|child| &child.name == name)
    }

    /// The concatenation of this element's direct text content.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    pub fn attribute(&self, name: &QualifiedName) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| &attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    /// Parses a complete XML document into its root element.
    ///
    /// Any failure to parse is reported as an error of kind
    /// [`MalformedInput`](crate::ErrorKind::MalformedInput).
    pub fn parse(input: &[u8]) -> Result<Self, Error> {
        crate::parse::parse_document(input)
    }

    /// Serializes this element as a complete XML document.
    ///
    /// The tree is written exactly, whitespace included. Text which XML 1.0
    /// cannot represent is an error.
    pub fn to_xml_document(&self, options: &CodecOptions) -> Result<Vec<u8>, Error> {
        crate::write::write_document(self, options)
    }
}
