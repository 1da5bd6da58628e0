/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! The generic, table-driven encode and decode routines shared by every
//! [`XmlRecord`].

use crate::{
    DecodeContext, Element, Error, Mismatch, Node, QualifiedName, XmlName, XmlRecord,
    XSI_NS_URI,
};

/// How many times a field's element may occur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occurs {
    /// Exactly once.
    Required,

    /// Zero or one times (`minOccurs="0"`).
    Optional,

    /// Any number of times, consecutively (`maxOccurs="unbounded"`).
    Repeated,
}

/// How record content is laid out when encoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layout {
    /// Child elements follow one another without whitespace.
    #[default]
    Compact,

    /// Each child element of a record starts on its own line. A record at
    /// nesting level `depth` indents its children by `width * (depth + 1)`
    /// spaces.
    Indented { width: usize, depth: usize },
}

impl Layout {
    /// Lays out records with the given indentation width, if any.
    pub fn indented(width: Option<usize>) -> Self {
        match width {
            Some(width) => Self::Indented { width, depth: 0 },
            None => Self::Compact,
        }
    }

    /// The layout of content one level further down.
    pub fn nested(self) -> Self {
        match self {
            Self::Compact => Self::Compact,
            Self::Indented { width, depth } => Self::Indented {
                width,
                depth: depth + 1,
            },
        }
    }

    /// The whitespace preceding a line at this level.
    fn line_break(self) -> Option<String> {
        match self {
            Self::Compact => None,
            Self::Indented { width, depth } => Some(format!("\n{}", " ".repeat(width * depth))),
        }
    }
}

/// Static metadata describing one field of a record type.
///
/// A field's position in [`XmlRecord::FIELDS`] is its position in the wire
/// sequence.
pub struct FieldSpec<R> {
    /// The name of the element representing the field.
    pub name: XmlName,

    pub occurs: Occurs,

    /// Appends the elements representing the field's value, if any.
    pub encode: fn(&R, XmlName, Layout, &mut Vec<Node>),

    /// Stores the value represented by one matching element into the field.
    pub decode: fn(&mut R, &Element, &mut DecodeContext) -> Result<(), Error>,
}

/// Represents a record as an element whose children follow the declared field
/// order, omitting absent fields.
pub fn encode_record<R>(record: &R, name: QualifiedName) -> Element
where
    R: XmlRecord,
{
    encode_record_with_layout(record, name, Layout::Compact)
}

/// Represents a record as [`encode_record`] does, with whitespace between its
/// child elements as the layout requires.
///
/// The whitespace is ignored when the record is decoded, so the layout never
/// affects the decoded value.
pub fn encode_record_with_layout<R>(record: &R, name: QualifiedName, layout: Layout) -> Element
where
    R: XmlRecord,
{
    let mut children = Vec::new();
    for field in R::FIELDS {
        (field.encode)(record, field.name, layout.nested(), &mut children);
    }

    let mut element = Element::new(name);

    match (layout.nested().line_break(), layout.line_break()) {
        (Some(child_line), Some(closing_line)) if !children.is_empty() => {
            for child in children {
                element.children.push(Node::Text(child_line.clone()));
                element.children.push(child);
            }
            element.children.push(Node::Text(closing_line));
        }
        _ => element.children = children,
    }

    element
}

/// Reconstructs a record from its element.
///
/// Each child element is matched to a declared field by name; fields without a
/// matching child are left in their default (absent) state.
pub fn decode_record<R>(element: &Element, ctx: &mut DecodeContext) -> Result<R, Error>
where
    R: XmlRecord,
{
    log::debug!("decoding `{}` as {}", element.name, R::TYPE_NAME);

    let fields = R::FIELDS;
    let mut record = R::default();

    check_attributes(element, ctx)?;

    let mut occurrences = vec![0usize; fields.len()];

    // The index of the furthest field seen so far, for sequence checking.
    let mut furthest = 0;

    for node in &element.children {
        let child = match node {
            Node::Element(child) => child,
            Node::Text(text) if text.trim().is_empty() => continue,
            Node::Text(text) => {
                ctx.report(Mismatch::UnexpectedText(text.clone()))?;
                continue;
            }
        };

        let Some(index) = match_field(fields, child, ctx)? else {
            continue;
        };
        let field = &fields[index];

        if index < furthest {
            ctx.report(Mismatch::OutOfOrder(child.name.clone()))?;
        }
        furthest = furthest.max(index);

        if occurrences[index] > 0 && field.occurs != Occurs::Repeated {
            // Keep the first occurrence rather than silently replacing it.
            ctx.report(Mismatch::Duplicate(child.name.clone()))?;
            continue;
        }
        occurrences[index] += 1;

        ctx.enter(field.name.local_name);
        (field.decode)(&mut record, child, ctx)?;
        ctx.leave();
    }

    for (field, seen) in fields.iter().zip(&occurrences) {
        if field.occurs == Occurs::Required && *seen == 0 {
            ctx.report(Mismatch::MissingElement(field.name.into()))?;
        }
    }

    Ok(record)
}

/// Finds the declared field a child element represents.
///
/// An element whose local name matches a field in another namespace is
/// reported, then accepted if the decode is lenient.
fn match_field<R>(
    fields: &[FieldSpec<R>],
    child: &Element,
    ctx: &mut DecodeContext,
) -> Result<Option<usize>, Error> {
    if let Some(index) = fields.iter().position(|field| field.name.matches(&child.name)) {
        return Ok(Some(index));
    }

    let by_local_name = fields
        .iter()
        .position(|field| field.name.local_name == child.name.local_name);

    match by_local_name {
        Some(index) => {
            ctx.report(Mismatch::NamespaceMismatch {
                expected: fields[index].name.into(),
                found: child.name.clone(),
            })?;

            Ok(Some(index))
        }
        None => {
            ctx.report(Mismatch::UnexpectedElement(child.name.clone()))?;

            Ok(None)
        }
    }
}

/// Reports attributes on an element whose type declares none.
///
/// Schema instance attributes (`xsi:type` and friends) are always permitted.
pub(crate) fn check_attributes(element: &Element, ctx: &mut DecodeContext) -> Result<(), Error> {
    for attribute in &element.attributes {
        if attribute.name.namespace.as_deref() == Some(XSI_NS_URI) {
            continue;
        }

        ctx.report(Mismatch::UnexpectedAttribute(attribute.name.clone()))?;
    }

    Ok(())
}

/// Reads the text content of a simple-typed element.
///
/// Child elements are not part of a simple value and are reported.
pub(crate) fn simple_content(element: &Element, ctx: &mut DecodeContext) -> Result<String, Error> {
    check_attributes(element, ctx)?;

    let mut text = String::new();
    for node in &element.children {
        match node {
            Node::Text(content) => text.push_str(content),
            Node::Element(child) => ctx.report(Mismatch::UnexpectedElement(child.name.clone()))?,
        }
    }

    Ok(text)
}
