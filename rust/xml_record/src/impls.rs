/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! This module provides implementations of binding for common types from the
//! standard library, and for opaque element content.

use crate::{record::simple_content, DecodeContext, Element, Error, QualifiedName, XmlValue};

/// Binds a string to an element with text content.
///
/// An empty string is an empty element, which is distinct from an absent one.
impl XmlValue for String {
    fn to_element(&self, name: QualifiedName) -> Element {
        Element::new(name).with_text(self.as_str())
    }

    fn from_element(element: &Element, ctx: &mut DecodeContext) -> Result<Self, Error> {
        simple_content(element, ctx)
    }
}

/// Binds a boolean to `xs:boolean` text, accepting both the literal and the
/// numeric forms when decoding.
impl XmlValue for bool {
    fn to_element(&self, name: QualifiedName) -> Element {
        Element::new(name).with_text(if *self { "true" } else { "false" })
    }

    fn from_element(element: &Element, ctx: &mut DecodeContext) -> Result<Self, Error> {
        let text = simple_content(element, ctx)?;

        match text.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(ctx.invalid_value(&text, "xs:boolean")),
        }
    }
}

/// Passes an element subtree through uninterpreted, for `xs:any` content or
/// types defined by schemas outside this crate's concern.
///
/// The field's own name replaces the element's name on encoding; attributes
/// and content are kept as they are.
impl XmlValue for Element {
    fn to_element(&self, name: QualifiedName) -> Element {
        Element {
            name,
            attributes: self.attributes.clone(),
            children: self.children.clone(),
        }
    }

    fn from_element(element: &Element, _ctx: &mut DecodeContext) -> Result<Self, Error> {
        Ok(element.clone())
    }
}

/// Implements binding of a type as an element with text content.
///
/// This is a convenience macro intended for primitive types whose `Display`
/// and `FromStr` forms coincide with their XML Schema lexical forms.
macro_rules! impl_as_text_for {
    ($( $ty:ty => $xsd:literal ),*) => {
        $(
        impl XmlValue for $ty {
            fn to_element(&self, name: QualifiedName) -> Element {
                Element::new(name).with_text(self.to_string())
            }

            fn from_element(element: &Element, ctx: &mut DecodeContext) -> Result<Self, Error> {
                let text = simple_content(element, ctx)?;

                // XML Schema permits whitespace around numeric values.
                text.trim()
                    .parse()
                    .map_err(|_| ctx.invalid_value(&text, $xsd))
            }
        })*
    };
}

impl_as_text_for!(
    i8 => "xs:byte",
    u8 => "xs:unsignedByte",
    i16 => "xs:short",
    u16 => "xs:unsignedShort",
    i32 => "xs:int",
    u32 => "xs:unsignedInt",
    i64 => "xs:long",
    u64 => "xs:unsignedLong"
);
