/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Per-occurrence accessors referenced from derived [`FieldSpec`] tables.
//!
//! [`FieldSpec`]: crate::FieldSpec

use crate::{DecodeContext, Element, Error, Layout, Node, XmlName, XmlValue};

pub fn encode_required<T>(value: &T, name: XmlName, layout: Layout, out: &mut Vec<Node>)
where
    T: XmlValue,
{
    out.push(Node::Element(value.to_laid_out_element(name.into(), layout)));
}

/// Encodes a present value; an absent one produces no element at all.
pub fn encode_optional<T>(value: &Option<T>, name: XmlName, layout: Layout, out: &mut Vec<Node>)
where
    T: XmlValue,
{
    if let Some(value) = value {
        encode_required(value, name, layout, out);
    }
}

pub fn encode_repeated<T>(values: &[T], name: XmlName, layout: Layout, out: &mut Vec<Node>)
where
    T: XmlValue,
{
    for value in values {
        encode_required(value, name, layout, out);
    }
}

pub fn decode_required<T>(
    slot: &mut T,
    element: &Element,
    ctx: &mut DecodeContext,
) -> Result<(), Error>
where
    T: XmlValue,
{
    *slot = T::from_element(element, ctx)?;

    Ok(())
}

pub fn decode_optional<T>(
    slot: &mut Option<T>,
    element: &Element,
    ctx: &mut DecodeContext,
) -> Result<(), Error>
where
    T: XmlValue,
{
    *slot = Some(T::from_element(element, ctx)?);

    Ok(())
}

pub fn decode_repeated<T>(
    slot: &mut Vec<T>,
    element: &Element,
    ctx: &mut DecodeContext,
) -> Result<(), Error>
where
    T: XmlValue,
{
    slot.push(T::from_element(element, ctx)?);

    Ok(())
}
