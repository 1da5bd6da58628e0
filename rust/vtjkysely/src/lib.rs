/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Typed records for the body of the VTJ person identity query
//! (`HenkiloTunnusKysely`) web service.
//!
//! The records bind to XML through [`xml_record`]; use a
//! [`StructuredRecordCodec`] to encode or decode them. Transport and envelope
//! handling are left to the caller.

pub mod types;

#[cfg(test)]
mod test_utils;

pub use types::*;

pub use xml_record::{
    CodecOptions, DecodeMode, Decoded, Element, Error, ErrorKind, QualifiedName,
    StructuredRecordCodec,
};

/// The namespace of the query service's request and response bodies.
pub const VTJKYSELY_NS_URI: &str = "http://xml.vrk.fi/ws/vtj/vtjkysely/1";

/// The namespace of the registry's response message schema.
pub const VTJ_SCHEMA_NS_URI: &str = "http://xml.vrk.fi/schema/vtjkysely";
