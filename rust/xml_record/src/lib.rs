/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! This crate provides a mechanism for binding XML elements to strongly typed
//! Rust records and back, driven by static schema metadata.
//!
//! Each record type describes its wire shape with a table of [`FieldSpec`]s
//! (wire name, occurrence, and the accessors to read or write the field). A
//! single generic routine walks that table in both directions, so no record
//! carries hand-written marshalling code. The table is normally produced by
//! `#[derive(XmlRecord)]`.
//!
//! Decoding operates on an [`Element`] tree, which may be parsed from raw bytes
//! with [`Element::parse`]. Decoding is either strict, rejecting any content
//! not described by the schema, or lenient, skipping such content with a
//! logged warning. See [`DecodeMode`].
//!
//! # Usage
//!
//! ```
//! use xml_record::{CodecOptions, DecodeMode, StructuredRecordCodec, XmlRecord};
//!
//! #[derive(Clone, Debug, Default, PartialEq, XmlRecord)]
//! #[xml_record(namespace = "http://foo.example/", rename_all = "PascalCase")]
//! struct Foo {
//!     some_field: Option<String>,
//!     count: Option<u32>,
//! }
//!
//! let codec = StructuredRecordCodec::<Foo>::new(CodecOptions {
//!     mode: DecodeMode::Strict,
//!     write_declaration: false,
//!     indent: None,
//! });
//!
//! let foo = Foo {
//!     some_field: Some("foo".into()),
//!     count: None,
//! };
//!
//! let out = codec.encode_document(&foo).unwrap();
//! let out = std::str::from_utf8(&out).unwrap();
//!
//! assert_eq!(
//!     out,
//!     r#"<Foo xmlns="http://foo.example/"><SomeField>foo</SomeField></Foo>"#,
//! );
//!
//! assert_eq!(codec.decode_document(out.as_bytes()).unwrap(), foo);
//! ```

// Allows generated code, which names this crate by absolute path, to be used
// within the crate's own tests and doctests.
extern crate self as xml_record;

mod codec;
mod context;
mod element;
pub mod field;
mod impls;
mod options;
mod parse;
pub mod record;
mod write;

use std::fmt;

use thiserror::Error;

pub use codec::{Decoded, StructuredRecordCodec};
pub use context::{DecodeContext, Mismatch, Warning};
pub use element::{Attribute, Element, Node, QualifiedName};
pub use options::{CodecOptions, DecodeMode};
pub use record::{FieldSpec, Layout, Occurs};

pub use xml_record_derive::*;

/// The namespace of attributes such as `xsi:type` and `xsi:nil`.
pub const XSI_NS_URI: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// The namespace bound to the reserved `xml` prefix.
pub const XML_NS_URI: &str = "http://www.w3.org/XML/1998/namespace";

/// A value which can be represented as a single XML element.
///
/// Implementations exist for strings, booleans, integers, opaque [`Element`]s,
/// and any type deriving [`XmlRecord`].
pub trait XmlValue: Sized {
    /// Represents this value as an element with the given name.
    fn to_element(&self, name: QualifiedName) -> Element;

    /// Represents this value as an element laid out for a document.
    ///
    /// Only record content is insensitive to whitespace between elements, so
    /// every other value ignores the layout.
    fn to_laid_out_element(&self, name: QualifiedName, _layout: Layout) -> Element {
        self.to_element(name)
    }

    /// Reconstructs a value from the element representing it.
    ///
    /// The element's own name is not checked; the caller has already matched
    /// it against the schema.
    fn from_element(element: &Element, ctx: &mut DecodeContext) -> Result<Self, Error>;
}

/// A record type with a fixed, schema-declared sequence of child elements.
pub trait XmlRecord: XmlValue + Default + 'static {
    /// The schema-qualified name of the record's complex type.
    ///
    /// This is also the name given to the root element when a record is
    /// encoded as a standalone document.
    const TYPE_NAME: XmlName;

    /// The record's fields, in the order they must appear on the wire.
    const FIELDS: &'static [FieldSpec<Self>];
}

/// A statically known XML name, as recorded in schema metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct XmlName {
    pub namespace: Option<&'static str>,
    pub local_name: &'static str,
}

impl XmlName {
    pub const fn new(namespace: Option<&'static str>, local_name: &'static str) -> Self {
        Self {
            namespace,
            local_name,
        }
    }

    /// Whether an element name refers to this name, including its namespace.
    pub fn matches(&self, name: &QualifiedName) -> bool {
        self.local_name == name.local_name && self.namespace == name.namespace.as_deref()
    }
}

impl fmt::Display for XmlName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespace {
            Some(namespace) => write!(f, "{{{namespace}}}{}", self.local_name),
            None => f.write_str(self.local_name),
        }
    }
}

/// An error generated while parsing, binding, or writing XML.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("failed to parse XML input")]
    MalformedInput(#[from] quick_xml::Error),

    #[error("malformed XML document: {0}")]
    MalformedDocument(String),

    #[error("schema mismatch at `{path}`: {mismatch}")]
    SchemaMismatch { path: String, mismatch: Mismatch },

    #[error("invalid value {value:?} at `{path}`, expected {expected}")]
    InvalidValue {
        path: String,
        value: String,
        expected: &'static str,
    },

    #[error("failed to write XML output")]
    Io(#[from] std::io::Error),

    #[error("character {character:?} cannot be represented in XML 1.0")]
    UnrepresentableCharacter { character: char },

    #[error("failed to read codec configuration")]
    Config(#[from] serde_path_to_error::Error<quick_xml::DeError>),
}

/// The broad category of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input could not be parsed into an element tree at all.
    MalformedInput,

    /// The element tree does not have the shape the schema declares.
    SchemaMismatch,

    /// Output could not be written, or a value cannot be represented in it.
    Write,

    /// Codec configuration could not be read.
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedInput(_) | Error::MalformedDocument(_) => ErrorKind::MalformedInput,
            Error::SchemaMismatch { .. } | Error::InvalidValue { .. } => ErrorKind::SchemaMismatch,
            Error::Io(_) | Error::UnrepresentableCharacter { .. } => ErrorKind::Write,
            Error::Config(_) => ErrorKind::Config,
        }
    }
}
