/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::marker::PhantomData;

use crate::{
    record::{decode_record, encode_record, encode_record_with_layout},
    CodecOptions, DecodeContext, Element, Error, Layout, Mismatch, Warning, XmlRecord,
};

/// The result of a decode, with any mismatches a lenient decode tolerated.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoded<R> {
    pub record: R,
    pub warnings: Vec<Warning>,
}

/// Encodes and decodes one record type to and from XML.
///
/// The codec holds no state besides its options; encoding and decoding are
/// pure transformations and a codec may be shared freely.
#[derive(Clone, Debug)]
pub struct StructuredRecordCodec<R> {
    options: CodecOptions,
    marker: PhantomData<fn() -> R>,
}

impl<R> Default for StructuredRecordCodec<R>
where
    R: XmlRecord,
{
    fn default() -> Self {
        Self::new(CodecOptions::default())
    }
}

impl<R> StructuredRecordCodec<R>
where
    R: XmlRecord,
{
    pub fn new(options: CodecOptions) -> Self {
        Self {
            options,
            marker: PhantomData,
        }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Decodes a record from an element of its type.
    ///
    /// The element's own name is not checked, as the same type may be used
    /// under different element names.
    pub fn decode(&self, element: &Element) -> Result<R, Error> {
        self.decode_with_warnings(element)
            .map(|decoded| decoded.record)
    }

    /// Decodes a record, also returning the mismatches tolerated in lenient
    /// mode.
    pub fn decode_with_warnings(&self, element: &Element) -> Result<Decoded<R>, Error> {
        let mut ctx = self.context();

        let record = decode_record(element, &mut ctx)?;

        Ok(Decoded {
            record,
            warnings: ctx.into_warnings(),
        })
    }

    /// Parses and decodes a complete document whose root element represents
    /// the record.
    ///
    /// Unparseable input fails before any decoding takes place. A root element
    /// not named for the record's type is a schema mismatch.
    pub fn decode_document(&self, document: &[u8]) -> Result<R, Error> {
        let root = Element::parse(document)?;
        let mut ctx = self.context();

        if !R::TYPE_NAME.matches(&root.name) {
            ctx.report(Mismatch::UnexpectedRoot {
                expected: R::TYPE_NAME.into(),
                found: root.name.clone(),
            })?;
        }

        decode_record(&root, &mut ctx)
    }

    /// Encodes a record as an element named for its type.
    pub fn encode(&self, record: &R) -> Element {
        log::debug!("encoding {}", R::TYPE_NAME);

        encode_record(record, R::TYPE_NAME.into())
    }

    /// Encodes a record as a complete document.
    ///
    /// With indentation configured, each element of record content starts on
    /// its own line. Text and opaque content are written exactly as they are.
    pub fn encode_document(&self, record: &R) -> Result<Vec<u8>, Error> {
        log::debug!("encoding {} as a document", R::TYPE_NAME);

        let layout = Layout::indented(self.options.indent);

        encode_record_with_layout(record, R::TYPE_NAME.into(), layout)
            .to_xml_document(&self.options)
    }

    fn context(&self) -> DecodeContext {
        let mut ctx = DecodeContext::new(self.options.mode);
        ctx.enter(R::TYPE_NAME.local_name);

        ctx
    }
}
