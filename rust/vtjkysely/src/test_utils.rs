/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use xml_record::{CodecOptions, DecodeMode, StructuredRecordCodec, XmlRecord};

/// A codec writing compact output without a declaration, so that expected
/// content can be written inline.
pub fn compact_codec<T: XmlRecord>(mode: DecodeMode) -> StructuredRecordCodec<T> {
    StructuredRecordCodec::new(CodecOptions {
        mode,
        write_declaration: false,
        indent: None,
    })
}

/// Assert the expected result of XML serialization.
pub fn assert_serialized_content<T: XmlRecord>(data: &T, expected_xml_content: &str) {
    let buf = compact_codec::<T>(DecodeMode::Strict)
        .encode_document(data)
        .unwrap();

    let actual_xml_content = std::str::from_utf8(buf.as_slice()).unwrap();

    assert_eq!(actual_xml_content, expected_xml_content);
}

/// Assert the expected result of strict XML deserialization.
pub fn assert_deserialized_content<T>(content: &str, expected: T)
where
    T: XmlRecord + Eq + std::fmt::Debug,
{
    let deserialized_data: T = compact_codec(DecodeMode::Strict)
        .decode_document(content.as_bytes())
        .unwrap();

    assert_eq!(deserialized_data, expected);
}
