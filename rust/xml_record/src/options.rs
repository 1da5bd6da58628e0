/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use serde::{Deserialize, Serialize};

use crate::Error;

/// How the decoder treats content which the schema does not describe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    /// Any deviation from the declared shape fails with a schema mismatch.
    Strict,

    /// Deviations are logged and skipped where a well-defined reading exists.
    ///
    /// Real-world SOAP responses routinely carry elements and namespaces from
    /// newer schema revisions, so this is the default.
    #[default]
    Lenient,
}

/// Configuration for a [`StructuredRecordCodec`](crate::StructuredRecordCodec).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CodecOptions {
    #[serde(rename = "@mode", default)]
    pub mode: DecodeMode,

    /// Whether encoded documents begin with an XML declaration.
    #[serde(rename = "@write-declaration", default = "default_write_declaration")]
    pub write_declaration: bool,

    /// The number of spaces per indentation level of record content, or
    /// `None` for compact output.
    #[serde(rename = "@indent", default)]
    pub indent: Option<usize>,
}

fn default_write_declaration() -> bool {
    true
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            mode: DecodeMode::default(),
            write_declaration: default_write_declaration(),
            indent: None,
        }
    }
}

impl CodecOptions {
    pub fn strict() -> Self {
        Self {
            mode: DecodeMode::Strict,
            ..Self::default()
        }
    }

    pub fn lenient() -> Self {
        Self {
            mode: DecodeMode::Lenient,
            ..Self::default()
        }
    }

    /// Reads options from the attributes of an XML configuration element, e.g.
    /// `<codec mode="strict" write-declaration="false" indent="2"/>`.
    ///
    /// Omitted attributes take their default values.
    pub fn from_xml(config: &str) -> Result<Self, Error> {
        let de = &mut quick_xml::de::Deserializer::from_str(config);

        // Report the offending attribute rather than only the immediate
        // parse failure.
        let options = serde_path_to_error::deserialize(de)?;

        Ok(options)
    }
}
