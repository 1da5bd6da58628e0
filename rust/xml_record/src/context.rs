/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::fmt;

use crate::{DecodeMode, Error, QualifiedName};

/// A way in which decoded content deviates from the schema.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Mismatch {
    /// A child element matching no declared field.
    UnexpectedElement(QualifiedName),

    /// An attribute on an element whose type declares none.
    UnexpectedAttribute(QualifiedName),

    /// Non-whitespace text in element-only content.
    UnexpectedText(String),

    /// A child element whose local name matches a declared field but whose
    /// namespace does not.
    NamespaceMismatch {
        expected: QualifiedName,
        found: QualifiedName,
    },

    /// A declared element appearing after an element declared later.
    OutOfOrder(QualifiedName),

    /// A second occurrence of an element declared to occur at most once.
    Duplicate(QualifiedName),

    /// A required element which does not occur.
    MissingElement(QualifiedName),

    /// A document whose root element is not named for the expected type.
    UnexpectedRoot {
        expected: QualifiedName,
        found: QualifiedName,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::UnexpectedElement(name) => write!(f, "unexpected element `{name}`"),
            Mismatch::UnexpectedAttribute(name) => write!(f, "unexpected attribute `{name}`"),
            Mismatch::UnexpectedText(text) => write!(f, "unexpected text content {text:?}"),
            Mismatch::NamespaceMismatch { expected, found } => {
                write!(f, "element `{found}` is in the wrong namespace, expected `{expected}`")
            }
            Mismatch::OutOfOrder(name) => write!(f, "element `{name}` is out of sequence"),
            Mismatch::Duplicate(name) => write!(f, "element `{name}` occurs more than once"),
            Mismatch::MissingElement(name) => write!(f, "missing required element `{name}`"),
            Mismatch::UnexpectedRoot { expected, found } => {
                write!(f, "unexpected root element `{found}`, expected `{expected}`")
            }
        }
    }
}

/// A mismatch tolerated by a lenient decode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warning {
    /// The location of the mismatch, as a `/`-separated list of element names.
    pub path: String,
    pub mismatch: Mismatch,
}

/// State carried through a single decode: the configured strictness, the
/// current location, and any tolerated mismatches.
#[derive(Debug)]
pub struct DecodeContext {
    mode: DecodeMode,
    path: Vec<String>,
    warnings: Vec<Warning>,
}

impl DecodeContext {
    pub fn new(mode: DecodeMode) -> Self {
        Self {
            mode,
            path: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    /// The current location as a `/`-separated list of element names.
    pub fn path(&self) -> String {
        self.path.join("/")
    }

    pub(crate) fn enter(&mut self, name: &str) {
        self.path.push(name.to_owned());
    }

    pub(crate) fn leave(&mut self) {
        self.path.pop();
    }

    /// Reports content not matching the schema.
    ///
    /// In strict mode this is an error. In lenient mode the mismatch is logged
    /// and recorded, and the caller carries on with its lenient reading.
    pub fn report(&mut self, mismatch: Mismatch) -> Result<(), Error> {
        let path = self.path();

        match self.mode {
            DecodeMode::Strict => Err(Error::SchemaMismatch { path, mismatch }),
            DecodeMode::Lenient => {
                log::warn!("ignoring schema mismatch at `{path}`: {mismatch}");
                self.warnings.push(Warning { path, mismatch });

                Ok(())
            }
        }
    }

    /// Builds an error for text which cannot be read as the declared type.
    ///
    /// Such values are rejected in every mode, since no lenient reading of
    /// them exists.
    pub fn invalid_value(&self, value: &str, expected: &'static str) -> Error {
        Error::InvalidValue {
            path: self.path(),
            value: value.to_owned(),
            expected,
        }
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::{DecodeContext, Mismatch};
    use crate::{DecodeMode, Error, QualifiedName};

    #[test]
    fn strict_report_fails_with_location() {
        let mut ctx = DecodeContext::new(DecodeMode::Strict);
        ctx.enter("Outer");
        ctx.enter("inner");

        let err = ctx
            .report(Mismatch::UnexpectedElement(QualifiedName::local("extra")))
            .expect_err("strict mode should reject mismatches");

        match err {
            Error::SchemaMismatch { path, mismatch } => {
                assert_eq!(path, "Outer/inner");
                assert_eq!(
                    mismatch,
                    Mismatch::UnexpectedElement(QualifiedName::local("extra"))
                );
            }
            other => panic!("expected schema mismatch, got: {other:?}"),
        }
        assert!(ctx.warnings().is_empty());
    }

    #[test]
    fn lenient_report_records_warning() {
        let mut ctx = DecodeContext::new(DecodeMode::Lenient);
        ctx.enter("Outer");

        ctx.report(Mismatch::UnexpectedText("stray".into()))
            .expect("lenient mode should tolerate mismatches");
        ctx.leave();

        let warnings = ctx.into_warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].path, "Outer");
        assert_eq!(warnings[0].mismatch, Mismatch::UnexpectedText("stray".into()));
    }
}
