/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use proc_macro2::TokenStream;
use quote::ToTokens as _;
use syn::{
    punctuated::Punctuated, spanned::Spanned as _, Attribute, DeriveInput, Error, Expr, ExprLit,
    Lit, LitStr, Meta, Token,
};

use crate::MACRO_ATTRIBUTE;

const UNRECOGNIZED_ATTRIBUTE_MSG: &str = "unrecognized `xml_record` attribute";

#[derive(Default)]
/// Properties governing the binding of a struct with a derived `XmlRecord`
/// implementation.
pub(crate) struct TypeProps {
    /// An expression for the namespace of the record's type and, unless
    /// overridden per field, of its child elements.
    pub namespace: Option<TokenStream>,

    /// The local name of the record's schema type, if it differs from the
    /// Rust identifier.
    pub type_name: Option<LitStr>,

    /// The case convention used to derive element names from field names.
    pub rename_all: RenameRule,
}

impl TypeProps {
    /// Constructs a set of binding properties for a struct from its input to
    /// the derive macro.
    pub(crate) fn try_from_input(input: &DeriveInput) -> Result<Self, Error> {
        let attr = match find_configuration_attribute(&input.attrs) {
            Some(attr) => attr,

            // If we don't find a matching attribute, we assume the default set
            // of properties.
            None => return Ok(Self::default()),
        };

        // We build a list of errors so that we can combine them later and emit
        // them all instead of quitting at the first we encounter.
        let mut errors = Vec::new();

        let mut properties = TypeProps::default();
        for meta in attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)? {
            match meta {
                Meta::NameValue(name_value) => {
                    if name_value.path.is_ident("namespace") {
                        match properties.namespace {
                            Some(_) => errors.push(Error::new(
                                name_value.path.span(),
                                "cannot declare more than one namespace",
                            )),
                            None => properties.namespace = Some(name_value.value.to_token_stream()),
                        }
                    } else if name_value.path.is_ident("name") {
                        match string_literal(&name_value.value) {
                            Ok(name) => properties.type_name = Some(name),
                            Err(err) => errors.push(err),
                        }
                    } else if name_value.path.is_ident("rename_all") {
                        match string_literal(&name_value.value).and_then(RenameRule::try_from_lit) {
                            Ok(rule) => properties.rename_all = rule,
                            Err(err) => errors.push(err),
                        }
                    } else {
                        errors.push(Error::new(name_value.span(), UNRECOGNIZED_ATTRIBUTE_MSG));
                    }
                }

                _ => {
                    errors.push(Error::new(meta.span(), UNRECOGNIZED_ATTRIBUTE_MSG));
                }
            }
        }

        combine_errors(errors).map_or(Ok(properties), Err)
    }
}

#[derive(Default)]
/// Properties governing the binding of a single field of a record.
pub(crate) struct FieldProps {
    /// An element name to use verbatim instead of one derived from the field
    /// name.
    pub rename: Option<LitStr>,

    /// An expression for the namespace of the field's element, overriding the
    /// record's namespace.
    pub namespace: Option<TokenStream>,
}

impl FieldProps {
    /// Constructs a set of binding properties for a struct field from its
    /// attributes.
    pub(crate) fn try_from_attrs(value: &[Attribute]) -> Result<Self, Error> {
        let attr = match find_configuration_attribute(value) {
            Some(attr) => attr,
            None => return Ok(Self::default()),
        };

        let mut errors = Vec::new();

        let mut properties = FieldProps::default();
        for meta in attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)? {
            match meta {
                Meta::NameValue(name_value) => {
                    if name_value.path.is_ident("rename") {
                        if properties.rename.is_some() {
                            errors.push(Error::new(
                                name_value.path.span(),
                                "cannot rename a field more than once",
                            ));
                        } else {
                            match string_literal(&name_value.value) {
                                Ok(name) => properties.rename = Some(name),
                                Err(err) => errors.push(err),
                            }
                        }
                    } else if name_value.path.is_ident("namespace") {
                        match properties.namespace {
                            Some(_) => errors.push(Error::new(
                                name_value.path.span(),
                                "cannot declare more than one namespace",
                            )),
                            None => properties.namespace = Some(name_value.value.to_token_stream()),
                        }
                    } else {
                        errors.push(Error::new(name_value.span(), UNRECOGNIZED_ATTRIBUTE_MSG));
                    }
                }

                _ => {
                    errors.push(Error::new(meta.span(), UNRECOGNIZED_ATTRIBUTE_MSG));
                }
            }
        }

        combine_errors(errors).map_or(Ok(properties), Err)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// The case conventions available for deriving element names.
pub(crate) enum RenameRule {
    /// The field name is used as written.
    #[default]
    Verbatim,

    /// `snake_case` becomes `PascalCase`.
    PascalCase,

    /// `snake_case` becomes `camelCase`.
    CamelCase,
}

impl RenameRule {
    fn try_from_lit(lit: LitStr) -> Result<Self, Error> {
        match lit.value().as_str() {
            "PascalCase" => Ok(Self::PascalCase),
            "camelCase" => Ok(Self::CamelCase),
            _ => Err(Error::new(
                lit.span(),
                "expected `rename_all = \"PascalCase\"` or `rename_all = \"camelCase\"`",
            )),
        }
    }

    /// Applies the rule to a field identifier.
    pub(crate) fn apply(self, field_name: &str) -> String {
        match self {
            Self::Verbatim => field_name.to_owned(),
            Self::PascalCase => snake_to_camel(field_name, true),
            Self::CamelCase => snake_to_camel(field_name, false),
        }
    }
}

/// Converts a snake_case identifier string to PascalCase or camelCase.
fn snake_to_camel(snake: &str, capitalize_first: bool) -> String {
    let mut capitalize_next = capitalize_first;

    snake
        .chars()
        .filter_map(|character| {
            if character == '_' {
                // Consume the underscore and capitalize the next character.
                capitalize_next = true;

                None
            } else if capitalize_next {
                capitalize_next = false;

                // Element names in the schemas this crate targets are ASCII;
                // full Unicode case mapping is out of scope.
                Some(character.to_ascii_uppercase())
            } else {
                Some(character)
            }
        })
        .collect()
}

fn string_literal(expr: &Expr) -> Result<LitStr, Error> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit), ..
        }) => Ok(lit.clone()),
        other => Err(Error::new(other.span(), "expected a string literal")),
    }
}

/// Combines a list of errors into one, if there are any.
pub(crate) fn combine_errors(errors: Vec<Error>) -> Option<Error> {
    errors.into_iter().reduce(|mut combined, err| {
        combined.combine(err);

        combined
    })
}

/// Gets the attribute containing configuration parameters for this derive
/// macro, if any.
fn find_configuration_attribute(attrs: &[Attribute]) -> Option<&Attribute> {
    attrs
        .iter()
        .find(|attr| attr.path().is_ident(MACRO_ATTRIBUTE))
}

#[cfg(test)]
mod tests {
    use syn::{parse_quote, Data, DeriveInput};

    use super::{FieldProps, RenameRule, TypeProps};

    #[test]
    fn type_and_field_properties() {
        let input: DeriveInput = parse_quote! {
            #[xml_record(namespace = SOME_NS, name = "Renamed", rename_all = "PascalCase")]
            struct Foo {
                #[xml_record(rename = "BAR", namespace = "urn:bar")]
                bar: Option<String>,
                baz: u32,
            }
        };

        let props = TypeProps::try_from_input(&input).unwrap();
        assert_eq!(
            props.namespace.map(|namespace| namespace.to_string()),
            Some("SOME_NS".to_string())
        );
        assert_eq!(
            props.type_name.map(|name| name.value()),
            Some("Renamed".to_string())
        );
        assert_eq!(props.rename_all, RenameRule::PascalCase);

        let Data::Struct(data) = &input.data else {
            panic!("input should be a struct");
        };
        let mut fields = data.fields.iter();

        let bar = FieldProps::try_from_attrs(&fields.next().unwrap().attrs).unwrap();
        assert_eq!(bar.rename.map(|name| name.value()), Some("BAR".to_string()));
        assert_eq!(
            bar.namespace.map(|namespace| namespace.to_string()),
            Some("\"urn:bar\"".to_string())
        );

        let baz = FieldProps::try_from_attrs(&fields.next().unwrap().attrs).unwrap();
        assert!(baz.rename.is_none());
        assert!(baz.namespace.is_none());
    }

    #[test]
    fn conflicting_properties_are_rejected() {
        let input: DeriveInput = parse_quote! {
            #[xml_record(namespace = "urn:a", namespace = "urn:b", rename_all = "SHOUTY")]
            struct Foo;
        };

        let Err(err) = TypeProps::try_from_input(&input) else {
            panic!("conflicting properties should be rejected");
        };

        // Both problems are reported at once.
        assert_eq!(err.into_iter().count(), 2);
    }

    #[test]
    fn rename_rules() {
        assert_eq!(RenameRule::Verbatim.apply("so_so_nimi"), "so_so_nimi");
        assert_eq!(RenameRule::PascalCase.apply("so_so_nimi"), "SoSoNimi");
        assert_eq!(RenameRule::PascalCase.apply("x509_certificate"), "X509Certificate");
        assert_eq!(RenameRule::CamelCase.apply("so_so_nimi"), "soSoNimi");
        assert_eq!(RenameRule::CamelCase.apply("request"), "request");
    }
}
