/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use proc_macro2::{Ident, Literal, TokenStream};
use quote::{format_ident, quote, ToTokens};
use syn::{
    ext::IdentExt as _, spanned::Spanned as _, DataStruct, Error, Generics, PathArguments, Type,
    TypePath,
};

use crate::{combine_errors, FieldProps, TypeProps};

/// Generates implementations of the `XmlRecord` and `XmlValue` traits for a
/// Rust struct and its fields.
pub(crate) fn write_record_impl(
    ident: Ident,
    generics: Generics,
    input: DataStruct,
    props: TypeProps,
) -> TokenStream {
    // We build a list of errors so that we can combine them later and emit
    // them all instead of quitting at the first we encounter.
    let mut errors = Vec::new();

    // Field accessors are plain functions in the generated table, which
    // cannot be generic over the record's parameters.
    if !generics.params.is_empty() {
        errors.push(Error::new(
            generics.span(),
            "generic records are not supported",
        ));
    }

    let fields: Vec<_> = match input.fields {
        syn::Fields::Named(fields) => fields
            .named
            .into_iter()
            .map(|field| {
                let props = FieldProps::try_from_attrs(&field.attrs).unwrap_or_else(|err| {
                    errors.push(err);

                    FieldProps::default()
                });

                Field {
                    // We should be able to unwrap without panicking, since we
                    // know this is a named field.
                    ident: field.ident.unwrap(),
                    occurs: Occurs::of(&field.ty),
                    props,
                }
            })
            .collect(),

        // A unit struct is a record with empty content.
        syn::Fields::Unit => vec![],

        syn::Fields::Unnamed(fields) => {
            errors.push(Error::new(
                fields.span(),
                "record fields must be named, as names determine their elements",
            ));

            vec![]
        }
    };

    if let Some(err) = combine_errors(errors) {
        return err.into_compile_error();
    }

    let type_namespace = namespace_tokens(props.namespace.as_ref());
    let type_name = match &props.type_name {
        Some(name) => name.to_token_stream(),
        None => Literal::string(&ident.unraw().to_string()).into_token_stream(),
    };

    let mut accessor_fns = Vec::with_capacity(fields.len());
    let mut field_specs = Vec::with_capacity(fields.len());

    for (index, field) in fields.iter().enumerate() {
        let field_ident = &field.ident;
        let encode_fn = format_ident!("__encode_field_{}", index);
        let decode_fn = format_ident!("__decode_field_{}", index);
        let (encode_helper, decode_helper, occurs) = field.occurs.tokens();

        accessor_fns.push(quote! {
            fn #encode_fn(
                record: &#ident,
                name: ::xml_record::XmlName,
                layout: ::xml_record::Layout,
                out: &mut ::std::vec::Vec<::xml_record::Node>,
            ) {
                ::xml_record::field::#encode_helper(&record.#field_ident, name, layout, out)
            }

            fn #decode_fn(
                record: &mut #ident,
                element: &::xml_record::Element,
                ctx: &mut ::xml_record::DecodeContext,
            ) -> ::core::result::Result<(), ::xml_record::Error> {
                ::xml_record::field::#decode_helper(&mut record.#field_ident, element, ctx)
            }
        });

        // Fields default to the record's namespace.
        let field_namespace =
            namespace_tokens(field.props.namespace.as_ref().or(props.namespace.as_ref()));
        let wire_name = field.wire_name(&props);

        field_specs.push(quote! {
            ::xml_record::FieldSpec {
                name: ::xml_record::XmlName::new(#field_namespace, #wire_name),
                occurs: ::xml_record::Occurs::#occurs,
                encode: #encode_fn,
                decode: #decode_fn,
            }
        });
    }

    // The accessor functions are scoped to an anonymous constant so that they
    // neither collide with nor leak into the surrounding module.
    quote! {
        const _: () = {
            #(#accessor_fns)*

            #[automatically_derived]
            impl ::xml_record::XmlRecord for #ident {
                const TYPE_NAME: ::xml_record::XmlName =
                    ::xml_record::XmlName::new(#type_namespace, #type_name);

                const FIELDS: &'static [::xml_record::FieldSpec<Self>] = &[
                    #(#field_specs,)*
                ];
            }

            #[automatically_derived]
            impl ::xml_record::XmlValue for #ident {
                fn to_element(
                    &self,
                    name: ::xml_record::QualifiedName,
                ) -> ::xml_record::Element {
                    ::xml_record::record::encode_record(self, name)
                }

                fn to_laid_out_element(
                    &self,
                    name: ::xml_record::QualifiedName,
                    layout: ::xml_record::Layout,
                ) -> ::xml_record::Element {
                    ::xml_record::record::encode_record_with_layout(self, name, layout)
                }

                fn from_element(
                    element: &::xml_record::Element,
                    ctx: &mut ::xml_record::DecodeContext,
                ) -> ::core::result::Result<Self, ::xml_record::Error> {
                    ::xml_record::record::decode_record(element, ctx)
                }
            }
        };
    }
}

/// Generates an `Option<&'static str>` expression for a namespace.
fn namespace_tokens(namespace: Option<&TokenStream>) -> TokenStream {
    match namespace {
        Some(namespace) => quote!(::core::option::Option::Some(#namespace)),
        None => quote!(::core::option::Option::None),
    }
}

/// A representation of a record field.
struct Field {
    ident: Ident,
    occurs: Occurs,
    props: FieldProps,
}

impl Field {
    /// The local name of the element representing this field.
    fn wire_name(&self, type_props: &TypeProps) -> TokenStream {
        match &self.props.rename {
            Some(name) => name.to_token_stream(),
            None => {
                let name = type_props
                    .rename_all
                    .apply(&self.ident.unraw().to_string());

                Literal::string(&name).into_token_stream()
            }
        }
    }
}

/// How many times a field's element may occur, as inferred from its type.
#[derive(Clone, Copy, Debug)]
enum Occurs {
    Required,
    Optional,
    Repeated,
}

impl Occurs {
    /// Infers the occurrence from the outermost type constructor.
    ///
    /// This is syntactic: a type alias for `Option<T>` is treated as required.
    fn of(ty: &Type) -> Self {
        let Type::Path(TypePath { qself: None, path }) = ty else {
            return Self::Required;
        };

        let Some(segment) = path.segments.last() else {
            return Self::Required;
        };

        let has_single_argument = matches!(
            &segment.arguments,
            PathArguments::AngleBracketed(args) if args.args.len() == 1
        );

        if !has_single_argument {
            Self::Required
        } else if segment.ident == "Option" {
            Self::Optional
        } else if segment.ident == "Vec" {
            Self::Repeated
        } else {
            Self::Required
        }
    }

    /// The helper functions and `Occurs` variant for this occurrence.
    fn tokens(self) -> (Ident, Ident, Ident) {
        let (encode, decode, variant) = match self {
            Self::Required => ("encode_required", "decode_required", "Required"),
            Self::Optional => ("encode_optional", "decode_optional", "Optional"),
            Self::Repeated => ("encode_repeated", "decode_repeated", "Repeated"),
        };

        (
            format_ident!("{}", encode),
            format_ident!("{}", decode),
            format_ident!("{}", variant),
        )
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::Occurs;

    #[test]
    fn occurrence_follows_outer_type() {
        assert!(matches!(
            Occurs::of(&parse_quote!(Option<String>)),
            Occurs::Optional
        ));
        assert!(matches!(
            Occurs::of(&parse_quote!(std::option::Option<Inner>)),
            Occurs::Optional
        ));
        assert!(matches!(Occurs::of(&parse_quote!(Vec<u32>)), Occurs::Repeated));
        assert!(matches!(Occurs::of(&parse_quote!(String)), Occurs::Required));
        assert!(matches!(
            Occurs::of(&parse_quote!(Option<Vec<u32>>)),
            Occurs::Optional
        ));
    }
}
