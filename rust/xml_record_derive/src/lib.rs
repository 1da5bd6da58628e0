/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

mod properties;
mod record;

use syn::{parse_macro_input, DeriveInput};

pub(crate) use properties::*;

use crate::record::write_record_impl;

// This value must match the `attributes` attribute for the derive macro.
const MACRO_ATTRIBUTE: &str = "xml_record";

/// A macro providing automated derivation of the `XmlRecord` and `XmlValue`
/// traits.
///
/// When applied to a struct with named fields, the resulting implementation
/// describes each field as a child element, in declaration order, with a tag
/// name derived from the name of the field. The occurrence constraint of each
/// element follows the field's type:
///
/// - `Option<T>` occurs zero or one times, and is omitted when `None`,
/// - `Vec<T>` occurs any number of times,
/// - any other type occurs exactly once.
///
/// For example, the following declaration corresponds to the following
/// output:
///
/// ```ignore
/// #[derive(Default, XmlRecord)]
/// #[xml_record(namespace = "http://foo.example/", rename_all = "PascalCase")]
/// struct Foo {
///     some_field: Option<String>,
///     another: Vec<u32>,
/// }
/// ```
///
/// ```text
/// <Foo xmlns="http://foo.example/">
///     <SomeField>I am text!</SomeField>
///     <Another>1</Another>
///     <Another>2</Another>
/// </Foo>
/// ```
///
/// Every field type must implement `XmlValue`, and the struct must implement
/// `Default`, which is the state decoding starts from.
///
/// # Configuration
///
/// ## Records
///
/// - `namespace = <expr>`
///
///   The namespace of the record's type and of its child elements. Any
///   expression of type `&'static str` is accepted, including constants.
///   Without it, the type and its children are in no namespace.
///
/// - `name = "TypeName"`
///
///   The local name of the record's schema type, if it differs from the Rust
///   identifier.
///
/// - `rename_all = "PascalCase"` or `rename_all = "camelCase"`
///
///   Derives element names from `snake_case` field names with the given case
///   convention. By default field names are used as written.
///
/// ## Fields
///
/// - `rename = "ElementName"`
///
///   Uses the given element name verbatim.
///
/// - `namespace = <expr>`
///
///   Places the field's element in the given namespace rather than the
///   record's.
#[proc_macro_derive(XmlRecord, attributes(xml_record))]
pub fn derive_xml_record(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let props = match TypeProps::try_from_input(&input) {
        Ok(props) => props,
        Err(err) => return err.into_compile_error().into(),
    };

    let DeriveInput {
        generics, ident, ..
    } = input;

    let tokens = match input.data {
        syn::Data::Struct(input) => write_record_impl(ident, generics, input, props),
        syn::Data::Enum(input) => syn::Error::new(
            input.enum_token.span,
            "records must be structs; choice types are not supported",
        )
        .into_compile_error(),
        syn::Data::Union(input) => {
            syn::Error::new(input.union_token.span, "unions cannot be bound to XML")
                .into_compile_error()
        }
    };

    // `syn` and `quote` use the `proc_macro2` crate, so internally we deal in
    // its `TokenStream`, but derive macros must use `proc_macro`'s, so convert
    // at the last minute.
    tokens.into()
}
