/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use quick_xml::{
    escape::escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};

use crate::{CodecOptions, Element, Error, Node, XML_NS_URI};

/// Serializes an element tree as a complete XML document.
///
/// The tree is written as it is, whitespace included. Indentation of record
/// content is applied when records are encoded, so here it only separates the
/// declaration from the root element.
pub(crate) fn write_document(root: &Element, options: &CodecOptions) -> Result<Vec<u8>, Error> {
    let mut writer = Writer::new(Vec::new());

    if options.write_declaration {
        // Stick to XML 1.0 with UTF-8, which is what every consumer of these
        // schemas expects.
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        if options.indent.is_some() {
            writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
        }
    }

    write_element(&mut writer, root, None)?;

    Ok(writer.into_inner())
}

/// Writes an element and its content.
///
/// Element names are always written unprefixed, with a default namespace
/// declaration wherever the namespace differs from the one in scope.
/// Namespaced attributes get a prefix declared on their own element.
fn write_element<W>(
    writer: &mut Writer<W>,
    element: &Element,
    default_ns: Option<&str>,
) -> Result<(), Error>
where
    W: std::io::Write,
{
    let name = element.name.local_name.as_str();
    let namespace = element.name.namespace.as_deref();

    let mut start_tag = BytesStart::new(name);
    if namespace != default_ns {
        push_attribute(&mut start_tag, "xmlns", namespace.unwrap_or(""))?;
    }

    for (index, attribute) in element.attributes.iter().enumerate() {
        let local_name = attribute.name.local_name.as_str();
        let value = attribute.value.as_str();

        match attribute.name.namespace.as_deref() {
            None => push_attribute(&mut start_tag, local_name, value)?,

            // The `xml` prefix is bound implicitly and may not be redeclared.
            Some(XML_NS_URI) => {
                push_attribute(&mut start_tag, &format!("xml:{local_name}"), value)?;
            }

            Some(attribute_ns) => {
                let prefix = format!("a{index}");

                push_attribute(&mut start_tag, &format!("xmlns:{prefix}"), attribute_ns)?;
                push_attribute(&mut start_tag, &format!("{prefix}:{local_name}"), value)?;
            }
        }
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start_tag))?;

        return Ok(());
    }

    writer.write_event(Event::Start(start_tag))?;

    for child in &element.children {
        match child {
            Node::Element(child) => write_element(writer, child, namespace)?,
            Node::Text(text) => {
                let escaped = escape_text(text, false)?;
                writer.write_event(Event::Text(BytesText::from_escaped(escaped)))?;
            }
        }
    }

    writer.write_event(Event::End(BytesEnd::new(name)))?;

    Ok(())
}

fn push_attribute(start_tag: &mut BytesStart, key: &str, value: &str) -> Result<(), Error> {
    let escaped = escape_text(value, true)?;

    // The value is already escaped, so it is pushed as raw bytes.
    start_tag.push_attribute((key.as_bytes(), escaped.as_bytes()));

    Ok(())
}

/// Escapes character data so that a conforming reader recovers it exactly.
///
/// Carriage returns are written as references, since readers normalize line
/// endings in literal text. In attribute values, tabs and newlines are too, as
/// readers normalize them to spaces.
fn escape_text(text: &str, in_attribute: bool) -> Result<String, Error> {
    if let Some(character) = text.chars().find(|&character| !is_xml_char(character)) {
        return Err(Error::UnrepresentableCharacter { character });
    }

    let escaped = escape(text).replace('\r', "&#13;");
    if !in_attribute {
        return Ok(escaped);
    }

    Ok(escaped.replace('\n', "&#10;").replace('\t', "&#9;"))
}

/// Whether a character matches the `Char` production of XML 1.0.
fn is_xml_char(character: char) -> bool {
    matches!(
        character,
        '\t' | '\n'
            | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

#[cfg(test)]
mod tests {
    use crate::{
        CodecOptions, DecodeMode, Element, Error, ErrorKind, Node, QualifiedName, XML_NS_URI,
        XSI_NS_URI,
    };

    const NS: &str = "http://foo.example/";

    fn compact() -> CodecOptions {
        CodecOptions {
            mode: DecodeMode::Strict,
            write_declaration: false,
            indent: None,
        }
    }

    fn write(element: &Element, options: &CodecOptions) -> String {
        let bytes = element
            .to_xml_document(options)
            .expect("writing to a buffer should succeed");

        String::from_utf8(bytes).expect("output should be UTF-8")
    }

    #[test]
    fn namespace_declared_only_where_it_changes() {
        let element = Element::new(QualifiedName::new(Some(NS), "Outer"))
            .with_child(Element::new(QualifiedName::new(Some(NS), "Same")).with_text("a"))
            .with_child(Element::new(QualifiedName::local("Bare")).with_text("b"))
            .with_child(Element::new(QualifiedName::new(Some("urn:other"), "Other")));

        assert_eq!(
            write(&element, &compact()),
            r#"<Outer xmlns="http://foo.example/"><Same>a</Same><Bare xmlns="">b</Bare><Other xmlns="urn:other"/></Outer>"#
        );
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let element = Element::new(QualifiedName::local("Root"))
            .with_attribute(QualifiedName::local("note"), r#"say "hi" & <go>"#)
            .with_text("1 < 2 & 3 > 2");

        let out = write(&element, &compact());
        assert_eq!(
            Element::parse(out.as_bytes()).expect("output should parse"),
            element,
            "escaped output should read back unchanged"
        );
        assert!(!out.contains("< 2"), "text should be escaped: {out}");
    }

    #[test]
    fn namespaced_attributes_survive_a_round_trip() {
        let element = Element::new(QualifiedName::new(Some(NS), "Root"))
            .with_attribute(QualifiedName::new(Some(XSI_NS_URI), "nil"), "true")
            .with_attribute(QualifiedName::new(Some(XML_NS_URI), "lang"), "fi");

        let out = write(&element, &compact());
        assert!(out.contains(r#"xml:lang="fi""#), "xml prefix should be reused: {out}");

        assert_eq!(
            Element::parse(out.as_bytes()).expect("output should parse"),
            element
        );
    }

    #[test]
    fn declaration_is_written_on_request() {
        let element = Element::new(QualifiedName::local("Root"));
        let options = CodecOptions {
            write_declaration: true,
            ..compact()
        };

        assert_eq!(
            write(&element, &options),
            r#"<?xml version="1.0" encoding="utf-8"?><Root/>"#
        );
    }

    #[test]
    fn line_endings_survive_a_round_trip() {
        let element = Element::new(QualifiedName::local("Root"))
            .with_attribute(QualifiedName::local("note"), "tab\there\r\nnext")
            .with_text("a\r\nb\rc");

        let out = write(&element, &compact());
        assert_eq!(
            out,
            "<Root note=\"tab&#9;here&#13;&#10;next\">a&#13;\nb&#13;c</Root>"
        );

        assert_eq!(
            Element::parse(out.as_bytes()).expect("output should parse"),
            element
        );
    }

    #[test]
    fn characters_outside_xml_are_rejected() {
        for element in [
            Element::new(QualifiedName::local("Root")).with_text("a\u{1}b"),
            Element::new(QualifiedName::local("Root"))
                .with_attribute(QualifiedName::local("note"), "\u{FFFE}"),
        ] {
            let err = element
                .to_xml_document(&compact())
                .expect_err("unrepresentable text should not be written");

            assert_eq!(err.kind(), ErrorKind::Write);
            assert!(
                matches!(err, Error::UnrepresentableCharacter { .. }),
                "unexpected error: {err:?}"
            );
        }
    }

    #[test]
    fn element_trees_are_written_verbatim() {
        let element = Element::new(QualifiedName::local("Root"))
            .with_child(Element::new(QualifiedName::local("A")))
            .with_text(" ")
            .with_child(Element::new(QualifiedName::local("B")));
        let options = CodecOptions {
            write_declaration: true,
            indent: Some(2),
            ..compact()
        };

        let out = write(&element, &options);
        assert_eq!(
            out,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Root><A/> <B/></Root>"
        );

        let parsed = Element::parse(out.as_bytes()).expect("output should parse");
        assert_eq!(parsed.children[1], Node::Text(" ".to_string()));
        assert_eq!(parsed, element);
    }
}
