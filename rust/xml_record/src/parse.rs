/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::io::BufRead;

use quick_xml::{
    events::{BytesStart, Event},
    name::ResolveResult,
    NsReader,
};

use crate::{Attribute, Element, Error, Node, QualifiedName};

/// Builds an element tree from a complete XML document.
pub(crate) fn parse_document(input: &[u8]) -> Result<Element, Error> {
    let mut reader = NsReader::from_reader(input);

    // Self-closing tags are reported as a start/end pair so that both forms
    // build identical trees.
    reader.config_mut().expand_empty_elements = true;

    let mut buf = Vec::new();
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let (resolved, event) = reader.read_resolved_event_into(&mut buf)?;
        let namespace = owned_namespace(resolved)?;

        match event {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(malformed("document has more than one root element"));
                }

                let element = start_element(&reader, namespace, &start)?;
                open.push(element);
            }

            Event::End(_) => {
                // quick-xml verifies that end tags match their start tags, so
                // there is always an open element here.
                let element = open
                    .pop()
                    .ok_or_else(|| malformed("closing tag without a matching start tag"))?;

                match open.last_mut() {
                    Some(parent) => parent.children.push(Node::Element(element)),
                    None => root = Some(element),
                }
            }

            Event::Text(text) => {
                let text = text.unescape()?;
                push_text(&mut open, &text)?;
            }

            Event::CData(cdata) => {
                let text = std::str::from_utf8(&cdata)
                    .map_err(|err| malformed(format!("CDATA section is not UTF-8: {err}")))?;
                push_text(&mut open, text)?;
            }

            Event::Eof => break,

            // Declarations, comments, processing instructions and doctypes
            // carry no record content.
            _ => (),
        }

        buf.clear();
    }

    if let Some(element) = open.last() {
        return Err(malformed(format!(
            "unexpected end of input inside `{}`",
            element.name
        )));
    }

    root.ok_or_else(|| malformed("document has no root element"))
}

fn start_element<R>(
    reader: &NsReader<R>,
    namespace: Option<String>,
    start: &BytesStart,
) -> Result<Element, Error>
where
    R: BufRead,
{
    let name = QualifiedName {
        namespace,
        local_name: utf8(start.local_name().as_ref())?,
    };

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;

        // `xmlns` and `xmlns:*` bindings have already been applied by the
        // reader.
        if attribute.key.as_namespace_binding().is_some() {
            continue;
        }

        let (resolved, local_name) = reader.resolve_attribute(attribute.key);
        let namespace = owned_namespace(resolved)?;
        let local_name = utf8(local_name.as_ref())?;
        let value = attribute.unescape_value()?.into_owned();

        attributes.push(Attribute {
            name: QualifiedName {
                namespace,
                local_name,
            },
            value,
        });
    }

    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn push_text(open: &mut [Element], text: &str) -> Result<(), Error> {
    match open.last_mut() {
        Some(element) => element.push_text(text),

        // Whitespace around the root element is insignificant.
        None if text.trim().is_empty() => (),
        None => return Err(malformed("text content outside of the root element")),
    }

    Ok(())
}

fn owned_namespace(resolved: ResolveResult) -> Result<Option<String>, Error> {
    match resolved {
        ResolveResult::Bound(namespace) => {
            let namespace = utf8(namespace.as_ref())?;

            Ok(Some(namespace).filter(|ns| !ns.is_empty()))
        }
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(malformed(format!(
            "undeclared namespace prefix `{}`",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

fn utf8(bytes: &[u8]) -> Result<String, Error> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|err| malformed(format!("name is not UTF-8: {err}")))
}

fn malformed(message: impl Into<String>) -> Error {
    Error::MalformedDocument(message.into())
}

#[cfg(test)]
mod tests {
    use crate::{Element, ErrorKind, Node, QualifiedName};

    const NS: &str = "http://foo.example/";

    #[test]
    fn parse_resolves_default_and_prefixed_namespaces() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?><f:Outer xmlns:f="http://foo.example/" xmlns="http://bar.example/"><Inner f:Attr="1">text</Inner></f:Outer>"#;

        let root = Element::parse(xml.as_bytes()).expect("document should parse");

        assert_eq!(root.name, QualifiedName::new(Some(NS), "Outer"));
        assert!(
            root.attributes.is_empty(),
            "namespace declarations should not be reported as attributes"
        );

        let inner = root
            .find_child(&QualifiedName::new(Some("http://bar.example/"), "Inner"))
            .expect("inner element should be in the default namespace");
        assert_eq!(
            inner.attribute(&QualifiedName::new(Some(NS), "Attr")),
            Some("1")
        );
        assert_eq!(inner.text(), "text");
    }

    #[test]
    fn parse_treats_empty_and_self_closing_tags_alike() {
        let expanded = Element::parse(b"<Root><Child></Child></Root>").unwrap();
        let collapsed = Element::parse(b"<Root><Child/></Root>").unwrap();

        assert_eq!(expanded, collapsed);
    }

    #[test]
    fn parse_keeps_whitespace_between_elements() {
        let root = Element::parse(b"<Root>\n  <A>x</A> <B> y </B>\n</Root>").unwrap();

        // Whether whitespace is significant depends on the schema type, which
        // the parser does not know.
        assert_eq!(
            root.children,
            vec![
                Node::Text("\n  ".to_string()),
                Node::Element(Element::new(QualifiedName::local("A")).with_text("x")),
                Node::Text(" ".to_string()),
                Node::Element(Element::new(QualifiedName::local("B")).with_text(" y ")),
                Node::Text("\n".to_string()),
            ]
        );
    }

    #[test]
    fn parse_merges_text_and_cdata() {
        let root = Element::parse(b"<Root>a &amp; <![CDATA[<b>]]> c</Root>").unwrap();

        assert_eq!(root.children, vec![Node::Text("a & <b> c".to_string())]);
    }

    #[test]
    fn parse_rejects_malformed_documents() {
        let inputs: [&[u8]; 6] = [
            b"",
            b"<Root>",
            b"<Root></Other>",
            b"<Root/><Second/>",
            b"stray<Root/>",
            b"<p:Root/>",
        ];

        for input in inputs {
            let err = Element::parse(input).expect_err("input should be rejected");
            assert_eq!(
                err.kind(),
                ErrorKind::MalformedInput,
                "unexpected error for {:?}: {err:?}",
                String::from_utf8_lossy(input)
            );
        }
    }
}
