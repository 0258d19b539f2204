// ABOUTME: Encoder from the typed feed model to XML bytes.
// ABOUTME: Walks the binding tables in order, writing CDATA for literal text and hoisting namespace declarations.

use std::io::Write;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::binding::{collect_attributes, has_body, Access, Binding, Entity, Placement, TextWrap};
use crate::error::EncodeError;
use crate::model::Feed;
use crate::namespace::Namespace;
use crate::options::EncodeOptions;

/// Encodes a feed with default options.
pub fn encode(feed: &Feed) -> Result<Vec<u8>, EncodeError> {
    encode_with(feed, &EncodeOptions::default())
}

/// Encodes a feed.
pub fn encode_with(feed: &Feed, options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    let mut declarations = Vec::new();
    if options.declare_default_namespace {
        declarations.push(("xmlns".to_string(), Namespace::Rss.uri()));
    }
    for namespace in [Namespace::Itunes, Namespace::Podcast] {
        declarations.push((format!("xmlns:{}", namespace.prefix()), namespace.uri()));
    }

    let mut encoder = Encoder::new(options);
    if options.xml_declaration {
        encoder.write_declaration()?;
    }
    encoder.write_root(feed, "rss", &declarations)?;
    tracing::trace!(items = feed.channel.items.len(), "feed encoded");
    Ok(encoder.finish())
}

/// Encodes a feed into `writer`.
pub fn encode_to_writer<W: Write>(
    feed: &Feed,
    mut writer: W,
    options: &EncodeOptions,
) -> Result<(), EncodeError> {
    let bytes = encode_with(feed, options)?;
    writer.write_all(&bytes).map_err(EncodeError::write)
}

/// Encoding state for one document.
pub struct Encoder {
    writer: Writer<Vec<u8>>,
}

impl Encoder {
    pub fn new(options: &EncodeOptions) -> Self {
        let writer = match options.indent {
            Some(width) => Writer::new_with_indent(Vec::new(), b' ', width),
            None => Writer::new(Vec::new()),
        };
        Self { writer }
    }

    pub fn write_declaration(&mut self) -> Result<(), EncodeError> {
        self.emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
    }

    /// Writes the document element, adding `declarations` after its own
    /// attributes.
    pub fn write_root<E: Entity>(
        &mut self,
        value: &E,
        tag: &str,
        declarations: &[(String, &str)],
    ) -> Result<(), EncodeError> {
        self.write_element(value, tag, declarations)
    }

    /// Writes `value` as the element `tag`.
    pub fn write_entity<E: Entity>(&mut self, value: &E, tag: &str) -> Result<(), EncodeError> {
        self.write_element(value, tag, &[])
    }

    fn write_element<E: Entity>(
        &mut self,
        value: &E,
        tag: &str,
        declarations: &[(String, &str)],
    ) -> Result<(), EncodeError> {
        let mut attributes = Vec::new();
        collect_attributes(value, &mut attributes);

        let mut start = BytesStart::new(tag);
        for attribute in &attributes {
            check_characters(attribute.entity, attribute.name, &attribute.value)?;
            start.push_attribute((attribute.name, attribute.value.as_str()));
        }
        for (name, uri) in declarations {
            start.push_attribute((name.as_str(), *uri));
        }

        if !has_body(value) {
            return self.emit(Event::Empty(start));
        }
        self.emit(Event::Start(start))?;
        self.write_body(value)?;
        self.emit(Event::End(BytesEnd::new(tag)))
    }

    /// Writes the child elements and character data of `value` in table order.
    pub fn write_body<E: Entity>(&mut self, value: &E) -> Result<(), EncodeError> {
        for binding in E::bindings() {
            match &binding.access {
                Access::Scalar { read, .. } => match binding.placement {
                    Placement::Attribute => {}
                    Placement::CharData => {
                        for text in read(value) {
                            self.write_text(E::NAME, binding, &text)?;
                        }
                    }
                    Placement::Element => {
                        let tag = binding.tag();
                        for text in read(value) {
                            self.emit(Event::Start(BytesStart::new(&*tag)))?;
                            self.write_text(E::NAME, binding, &text)?;
                            self.emit(Event::End(BytesEnd::new(&*tag)))?;
                        }
                    }
                },
                Access::Child { encode, .. } => encode(value, self, &*binding.tag())?,
                Access::Embed(embedded) => (embedded.write_body)(value, self)?,
            }
        }
        Ok(())
    }

    fn write_text<T: 'static>(
        &mut self,
        entity: &'static str,
        binding: &Binding<T>,
        text: &str,
    ) -> Result<(), EncodeError> {
        check_characters(entity, binding.name, text)?;
        match binding.wrap {
            TextWrap::Literal => {
                if text.contains("]]>") {
                    return Err(EncodeError::CDataTerminator {
                        entity,
                        field: binding.name,
                    });
                }
                self.emit(Event::Text(BytesText::new("")))?;
                self.emit(Event::CData(BytesCData::new(text)))
            }
            // A text event, even an empty one, keeps the indenting writer
            // from breaking the line between the start and end tags.
            TextWrap::Plain => self.emit(Event::Text(BytesText::new(text))),
        }
    }

    fn emit(&mut self, event: Event<'_>) -> Result<(), EncodeError> {
        self.writer.write_event(event).map_err(EncodeError::write)
    }

    pub fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

fn check_characters(
    entity: &'static str,
    field: &'static str,
    text: &str,
) -> Result<(), EncodeError> {
    match text.chars().find(|c| !is_xml_char(*c)) {
        Some(character) => Err(EncodeError::IllegalCharacter {
            entity,
            field,
            character,
        }),
        None => Ok(()),
    }
}

/// The XML 1.0 `Char` production.
pub(crate) fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{A}' | '\u{D}' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}
