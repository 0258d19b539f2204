// ABOUTME: Streaming decoder from XML bytes into the typed feed model.
// ABOUTME: Recursive descent over quick-xml events, dispatching names through the binding tables.

use std::io::Read;
use std::str;

use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesRef, BytesStart, BytesText, Event};
use quick_xml::Reader;

use crate::binding::{bind_attribute, bind_text, Access, Entity};
use crate::encode::is_xml_char;
use crate::error::{DecodeError, ValueError};
use crate::model::Feed;
use crate::namespace::{Namespace, NamespaceStack, QualifiedName};
use crate::options::DecodeOptions;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodes a feed document with default options.
pub fn decode(input: &[u8]) -> Result<Feed, DecodeError> {
    decode_with(input, &DecodeOptions::default())
}

/// Decodes a feed document.
pub fn decode_with(input: &[u8], options: &DecodeOptions) -> Result<Feed, DecodeError> {
    Decoder::new(input, options).decode_document(Namespace::Rss, "rss")
}

/// Reads `reader` to the end and decodes the bytes with default options.
pub fn decode_reader<R: Read>(mut reader: R) -> Result<Feed, DecodeError> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    decode(&input)
}

/// Decoding state for one document.
pub struct Decoder<'a> {
    reader: Reader<&'a [u8]>,
    scopes: NamespaceStack,
    offset: u64,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8], options: &DecodeOptions) -> Self {
        let (input, offset) = match input.strip_prefix(UTF8_BOM) {
            Some(rest) => (rest, UTF8_BOM.len() as u64),
            None => (input, 0),
        };
        let mut reader = Reader::from_reader(input);
        reader.config_mut().trim_text(false);
        Self {
            reader,
            scopes: NamespaceStack::new(options.default_namespace, options.conventional_prefixes),
            offset,
        }
    }

    /// Decodes the whole document, requiring its root element to be `root_name`
    /// in the `root` vocabulary.
    pub fn decode_document<E: Entity>(
        mut self,
        root: Namespace,
        root_name: &str,
    ) -> Result<E, DecodeError> {
        loop {
            let (start, empty) = match self.next()? {
                Event::Start(start) => (start, false),
                Event::Empty(start) => (start, true),
                Event::Text(text) if is_whitespace(&text) => continue,
                Event::Text(_) | Event::CData(_) | Event::GeneralRef(_) | Event::End(_) => {
                    return Err(DecodeError::syntax(
                        self.position(),
                        "content before the root element",
                    ));
                }
                Event::Eof => return Err(DecodeError::MissingRoot),
                _ => continue,
            };

            self.enter(&start)?;
            let raw = self.element_name(&start)?;
            if !self.scopes.resolve(raw).is(root, root_name) {
                return Err(DecodeError::UnexpectedRoot {
                    found: raw.to_owned(),
                    position: self.position(),
                });
            }
            tracing::trace!(root = raw, "decoding document");
            let value = self.read_entity::<E>(&start, empty)?;
            self.leave();
            self.finish()?;
            return Ok(value);
        }
    }

    /// Consumes whatever follows the root element. Only whitespace,
    /// comments and processing instructions may appear there.
    fn finish(&mut self) -> Result<(), DecodeError> {
        loop {
            match self.next()? {
                Event::Eof => return Ok(()),
                Event::Text(text) if is_whitespace(&text) => {}
                Event::Comment(_) | Event::PI(_) => {}
                _ => {
                    return Err(DecodeError::TrailingContent {
                        position: self.position(),
                    })
                }
            }
        }
    }

    /// Reads the attributes and body of the element `start` opened, building
    /// an `E` from them. The element's end tag is consumed.
    pub fn read_entity<E: Entity>(
        &mut self,
        start: &BytesStart<'_>,
        empty: bool,
    ) -> Result<E, DecodeError> {
        let mut value = E::default();

        for attr in start.attributes() {
            let attr = attr.map_err(|err| DecodeError::syntax(self.position(), err))?;
            let key = attr.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }
            let key = utf8(key, self.position())?;
            if key.contains(':') {
                tracing::trace!(entity = E::NAME, attribute = key, "ignoring qualified attribute");
                continue;
            }
            let raw = attr
                .unescape_value()
                .map_err(|err| DecodeError::syntax(self.position(), err))?;
            self.check_characters(&raw)?;
            let bound = bind_attribute(&mut value, key, &raw)
                .map_err(|err| err.at(self.position()))?;
            if !bound {
                tracing::debug!(entity = E::NAME, attribute = key, "skipping unrecognised attribute");
            }
        }

        if empty {
            return Ok(value);
        }

        let mut text = String::new();
        loop {
            match self.next()? {
                Event::Start(child) => self.read_child(&mut value, &child, false)?,
                Event::Empty(child) => self.read_child(&mut value, &child, true)?,
                Event::Text(chunk) => text.push_str(&self.decode_text(&chunk)?),
                Event::CData(chunk) => text.push_str(self.decode_cdata(chunk.as_ref())?),
                Event::GeneralRef(reference) => text.push(self.resolve_reference(&reference)?),
                Event::End(_) => break,
                Event::Eof => {
                    return Err(DecodeError::UnexpectedEof {
                        position: self.position(),
                    })
                }
                _ => {}
            }
        }

        bind_text(&mut value, &text).map_err(|err| err.at(self.position()))?;
        Ok(value)
    }

    fn read_child<E: Entity>(
        &mut self,
        value: &mut E,
        start: &BytesStart<'_>,
        empty: bool,
    ) -> Result<(), DecodeError> {
        self.enter(start)?;
        let raw = self.element_name(start)?;
        let name = self.scopes.resolve(raw);
        if !self.bind_child(value, &name, start, empty)? {
            tracing::debug!(entity = E::NAME, element = raw, "skipping unrecognised element");
            if !empty {
                self.skip()?;
            }
        }
        self.leave();
        Ok(())
    }

    /// Dispatches a child element of `value` through its binding table.
    /// Returns false when no binding claims the name.
    pub fn bind_child<E: Entity>(
        &mut self,
        value: &mut E,
        name: &QualifiedName<'_>,
        start: &BytesStart<'_>,
        empty: bool,
    ) -> Result<bool, DecodeError> {
        let Some(namespace) = name.namespace else {
            return Ok(false);
        };

        for binding in E::bindings() {
            match &binding.access {
                Access::Embed(embedded) => {
                    if (embedded.bind_child)(value, self, name, start, empty)? {
                        return Ok(true);
                    }
                }
                Access::Scalar { write, .. } if binding.matches_element(namespace, name.local) => {
                    let text = self.read_text(empty)?;
                    if !write(value, &text) {
                        return Err(ValueError {
                            entity: E::NAME,
                            field: binding.name,
                            value: text,
                        }
                        .at(self.position()));
                    }
                    return Ok(true);
                }
                Access::Child { decode, .. } if binding.matches_element(namespace, name.local) => {
                    decode(value, self, start, empty)?;
                    return Ok(true);
                }
                _ => {}
            }
        }
        Ok(false)
    }

    /// Collects the character data of a text-only element up to its end tag.
    fn read_text(&mut self, empty: bool) -> Result<String, DecodeError> {
        let mut text = String::new();
        if empty {
            return Ok(text);
        }
        loop {
            match self.next()? {
                Event::Text(chunk) => text.push_str(&self.decode_text(&chunk)?),
                Event::CData(chunk) => text.push_str(self.decode_cdata(chunk.as_ref())?),
                Event::GeneralRef(reference) => text.push(self.resolve_reference(&reference)?),
                Event::Start(_) => {
                    tracing::debug!("skipping markup inside a text-only element");
                    self.skip()?;
                }
                Event::End(_) => return Ok(text),
                Event::Eof => {
                    return Err(DecodeError::UnexpectedEof {
                        position: self.position(),
                    })
                }
                _ => {}
            }
        }
    }

    /// Skips to the end tag of the element that was just opened.
    fn skip(&mut self) -> Result<(), DecodeError> {
        let mut depth = 0usize;
        loop {
            match self.next()? {
                Event::Start(_) => depth += 1,
                Event::End(_) if depth == 0 => return Ok(()),
                Event::End(_) => depth -= 1,
                Event::Eof => {
                    return Err(DecodeError::UnexpectedEof {
                        position: self.position(),
                    })
                }
                _ => {}
            }
        }
    }

    /// Opens a namespace scope holding the element's own declarations.
    fn enter(&mut self, start: &BytesStart<'_>) -> Result<(), DecodeError> {
        self.scopes.push_scope();
        for attr in start.attributes() {
            let attr = attr.map_err(|err| DecodeError::syntax(self.position(), err))?;
            let key = attr.key.as_ref();
            let prefix = if key == b"xmlns" {
                None
            } else if let Some(prefix) = key.strip_prefix(b"xmlns:") {
                Some(utf8(prefix, self.position())?)
            } else {
                continue;
            };
            let uri = attr
                .unescape_value()
                .map_err(|err| DecodeError::syntax(self.position(), err))?;
            self.check_characters(&uri)?;
            self.scopes.declare(prefix, &uri);
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.scopes.pop_scope();
    }

    fn next(&mut self) -> Result<Event<'a>, DecodeError> {
        match self.reader.read_event() {
            Ok(event) => Ok(event),
            Err(err) => Err(DecodeError::syntax(
                self.reader.error_position() as u64 + self.offset,
                err,
            )),
        }
    }

    fn position(&self) -> u64 {
        self.reader.buffer_position() as u64 + self.offset
    }

    fn element_name<'s>(&self, start: &'s BytesStart<'_>) -> Result<&'s str, DecodeError> {
        utf8(start.name().into_inner(), self.position())
    }

    fn decode_text(&self, text: &BytesText<'_>) -> Result<String, DecodeError> {
        let text = text
            .decode()
            .map_err(|err| DecodeError::syntax(self.position(), err))?;
        self.check_characters(&text)?;
        Ok(text.into_owned())
    }

    fn decode_cdata<'s>(&self, bytes: &'s [u8]) -> Result<&'s str, DecodeError> {
        let text = utf8(bytes, self.position())?;
        self.check_characters(text)?;
        Ok(text)
    }

    /// Rejects characters outside the XML 1.0 `Char` production.
    fn check_characters(&self, text: &str) -> Result<(), DecodeError> {
        match text.chars().find(|c| !is_xml_char(*c)) {
            Some(character) => Err(DecodeError::syntax(
                self.position(),
                format!("character {character:?} is not allowed in XML"),
            )),
            None => Ok(()),
        }
    }

    /// Expands `&name;` and `&#N;` references. Only the five predefined
    /// entities are known; feeds cannot declare their own.
    fn resolve_reference(&self, reference: &BytesRef<'_>) -> Result<char, DecodeError> {
        let name = reference
            .decode()
            .map_err(|err| DecodeError::syntax(self.position(), err))?;

        let resolved = match name.strip_prefix('#') {
            Some(code) => {
                let parsed = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => code.parse::<u32>().ok(),
                };
                parsed.and_then(char::from_u32).filter(|c| is_xml_char(*c))
            }
            None => resolve_xml_entity(&name).and_then(|text| text.chars().next()),
        };

        resolved.ok_or_else(|| {
            DecodeError::syntax(self.position(), format!("invalid reference &{};", name))
        })
    }
}

fn is_whitespace(text: &BytesText<'_>) -> bool {
    text.iter().all(|byte| byte.is_ascii_whitespace())
}

fn utf8(bytes: &[u8], position: u64) -> Result<&str, DecodeError> {
    str::from_utf8(bytes).map_err(|err| DecodeError::syntax(position, err))
}
