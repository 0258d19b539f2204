// ABOUTME: Configuration for decoding and encoding feeds.
// ABOUTME: DecodeOptions controls name resolution; EncodeOptions controls layout and declarations.

use crate::namespace::Namespace;

/// Options for the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Vocabulary assumed for unprefixed names when the document declares no
    /// default namespace.
    pub default_namespace: Namespace,
    /// Resolve undeclared `itunes:` and `podcast:` prefixes to their
    /// vocabularies. Many published feeds forget the declaration.
    pub conventional_prefixes: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            default_namespace: Namespace::Rss,
            conventional_prefixes: true,
        }
    }
}

impl DecodeOptions {
    /// Create DecodeOptions with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vocabulary for unprefixed names.
    pub fn default_namespace(mut self, namespace: Namespace) -> Self {
        self.default_namespace = namespace;
        self
    }

    /// Enable or disable conventional prefix resolution.
    pub fn conventional_prefixes(mut self, enabled: bool) -> Self {
        self.conventional_prefixes = enabled;
        self
    }
}

/// Options for the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Spaces per nesting level, or `None` for a single line.
    pub indent: Option<usize>,
    /// Write `<?xml version="1.0" encoding="UTF-8"?>` first.
    pub xml_declaration: bool,
    /// Declare the RSS namespace as the default namespace on `<rss>`.
    pub declare_default_namespace: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            indent: Some(2),
            xml_declaration: true,
            declare_default_namespace: false,
        }
    }
}

impl EncodeOptions {
    /// Create EncodeOptions with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indent nested elements by `width` spaces.
    pub fn indent(mut self, width: usize) -> Self {
        self.indent = Some(width);
        self
    }

    /// Write everything on one line.
    pub fn compact(mut self) -> Self {
        self.indent = None;
        self
    }

    /// Enable or disable the XML declaration.
    pub fn xml_declaration(mut self, enabled: bool) -> Self {
        self.xml_declaration = enabled;
        self
    }

    /// Enable or disable the default namespace declaration.
    pub fn declare_default_namespace(mut self, enabled: bool) -> Self {
        self.declare_default_namespace = enabled;
        self
    }
}
