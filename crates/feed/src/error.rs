// ABOUTME: Error types for decoding and encoding podcast feeds.
// ABOUTME: DecodeError carries byte positions into the input; EncodeError names the offending field.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while decoding a feed document.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input is not well-formed XML.
    #[error("malformed XML at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    /// The input ended while elements were still open.
    #[error("unexpected end of input at byte {position}")]
    UnexpectedEof { position: u64 },

    /// The input contains no root element at all.
    #[error("document has no root element")]
    MissingRoot,

    /// The root element is not an RSS `<rss>` element.
    #[error("expected <rss> root element, found <{found}> at byte {position}")]
    UnexpectedRoot { found: String, position: u64 },

    /// Markup or text follows the root element.
    #[error("unexpected content after the root element at byte {position}")]
    TrailingContent { position: u64 },

    /// A value could not be converted into the field's type.
    #[error("invalid value {value:?} for {entity} field `{field}` at byte {position}")]
    InvalidValue {
        entity: &'static str,
        field: &'static str,
        value: String,
        position: u64,
    },

    /// Reading the input failed.
    #[error("failed to read feed: {0}")]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// Creates a Syntax error from an underlying quick-xml error.
    pub fn syntax(position: u64, err: impl fmt::Display) -> Self {
        DecodeError::Syntax {
            position,
            message: err.to_string(),
        }
    }

    /// Byte offset the error refers to, when it has one.
    pub fn position(&self) -> Option<u64> {
        match self {
            DecodeError::Syntax { position, .. }
            | DecodeError::UnexpectedEof { position }
            | DecodeError::UnexpectedRoot { position, .. }
            | DecodeError::TrailingContent { position }
            | DecodeError::InvalidValue { position, .. } => Some(*position),
            DecodeError::MissingRoot | DecodeError::Io(_) => None,
        }
    }
}

/// A scalar that failed to convert, before the decoder attaches a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueError {
    pub entity: &'static str,
    pub field: &'static str,
    pub value: String,
}

impl ValueError {
    pub(crate) fn at(self, position: u64) -> DecodeError {
        DecodeError::InvalidValue {
            entity: self.entity,
            field: self.field,
            value: self.value,
            position,
        }
    }
}

/// Errors that can occur while encoding a feed.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A literal-text field contains `]]>`, which cannot appear inside CDATA.
    #[error("{entity} field `{field}` contains \"]]>\" and cannot be written as CDATA")]
    CDataTerminator {
        entity: &'static str,
        field: &'static str,
    },

    /// A field contains a character XML 1.0 cannot represent.
    #[error("{entity} field `{field}` contains {character:?}, which XML 1.0 cannot represent")]
    IllegalCharacter {
        entity: &'static str,
        field: &'static str,
        character: char,
    },

    /// The underlying writer failed.
    #[error("failed to write feed: {0}")]
    Write(String),
}

impl EncodeError {
    /// Creates a Write error from an underlying writer error.
    pub fn write(err: impl fmt::Display) -> Self {
        EncodeError::Write(err.to_string())
    }
}
