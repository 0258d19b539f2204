// ABOUTME: Typed codec for podcast RSS feeds: RSS 2.0 plus the itunes: and podcast: namespaces.
// ABOUTME: Provides decoding to a typed Feed, lossless re-encoding and date/duration helpers.

pub mod binding;
pub mod decode;
pub mod duration_parse;
pub mod encode;
pub mod error;
pub mod model;
pub mod namespace;
pub mod options;
pub mod time_parse;

pub use decode::{decode, decode_reader, decode_with};
pub use duration_parse::parse_duration;
pub use encode::{encode, encode_to_writer, encode_with};
pub use error::{DecodeError, EncodeError};
pub use model::*;
pub use namespace::{Namespace, ITUNES_NAMESPACE, PODCAST_NAMESPACE, RSS_NAMESPACE};
pub use options::{DecodeOptions, EncodeOptions};
pub use time_parse::{format_rfc2822, parse_flexible_time};
