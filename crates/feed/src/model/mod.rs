// ABOUTME: Typed schema for RSS 2.0 feeds with the iTunes and Podcasting 2.0 extensions.
// ABOUTME: Each type carries its binding table; feed.rs holds the composed Feed/Channel/Episode/LiveItem.

pub mod feed;
pub mod itunes;
pub mod podcast;
pub mod rss;

pub use feed::{Channel, Episode, Feed, LiveItem, LiveStatus, RSS_VERSION};
pub use itunes::{
    ChannelItunes, EpisodeItunes, EpisodeType, ItunesCategory, ItunesFlag, ItunesImage,
    ItunesOwner, ItunesSubcategory, ShowType,
};
pub use podcast::{
    AlternateEnclosure, Block, ChannelPodcast, Chapters, ContentLink, EnclosureSource,
    EpisodeNumber, EpisodePodcast, Funding, Images, Integrity, License, Locked, Location, Medium,
    MediumKind, Person, Podping, Podroll, RemoteItem, Season, SocialInteract, Soundbite, Trailer,
    Transcript, Txt, UpdateFrequency, Value, ValueRecipient, ValueTimeSplit, YesNo,
};
pub use rss::{
    Category, Cloud, CloudProtocol, Day, Enclosure, Guid, Hour, Image, Item, SkipDays, SkipHours,
    Source, TextInput,
};

/// Declares a closed set of keyword values and their wire spelling.
/// Parsing is case-insensitive; encoding always uses the listed spelling.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $text)] $variant),+
        }

        impl $name {
            /// The wire spelling of this value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl $crate::binding::XmlScalar for $name {
            fn parse_xml(raw: &str) -> Option<Self> {
                let raw = raw.trim();
                $(
                    if raw.eq_ignore_ascii_case($text) {
                        return Some($name::$variant);
                    }
                )+
                None
            }

            fn to_xml(&self) -> String {
                self.as_str().to_owned()
            }
        }
    };
}
pub(crate) use keyword_enum;
