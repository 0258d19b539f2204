// ABOUTME: Apple Podcasts (itunes:) extension elements for channels and episodes.
// ABOUTME: Explicit flags are tri-state; categories are a fixed two-level category/subcategory pair.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::keyword_enum;
use crate::binding::entity;
use crate::duration_parse::parse_duration;

/// Artwork reference (`<itunes:image href="..."/>`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItunesImage {
    pub href: String,
}

entity! {
    ItunesImage as "itunes:image" {
        attr "href" => href,
    }
}

/// A second-level Apple Podcasts category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItunesSubcategory {
    pub text: String,
}

entity! {
    ItunesSubcategory as "itunes:category" {
        attr "text" => text,
    }
}

/// A top-level Apple Podcasts category with an optional subcategory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItunesCategory {
    pub text: String,
    pub subcategory: Option<ItunesSubcategory>,
}

entity! {
    ItunesCategory as "itunes:category" {
        attr "text" => text,
        child Itunes "category" => subcategory,
    }
}

impl ItunesCategory {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            subcategory: None,
        }
    }

    pub fn with_subcategory(text: impl Into<String>, subcategory: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            subcategory: Some(ItunesSubcategory {
                text: subcategory.into(),
            }),
        }
    }
}

/// Contact details for the show's owner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItunesOwner {
    pub name: Option<String>,
    pub email: Option<String>,
}

entity! {
    ItunesOwner as "itunes:owner" {
        element Itunes "name" => name,
        element Itunes "email" => email,
    }
}

keyword_enum! {
    /// How episodes of a show are meant to be consumed.
    pub enum ShowType {
        Episodic => "episodic",
        Serial => "serial",
    }
}

keyword_enum! {
    /// The role of an episode within its show.
    pub enum EpisodeType {
        Full => "full",
        Trailer => "trailer",
        Bonus => "bonus",
    }
}

keyword_enum! {
    /// Apple's `Yes` marker for `itunes:complete` and `itunes:block`.
    pub enum ItunesFlag {
        Yes => "Yes",
        No => "No",
    }
}

impl ItunesFlag {
    pub fn is_set(self) -> bool {
        self == ItunesFlag::Yes
    }
}

/// iTunes fields of a channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelItunes {
    /// Always written, with an empty `href` when no artwork is set.
    pub image: ItunesImage,
    pub categories: Vec<ItunesCategory>,
    pub explicit: Option<bool>,
    pub author: Option<String>,
    pub owner: Option<ItunesOwner>,
    pub title: Option<String>,
    pub show_type: Option<ShowType>,
    pub new_feed_url: Option<String>,
    pub complete: Option<ItunesFlag>,
    pub block: Option<ItunesFlag>,
    pub apple_podcasts_verify: Option<String>,
}

entity! {
    ChannelItunes as "channel" {
        required Itunes "image" => image,
        child Itunes "category" => categories,
        element Itunes "explicit" => explicit,
        element Itunes "author" => author,
        child Itunes "owner" => owner,
        element Itunes "title" => title,
        element Itunes "type" => show_type,
        element Itunes "new-feed-url" => new_feed_url,
        element Itunes "complete" => complete,
        element Itunes "block" => block,
        element Itunes "applepodcastsverify" => apple_podcasts_verify,
    }
}

/// iTunes fields of an episode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeItunes {
    /// Running time as written: seconds, `MM:SS` or `HH:MM:SS`.
    pub duration: Option<String>,
    pub image: Option<ItunesImage>,
    pub explicit: Option<bool>,
    pub title: Option<String>,
    pub episode: Option<u32>,
    pub season: Option<u32>,
    pub episode_type: Option<EpisodeType>,
    pub block: Option<ItunesFlag>,
}

entity! {
    EpisodeItunes as "item" {
        element Itunes "duration" => duration,
        child Itunes "image" => image,
        element Itunes "explicit" => explicit,
        element Itunes "title" => title,
        element Itunes "episode" => episode,
        element Itunes "season" => season,
        element Itunes "episodeType" => episode_type,
        element Itunes "block" => block,
    }
}

impl EpisodeItunes {
    /// Parses `itunes:duration`. None when absent or unreadable.
    pub fn duration(&self) -> Option<Duration> {
        self.duration.as_deref().and_then(parse_duration)
    }
}
