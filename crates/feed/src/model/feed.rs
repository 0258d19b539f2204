// ABOUTME: The composed podcast feed: Feed, Channel, Episode and LiveItem.
// ABOUTME: Episode embeds Item and LiveItem embeds Episode; their binding tables union the embedded fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::itunes::{ChannelItunes, EpisodeItunes};
use super::keyword_enum;
use super::podcast::{ChannelPodcast, ContentLink, EpisodePodcast, Person, Value};
use super::rss::{Category, Cloud, Image, Item, SkipDays, SkipHours, TextInput};
use crate::binding::{entity, required_scalar};
use crate::time_parse::parse_flexible_time;

/// RSS version written by [`Feed::new`].
pub const RSS_VERSION: &str = "2.0";

/// A feed document: the `<rss>` element and its single channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    pub version: String,
    pub channel: Channel,
}

entity! {
    Feed as "rss" {
        attr "version" => version,
        required Rss "channel" => channel,
    }
}

impl Feed {
    /// Creates an RSS 2.0 feed around `channel`.
    pub fn new(channel: Channel) -> Self {
        Self {
            version: RSS_VERSION.to_string(),
            channel,
        }
    }
}

/// A show: RSS channel metadata, its extensions and its episodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub title: String,
    pub link: String,
    /// Free text, possibly HTML. Written as CDATA and kept byte-for-byte.
    pub description: String,
    pub language: Option<String>,
    pub copyright: Option<String>,
    pub managing_editor: Option<String>,
    pub web_master: Option<String>,
    pub pub_date: Option<String>,
    pub last_build_date: Option<String>,
    pub categories: Vec<Category>,
    pub generator: Option<String>,
    pub docs: Option<String>,
    pub cloud: Option<Cloud>,
    pub ttl: Option<u32>,
    pub image: Option<Image>,
    pub rating: Option<String>,
    pub text_input: Option<TextInput>,
    pub skip_hours: Option<SkipHours>,
    pub skip_days: Option<SkipDays>,
    pub itunes: ChannelItunes,
    pub podcast: ChannelPodcast,
    pub items: Vec<Episode>,
}

entity! {
    Channel as "channel" {
        element Rss "title" => title,
        element Rss "link" => link,
        cdata Rss "description" => description,
        element Rss "language" => language,
        element Rss "copyright" => copyright,
        element Rss "managingEditor" => managing_editor,
        element Rss "webMaster" => web_master,
        element Rss "pubDate" => pub_date,
        element Rss "lastBuildDate" => last_build_date,
        child Rss "category" => categories,
        element Rss "generator" => generator,
        element Rss "docs" => docs,
        child Rss "cloud" => cloud,
        element Rss "ttl" => ttl,
        child Rss "image" => image,
        element Rss "rating" => rating,
        child Rss "textInput" => text_input,
        child Rss "skipHours" => skip_hours,
        child Rss "skipDays" => skip_days,
        embed => itunes,
        embed => podcast,
        child Rss "item" => items,
    }
}

impl Channel {
    /// Parses `pubDate`, returning None when it is absent or unreadable.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.pub_date.as_deref().and_then(parse_flexible_time)
    }

    /// Parses `lastBuildDate`, returning None when it is absent or unreadable.
    pub fn last_built_at(&self) -> Option<DateTime<Utc>> {
        self.last_build_date.as_deref().and_then(parse_flexible_time)
    }
}

/// A podcast episode: an RSS item plus its iTunes and Podcasting 2.0 fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub item: Item,
    pub itunes: EpisodeItunes,
    pub podcast: EpisodePodcast,
}

entity! {
    Episode as "item" {
        embed => item,
        embed => itunes,
        embed => podcast,
    }
}

impl Episode {
    /// People credited on this episode. Episode-level people replace the
    /// channel's list rather than adding to it.
    pub fn people<'a>(&'a self, channel: &'a Channel) -> &'a [Person] {
        if self.podcast.people.is_empty() {
            &channel.podcast.people
        } else {
            &self.podcast.people
        }
    }

    /// Value blocks in effect for this episode, with the same override rule
    /// as [`Episode::people`].
    pub fn value_blocks<'a>(&'a self, channel: &'a Channel) -> &'a [Value] {
        if self.podcast.value.is_empty() {
            &channel.podcast.value
        } else {
            &self.podcast.value
        }
    }
}

keyword_enum! {
    /// Broadcast state of a live item.
    #[derive(Default)]
    pub enum LiveStatus {
        #[default]
        Pending => "pending",
        Live => "live",
        Ended => "ended",
    }
}

required_scalar!(LiveStatus);

/// A scheduled, running or finished live stream (`podcast:liveItem`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveItem {
    pub status: LiveStatus,
    /// ISO 8601 start time, as written.
    pub start: String,
    /// ISO 8601 end time, as written.
    pub end: Option<String>,
    pub episode: Episode,
    pub content_links: Vec<ContentLink>,
}

entity! {
    LiveItem as "podcast:liveItem" {
        attr "status" => status,
        attr "start" => start,
        attr "end" => end,
        embed => episode,
        child Podcast "contentLink" => content_links,
    }
}

impl LiveItem {
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        parse_flexible_time(&self.start)
    }

    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.end.as_deref().and_then(parse_flexible_time)
    }
}
