// ABOUTME: Podcasting 2.0 (podcast:) extension elements for channels and episodes.
// ABOUTME: Covers people, value-for-value routing, alternate enclosures, live items and the rest of the namespace.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::feed::LiveItem;
use super::keyword_enum;
use crate::binding::{entity, required_scalar, XmlScalar};

keyword_enum! {
    /// Lowercase yes/no used by `podcast:locked` and `podcast:block`.
    #[derive(Default)]
    pub enum YesNo {
        Yes => "yes",
        #[default]
        No => "no",
    }
}

required_scalar!(YesNo);

/// The kind of content a feed carries, without the list variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediumKind {
    Podcast,
    Music,
    Video,
    Film,
    Audiobook,
    Newsletter,
    Blog,
}

impl MediumKind {
    const ALL: [MediumKind; 7] = [
        MediumKind::Podcast,
        MediumKind::Music,
        MediumKind::Video,
        MediumKind::Film,
        MediumKind::Audiobook,
        MediumKind::Newsletter,
        MediumKind::Blog,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MediumKind::Podcast => "podcast",
            MediumKind::Music => "music",
            MediumKind::Video => "video",
            MediumKind::Film => "film",
            MediumKind::Audiobook => "audiobook",
            MediumKind::Newsletter => "newsletter",
            MediumKind::Blog => "blog",
        }
    }
}

/// `podcast:medium`: a content kind, optionally as a list of such content
/// (written with an `L` suffix, e.g. `musicL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Medium {
    pub kind: MediumKind,
    pub list: bool,
}

impl Medium {
    pub fn new(kind: MediumKind) -> Self {
        Self { kind, list: false }
    }

    pub fn list_of(kind: MediumKind) -> Self {
        Self { kind, list: true }
    }
}

impl fmt::Display for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.list { "L" } else { "" };
        write!(f, "{}{}", self.kind.as_str(), suffix)
    }
}

impl XmlScalar for Medium {
    fn parse_xml(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (name, list) = match raw.strip_suffix('L') {
            Some(name) => (name, true),
            None => (raw, false),
        };
        MediumKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .map(|kind| Medium { kind, list })
    }

    fn to_xml(&self) -> String {
        self.to_string()
    }
}

/// A free-form verification record (`podcast:txt`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Txt {
    pub value: String,
    pub purpose: Option<String>,
}

entity! {
    Txt as "podcast:txt" {
        attr "purpose" => purpose,
        text => value,
    }
}

/// A pointer to another feed or to an item within it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteItem {
    pub feed_guid: String,
    pub feed_url: Option<String>,
    pub item_guid: Option<String>,
    pub medium: Option<Medium>,
}

entity! {
    RemoteItem as "podcast:remoteItem" {
        attr "feedGuid" => feed_guid,
        attr "feedUrl" => feed_url,
        attr "itemGuid" => item_guid,
        attr "medium" => medium,
    }
}

/// Feeds this show recommends (`podcast:podroll`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Podroll {
    pub remote_items: Vec<RemoteItem>,
}

entity! {
    Podroll as "podcast:podroll" {
        child Podcast "remoteItem" => remote_items,
    }
}

/// Whether other platforms may import the feed, and who to ask.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Locked {
    pub value: YesNo,
    pub owner: Option<String>,
}

entity! {
    Locked as "podcast:locked" {
        attr "owner" => owner,
        text => value,
    }
}

/// A donation or support link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Funding {
    pub url: String,
    /// Call-to-action label.
    pub label: String,
}

entity! {
    Funding as "podcast:funding" {
        attr "url" => url,
        text => label,
    }
}

/// Someone involved with the show or episode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub group: Option<String>,
    pub role: Option<String>,
    pub href: Option<String>,
    pub img: Option<String>,
}

entity! {
    Person as "podcast:person" {
        attr "group" => group,
        attr "role" => role,
        attr "href" => href,
        attr "img" => img,
        text => name,
    }
}

/// A place the content is about or was made in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub geo: Option<String>,
    pub osm: Option<String>,
}

entity! {
    Location as "podcast:location" {
        attr "geo" => geo,
        attr "osm" => osm,
        text => name,
    }
}

/// A promotional clip for the show.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trailer {
    pub title: String,
    pub pubdate: String,
    pub url: String,
    pub length: Option<u64>,
    pub mime_type: Option<String>,
    pub season: Option<u32>,
}

entity! {
    Trailer as "podcast:trailer" {
        attr "pubdate" => pubdate,
        attr "url" => url,
        attr "length" => length,
        attr "type" => mime_type,
        attr "season" => season,
        text => title,
    }
}

/// A content license, by SPDX identifier or name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub identifier: String,
    pub url: Option<String>,
}

entity! {
    License as "podcast:license" {
        attr "url" => url,
        text => identifier,
    }
}

/// One payee in a value block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueRecipient {
    pub name: Option<String>,
    pub custom_key: Option<String>,
    pub custom_value: Option<String>,
    pub kind: String,
    pub address: String,
    /// Share of the payment, relative to the other recipients.
    pub split: u32,
    pub fee: Option<bool>,
}

entity! {
    ValueRecipient as "podcast:valueRecipient" {
        attr "name" => name,
        attr "customKey" => custom_key,
        attr "customValue" => custom_value,
        attr "type" => kind,
        attr "address" => address,
        attr "split" => split,
        attr "fee" => fee,
    }
}

/// Redirects payment for a stretch of the episode to other recipients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueTimeSplit {
    pub start_time: f64,
    pub duration: f64,
    pub remote_start_time: Option<f64>,
    pub remote_percentage: Option<u32>,
    pub remote_item: Option<RemoteItem>,
    pub recipients: Vec<ValueRecipient>,
}

entity! {
    ValueTimeSplit as "podcast:valueTimeSplit" {
        attr "startTime" => start_time,
        attr "duration" => duration,
        attr "remoteStartTime" => remote_start_time,
        attr "remotePercentage" => remote_percentage,
        child Podcast "remoteItem" => remote_item,
        child Podcast "valueRecipient" => recipients,
    }
}

/// Value-for-value payment routing (`podcast:value`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Value {
    pub kind: String,
    pub method: String,
    pub suggested: Option<String>,
    pub recipients: Vec<ValueRecipient>,
    pub time_splits: Vec<ValueTimeSplit>,
}

entity! {
    Value as "podcast:value" {
        attr "type" => kind,
        attr "method" => method,
        attr "suggested" => suggested,
        child Podcast "valueRecipient" => recipients,
        child Podcast "valueTimeSplit" => time_splits,
    }
}

/// Opts the feed out of one directory, or all of them when `id` is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub value: YesNo,
    pub id: Option<String>,
}

entity! {
    Block as "podcast:block" {
        attr "id" => id,
        text => value,
    }
}

/// Artwork at several sizes, as an HTML-style `srcset`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Images {
    pub srcset: String,
}

entity! {
    Images as "podcast:images" {
        attr "srcset" => srcset,
    }
}

/// How often new content is expected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateFrequency {
    pub label: String,
    pub complete: Option<bool>,
    pub dtstart: Option<String>,
    pub rrule: Option<String>,
}

entity! {
    UpdateFrequency as "podcast:updateFrequency" {
        attr "complete" => complete,
        attr "dtstart" => dtstart,
        attr "rrule" => rrule,
        text => label,
    }
}

/// Whether the publisher announces updates over Podping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Podping {
    pub uses_podping: Option<bool>,
}

entity! {
    Podping as "podcast:podping" {
        attr "usesPodping" => uses_podping,
    }
}

/// A transcript or caption file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub url: String,
    pub mime_type: String,
    pub language: Option<String>,
    pub rel: Option<String>,
}

entity! {
    Transcript as "podcast:transcript" {
        attr "url" => url,
        attr "type" => mime_type,
        attr "language" => language,
        attr "rel" => rel,
    }
}

/// Link to a chapters document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chapters {
    pub url: String,
    pub mime_type: String,
}

entity! {
    Chapters as "podcast:chapters" {
        attr "url" => url,
        attr "type" => mime_type,
    }
}

/// A highlight worth sharing, in seconds from the start of the episode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Soundbite {
    pub start_time: f64,
    pub duration: f64,
    pub title: Option<String>,
}

entity! {
    Soundbite as "podcast:soundbite" {
        attr "startTime" => start_time,
        attr "duration" => duration,
        text => title,
    }
}

/// Season number with an optional name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub number: u32,
    pub name: Option<String>,
}

entity! {
    Season as "podcast:season" {
        attr "name" => name,
        text => number,
    }
}

/// Episode number, possibly fractional, with an optional display label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeNumber {
    pub number: f64,
    pub display: Option<String>,
}

entity! {
    EpisodeNumber as "podcast:episode" {
        attr "display" => display,
        text => number,
    }
}

/// Hash used to verify a downloaded file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Integrity {
    /// `sri` or `pgp-signature`.
    pub kind: String,
    pub value: String,
}

entity! {
    Integrity as "podcast:integrity" {
        attr "type" => kind,
        attr "value" => value,
    }
}

/// One location an alternate enclosure can be fetched from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnclosureSource {
    pub uri: String,
    pub content_type: Option<String>,
}

entity! {
    EnclosureSource as "podcast:source" {
        attr "uri" => uri,
        attr "contentType" => content_type,
    }
}

/// Another encoding or rendition of the episode media.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlternateEnclosure {
    pub mime_type: String,
    pub length: Option<u64>,
    /// Average bits per second.
    pub bitrate: Option<f64>,
    pub height: Option<u32>,
    pub lang: Option<String>,
    pub title: Option<String>,
    pub rel: Option<String>,
    pub codecs: Option<String>,
    pub default: Option<bool>,
    pub integrity: Option<Integrity>,
    pub sources: Vec<EnclosureSource>,
}

entity! {
    AlternateEnclosure as "podcast:alternateEnclosure" {
        attr "type" => mime_type,
        attr "length" => length,
        attr "bitrate" => bitrate,
        attr "height" => height,
        attr "lang" => lang,
        attr "title" => title,
        attr "rel" => rel,
        attr "codecs" => codecs,
        attr "default" => default,
        child Podcast "integrity" => integrity,
        child Podcast "source" => sources,
    }
}

/// A link to a social platform where listeners can discuss the episode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialInteract {
    pub protocol: String,
    pub uri: String,
    pub account_id: Option<String>,
    pub account_url: Option<String>,
    pub priority: Option<u32>,
}

entity! {
    SocialInteract as "podcast:socialInteract" {
        attr "protocol" => protocol,
        attr "uri" => uri,
        attr "accountId" => account_id,
        attr "accountUrl" => account_url,
        attr "priority" => priority,
    }
}

/// Where a live stream can be watched besides the enclosure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentLink {
    pub href: String,
    pub label: String,
}

entity! {
    ContentLink as "podcast:contentLink" {
        attr "href" => href,
        text => label,
    }
}

/// Podcasting 2.0 fields of a channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelPodcast {
    pub guid: Option<String>,
    pub medium: Option<Medium>,
    pub locked: Option<Locked>,
    pub txts: Vec<Txt>,
    pub funding: Vec<Funding>,
    pub people: Vec<Person>,
    pub location: Option<Location>,
    pub trailers: Vec<Trailer>,
    pub license: Option<License>,
    pub value: Vec<Value>,
    pub blocks: Vec<Block>,
    pub podroll: Option<Podroll>,
    pub images: Option<Images>,
    pub update_frequency: Option<UpdateFrequency>,
    pub podping: Option<Podping>,
    pub live_items: Vec<LiveItem>,
}

entity! {
    ChannelPodcast as "channel" {
        element Podcast "guid" => guid,
        element Podcast "medium" => medium,
        child Podcast "locked" => locked,
        child Podcast "txt" => txts,
        child Podcast "funding" => funding,
        child Podcast "person" => people,
        child Podcast "location" => location,
        child Podcast "trailer" => trailers,
        child Podcast "license" => license,
        child Podcast "value" => value,
        child Podcast "block" => blocks,
        child Podcast "podroll" => podroll,
        child Podcast "images" => images,
        child Podcast "updateFrequency" => update_frequency,
        child Podcast "podping" => podping,
        child Podcast "liveItem" => live_items,
    }
}

/// Podcasting 2.0 fields of an episode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodePodcast {
    pub transcripts: Vec<Transcript>,
    pub chapters: Option<Chapters>,
    pub soundbites: Vec<Soundbite>,
    /// When non-empty, replaces the channel's people for this episode.
    pub people: Vec<Person>,
    pub location: Option<Location>,
    pub season: Option<Season>,
    pub episode: Option<EpisodeNumber>,
    pub license: Option<License>,
    pub alternate_enclosures: Vec<AlternateEnclosure>,
    pub value: Vec<Value>,
    pub images: Option<Images>,
    pub social_interacts: Vec<SocialInteract>,
    pub update_frequency: Option<UpdateFrequency>,
    pub podping: Option<Podping>,
}

entity! {
    EpisodePodcast as "item" {
        child Podcast "transcript" => transcripts,
        child Podcast "chapters" => chapters,
        child Podcast "soundbite" => soundbites,
        child Podcast "person" => people,
        child Podcast "location" => location,
        child Podcast "season" => season,
        child Podcast "episode" => episode,
        child Podcast "license" => license,
        child Podcast "alternateEnclosure" => alternate_enclosures,
        child Podcast "value" => value,
        child Podcast "images" => images,
        child Podcast "socialInteract" => social_interacts,
        child Podcast "updateFrequency" => update_frequency,
        child Podcast "podping" => podping,
    }
}
