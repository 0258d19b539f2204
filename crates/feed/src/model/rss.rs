// ABOUTME: Core RSS 2.0 element types: item, enclosure, guid, category, image, cloud and friends.
// ABOUTME: Item is the plain RSS item; podcast episodes embed it rather than redefining its fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::keyword_enum;
use crate::binding::{entity, XmlScalar};
use crate::time_parse::parse_flexible_time;

/// A category label with an optional taxonomy domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub value: String,
    pub domain: Option<String>,
}

entity! {
    Category as "category" {
        attr "domain" => domain,
        text => value,
    }
}

keyword_enum! {
    /// Protocol a `<cloud>` endpoint speaks.
    pub enum CloudProtocol {
        XmlRpc => "xml-rpc",
        Soap => "soap",
        HttpPost => "http-post",
    }
}

/// Change-notification endpoint for the channel (`<cloud>`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub domain: String,
    pub port: Option<u16>,
    pub path: String,
    pub register_procedure: String,
    pub protocol: Option<CloudProtocol>,
}

entity! {
    Cloud as "cloud" {
        attr "domain" => domain,
        attr "port" => port,
        attr "path" => path,
        attr "registerProcedure" => register_procedure,
        attr "protocol" => protocol,
    }
}

/// Channel artwork (`<image>`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub title: String,
    pub link: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub description: Option<String>,
}

entity! {
    Image as "image" {
        element Rss "url" => url,
        element Rss "title" => title,
        element Rss "link" => link,
        element Rss "width" => width,
        element Rss "height" => height,
        element Rss "description" => description,
    }
}

/// A text box shown with the channel (`<textInput>`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextInput {
    pub title: String,
    pub description: String,
    pub name: String,
    pub link: String,
}

entity! {
    TextInput as "textInput" {
        element Rss "title" => title,
        element Rss "description" => description,
        element Rss "name" => name,
        element Rss "link" => link,
    }
}

/// An hour of the day, 0 through 23.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hour(u8);

impl Hour {
    pub fn new(hour: u8) -> Option<Self> {
        (hour < 24).then_some(Hour(hour))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl XmlScalar for Hour {
    fn parse_xml(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().and_then(Hour::new)
    }

    fn to_xml(&self) -> String {
        self.0.to_string()
    }
}

/// Hours during which aggregators may skip polling (`<skipHours>`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkipHours {
    pub hours: Vec<Hour>,
}

entity! {
    SkipHours as "skipHours" {
        element Rss "hour" => hours,
    }
}

keyword_enum! {
    /// A day of the week as spelled in `<skipDays>`.
    pub enum Day {
        Monday => "Monday",
        Tuesday => "Tuesday",
        Wednesday => "Wednesday",
        Thursday => "Thursday",
        Friday => "Friday",
        Saturday => "Saturday",
        Sunday => "Sunday",
    }
}

/// Days on which aggregators may skip polling (`<skipDays>`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkipDays {
    pub days: Vec<Day>,
}

entity! {
    SkipDays as "skipDays" {
        element Rss "day" => days,
    }
}

/// A media file attached to an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enclosure {
    pub url: String,
    /// Size in bytes.
    pub length: Option<u64>,
    pub mime_type: Option<String>,
}

entity! {
    Enclosure as "enclosure" {
        attr "url" => url,
        attr "length" => length,
        attr "type" => mime_type,
    }
}

/// Globally unique item identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Guid {
    pub value: String,
    /// The `isPermaLink` attribute as written; `None` when it was absent.
    pub perma_link: Option<bool>,
}

entity! {
    Guid as "guid" {
        attr "isPermaLink" => perma_link,
        text => value,
    }
}

impl Guid {
    /// Whether the guid is a URL. RSS treats a missing `isPermaLink` as true.
    pub fn is_perma_link(&self) -> bool {
        self.perma_link.unwrap_or(true)
    }
}

/// The channel an item was republished from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub value: String,
    pub url: String,
}

entity! {
    Source as "source" {
        attr "url" => url,
        text => value,
    }
}

/// A plain RSS 2.0 item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub title: Option<String>,
    pub link: Option<String>,
    /// Free text, possibly HTML. Written as CDATA and kept byte-for-byte.
    pub description: Option<String>,
    pub author: Option<String>,
    pub categories: Vec<Category>,
    pub comments: Option<String>,
    pub enclosure: Option<Enclosure>,
    pub guid: Option<Guid>,
    pub pub_date: Option<String>,
    pub source: Option<Source>,
}

entity! {
    Item as "item" {
        element Rss "title" => title,
        element Rss "link" => link,
        cdata Rss "description" => description,
        element Rss "author" => author,
        child Rss "category" => categories,
        element Rss "comments" => comments,
        child Rss "enclosure" => enclosure,
        child Rss "guid" => guid,
        element Rss "pubDate" => pub_date,
        child Rss "source" => source,
    }
}

impl Item {
    /// Parses `pubDate`, returning None when it is absent or unreadable.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.pub_date.as_deref().and_then(parse_flexible_time)
    }
}
