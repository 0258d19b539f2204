// ABOUTME: Integration tests for decoding podcast feeds into the typed model.
// ABOUTME: Covers the Apple and Podcasting 2.0 sample feeds, namespace resolution, tri-state flags and error reporting.

use std::time::Duration;

use podwire_feed::{
    decode, decode_reader, decode_with, DecodeError, DecodeOptions, Day, EpisodeType, LiveStatus,
    Medium, MediumKind, Namespace, ShowType, YesNo,
};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> Vec<u8> {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read(&path).unwrap_or_else(|err| panic!("reading {path}: {err}"))
}

fn wrap_channel(body: &str) -> String {
    format!(
        r#"<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd" xmlns:podcast="https://podcastindex.org/namespace/1.0"><channel><title>T</title><link>L</link><description>D</description>{body}</channel></rss>"#
    )
}

#[test]
fn test_apple_sample_channel() {
    let feed = decode(&fixture("hiking_treks.xml")).unwrap();
    let channel = &feed.channel;

    assert_eq!(feed.version, "2.0");
    assert_eq!(channel.title, "Hiking Treks");
    assert_eq!(channel.copyright.as_deref(), Some("\u{a9} 2020 John Appleseed"));
    assert!(channel.description.contains("nature's treasures"));
    assert_eq!(channel.language.as_deref(), Some("en-us"));

    let itunes = &channel.itunes;
    assert_eq!(
        itunes.image.href,
        "https://applehosted.podcasts.apple.com/hiking_treks/artwork.png"
    );
    assert_eq!(itunes.author.as_deref(), Some("The Sunset Explorers"));
    assert_eq!(itunes.show_type, Some(ShowType::Serial));
    assert_eq!(itunes.explicit, None, "channel explicit is not set in the sample");

    let owner = itunes.owner.as_ref().unwrap();
    assert_eq!(owner.name.as_deref(), Some("Sunset Explorers"));
    assert_eq!(owner.email.as_deref(), Some("mountainscape@icloud.com"));

    assert_eq!(itunes.categories.len(), 1);
    assert_eq!(itunes.categories[0].text, "Sports");
    assert_eq!(
        itunes.categories[0].subcategory.as_ref().map(|s| s.text.as_str()),
        Some("Wilderness")
    );
}

#[test]
fn test_apple_sample_episodes() {
    let feed = decode(&fixture("hiking_treks.xml")).unwrap();
    let items = &feed.channel.items;
    assert_eq!(items.len(), 8);

    let trailer = &items[0];
    assert_eq!(trailer.itunes.episode_type, Some(EpisodeType::Trailer));
    assert_eq!(trailer.itunes.title.as_deref(), Some("Hiking Treks Trailer"));
    assert_eq!(trailer.item.title, None);
    assert_eq!(trailer.itunes.episode, None);
    assert_eq!(trailer.itunes.season, None);
    assert!(trailer.itunes.image.is_none());
    assert_eq!(trailer.itunes.explicit, Some(false));
    assert_eq!(trailer.itunes.duration(), Some(Duration::from_secs(1079)));
    assert!(trailer
        .item
        .description
        .as_deref()
        .unwrap()
        .contains(r#"<a href="https://www.apple.com/itunes/podcasts/">Apple Podcasts</a>"#));

    let enclosure = trailer.item.enclosure.as_ref().unwrap();
    assert_eq!(enclosure.length, Some(498537));
    assert_eq!(enclosure.mime_type.as_deref(), Some("audio/mpeg"));

    let published = trailer.item.published_at().unwrap();
    assert_eq!(published.to_rfc3339(), "2019-01-08T01:15:00+00:00");

    for episode in &items[1..] {
        assert_eq!(episode.itunes.episode_type, Some(EpisodeType::Full));
        assert!(episode.item.title.is_some());
    }
    let numbering: Vec<_> = items[1..]
        .iter()
        .map(|e| (e.itunes.season, e.itunes.episode))
        .collect();
    assert_eq!(
        numbering,
        vec![
            (Some(2), Some(4)),
            (Some(2), Some(3)),
            (Some(2), Some(2)),
            (Some(2), Some(1)),
            (Some(1), Some(4)),
            (Some(1), Some(3)),
            (Some(1), Some(2)),
        ]
    );

    let with_images = items.iter().filter(|e| e.itunes.image.is_some()).count();
    assert_eq!(with_images, 3);

    let mt_hood = &items[1];
    assert_eq!(mt_hood.item.title.as_deref(), Some("S02 EP04 Mt. Hood, Oregon"));
    assert_eq!((mt_hood.itunes.season, mt_hood.itunes.episode), (Some(2), Some(4)));

    assert_eq!(items[4].itunes.explicit, Some(true));
    assert_eq!(items[4].itunes.duration(), Some(Duration::from_secs(804)));
    assert_eq!(items[7].itunes.duration(), Some(Duration::from_secs(3732)));
}

#[test]
fn test_podcasting20_channel() {
    let feed = decode(&fixture("podcasting20.xml")).unwrap();
    let channel = &feed.channel;
    let podcast = &channel.podcast;

    assert_eq!(channel.ttl, Some(60));
    assert_eq!(channel.itunes.explicit, Some(false));
    assert_eq!(podcast.guid.as_deref(), Some("y0ur-gu1d-g035-h3r3"));
    assert_eq!(podcast.medium, Some(Medium::new(MediumKind::Podcast)));

    let locked = podcast.locked.as_ref().unwrap();
    assert_eq!(locked.value, YesNo::Yes);
    assert_eq!(locked.owner.as_deref(), Some("podcastowner@example.com"));

    assert_eq!(podcast.txts[0].purpose.as_deref(), Some("verify"));
    assert_eq!(podcast.funding[0].label, "Support the show!");
    assert_eq!(podcast.people.len(), 2);
    assert_eq!(podcast.people[1].group.as_deref(), Some("visuals"));
    assert_eq!(podcast.location.as_ref().unwrap().name, "Austin, TX");
    assert_eq!(podcast.trailers[0].length, Some(12345678));
    assert_eq!(podcast.license.as_ref().unwrap().identifier, "my-podcast-license-v1");

    let value = &podcast.value[0];
    assert_eq!(value.kind, "lightning");
    assert_eq!(value.suggested.as_deref(), Some("0.00000005000"));
    assert_eq!(value.recipients.iter().map(|r| r.split).sum::<u32>(), 100);
    assert_eq!(value.recipients[1].fee, Some(true));
    assert_eq!(value.recipients[0].fee, None);

    assert_eq!(podcast.blocks[0].id.as_deref(), Some("youtube"));
    assert_eq!(podcast.blocks[0].value, YesNo::Yes);
    assert_eq!(podcast.update_frequency.as_ref().unwrap().label, "Weekly");
    assert_eq!(podcast.podping.as_ref().unwrap().uses_podping, Some(true));
    assert!(channel.published_at().is_some());
    assert_eq!(channel.published_at(), channel.last_built_at());
}

#[test]
fn test_podcasting20_live_item_embeds_episode_fields() {
    let feed = decode(&fixture("podcasting20.xml")).unwrap();
    let live = &feed.channel.podcast.live_items[0];

    assert_eq!(live.status, LiveStatus::Live);
    assert_eq!(live.start, "2021-09-26T07:30:00.000-0600");
    assert_eq!(live.ends_at().unwrap() - live.starts_at().unwrap(), chrono::Duration::hours(2));

    assert_eq!(live.episode.item.title.as_deref(), Some("Podcasting 2.0 Live Show"));
    assert_eq!(
        live.episode.item.guid.as_ref().map(|g| g.is_perma_link()),
        Some(true)
    );
    assert_eq!(live.episode.item.enclosure.as_ref().unwrap().length, Some(312));
    assert_eq!(live.episode.podcast.people[0].name, "John Doe");

    assert_eq!(live.content_links.len(), 1);
    assert_eq!(live.content_links[0].label, "Listen Live!");
    assert_eq!(live.content_links[0].href, "https://example.com/html/livestream");
}

#[test]
fn test_podcasting20_episode() {
    let feed = decode(&fixture("podcasting20.xml")).unwrap();
    let channel = &feed.channel;
    assert_eq!(channel.items.len(), 1);
    let episode = &channel.items[0];

    assert_eq!(
        episode.item.description.as_deref(),
        Some("<p>A look into the future of podcasting and how we get to Podcasting 2.0!</p>")
    );
    assert_eq!(episode.itunes.explicit, Some(true));
    assert_eq!(episode.itunes.duration(), Some(Duration::from_secs(3980)));

    let podcast = &episode.podcast;
    assert_eq!(podcast.season.as_ref().unwrap().number, 1);
    assert_eq!(podcast.season.as_ref().unwrap().name.as_deref(), Some("Podcasting 2.0"));
    assert_eq!(podcast.episode.as_ref().unwrap().number, 3.0);
    assert_eq!(podcast.episode.as_ref().unwrap().display.as_deref(), Some("Ep. 3"));
    assert_eq!(podcast.chapters.as_ref().unwrap().mime_type, "application/json");
    assert_eq!(podcast.soundbites.len(), 2);
    assert_eq!(podcast.soundbites[0].title, None);
    assert_eq!(podcast.soundbites[1].title.as_deref(), Some("Why the Future is Now"));
    assert_eq!(podcast.soundbites[1].start_time, 2110.5);
    assert_eq!(podcast.transcripts[1].rel.as_deref(), Some("captions"));
    assert_eq!(podcast.location.as_ref().unwrap().osm.as_deref(), Some("R113314"));
    assert_eq!(podcast.license.as_ref().unwrap().identifier, "cc-by-4.0");
    assert!(podcast.images.as_ref().unwrap().srcset.contains("1500w"));
    assert_eq!(podcast.social_interacts[0].priority, Some(1));

    let alternates = &podcast.alternate_enclosures;
    assert_eq!(alternates.len(), 5);
    assert_eq!(
        alternates.iter().filter(|a| a.mime_type.starts_with("audio/")).count(),
        4
    );
    assert_eq!(alternates[0].default, Some(true));
    assert_eq!(alternates[0].sources.len(), 2);
    assert_eq!(alternates[2].sources.len(), 1);

    let video = &alternates[4];
    assert_eq!(video.mime_type, "video/mp4");
    assert_eq!(video.height, Some(720));
    assert_eq!(video.bitrate, Some(511276.52));
    assert_eq!(video.codecs.as_deref(), Some("avc1.640028, mp4a.40.2"));
    let integrity = video.integrity.as_ref().unwrap();
    assert_eq!(integrity.kind, "sri");
    assert!(integrity.value.starts_with("sha384-"));
    assert_eq!(
        video.sources[1].content_type.as_deref(),
        Some("application/x-bittorrent")
    );

    let split = &podcast.value[0].time_splits[0];
    assert_eq!((split.start_time, split.duration), (60.0, 237.0));
    assert_eq!(split.remote_percentage, Some(95));
    let remote = split.remote_item.as_ref().unwrap();
    assert_eq!(remote.feed_guid, "a94f5cc9-8c58-55fc-91fe-a324087a655b");
    assert_eq!(remote.medium, Some(Medium::new(MediumKind::Music)));
}

#[test]
fn test_episode_people_and_value_override_channel() {
    let feed = decode(&fixture("podcasting20.xml")).unwrap();
    let channel = &feed.channel;
    let episode = &channel.items[0];

    let people = episode.people(channel);
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].name, "Alice (Guest)");

    let value = episode.value_blocks(channel);
    assert_eq!(value.len(), 1);
    assert_eq!(value[0].recipients[0].name.as_deref(), Some("Guest"));

    let live_episode = &channel.podcast.live_items[0].episode;
    assert!(live_episode.podcast.value.is_empty());
    assert_eq!(live_episode.value_blocks(channel), channel.podcast.value.as_slice());
}

#[test]
fn test_same_local_name_in_different_namespaces() {
    let xml = wrap_channel(
        r#"<itunes:title>Show (Apple)</itunes:title>
        <item>
            <title>RSS title</title>
            <itunes:title>Apple title</itunes:title>
            <itunes:episode>7</itunes:episode>
            <podcast:episode>7.5</podcast:episode>
            <podcast:season>2</podcast:season>
            <itunes:season>3</itunes:season>
            <itunes:image href="https://example.com/itunes.jpg"/>
            <podcast:images srcset="https://example.com/p.jpg 600w"/>
        </item>"#,
    );
    let feed = decode(xml.as_bytes()).unwrap();
    let channel = &feed.channel;
    assert_eq!(channel.title, "T");
    assert_eq!(channel.itunes.title.as_deref(), Some("Show (Apple)"));

    let episode = &channel.items[0];
    assert_eq!(episode.item.title.as_deref(), Some("RSS title"));
    assert_eq!(episode.itunes.title.as_deref(), Some("Apple title"));
    assert_eq!(episode.itunes.episode, Some(7));
    assert_eq!(episode.podcast.episode.as_ref().unwrap().number, 7.5);
    assert_eq!(episode.itunes.season, Some(3));
    assert_eq!(episode.podcast.season.as_ref().unwrap().number, 2);
    assert_eq!(
        episode.itunes.image.as_ref().unwrap().href,
        "https://example.com/itunes.jpg"
    );
    assert!(episode.podcast.images.is_some());
}

#[test]
fn test_bindings_follow_declared_uri_not_prefix() {
    let xml = r#"<rss version="2.0" xmlns:apple="http://www.itunes.com/dtds/podcast-1.0.dtd" xmlns:itunes="https://example.com/not-itunes">
        <channel>
            <title>T</title>
            <apple:author>Declared under another prefix</apple:author>
            <itunes:author>Wrong vocabulary</itunes:author>
        </channel>
    </rss>"#;
    let feed = decode(xml.as_bytes()).unwrap();
    assert_eq!(
        feed.channel.itunes.author.as_deref(),
        Some("Declared under another prefix")
    );
}

#[test]
fn test_default_namespace_resolution() {
    let declared = r#"<rss xmlns="https://www.rssboard.org/rss-specification" version="2.0"><channel><title>Declared</title></channel></rss>"#;
    assert_eq!(decode(declared.as_bytes()).unwrap().channel.title, "Declared");

    let undeclared = r#"<rss version="2.0"><channel><title>Undeclared</title></channel></rss>"#;
    assert_eq!(decode(undeclared.as_bytes()).unwrap().channel.title, "Undeclared");

    // A channel child that redeclares the default moves its own unprefixed
    // names out of the RSS vocabulary.
    let foreign = r#"<rss version="2.0"><channel>
        <title>Kept</title>
        <image xmlns="http://www.w3.org/2005/Atom"><url>https://example.com/a.png</url></image>
    </channel></rss>"#;
    let feed = decode(foreign.as_bytes()).unwrap();
    assert_eq!(feed.channel.title, "Kept");
    assert!(feed.channel.image.is_none());
}

#[test]
fn test_default_namespace_option() {
    let xml = r#"<rss:rss xmlns:rss="https://www.rssboard.org/rss-specification"><rss:channel><rss:title>T</rss:title><author>A</author></rss:channel></rss:rss>"#;

    let feed = decode(xml.as_bytes()).unwrap();
    assert_eq!(feed.channel.title, "T");
    assert_eq!(feed.channel.itunes.author, None);

    let options = DecodeOptions::new().default_namespace(Namespace::Itunes);
    let feed = decode_with(xml.as_bytes(), &options).unwrap();
    assert_eq!(feed.channel.title, "T");
    assert_eq!(feed.channel.itunes.author.as_deref(), Some("A"));

    let err = decode_with(b"<rss><channel/></rss>", &options).unwrap_err();
    assert!(matches!(err, DecodeError::UnexpectedRoot { .. }), "got {err:?}");
}

#[test]
fn test_conventional_prefixes_can_be_required() {
    let xml = r#"<rss version="2.0"><channel><title>T</title><itunes:author>A</itunes:author></channel></rss>"#;

    let lenient = decode(xml.as_bytes()).unwrap();
    assert_eq!(lenient.channel.itunes.author.as_deref(), Some("A"));

    let strict = DecodeOptions::new().conventional_prefixes(false);
    let feed = decode_with(xml.as_bytes(), &strict).unwrap();
    assert_eq!(feed.channel.itunes.author, None);
}

#[test]
fn test_explicit_is_tri_state() {
    let cases = [
        ("", None),
        ("<itunes:explicit>true</itunes:explicit>", Some(true)),
        ("<itunes:explicit>yes</itunes:explicit>", Some(true)),
        ("<itunes:explicit>Explicit</itunes:explicit>", Some(true)),
        ("<itunes:explicit>false</itunes:explicit>", Some(false)),
        ("<itunes:explicit>no</itunes:explicit>", Some(false)),
        ("<itunes:explicit>clean</itunes:explicit>", Some(false)),
        ("<itunes:explicit> </itunes:explicit>", None),
        ("<itunes:explicit/>", None),
    ];
    for (body, expected) in cases {
        let xml = wrap_channel(body);
        let feed = decode(xml.as_bytes()).unwrap();
        assert_eq!(feed.channel.itunes.explicit, expected, "for {body:?}");
    }
}

#[test]
fn test_invalid_typed_value_is_reported() {
    let xml = wrap_channel("<item><itunes:episode>four</itunes:episode></item>");
    match decode(xml.as_bytes()).unwrap_err() {
        DecodeError::InvalidValue {
            entity,
            field,
            value,
            position,
        } => {
            assert_eq!(entity, "item");
            assert_eq!(field, "episode");
            assert_eq!(value, "four");
            assert!(position > 0);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_invalid_attribute_value_is_reported() {
    let xml = wrap_channel(
        r#"<item><enclosure url="https://example.com/a.mp3" length="big" type="audio/mpeg"/></item>"#,
    );
    let err = decode(xml.as_bytes()).unwrap_err();
    assert!(
        matches!(err, DecodeError::InvalidValue { field: "length", .. }),
        "got {err:?}"
    );
}

#[test]
fn test_blank_numeric_is_absent() {
    let xml = wrap_channel("<ttl> </ttl><item><itunes:season></itunes:season></item>");
    let feed = decode(xml.as_bytes()).unwrap();
    assert_eq!(feed.channel.ttl, None);
    assert_eq!(feed.channel.items[0].itunes.season, None);
}

#[test]
fn test_truncated_input_reports_position() {
    let full = fixture("podcasting20.xml");
    for cut in [full.len() / 3, full.len() / 2, full.len() - 10] {
        let err = decode(&full[..cut]).unwrap_err();
        let position = err
            .position()
            .unwrap_or_else(|| panic!("no position for cut at {cut}: {err:?}"));
        assert!(position <= cut as u64, "position {position} past cut {cut}");
    }
}

#[test]
fn test_mismatched_end_tag_is_malformed() {
    let err = decode(b"<rss><channel><title>T</link></channel></rss>").unwrap_err();
    assert!(matches!(err, DecodeError::Syntax { .. }), "got {err:?}");
    assert!(err.to_string().starts_with("malformed XML at byte"));
}

#[test]
fn test_unknown_vocabulary_is_ignored() {
    let xml = wrap_channel(
        r#"<media:content xmlns:media="http://search.yahoo.com/mrss/" url="x"><media:title>M</media:title></media:content>
        <podcast:notYetStandard>value</podcast:notYetStandard>
        <item><title>after</title></item>"#,
    );
    let feed = decode(xml.as_bytes()).unwrap();
    assert_eq!(feed.channel.items[0].item.title.as_deref(), Some("after"));
}

#[test]
fn test_decode_reader_matches_decode() {
    let bytes = fixture("hiking_treks.xml");
    let from_reader = decode_reader(bytes.as_slice()).unwrap();
    assert_eq!(from_reader, decode(&bytes).unwrap());
}

#[test]
fn test_rss_board_sample() {
    let feed = decode(&fixture("rss_board_sample.xml")).unwrap();
    let channel = &feed.channel;

    assert_eq!(feed.version, "2.0");
    assert_eq!(channel.title, "NASA Space Station News");
    assert_eq!(channel.link, "http://www.nasa.gov/");
    assert!(channel.description.starts_with("A RSS news feed"));
    assert_eq!(channel.language.as_deref(), Some("en-us"));
    assert_eq!(channel.generator.as_deref(), Some("Blosxom 2.1.2"));
    assert_eq!(
        channel.docs.as_deref(),
        Some("https://www.rssboard.org/rss-specification")
    );
    assert_eq!(
        channel.managing_editor.as_deref(),
        Some("neil.armstrong@example.com (Neil Armstrong)")
    );
    assert_eq!(
        channel.web_master.as_deref(),
        Some("sally.ride@example.com (Sally Ride)")
    );
    assert_eq!(
        channel.last_build_date.as_deref(),
        Some("Fri, 21 Jul 2023 09:04 EDT")
    );
    assert_eq!(
        channel.published_at().unwrap().to_rfc3339(),
        "2003-06-10T04:00:00+00:00"
    );
    assert!(channel.cloud.is_none());
    assert!(channel.image.is_none());
    assert!(channel.categories.is_empty());

    let items = &channel.items;
    assert_eq!(items.len(), 5);
    assert_eq!(items[1].item.title, None);
    assert!(items[1].item.link.as_deref().unwrap().ends_with("contract-iii"));

    let enclosure = items[2].item.enclosure.as_ref().unwrap();
    assert!(enclosure.url.ends_with("iss068e027836orig.jpg?itok=ucNUaaGx"));
    assert_eq!(enclosure.length, Some(1032272));
    assert_eq!(enclosure.mime_type.as_deref(), Some("image/jpeg"));
    assert_eq!(items[4].item.enclosure.as_ref().unwrap().length, Some(269866));

    let guid = items[4].item.guid.as_ref().unwrap();
    assert_eq!(guid.value, "http://liftoff.msfc.nasa.gov/2003/05/20.html#item570");
    assert_eq!(guid.perma_link, None);
    assert!(guid.is_perma_link());
    assert_eq!(
        items[3].item.published_at().unwrap().to_rfc3339(),
        "2003-05-20T08:56:02+00:00"
    );
}

#[test]
fn test_complex_sample_channel() {
    let feed = decode(&fixture("complex_sample.xml")).unwrap();
    let channel = &feed.channel;

    assert_eq!(channel.title, "Epic Podcast");
    assert_eq!(channel.description, r#"<a href="www.starwars.jayd.ml">test</a>"#);
    assert_eq!(channel.copyright.as_deref(), Some("(c) some guy"));
    assert_eq!(channel.ttl, Some(118999));
    assert_eq!(channel.rating.as_deref(), Some("what even is this pics stuff"));

    let categories: Vec<_> = channel
        .categories
        .iter()
        .map(|c| (c.value.as_str(), c.domain.as_deref()))
        .collect();
    assert_eq!(
        categories,
        vec![
            ("bad", None),
            ("good", None),
            ("this one has a domain", Some("https://constoso.com")),
        ]
    );

    let image = channel.image.as_ref().unwrap();
    assert_eq!(image.url, "https://contoso.com/asdf.gif");
    assert_eq!(image.title, "My Epic Picture");
    assert_eq!(image.link, "https://contoso.com");
    assert_eq!(image.width, Some(1234567));
    assert_eq!(image.height, None);
    assert_eq!(image.description.as_deref(), Some("some epic logo idk"));

    let text_input = channel.text_input.as_ref().unwrap();
    assert_eq!(text_input.title, "text input title");
    assert_eq!(text_input.description, "description of the text input");
    assert_eq!(text_input.name, "name of the text input");
    assert_eq!(text_input.link, "link of the text input");

    let hours: Vec<u8> = channel
        .skip_hours
        .as_ref()
        .unwrap()
        .hours
        .iter()
        .map(|h| h.get())
        .collect();
    assert_eq!(hours, vec![1, 4, 9]);
    assert_eq!(
        channel.skip_days.as_ref().unwrap().days,
        vec![Day::Tuesday, Day::Saturday]
    );

    let cloud = channel.cloud.as_ref().unwrap();
    assert_eq!(cloud.domain, "consoto.com");
    assert_eq!(cloud.port, Some(12345));
    assert_eq!(cloud.path, "/some/location");
    assert_eq!(cloud.register_procedure, "what even is this 2000s rpc crap");
    // The sample misspells the attribute as `procotol`.
    assert_eq!(cloud.protocol, None);
}

#[test]
fn test_complex_sample_items() {
    let feed = decode(&fixture("complex_sample.xml")).unwrap();
    let items = &feed.channel.items;
    assert_eq!(items.len(), 2);

    let first = &items[0].item;
    assert_eq!(first.title.as_deref(), Some("episode 1"));
    assert_eq!(
        first.description.as_deref(),
        Some(r#"<a href="www.starwars.jayd.ml">test</a>"#)
    );
    assert_eq!(first.author.as_deref(), Some("bob@consoto.com"));
    assert_eq!(first.comments.as_deref(), Some("https://google.com"));
    assert_eq!(first.categories.len(), 3);
    assert_eq!(first.categories[2].domain.as_deref(), Some("https://constoso.com"));

    // Enclosure fields are attributes; child elements carry nothing.
    let enclosure = first.enclosure.as_ref().unwrap();
    assert_eq!(enclosure.url, "");
    assert_eq!(enclosure.length, None);
    assert_eq!(enclosure.mime_type, None);

    let guid = first.guid.as_ref().unwrap();
    assert_eq!((guid.value.as_str(), guid.perma_link), ("guid-1", Some(true)));
    let source = first.source.as_ref().unwrap();
    assert_eq!(source.url, "has_url");
    assert_eq!(source.value, "https://stuff.com");

    let second = &items[1].item;
    assert_eq!(second.title, None);
    let guid = second.guid.as_ref().unwrap();
    assert_eq!(guid.value, "link.com");
    assert!(!guid.is_perma_link());
}

#[test]
fn test_rss_and_itunes_categories_are_kept_apart() {
    let xml = wrap_channel(
        r#"<category domain="https://example.com/taxonomy">Outdoors</category>
        <itunes:category text="Sports"><itunes:category text="Wilderness"/></itunes:category>
        <category>Hiking</category>
        <itunes:category text="Leisure"/>"#,
    );
    let feed = decode(xml.as_bytes()).unwrap();
    let channel = &feed.channel;

    assert_eq!(channel.categories.len(), 2);
    assert_eq!(channel.categories[0].value, "Outdoors");
    assert_eq!(
        channel.categories[0].domain.as_deref(),
        Some("https://example.com/taxonomy")
    );
    assert_eq!(channel.categories[1].value, "Hiking");
    assert_eq!(channel.categories[1].domain, None);

    let itunes = &channel.itunes.categories;
    assert_eq!(itunes.len(), 2);
    assert_eq!(itunes[0].text, "Sports");
    assert_eq!(itunes[0].subcategory.as_ref().unwrap().text, "Wilderness");
    assert_eq!(itunes[1].text, "Leisure");
    assert!(itunes[1].subcategory.is_none());
}

#[test]
fn test_channel_podroll() {
    let xml = wrap_channel(
        r#"<podcast:podroll>
            <podcast:remoteItem feedGuid="917393e3-1b1e-5cef-ace4-edaa54e1f810"/>
            <podcast:remoteItem feedGuid="a94f5cc9-8c58-55fc-91fe-a324087a655b" feedUrl="https://example.com/music.xml" itemGuid="track-1" medium="music"/>
        </podcast:podroll>"#,
    );
    let feed = decode(xml.as_bytes()).unwrap();
    let podroll = feed.channel.podcast.podroll.as_ref().unwrap();
    assert_eq!(podroll.remote_items.len(), 2);

    let first = &podroll.remote_items[0];
    assert_eq!(first.feed_guid, "917393e3-1b1e-5cef-ace4-edaa54e1f810");
    assert_eq!(first.feed_url, None);
    assert_eq!(first.medium, None);

    let second = &podroll.remote_items[1];
    assert_eq!(second.feed_url.as_deref(), Some("https://example.com/music.xml"));
    assert_eq!(second.item_guid.as_deref(), Some("track-1"));
    assert_eq!(second.medium, Some(Medium::new(MediumKind::Music)));
}

#[test]
fn test_legacy_itunes_uri_spelling() {
    let xml = r#"<rss version="2.0" xmlns:itunes="http://www.itunes.com/DTDs/Podcast-1.0.dtd"><channel><title>T</title><itunes:author>A</itunes:author></channel></rss>"#;
    let feed = decode(xml.as_bytes()).unwrap();
    assert_eq!(feed.channel.itunes.author.as_deref(), Some("A"));
}
