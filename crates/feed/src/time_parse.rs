// ABOUTME: Lenient parsing of feed dates (pubDate, lastBuildDate, liveItem start/end).
// ABOUTME: Accepts RFC 2822, RFC 3339 and the common variants found in podcast feeds; formats RFC 2822.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// Parses a feed date written in any of the common RSS or ISO 8601 styles.
/// Returns the instant in UTC, or None if no format matches.
///
/// Dates stay strings on the model so they round-trip as written; this is
/// only used by the typed accessors.
pub fn parse_flexible_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = parse_with_named_timezone(s) {
        return Some(dt);
    }

    let formats_with_tz = [
        // "Mon, 02 Jan 2006 15:04:05 -0700"
        "%a, %d %b %Y %H:%M:%S %z",
        // "Mon, 2 Jan 2006 15:04 -0700"
        "%a, %e %b %Y %H:%M %z",
        // "02 Jan 2006 15:04:05 -0700"
        "%d %b %Y %H:%M:%S %z",
        "%e %b %Y %H:%M:%S %z",
        // liveItem times: "2021-09-26T07:30:00.000-0600"
        "%Y-%m-%dT%H:%M:%S%.f%z",
        "%Y-%m-%dT%H:%M:%S%z",
        "%Y-%m-%dT%H:%M%:z",
    ];

    for fmt in &formats_with_tz {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    // No zone given: assume UTC.
    let formats_naive = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%d %b %Y %H:%M:%S",
        "%e %b %Y %H:%M:%S",
    ];

    for fmt in &formats_naive {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    for fmt in ["%Y-%m-%d", "%d %b %Y"] {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(s, fmt) {
            let naive = date.and_hms_opt(0, 0, 0)?;
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    None
}

/// Formats an instant the way RSS date elements expect (RFC 2822, `+0000`).
pub fn format_rfc2822(when: &DateTime<Utc>) -> String {
    when.to_rfc2822()
}

/// Handles trailing zone abbreviations (EST, PDT, GMT...), which chrono's
/// `%Z` cannot parse.
fn parse_with_named_timezone(s: &str) -> Option<DateTime<Utc>> {
    const ZONES: &[(&str, i32)] = &[
        ("GMT", 0),
        ("UTC", 0),
        ("UT", 0),
        ("Z", 0),
        ("EST", -5 * 3600),
        ("EDT", -4 * 3600),
        ("CST", -6 * 3600),
        ("CDT", -5 * 3600),
        ("MST", -7 * 3600),
        ("MDT", -6 * 3600),
        ("PST", -8 * 3600),
        ("PDT", -7 * 3600),
        ("AKST", -9 * 3600),
        ("AKDT", -8 * 3600),
        ("HST", -10 * 3600),
        ("AST", -4 * 3600),
        ("ADT", -3 * 3600),
        ("WET", 0),
        ("WEST", 3600),
        ("CET", 3600),
        ("CEST", 2 * 3600),
        ("EET", 2 * 3600),
        ("EEST", 3 * 3600),
        ("BST", 3600),
        ("JST", 9 * 3600),
        ("AEST", 10 * 3600),
        ("AEDT", 11 * 3600),
        ("NZST", 12 * 3600),
        ("NZDT", 13 * 3600),
    ];
    const FORMATS: &[&str] = &[
        "%a, %d %b %Y %H:%M:%S",
        "%a, %e %b %Y %H:%M:%S",
        "%a, %d %b %Y %H:%M",
        "%a, %e %b %Y %H:%M",
        "%d %b %Y %H:%M:%S",
        "%e %b %Y %H:%M:%S",
    ];

    let (base, zone) = s.rsplit_once(' ')?;
    let offset_secs = ZONES
        .iter()
        .find(|(name, _)| zone.eq_ignore_ascii_case(name))
        .map(|(_, secs)| *secs)?;
    let base = base.trim_end();

    FORMATS.iter().find_map(|fmt| {
        let naive = NaiveDateTime::parse_from_str(base, fmt).ok()?;
        let dt = FixedOffset::east_opt(offset_secs)?
            .from_local_datetime(&naive)
            .single()?;
        Some(dt.with_timezone(&Utc))
    })
}
