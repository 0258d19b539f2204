// ABOUTME: Parsing for itunes:duration values.
// ABOUTME: Supports seconds (whole or fractional), MM:SS, HH:MM:SS and Go-style strings like "1h30m".

use std::time::Duration;

/// Parses an episode running time.
/// Supports:
/// - Plain seconds, optionally fractional ("1079", "1079.5")
/// - MM:SS and HH:MM:SS, where the last component may be fractional
/// - Go-style durations like "1h30m", "45m", "2h"
///
/// Returns None for blank or unreadable input.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(secs) = parse_seconds(s) {
        return Some(secs);
    }

    if s.contains(':') {
        return parse_clock(s);
    }

    ::parse_duration::parse(s).ok()
}

fn parse_seconds(s: &str) -> Option<Duration> {
    if let Ok(secs) = s.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }
    let secs = s.parse::<f64>().ok()?;
    Duration::try_from_secs_f64(secs).ok()
}

fn parse_clock(s: &str) -> Option<Duration> {
    let parts: Vec<&str> = s.split(':').collect();
    let (hours, mins, secs) = match parts.as_slice() {
        [mins, secs] => ("0", *mins, *secs),
        [hours, mins, secs] => (*hours, *mins, *secs),
        _ => return None,
    };

    let hours: u64 = hours.parse().ok()?;
    let mins: u64 = mins.parse().ok()?;
    let secs = parse_seconds(secs)?;
    let whole = hours.checked_mul(3600)?.checked_add(mins.checked_mul(60)?)?;
    Duration::from_secs(whole).checked_add(secs)
}
