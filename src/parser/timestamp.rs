use chrono::{DateTime, NaiveDateTime, Utc};

/// Advisory body timestamps: `2024 Nov 15 1230 UTC`.
const ADVISORY_FORMAT: &str = "%Y %b %d %H%M UTC";

/// Feed envelope timestamps: `2024-11-15 12:30:05.123`.
const FEED_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Parses an advisory timestamp as UTC. Runs of whitespace are tolerated.
pub fn parse_advisory_time(text: &str) -> Option<DateTime<Utc>> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDateTime::parse_from_str(&normalized, ADVISORY_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn parse_feed_time(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, FEED_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}
