use super::timestamp::parse_advisory_time;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

const TIMESTAMP: &str = r"([0-9]{4}\s+[A-Za-z]{3}\s+[0-9]{2}\s+[0-9]{4}\s+UTC)";

/// Every marker pattern the router and extractors search for.
pub struct Patterns {
    pub message_code: Regex,
    pub serial_number: Regex,
    pub issue_time: Regex,

    pub alert: Regex,
    pub watch: Regex,
    pub geomagnetic_label: Regex,
    pub electron_label: Regex,
    pub watch_label: Regex,
    pub generic_label: Regex,

    pub begin_time: Regex,
    pub threshold_reached: Regex,
    pub valid_from: Regex,
    pub valid_to: Regex,

    pub estimated_velocity: Regex,
    pub warning_condition: Regex,
    pub noaa_scale: Regex,
    pub maximum_flux: Regex,
    pub description: Regex,
    pub potential_impacts: Regex,
    pub forecast_data: Regex,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid advisory marker regex")
}

fn timestamp_marker(marker: &str) -> Regex {
    compile(&format!(r"{marker}\s*{TIMESTAMP}"))
}

fn line_marker(marker: &str) -> Regex {
    compile(&format!(r"{marker}\s*([^\r\n]+)"))
}

pub fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        message_code: compile(r"Space Weather Message Code:\s*([A-Za-z0-9]+)"),
        serial_number: compile(r"Serial Number:\s*(\d+)"),
        issue_time: timestamp_marker("Issue Time:"),

        alert: line_marker("ALERT:"),
        watch: line_marker("WATCH:"),
        geomagnetic_label: compile(r"(ALERT|WARNING|EXTENDED WARNING):\s*([^\r\n]+)"),
        electron_label: compile(r"(ALERT|CONTINUED ALERT):\s*([^\r\n]+)"),
        watch_label: compile(r"(ALERT|WARNING|WATCH|EXTENDED WARNING):\s*([^\r\n]+)"),
        generic_label: compile(
            r"(ALERT|WARNING|WATCH|EXTENDED WARNING|CONTINUED ALERT):\s*([^\r\n]+)",
        ),

        begin_time: timestamp_marker("Begin Time:"),
        threshold_reached: timestamp_marker("Threshold Reached:"),
        valid_from: timestamp_marker("Valid From:"),
        valid_to: timestamp_marker("Valid (?:To|Until):"),

        estimated_velocity: line_marker("Estimated Velocity:"),
        warning_condition: line_marker("Warning Condition:"),
        noaa_scale: line_marker("NOAA Scale:"),
        maximum_flux: line_marker("Yesterday Maximum 2MeV Flux:"),
        description: compile(r"Description:\s*([^\r\n]+(?:\r?\n[^\r\n]+)*)"),
        potential_impacts: compile(r"(?s)Potential Impacts:(.*?)(?:\r?\n\r?\n|\z)"),
        forecast_data: compile(
            r"(?s)Highest Storm Level Predicted by Day:(.*?)(?:THIS SUPERSEDES|NOAA Space|\z)",
        ),
    })
}

/// First match of `re`, group 1, trimmed. Blank captures count as absent.
pub fn capture(re: &Regex, message: &str) -> Option<String> {
    re.captures(message)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

/// First match of a `(LABEL):\s*(value)` pattern, rendered as `LABEL: value`.
pub fn capture_labelled(re: &Regex, message: &str) -> Option<String> {
    let caps = re.captures(message)?;
    let label = caps.get(1)?.as_str();
    let value = caps.get(2)?.as_str().trim();
    Some(format!("{label}: {value}"))
}

pub fn capture_time(re: &Regex, message: &str) -> Option<DateTime<Utc>> {
    re.captures(message)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_advisory_time(m.as_str()))
}
