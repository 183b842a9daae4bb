use crate::error::AlertError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Issuance prefixes SWPC puts in front of the product letter (ALTK05, WARK04, WATA20...).
const ISSUANCE_PREFIXES: [&str; 4] = ["ALT", "WAR", "WAT", "SUM"];

/// Advisory family, resolved from the message code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertFamily {
    Radio,
    Geomagnetic,
    Electron,
    Forecast,
    Watch,
    Generic,
}

impl AlertFamily {
    pub fn from_message_code(code: Option<&str>) -> Self {
        let code = code.unwrap_or_default().trim().to_ascii_uppercase();
        match family_letter(&code) {
            Some('T') => AlertFamily::Radio,
            Some('K') => AlertFamily::Geomagnetic,
            Some('E') => AlertFamily::Electron,
            Some('A') => AlertFamily::Forecast,
            Some('W') => AlertFamily::Watch,
            _ => AlertFamily::Generic,
        }
    }

    /// Stored variant for this family. Unrecognized advisories share the watch table.
    pub fn record_kind(self) -> RecordKind {
        match self {
            AlertFamily::Radio => RecordKind::Radio,
            AlertFamily::Geomagnetic => RecordKind::Geomagnetic,
            AlertFamily::Electron => RecordKind::Electron,
            AlertFamily::Forecast => RecordKind::Forecast,
            AlertFamily::Watch | AlertFamily::Generic => RecordKind::Watch,
        }
    }
}

fn family_letter(code: &str) -> Option<char> {
    for prefix in ISSUANCE_PREFIXES {
        if let Some(rest) = code.strip_prefix(prefix) {
            if let Some(letter) = rest.chars().next().filter(|c| c.is_ascii_alphabetic()) {
                return Some(letter);
            }
        }
    }
    code.chars().next()
}

/// Discriminator of the persisted record variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Radio,
    Geomagnetic,
    Electron,
    Forecast,
    Watch,
}

impl RecordKind {
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Radio,
        RecordKind::Geomagnetic,
        RecordKind::Electron,
        RecordKind::Forecast,
        RecordKind::Watch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Radio => "radio",
            RecordKind::Geomagnetic => "geomagnetic",
            RecordKind::Electron => "electron",
            RecordKind::Forecast => "forecast",
            RecordKind::Watch => "watch",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = AlertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "radio" => Ok(RecordKind::Radio),
            "geomagnetic" => Ok(RecordKind::Geomagnetic),
            "electron" => Ok(RecordKind::Electron),
            "forecast" => Ok(RecordKind::Forecast),
            "watch" => Ok(RecordKind::Watch),
            other => Err(AlertError::UnknownFamily(other.to_string())),
        }
    }
}
