use serde::{Deserialize, Deserializer};

/// One advisory as published by the upstream SWPC feed (`alerts.json`).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawAdvisory {
    #[serde(default, deserialize_with = "string_or_default")]
    pub product_id: String,
    #[serde(default, deserialize_with = "string_or_default")]
    pub issue_datetime: String,
    #[serde(default, deserialize_with = "string_or_default")]
    pub message: String,
}

/// A feed payload is either the whole feed array or a single advisory.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FeedPayload {
    Batch(Vec<RawAdvisory>),
    Single(RawAdvisory),
}

impl FeedPayload {
    pub fn into_advisories(self) -> Vec<RawAdvisory> {
        match self {
            FeedPayload::Batch(advisories) => advisories,
            FeedPayload::Single(advisory) => vec![advisory],
        }
    }
}

fn string_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Integer(i64),
        Float(f64),
    }

    let v: Option<StringOrNumber> = Option::deserialize(deserializer)?;
    match v {
        Some(StringOrNumber::String(s)) => Ok(s),
        Some(StringOrNumber::Integer(i)) => Ok(i.to_string()),
        Some(StringOrNumber::Float(f)) => Ok(f.to_string()),
        None => Ok(String::new()),
    }
}
