//! Advisory parsing: header extraction, family routing, and per-family field extraction.

pub mod extractors;
pub mod patterns;
pub mod timestamp;

use crate::models::{ParsedAlert, RawAdvisory};
use patterns::{capture, capture_time, patterns};
use tracing::debug;

/// Parses one advisory. Returns `None` only when the message body is empty;
/// every other miss degrades to an absent field.
pub fn route(raw: &RawAdvisory) -> Option<ParsedAlert> {
    let message = raw.message.as_str();
    if message.is_empty() {
        return None;
    }

    let p = patterns();
    let mut parsed = ParsedAlert {
        product_id: raw.product_id.clone(),
        issue_datetime: raw.issue_datetime.clone(),
        raw_message: raw.message.clone(),
        message_code: capture(&p.message_code, message),
        serial_number: capture(&p.serial_number, message),
        issue_time: capture_time(&p.issue_time, message),
        feed_issue_time: timestamp::parse_feed_time(&raw.issue_datetime),
        ..Default::default()
    };

    let family = parsed.family();
    debug!(
        "Routing advisory {:?} (product {}) to {:?} extractor",
        parsed.message_code, parsed.product_id, family
    );

    let extracted = extractors::extractor_for(family)(message);
    parsed.fields.merge(extracted);

    Some(parsed)
}
