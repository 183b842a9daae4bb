use super::ingest::{ingest_batch, IngestReport};
use super::normalizer::Normalizer;
use crate::error::Result;
use crate::models::FeedPayload;
use tracing::{info, warn};

fn decode_payload(payload: &[u8]) -> Result<FeedPayload> {
    Ok(serde_json::from_slice(payload)?)
}

/// Handles one broker record: a feed batch or a single advisory as JSON.
/// Undecodable payloads are logged and dropped.
pub async fn process_message(
    normalizer: &Normalizer,
    payload: &[u8],
    concurrency: usize,
) -> anyhow::Result<IngestReport> {
    let feed = match decode_payload(payload) {
        Ok(feed) => feed,
        Err(e) => {
            warn!("Dropping advisory payload: {}", e);
            return Ok(IngestReport::default());
        }
    };

    let advisories = feed.into_advisories();
    info!("Processing {} advisories from payload", advisories.len());

    Ok(ingest_batch(advisories, normalizer, concurrency).await)
}
