use super::normalizer::{Normalizer, StoreOutcome};
use crate::models::RawAdvisory;
use crate::parser;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub processed: usize,
    pub loaded: usize,
    /// Empty messages and advisories that were already stored.
    pub skipped: usize,
    pub errors: usize,
}

enum Disposition {
    Loaded,
    Skipped,
    Failed,
}

/// Parses and stores a batch with at most `concurrency` advisories in flight.
pub async fn ingest_batch(
    advisories: Vec<RawAdvisory>,
    normalizer: &Normalizer,
    concurrency: usize,
) -> IngestReport {
    let dispositions: Vec<Disposition> = stream::iter(advisories)
        .map(|raw| async move {
            let Some(parsed) = parser::route(&raw) else {
                return Disposition::Skipped;
            };
            match normalizer.normalize_and_store(Some(parsed)).await {
                Some(StoreOutcome::Inserted(_)) => Disposition::Loaded,
                Some(StoreOutcome::Existing(_)) => Disposition::Skipped,
                None => Disposition::Failed,
            }
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut report = IngestReport {
        processed: dispositions.len(),
        ..Default::default()
    };
    for disposition in dispositions {
        match disposition {
            Disposition::Loaded => report.loaded += 1,
            Disposition::Skipped => report.skipped += 1,
            Disposition::Failed => report.errors += 1,
        }
    }

    info!(
        "Ingested {} advisories: {} loaded, {} skipped, {} errors",
        report.processed, report.loaded, report.skipped, report.errors
    );
    report
}
