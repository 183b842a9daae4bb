use crate::db::AlertStore;
use crate::error::{AlertError, Result};
use crate::models::alert_record::{
    ElectronAlert, ForecastAlert, GeomagneticAlert, RadioAlert, WatchAlert,
};
use crate::models::{AlertBase, AlertFields, AlertRecord, NaturalKey, ParsedAlert, RecordKind};
use crate::translate::{translate_alert_fields, Translator};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// What happened to a parsed advisory at the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOutcome {
    Inserted(AlertRecord),
    /// A record with the same natural key was already stored; the new parse
    /// was discarded.
    Existing(AlertRecord),
}

#[cfg(test)]
impl StoreOutcome {
    fn record(&self) -> &AlertRecord {
        match self {
            StoreOutcome::Inserted(record) | StoreOutcome::Existing(record) => record,
        }
    }
}

/// Maps parsed advisories onto stored records, translating text fields and
/// keeping inserts idempotent on the natural key.
pub struct Normalizer {
    store: Arc<dyn AlertStore>,
    translator: Arc<dyn Translator>,
}

impl Normalizer {
    pub fn new(store: Arc<dyn AlertStore>, translator: Arc<dyn Translator>) -> Self {
        Self { store, translator }
    }

    /// Stores `parsed` unless an identical advisory is already present.
    ///
    /// Returns `None` for absent input and for any failure on the way to the
    /// store; failures are logged here and never reach the caller.
    pub async fn normalize_and_store(&self, parsed: Option<ParsedAlert>) -> Option<StoreOutcome> {
        let parsed = parsed?;
        let code = parsed.message_code.clone().unwrap_or_default();
        let serial = parsed.serial_number.clone().unwrap_or_default();

        match self.persist(parsed).await {
            Ok(outcome) => Some(outcome),
            Err(e @ AlertError::MissingIssueTime { .. }) => {
                warn!("Skipping advisory: {}", e);
                None
            }
            Err(e) => {
                error!("Failed to store advisory {}-{}: {}", code, serial, e);
                None
            }
        }
    }

    async fn persist(&self, parsed: ParsedAlert) -> Result<StoreOutcome> {
        let key = natural_key(&parsed)?;

        if let Some(existing) = self.store.find_by_key(&key).await? {
            debug!(
                "Advisory {}-{} at {} already stored as {:?}",
                key.message_code,
                key.serial_number,
                key.issue_time,
                existing.record_ref()
            );
            return Ok(StoreOutcome::Existing(existing));
        }

        let mut parsed = parsed;
        translate_alert_fields(self.translator.as_ref(), &mut parsed.fields);
        let record = build_record(key.clone(), parsed);

        match self.store.insert(&record).await? {
            Some(inserted) => {
                info!(
                    "Stored {} alert {} (severity {}, active {})",
                    key.kind,
                    inserted,
                    inserted.severity_level(),
                    inserted.is_active(Utc::now())
                );
                Ok(StoreOutcome::Inserted(inserted))
            }
            None => {
                // Lost the race against a concurrent writer; the unique
                // constraint kept one row, return that one.
                let existing = self
                    .store
                    .find_by_key(&key)
                    .await?
                    .ok_or(AlertError::Storage(sqlx::Error::RowNotFound))?;
                debug!(
                    "Concurrent insert for {}-{} resolved to {}",
                    key.message_code,
                    key.serial_number,
                    existing.base().id
                );
                Ok(StoreOutcome::Existing(existing))
            }
        }
    }
}

fn natural_key(parsed: &ParsedAlert) -> Result<NaturalKey> {
    let message_code = parsed.message_code.clone().unwrap_or_default();
    let serial_number = parsed.serial_number.clone().unwrap_or_default();
    let Some(issue_time) = parsed.effective_issue_time() else {
        return Err(AlertError::MissingIssueTime {
            message_code,
            serial_number,
        });
    };

    Ok(NaturalKey {
        kind: parsed.family().record_kind(),
        message_code,
        serial_number,
        issue_time,
    })
}

fn build_record(key: NaturalKey, parsed: ParsedAlert) -> AlertRecord {
    let AlertFields {
        warning_type,
        begin_time,
        valid_from,
        valid_to,
        estimated_velocity,
        description,
        warning_condition,
        noaa_scale,
        potential_impacts,
        maximum_flux,
        forecast_data,
    } = parsed.fields;

    let base = AlertBase {
        id: Uuid::new_v4(),
        message_code: key.message_code,
        serial_number: key.serial_number,
        issue_time: key.issue_time,
        warning_type,
        full_message: parsed.raw_message,
        created_at: Utc::now(),
        is_processed: true,
    };

    match key.kind {
        RecordKind::Radio => AlertRecord::Radio(RadioAlert {
            base,
            begin_time,
            estimated_velocity,
            description,
        }),
        RecordKind::Geomagnetic => AlertRecord::Geomagnetic(GeomagneticAlert {
            base,
            valid_from,
            valid_to,
            begin_time,
            warning_condition,
            noaa_scale,
            potential_impacts,
        }),
        RecordKind::Electron => AlertRecord::Electron(ElectronAlert {
            base,
            begin_time,
            maximum_flux,
            potential_impacts,
        }),
        RecordKind::Forecast => AlertRecord::Forecast(ForecastAlert {
            base,
            forecast_data,
            potential_impacts,
        }),
        RecordKind::Watch => AlertRecord::Watch(WatchAlert {
            base,
            valid_from,
            valid_to,
            begin_time,
            warning_condition,
            noaa_scale,
            potential_impacts,
            description,
            estimated_velocity,
            maximum_flux,
            forecast_data,
        }),
    }
}
