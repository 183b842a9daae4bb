use super::store::AlertStore;
use crate::error::Result;
use crate::models::{AlertRecord, NaturalKey, RecordKind};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// In-process store for dry runs, keyed by natural key the same way the
/// table's unique constraint is.
#[derive(Default)]
pub struct MemoryAlertStore {
    records: DashMap<NaturalKey, AlertRecord>,
}

impl MemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlertStore for MemoryAlertStore {
    async fn find_by_key(&self, key: &NaturalKey) -> Result<Option<AlertRecord>> {
        Ok(self.records.get(key).map(|record| record.value().clone()))
    }

    async fn insert(&self, record: &AlertRecord) -> Result<Option<AlertRecord>> {
        match self.records.entry(record.natural_key()) {
            Entry::Occupied(_) => Ok(None),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(Some(record.clone()))
            }
        }
    }

    async fn count(&self, kind: RecordKind) -> Result<i64> {
        Ok(self
            .records
            .iter()
            .filter(|entry| entry.key().kind == kind)
            .count() as i64)
    }

    async fn count_unexpired(&self, now: DateTime<Utc>) -> Result<i64> {
        Ok(self
            .records
            .iter()
            .filter(|entry| entry.value().valid_to().is_some_and(|valid_to| valid_to >= now))
            .count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::alert_record::{ForecastAlert, GeomagneticAlert};
    use crate::models::AlertBase;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn base(serial: &str) -> AlertBase {
        AlertBase {
            id: Uuid::new_v4(),
            message_code: "WARK04".to_string(),
            serial_number: serial.to_string(),
            issue_time: Utc.with_ymd_and_hms(2024, 11, 15, 3, 0, 0).unwrap(),
            warning_type: None,
            full_message: String::new(),
            created_at: Utc::now(),
            is_processed: true,
        }
    }

    fn geomagnetic(serial: &str, valid_to: Option<DateTime<Utc>>) -> AlertRecord {
        AlertRecord::Geomagnetic(GeomagneticAlert {
            base: base(serial),
            valid_from: None,
            valid_to,
            begin_time: None,
            warning_condition: None,
            noaa_scale: None,
            potential_impacts: None,
        })
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_natural_key() {
        let store = MemoryAlertStore::new();
        let first = geomagnetic("1", None);
        let again = geomagnetic("1", None);

        assert_eq!(store.insert(&first).await.unwrap(), Some(first.clone()));
        assert_eq!(store.insert(&again).await.unwrap(), None);
        assert_eq!(
            store.find_by_key(&again.natural_key()).await.unwrap(),
            Some(first)
        );
        assert_eq!(store.count(RecordKind::Geomagnetic).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_same_code_in_other_family_is_distinct() {
        let store = MemoryAlertStore::new();
        let forecast = AlertRecord::Forecast(ForecastAlert {
            base: base("1"),
            forecast_data: None,
            potential_impacts: None,
        });

        assert!(store.insert(&geomagnetic("1", None)).await.unwrap().is_some());
        assert!(store.insert(&forecast).await.unwrap().is_some());
        assert_eq!(store.count(RecordKind::Forecast).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_count_unexpired_skips_open_ended_records() {
        let store = MemoryAlertStore::new();
        let now = Utc.with_ymd_and_hms(2024, 11, 15, 12, 0, 0).unwrap();
        store.insert(&geomagnetic("1", None)).await.unwrap();
        store
            .insert(&geomagnetic("2", Some(now + Duration::hours(1))))
            .await
            .unwrap();
        store
            .insert(&geomagnetic("3", Some(now - Duration::hours(1))))
            .await
            .unwrap();

        assert_eq!(store.count_unexpired(now).await.unwrap(), 1);
    }
}
