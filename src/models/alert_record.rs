use super::family::RecordKind;
use crate::error::AlertError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Fields shared by every stored variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertBase {
    pub id: Uuid,
    pub message_code: String,
    pub serial_number: String,
    pub issue_time: DateTime<Utc>,
    pub warning_type: Option<String>,
    pub full_message: String,
    pub created_at: DateTime<Utc>,
    pub is_processed: bool,
}

/// T* - Type II radio emission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadioAlert {
    #[serde(flatten)]
    pub base: AlertBase,
    pub begin_time: Option<DateTime<Utc>>,
    pub estimated_velocity: Option<String>,
    pub description: Option<String>,
}

/// K* - K-index events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeomagneticAlert {
    #[serde(flatten)]
    pub base: AlertBase,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_to: Option<DateTime<Utc>>,
    pub begin_time: Option<DateTime<Utc>>,
    pub warning_condition: Option<String>,
    pub noaa_scale: Option<String>,
    pub potential_impacts: Option<String>,
}

/// E* - electron flux events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectronAlert {
    #[serde(flatten)]
    pub base: AlertBase,
    pub begin_time: Option<DateTime<Utc>>,
    pub maximum_flux: Option<String>,
    pub potential_impacts: Option<String>,
}

/// A* - storm watch / forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastAlert {
    #[serde(flatten)]
    pub base: AlertBase,
    pub forecast_data: Option<String>,
    pub potential_impacts: Option<String>,
}

/// W* and anything unrecognized. Carries every optional field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchAlert {
    #[serde(flatten)]
    pub base: AlertBase,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_to: Option<DateTime<Utc>>,
    pub begin_time: Option<DateTime<Utc>>,
    pub warning_condition: Option<String>,
    pub noaa_scale: Option<String>,
    pub potential_impacts: Option<String>,
    pub description: Option<String>,
    pub estimated_velocity: Option<String>,
    pub maximum_flux: Option<String>,
    pub forecast_data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "record_type", rename_all = "snake_case")]
pub enum AlertRecord {
    Radio(RadioAlert),
    Geomagnetic(GeomagneticAlert),
    Electron(ElectronAlert),
    Forecast(ForecastAlert),
    Watch(WatchAlert),
}

/// Dedup/uniqueness key of a stored record, scoped to its variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NaturalKey {
    pub kind: RecordKind,
    pub message_code: String,
    pub serial_number: String,
    pub issue_time: DateTime<Utc>,
}

impl AlertRecord {
    pub fn base(&self) -> &AlertBase {
        match self {
            AlertRecord::Radio(r) => &r.base,
            AlertRecord::Geomagnetic(r) => &r.base,
            AlertRecord::Electron(r) => &r.base,
            AlertRecord::Forecast(r) => &r.base,
            AlertRecord::Watch(r) => &r.base,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            AlertRecord::Radio(_) => RecordKind::Radio,
            AlertRecord::Geomagnetic(_) => RecordKind::Geomagnetic,
            AlertRecord::Electron(_) => RecordKind::Electron,
            AlertRecord::Forecast(_) => RecordKind::Forecast,
            AlertRecord::Watch(_) => RecordKind::Watch,
        }
    }

    pub fn natural_key(&self) -> NaturalKey {
        let base = self.base();
        NaturalKey {
            kind: self.kind(),
            message_code: base.message_code.clone(),
            serial_number: base.serial_number.clone(),
            issue_time: base.issue_time,
        }
    }

    pub fn noaa_scale(&self) -> Option<&str> {
        match self {
            AlertRecord::Geomagnetic(r) => r.noaa_scale.as_deref(),
            AlertRecord::Watch(r) => r.noaa_scale.as_deref(),
            _ => None,
        }
    }

    pub fn valid_to(&self) -> Option<DateTime<Utc>> {
        match self {
            AlertRecord::Geomagnetic(r) => r.valid_to,
            AlertRecord::Watch(r) => r.valid_to,
            _ => None,
        }
    }

    pub fn severity_level(&self) -> u8 {
        severity_from_scale(self.noaa_scale())
    }

    /// A record without an expiry stays active.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.valid_to().map_or(true, |valid_to| now <= valid_to)
    }

    /// `(record_type, record_id)` by which annotations address this record.
    pub fn record_ref(&self) -> (RecordKind, Uuid) {
        (self.kind(), self.base().id)
    }
}

impl fmt::Display for AlertRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = self.base();
        write!(
            f,
            "{}-{}: {} ({})",
            base.message_code,
            base.serial_number,
            base.warning_type.as_deref().unwrap_or_default(),
            base.issue_time.format("%Y-%m-%d %H:%M UTC")
        )
    }
}

/// Severity 1..=5 from the first scale token found (G/R/S), 0 when none.
pub fn severity_from_scale(scale: Option<&str>) -> u8 {
    let Some(scale) = scale else {
        return 0;
    };
    for level in 1..=5u8 {
        if ['G', 'R', 'S']
            .iter()
            .any(|letter| scale.contains(&format!("{letter}{level}")))
        {
            return level;
        }
    }
    0
}

/// Flat row of the `space_weather_alerts` table.
#[derive(Debug, Clone, FromRow)]
pub struct AlertRow {
    pub id: Uuid,
    pub family: String,
    pub message_code: String,
    pub serial_number: String,
    pub issue_time: DateTime<Utc>,
    pub warning_type: Option<String>,
    pub full_message: String,
    pub begin_time: Option<DateTime<Utc>>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_to: Option<DateTime<Utc>>,
    pub estimated_velocity: Option<String>,
    pub description: Option<String>,
    pub warning_condition: Option<String>,
    pub noaa_scale: Option<String>,
    pub potential_impacts: Option<String>,
    pub maximum_flux: Option<String>,
    pub forecast_data: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_processed: bool,
}

impl TryFrom<AlertRow> for AlertRecord {
    type Error = AlertError;

    fn try_from(row: AlertRow) -> Result<Self, Self::Error> {
        let kind: RecordKind = row.family.parse()?;
        let base = AlertBase {
            id: row.id,
            message_code: row.message_code,
            serial_number: row.serial_number,
            issue_time: row.issue_time,
            warning_type: row.warning_type,
            full_message: row.full_message,
            created_at: row.created_at,
            is_processed: row.is_processed,
        };

        Ok(match kind {
            RecordKind::Radio => AlertRecord::Radio(RadioAlert {
                base,
                begin_time: row.begin_time,
                estimated_velocity: row.estimated_velocity,
                description: row.description,
            }),
            RecordKind::Geomagnetic => AlertRecord::Geomagnetic(GeomagneticAlert {
                base,
                valid_from: row.valid_from,
                valid_to: row.valid_to,
                begin_time: row.begin_time,
                warning_condition: row.warning_condition,
                noaa_scale: row.noaa_scale,
                potential_impacts: row.potential_impacts,
            }),
            RecordKind::Electron => AlertRecord::Electron(ElectronAlert {
                base,
                begin_time: row.begin_time,
                maximum_flux: row.maximum_flux,
                potential_impacts: row.potential_impacts,
            }),
            RecordKind::Forecast => AlertRecord::Forecast(ForecastAlert {
                base,
                forecast_data: row.forecast_data,
                potential_impacts: row.potential_impacts,
            }),
            RecordKind::Watch => AlertRecord::Watch(WatchAlert {
                base,
                valid_from: row.valid_from,
                valid_to: row.valid_to,
                begin_time: row.begin_time,
                warning_condition: row.warning_condition,
                noaa_scale: row.noaa_scale,
                potential_impacts: row.potential_impacts,
                description: row.description,
                estimated_velocity: row.estimated_velocity,
                maximum_flux: row.maximum_flux,
                forecast_data: row.forecast_data,
            }),
        })
    }
}

impl From<&AlertRecord> for AlertRow {
    fn from(record: &AlertRecord) -> Self {
        let base = record.base();
        let mut row = AlertRow {
            id: base.id,
            family: record.kind().as_str().to_string(),
            message_code: base.message_code.clone(),
            serial_number: base.serial_number.clone(),
            issue_time: base.issue_time,
            warning_type: base.warning_type.clone(),
            full_message: base.full_message.clone(),
            begin_time: None,
            valid_from: None,
            valid_to: None,
            estimated_velocity: None,
            description: None,
            warning_condition: None,
            noaa_scale: None,
            potential_impacts: None,
            maximum_flux: None,
            forecast_data: None,
            created_at: base.created_at,
            is_processed: base.is_processed,
        };

        match record {
            AlertRecord::Radio(r) => {
                row.begin_time = r.begin_time;
                row.estimated_velocity = r.estimated_velocity.clone();
                row.description = r.description.clone();
            }
            AlertRecord::Geomagnetic(r) => {
                row.valid_from = r.valid_from;
                row.valid_to = r.valid_to;
                row.begin_time = r.begin_time;
                row.warning_condition = r.warning_condition.clone();
                row.noaa_scale = r.noaa_scale.clone();
                row.potential_impacts = r.potential_impacts.clone();
            }
            AlertRecord::Electron(r) => {
                row.begin_time = r.begin_time;
                row.maximum_flux = r.maximum_flux.clone();
                row.potential_impacts = r.potential_impacts.clone();
            }
            AlertRecord::Forecast(r) => {
                row.forecast_data = r.forecast_data.clone();
                row.potential_impacts = r.potential_impacts.clone();
            }
            AlertRecord::Watch(r) => {
                row.valid_from = r.valid_from;
                row.valid_to = r.valid_to;
                row.begin_time = r.begin_time;
                row.warning_condition = r.warning_condition.clone();
                row.noaa_scale = r.noaa_scale.clone();
                row.potential_impacts = r.potential_impacts.clone();
                row.description = r.description.clone();
                row.estimated_velocity = r.estimated_velocity.clone();
                row.maximum_flux = r.maximum_flux.clone();
                row.forecast_data = r.forecast_data.clone();
            }
        }

        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base() -> AlertBase {
        AlertBase {
            id: Uuid::new_v4(),
            message_code: "ALTK05".to_string(),
            serial_number: "1234".to_string(),
            issue_time: Utc.with_ymd_and_hms(2024, 11, 15, 3, 0, 0).unwrap(),
            warning_type: Some("ALERT: Geomagnetic K-index of 5".to_string()),
            full_message: "raw".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 11, 15, 3, 5, 0).unwrap(),
            is_processed: true,
        }
    }

    fn geomagnetic(scale: Option<&str>, valid_to: Option<DateTime<Utc>>) -> AlertRecord {
        AlertRecord::Geomagnetic(GeomagneticAlert {
            base: base(),
            valid_from: None,
            valid_to,
            begin_time: None,
            warning_condition: None,
            noaa_scale: scale.map(str::to_string),
            potential_impacts: None,
        })
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(geomagnetic(Some("G3 - Strong"), None).severity_level(), 3);
        assert_eq!(geomagnetic(Some("G1 - Minor"), None).severity_level(), 1);
        assert_eq!(geomagnetic(Some("R2"), None).severity_level(), 2);
        assert_eq!(geomagnetic(Some("S5 - Extreme"), None).severity_level(), 5);
        assert_eq!(geomagnetic(Some("Unknown"), None).severity_level(), 0);
        assert_eq!(geomagnetic(None, None).severity_level(), 0);
    }

    #[test]
    fn test_severity_for_family_without_scale() {
        let record = AlertRecord::Forecast(ForecastAlert {
            base: base(),
            forecast_data: Some("G3".to_string()),
            potential_impacts: None,
        });
        assert_eq!(record.severity_level(), 0);
    }

    #[test]
    fn test_is_active() {
        let now = Utc.with_ymd_and_hms(2024, 11, 15, 12, 0, 0).unwrap();
        assert!(geomagnetic(None, None).is_active(now));
        assert!(geomagnetic(None, Some(now + Duration::hours(1))).is_active(now));
        assert!(geomagnetic(None, Some(now)).is_active(now));
        assert!(!geomagnetic(None, Some(now - Duration::hours(1))).is_active(now));
    }

    #[test]
    fn test_row_conversion_keeps_variant_fields() {
        let record = geomagnetic(Some("G2 - Moderate"), None);
        let row = AlertRow::from(&record);
        assert_eq!(row.family, "geomagnetic");
        assert_eq!(row.noaa_scale.as_deref(), Some("G2 - Moderate"));
        assert!(row.forecast_data.is_none());

        let restored = AlertRecord::try_from(row).unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn test_row_with_unknown_family_is_rejected() {
        let mut row = AlertRow::from(&geomagnetic(None, None));
        row.family = "legacy".to_string();
        assert!(matches!(
            AlertRecord::try_from(row),
            Err(AlertError::UnknownFamily(tag)) if tag == "legacy"
        ));
    }

    #[test]
    fn test_display_and_record_ref() {
        let record = geomagnetic(None, None);
        assert_eq!(
            record.to_string(),
            "ALTK05-1234: ALERT: Geomagnetic K-index of 5 (2024-11-15 03:00 UTC)"
        );
        let (kind, id) = record.record_ref();
        assert_eq!(kind, RecordKind::Geomagnetic);
        assert_eq!(id, record.base().id);
    }
}
