use super::family::AlertFamily;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Family-specific fields produced by an extractor. Absent markers stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlertFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_velocity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noaa_scale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potential_impacts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_flux: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_data: Option<String>,
}

impl AlertFields {
    /// Overlay `other` onto `self`; fields present in `other` win.
    pub fn merge(&mut self, other: AlertFields) {
        fn take<T>(slot: &mut Option<T>, incoming: Option<T>) {
            if incoming.is_some() {
                *slot = incoming;
            }
        }

        take(&mut self.warning_type, other.warning_type);
        take(&mut self.begin_time, other.begin_time);
        take(&mut self.valid_from, other.valid_from);
        take(&mut self.valid_to, other.valid_to);
        take(&mut self.estimated_velocity, other.estimated_velocity);
        take(&mut self.description, other.description);
        take(&mut self.warning_condition, other.warning_condition);
        take(&mut self.noaa_scale, other.noaa_scale);
        take(&mut self.potential_impacts, other.potential_impacts);
        take(&mut self.maximum_flux, other.maximum_flux);
        take(&mut self.forecast_data, other.forecast_data);
    }

    /// Mutable access to every free-text field, in a stable order.
    pub fn text_fields_mut(&mut self) -> [&mut Option<String>; 7] {
        [
            &mut self.warning_type,
            &mut self.warning_condition,
            &mut self.noaa_scale,
            &mut self.potential_impacts,
            &mut self.description,
            &mut self.forecast_data,
            &mut self.estimated_velocity,
        ]
    }
}

/// Result of routing one advisory: common header fields plus extractor output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedAlert {
    pub product_id: String,
    pub issue_datetime: String,
    pub raw_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_issue_time: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub fields: AlertFields,
}

impl ParsedAlert {
    pub fn family(&self) -> AlertFamily {
        AlertFamily::from_message_code(self.message_code.as_deref())
    }

    /// Header issue time, falling back to the feed envelope's timestamp.
    pub fn effective_issue_time(&self) -> Option<DateTime<Utc>> {
        self.issue_time.or(self.feed_issue_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_merge_prefers_incoming_values() {
        let mut fields = AlertFields {
            warning_type: Some("old".to_string()),
            noaa_scale: Some("G1 - Minor".to_string()),
            ..Default::default()
        };
        fields.merge(AlertFields {
            warning_type: Some("new".to_string()),
            description: Some("desc".to_string()),
            ..Default::default()
        });

        assert_eq!(fields.warning_type.as_deref(), Some("new"));
        assert_eq!(fields.noaa_scale.as_deref(), Some("G1 - Minor"));
        assert_eq!(fields.description.as_deref(), Some("desc"));
    }

    #[test]
    fn test_effective_issue_time_falls_back_to_feed() {
        let feed_time = Utc.with_ymd_and_hms(2024, 11, 15, 3, 0, 12).unwrap();
        let mut parsed = ParsedAlert {
            feed_issue_time: Some(feed_time),
            ..Default::default()
        };
        assert_eq!(parsed.effective_issue_time(), Some(feed_time));

        let header_time = Utc.with_ymd_and_hms(2024, 11, 15, 3, 0, 0).unwrap();
        parsed.issue_time = Some(header_time);
        assert_eq!(parsed.effective_issue_time(), Some(header_time));
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let parsed = ParsedAlert {
            raw_message: "msg".to_string(),
            message_code: Some("K002".to_string()),
            fields: AlertFields {
                noaa_scale: Some("G2 - Moderate".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(value["noaa_scale"], "G2 - Moderate");
        assert_eq!(value["message_code"], "K002");
        assert!(value.get("serial_number").is_none());
        assert!(value.get("description").is_none());
    }
}
