pub const CREATE_ALERTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS space_weather_alerts (
    id UUID PRIMARY KEY,
    family TEXT NOT NULL,
    message_code TEXT NOT NULL,
    serial_number TEXT NOT NULL,
    issue_time TIMESTAMPTZ NOT NULL,
    warning_type TEXT,
    full_message TEXT NOT NULL,
    begin_time TIMESTAMPTZ,
    valid_from TIMESTAMPTZ,
    valid_to TIMESTAMPTZ,
    estimated_velocity TEXT,
    description TEXT,
    warning_condition TEXT,
    noaa_scale TEXT,
    potential_impacts TEXT,
    maximum_flux TEXT,
    forecast_data TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    is_processed BOOLEAN NOT NULL DEFAULT TRUE,
    CONSTRAINT space_weather_alerts_natural_key
        UNIQUE (family, message_code, serial_number, issue_time)
);
"#;

pub const CREATE_ISSUE_TIME_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS space_weather_alerts_issue_time_idx
    ON space_weather_alerts (issue_time DESC);
"#;

pub const SELECT_ALERT_BY_NATURAL_KEY: &str = r#"
SELECT id, family, message_code, serial_number, issue_time, warning_type, full_message,
       begin_time, valid_from, valid_to, estimated_velocity, description, warning_condition,
       noaa_scale, potential_impacts, maximum_flux, forecast_data, created_at, is_processed
FROM space_weather_alerts
WHERE family = $1 AND message_code = $2 AND serial_number = $3 AND issue_time = $4
LIMIT 1;
"#;

pub const INSERT_ALERT: &str = r#"
INSERT INTO space_weather_alerts (
    id, family, message_code, serial_number, issue_time, warning_type, full_message,
    begin_time, valid_from, valid_to, estimated_velocity, description, warning_condition,
    noaa_scale, potential_impacts, maximum_flux, forecast_data, created_at, is_processed
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
ON CONFLICT ON CONSTRAINT space_weather_alerts_natural_key DO NOTHING
RETURNING id, family, message_code, serial_number, issue_time, warning_type, full_message,
          begin_time, valid_from, valid_to, estimated_velocity, description, warning_condition,
          noaa_scale, potential_impacts, maximum_flux, forecast_data, created_at, is_processed;
"#;

pub const COUNT_ALERTS_BY_FAMILY: &str = r#"
SELECT COUNT(*) FROM space_weather_alerts WHERE family = $1;
"#;

pub const COUNT_UNEXPIRED_ALERTS: &str = r#"
SELECT COUNT(*) FROM space_weather_alerts WHERE valid_to IS NOT NULL AND valid_to >= $1;
"#;
