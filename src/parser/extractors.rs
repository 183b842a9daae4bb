use super::patterns::{capture, capture_labelled, capture_time, patterns};
use crate::models::{AlertFamily, AlertFields};

/// Turns a raw advisory body into the fields of one family.
pub type Extractor = fn(&str) -> AlertFields;

/// Dispatch table: family → extractor. `Generic` is the fallback arm.
pub fn extractor_for(family: AlertFamily) -> Extractor {
    match family {
        AlertFamily::Radio => extract_radio,
        AlertFamily::Geomagnetic => extract_geomagnetic,
        AlertFamily::Electron => extract_electron,
        AlertFamily::Forecast => extract_forecast,
        AlertFamily::Watch => extract_watch,
        AlertFamily::Generic => extract_generic,
    }
}

pub fn extract_radio(message: &str) -> AlertFields {
    let p = patterns();
    AlertFields {
        warning_type: capture(&p.alert, message),
        begin_time: capture_time(&p.begin_time, message),
        estimated_velocity: capture(&p.estimated_velocity, message),
        description: capture(&p.description, message),
        ..Default::default()
    }
}

pub fn extract_geomagnetic(message: &str) -> AlertFields {
    let p = patterns();
    AlertFields {
        warning_type: capture_labelled(&p.geomagnetic_label, message),
        valid_from: capture_time(&p.valid_from, message),
        valid_to: capture_time(&p.valid_to, message),
        begin_time: capture_time(&p.threshold_reached, message),
        warning_condition: capture(&p.warning_condition, message),
        noaa_scale: capture(&p.noaa_scale, message),
        potential_impacts: capture(&p.potential_impacts, message),
        ..Default::default()
    }
}

pub fn extract_electron(message: &str) -> AlertFields {
    let p = patterns();
    // Threshold Reached overrides Begin Time when both parse.
    let begin_time = capture_time(&p.threshold_reached, message)
        .or_else(|| capture_time(&p.begin_time, message));
    AlertFields {
        warning_type: capture_labelled(&p.electron_label, message),
        begin_time,
        maximum_flux: capture(&p.maximum_flux, message),
        potential_impacts: capture(&p.potential_impacts, message),
        ..Default::default()
    }
}

pub fn extract_forecast(message: &str) -> AlertFields {
    let p = patterns();
    AlertFields {
        warning_type: capture(&p.watch, message),
        forecast_data: capture(&p.forecast_data, message),
        potential_impacts: capture(&p.potential_impacts, message),
        ..Default::default()
    }
}

pub fn extract_watch(message: &str) -> AlertFields {
    let p = patterns();
    AlertFields {
        warning_type: capture_labelled(&p.watch_label, message),
        ..watch_body(message)
    }
}

pub fn extract_generic(message: &str) -> AlertFields {
    let p = patterns();
    AlertFields {
        warning_type: capture_labelled(&p.generic_label, message),
        ..watch_body(message)
    }
}

fn watch_body(message: &str) -> AlertFields {
    let p = patterns();
    AlertFields {
        valid_from: capture_time(&p.valid_from, message),
        valid_to: capture_time(&p.valid_to, message),
        noaa_scale: capture(&p.noaa_scale, message),
        potential_impacts: capture(&p.potential_impacts, message),
        description: capture(&p.description, message),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const RADIO: &str = "Space Weather Message Code: ALTTP2\r\nSerial Number: 1956\r\nIssue Time: 2024 Nov 14 2210 UTC\r\n\r\nALERT: Type II Radio Emission\r\nBegin Time: 2024 Nov 14 2148 UTC\r\nEstimated Velocity: 783 km/s\r\n\r\nDescription: Type II emissions occur in association with eruptions on the sun\r\nand typically indicate a coronal mass ejection is associated with a flare event.\r\n";

    const GEOMAGNETIC: &str = "Space Weather Message Code: ALTK05\r\nSerial Number: 2031\r\nIssue Time: 2024 Nov 15 0312 UTC\r\n\r\nALERT: Geomagnetic K-index of 5\r\nThreshold Reached: 2024 Nov 15 0309 UTC\r\nSynoptic Period: 0000-0300 UTC\r\n \r\nActive Warning: Yes\r\nNOAA Scale: G1 - Minor\r\n\r\nNOAA Space Weather Scale descriptions can be found at\r\nwww.swpc.noaa.gov/noaa-scales-explanation\r\n\r\nPotential Impacts: Area of impact primarily poleward of 60 degrees Geomagnetic Latitude.\r\nInduced Currents - Weak power grid fluctuations can occur.\r\nAurora - Aurora may be visible at high latitudes such as Canada and Alaska.";

    const GEOMAGNETIC_WARNING: &str = "Space Weather Message Code: WARK04\r\nSerial Number: 4720\r\nIssue Time: 2024 Nov 15 0105 UTC\r\n\r\nEXTENDED WARNING: Geomagnetic K-index of 4 expected\r\nExtension to Serial Number: 4719\r\nValid From: 2024 Nov 14 1520 UTC\r\nNow Valid Until: 2024 Nov 15 1200 UTC\r\nWarning Condition: Persistence\r\n\r\nNOAA Scale: G2 - Moderate\r\n";

    const ELECTRON: &str = "Space Weather Message Code: ALTEF3\r\nSerial Number: 3455\r\nIssue Time: 2024 Nov 15 0502 UTC\r\n\r\nCONTINUED ALERT: Electron 2MeV Integral Flux exceeded 1000pfu\r\nContinuation of Serial Number: 3454\r\nBegin Time: 2024 Nov 12 1455 UTC\r\nYesterday Maximum 2MeV Flux: 2853 pfu\r\n\r\nNOAA Space Weather Scale descriptions can be found at\r\nwww.swpc.noaa.gov/noaa-scales-explanation\r\n\r\nPotential Impacts: Satellite systems may experience significant charging resulting in increased risk to satellite systems.";

    const FORECAST: &str = "Space Weather Message Code: WATA20\r\nSerial Number: 1003\r\nIssue Time: 2024 Nov 14 1225 UTC\r\n\r\nWATCH: Geomagnetic Storm Category G1 Predicted\r\n\r\nHighest Storm Level Predicted by Day:\r\nNov 15:  G1 (Minor)   Nov 16:  None (Below G1)   Nov 17:  None (Below G1)\r\n\r\nTHIS SUPERSEDES ANY/ALL PRIOR WATCHES IN EFFECT\r\n\r\nNOAA Space Weather Scale descriptions can be found at\r\nwww.swpc.noaa.gov/noaa-scales-explanation\r\n\r\nPotential Impacts: Area of impact primarily poleward of 60 degrees Geomagnetic Latitude.";

    #[test]
    fn test_extract_radio() {
        let fields = extract_radio(RADIO);
        assert_eq!(fields.warning_type.as_deref(), Some("Type II Radio Emission"));
        assert_eq!(
            fields.begin_time,
            Some(Utc.with_ymd_and_hms(2024, 11, 14, 21, 48, 0).unwrap())
        );
        assert_eq!(fields.estimated_velocity.as_deref(), Some("783 km/s"));
        assert_eq!(
            fields.description.as_deref(),
            Some("Type II emissions occur in association with eruptions on the sun\r\nand typically indicate a coronal mass ejection is associated with a flare event.")
        );
    }

    #[test]
    fn test_extract_geomagnetic_alert() {
        let fields = extract_geomagnetic(GEOMAGNETIC);
        assert_eq!(fields.warning_type.as_deref(), Some("ALERT: Geomagnetic K-index of 5"));
        assert_eq!(
            fields.begin_time,
            Some(Utc.with_ymd_and_hms(2024, 11, 15, 3, 9, 0).unwrap())
        );
        assert_eq!(fields.noaa_scale.as_deref(), Some("G1 - Minor"));
        let impacts = fields.potential_impacts.unwrap();
        assert!(impacts.starts_with("Area of impact primarily poleward"));
        assert!(impacts.ends_with("such as Canada and Alaska."));
        assert!(fields.valid_from.is_none());
    }

    #[test]
    fn test_extract_geomagnetic_extended_warning() {
        let fields = extract_geomagnetic(GEOMAGNETIC_WARNING);
        assert_eq!(
            fields.warning_type.as_deref(),
            Some("EXTENDED WARNING: Geomagnetic K-index of 4 expected")
        );
        assert_eq!(
            fields.valid_from,
            Some(Utc.with_ymd_and_hms(2024, 11, 14, 15, 20, 0).unwrap())
        );
        assert_eq!(
            fields.valid_to,
            Some(Utc.with_ymd_and_hms(2024, 11, 15, 12, 0, 0).unwrap())
        );
        assert_eq!(fields.warning_condition.as_deref(), Some("Persistence"));
        assert_eq!(fields.noaa_scale.as_deref(), Some("G2 - Moderate"));
    }

    #[test]
    fn test_noaa_scale_is_captured_verbatim() {
        for body in [
            "NOAA Scale: G2 - Moderate",
            "ALERT: x\nNOAA Scale: G2 - Moderate\n\nPotential Impacts: y",
            "WARNING: x\r\nNOAA Scale:   G2 - Moderate   \r\n",
        ] {
            assert_eq!(
                extract_geomagnetic(body).noaa_scale.as_deref(),
                Some("G2 - Moderate"),
                "body: {body:?}"
            );
        }
    }

    #[test]
    fn test_extract_electron() {
        let fields = extract_electron(ELECTRON);
        assert_eq!(
            fields.warning_type.as_deref(),
            Some("CONTINUED ALERT: Electron 2MeV Integral Flux exceeded 1000pfu")
        );
        assert_eq!(
            fields.begin_time,
            Some(Utc.with_ymd_and_hms(2024, 11, 12, 14, 55, 0).unwrap())
        );
        assert_eq!(fields.maximum_flux.as_deref(), Some("2853 pfu"));
        assert!(fields
            .potential_impacts
            .unwrap()
            .starts_with("Satellite systems may experience"));
    }

    #[test]
    fn test_electron_threshold_overrides_begin_time() {
        let body = "ALERT: Electron flux\nBegin Time: 2024 Nov 12 1455 UTC\nThreshold Reached: 2024 Nov 12 1500 UTC\n";
        assert_eq!(
            extract_electron(body).begin_time,
            Some(Utc.with_ymd_and_hms(2024, 11, 12, 15, 0, 0).unwrap())
        );

        let malformed = "ALERT: Electron flux\nBegin Time: 2024 Nov 12 1455 UTC\nThreshold Reached: 2024 Nov 99 1500 UTC\n";
        assert_eq!(
            extract_electron(malformed).begin_time,
            Some(Utc.with_ymd_and_hms(2024, 11, 12, 14, 55, 0).unwrap())
        );
    }

    #[test]
    fn test_extract_forecast() {
        let fields = extract_forecast(FORECAST);
        assert_eq!(
            fields.warning_type.as_deref(),
            Some("Geomagnetic Storm Category G1 Predicted")
        );
        assert_eq!(
            fields.forecast_data.as_deref(),
            Some("Nov 15:  G1 (Minor)   Nov 16:  None (Below G1)   Nov 17:  None (Below G1)")
        );
        assert!(fields.potential_impacts.is_some());
    }

    #[test]
    fn test_forecast_block_runs_to_end_without_terminator() {
        let fields = extract_forecast("WATCH: G2\nHighest Storm Level Predicted by Day:\nNov 15: G2 (Moderate)\n");
        assert_eq!(fields.forecast_data.as_deref(), Some("Nov 15: G2 (Moderate)"));
    }

    #[test]
    fn test_extract_watch() {
        let body = "WATCH: Geomagnetic Storm Category G2 Predicted\nValid From: 2024 Nov 15 0000 UTC\nValid To: 2024 Nov 16 0000 UTC\nNOAA Scale: G2 - Moderate\n\nDescription: A CME is expected to arrive.\n\nPotential Impacts: Power systems may experience voltage alarms.";
        let fields = extract_watch(body);
        assert_eq!(
            fields.warning_type.as_deref(),
            Some("WATCH: Geomagnetic Storm Category G2 Predicted")
        );
        assert!(fields.valid_from.is_some());
        assert!(fields.valid_to.is_some());
        assert_eq!(fields.noaa_scale.as_deref(), Some("G2 - Moderate"));
        assert_eq!(fields.description.as_deref(), Some("A CME is expected to arrive."));
        assert_eq!(
            fields.potential_impacts.as_deref(),
            Some("Power systems may experience voltage alarms.")
        );
    }

    #[test]
    fn test_generic_recognizes_continued_alert() {
        let fields = extract_generic("CONTINUED ALERT: Proton flux\nNOAA Scale: S1 - Minor");
        assert_eq!(fields.warning_type.as_deref(), Some("CONTINUED ALERT: Proton flux"));
        assert_eq!(fields.noaa_scale.as_deref(), Some("S1 - Minor"));
    }

    #[test]
    fn test_malformed_timestamps_leave_fields_absent() {
        let fields = extract_watch("WARNING: x\nValid From: 2024 Foo 99 9999 UTC\nValid To: 2024 Nov 16 0000 UTC");
        assert!(fields.valid_from.is_none());
        assert!(fields.valid_to.is_some());
    }

    #[test]
    fn test_no_markers_yields_empty_fields() {
        assert_eq!(extract_generic("nothing recognizable here"), AlertFields::default());
    }

    #[test]
    fn test_dispatch_table() {
        assert_eq!(
            extractor_for(AlertFamily::Geomagnetic)(GEOMAGNETIC),
            extract_geomagnetic(GEOMAGNETIC)
        );
        assert_eq!(extractor_for(AlertFamily::Radio)(RADIO), extract_radio(RADIO));
        assert_eq!(
            extractor_for(AlertFamily::Generic)("WATCH: x"),
            extract_generic("WATCH: x")
        );
    }
}
