use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A date as it actually arrives from the store. Older documents carry a
/// native timestamp object, newer ones an ISO string, and a few hold raw
/// epoch milliseconds; all three must normalize to the same comparable
/// instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    Timestamp {
        seconds: i64,
        #[serde(default)]
        nanos: u32,
    },
    Millis(i64),
    Text(String),
}

impl DateValue {
    pub fn now() -> Self {
        DateValue::Text(Utc::now().to_rfc3339())
    }

    /// Normalize to a UTC instant. Date-only strings resolve to midnight.
    /// Returns `None` for garbage rather than failing the whole view.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            DateValue::Timestamp { seconds, nanos } => Utc.timestamp_opt(*seconds, *nanos).single(),
            DateValue::Millis(ms) => Utc.timestamp_millis_opt(*ms).single(),
            DateValue::Text(s) => parse_text(s),
        }
    }

    /// The calendar day, with time-of-day zeroed. Visits compare on this.
    pub fn day(&self) -> Option<NaiveDate> {
        self.instant().map(|dt| dt.date_naive())
    }
}

/// Parse any JSON value that might hold a date, used when sorting raw
/// documents by an arbitrary field.
pub fn parse_instant(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    serde_json::from_value::<DateValue>(value.clone())
        .ok()
        .and_then(|dv| dv.instant())
}

fn parse_text(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_string_and_millis_agree() {
        let iso = DateValue::Text("2025-06-01T12:30:00Z".to_string());
        let millis = DateValue::Millis(iso.instant().unwrap().timestamp_millis());
        assert_eq!(iso.instant(), millis.instant());
    }

    #[test]
    fn timestamp_object_normalizes() {
        let ts = DateValue::Timestamp { seconds: 1_748_750_000, nanos: 0 };
        assert_eq!(ts.instant().unwrap().timestamp(), 1_748_750_000);
    }

    #[test]
    fn date_only_string_is_midnight() {
        let dv = DateValue::Text("2025-06-01".to_string());
        let dt = dv.instant().unwrap();
        assert_eq!(dt.format("%H:%M:%S").to_string(), "00:00:00");
        assert_eq!(dv.day().unwrap().to_string(), "2025-06-01");
    }

    #[test]
    fn untagged_decoding_picks_the_right_shape() {
        let from_obj: DateValue =
            serde_json::from_value(serde_json::json!({ "seconds": 100, "nanos": 0 })).unwrap();
        assert!(matches!(from_obj, DateValue::Timestamp { .. }));

        let from_num: DateValue = serde_json::from_value(serde_json::json!(1000)).unwrap();
        assert!(matches!(from_num, DateValue::Millis(1000)));

        let from_str: DateValue = serde_json::from_value(serde_json::json!("2025-01-01")).unwrap();
        assert!(matches!(from_str, DateValue::Text(_)));
    }

    #[test]
    fn garbage_is_none_not_panic() {
        assert!(DateValue::Text("not a date".to_string()).instant().is_none());
    }
}
