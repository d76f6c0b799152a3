use {
    chrono::{DateTime, NaiveDate, NaiveDateTime, Utc},
    serde::Serializer,
};

const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
];

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parses an ISO-8601 timestamp as the API accepts it.
///
/// A `Z` marker is read as `+00:00`. Values without an offset are taken to be
/// UTC, and a bare date means midnight UTC.
pub fn parse_iso8601(raw: &str) -> Option<DateTime<Utc>> {
    let normalized = raw.trim().replace('Z', "+00:00");

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, fmt) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Converts a raw JSON `timestamp` value from an import file.
///
/// Numbers are Unix epoch milliseconds; strings go through [`parse_iso8601`].
pub fn parse_import_timestamp(raw: Option<&serde_json::Value>) -> Result<DateTime<Utc>, String> {
    use serde_json::Value;

    match raw {
        None | Some(Value::Null) => Err("'timestamp' field is required".to_string()),
        Some(Value::Number(n)) => {
            let dt = match n.as_i64() {
                Some(ms) => DateTime::from_timestamp_millis(ms),
                None => n
                    .as_f64()
                    .filter(|ms| ms.is_finite())
                    .and_then(|ms| DateTime::from_timestamp_micros((ms * 1000.0).round() as i64)),
            };
            dt.ok_or_else(|| format!("epoch milliseconds out of range: {n}"))
        }
        Some(Value::String(s)) => parse_iso8601(s).ok_or_else(|| {
            "Unable to parse timestamp string; expected ISO-8601 or epoch ms".to_string()
        }),
        Some(other) => Err(format!(
            "Unsupported timestamp type: {}",
            json_kind(other)
        )),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `serialize_with` helper emitting `2024-01-01T00:00:00+00:00`.
pub fn serialize_rfc3339<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&dt.to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn z_suffix_is_utc() {
        let dt = parse_iso8601("2024-03-05T10:15:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 5, 10, 15, 0).unwrap());
    }

    #[test]
    fn explicit_offset_is_normalized() {
        let dt = parse_iso8601("2024-03-05T12:15:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 5, 10, 15, 0).unwrap());
    }

    #[test]
    fn naive_and_date_only_are_utc() {
        assert_eq!(
            parse_iso8601("2024-03-05T10:15:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 5, 10, 15, 0).unwrap()
        );
        assert_eq!(
            parse_iso8601("2024-03-05").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_iso8601("yesterday").is_none());
        assert!(parse_iso8601("2024-13-40").is_none());
        assert!(parse_iso8601("").is_none());
    }

    #[test]
    fn import_timestamp_accepts_epoch_millis() {
        let v = serde_json::json!(1704051887123_i64);
        let dt = parse_import_timestamp(Some(&v)).unwrap();
        assert_eq!(dt.timestamp_millis(), 1704051887123);

        let v = serde_json::json!(1704051887123.0);
        let dt = parse_import_timestamp(Some(&v)).unwrap();
        assert_eq!(dt.timestamp_millis(), 1704051887123);
    }

    #[test]
    fn import_timestamp_errors() {
        assert_eq!(
            parse_import_timestamp(None).unwrap_err(),
            "'timestamp' field is required"
        );
        assert!(parse_import_timestamp(Some(&serde_json::json!("nope"))).is_err());
        assert_eq!(
            parse_import_timestamp(Some(&serde_json::json!([1]))).unwrap_err(),
            "Unsupported timestamp type: array"
        );
    }
}
