//! Timestamp capture and the storage text format.
//!
//! Stored timestamps are UTC with second precision, formatted as
//! `YYYY-MM-DDTHH:MM:SSZ`, so comparing the text compares the instants.

use chrono::{DateTime, SecondsFormat, SubsecRound, TimeDelta, Timelike, Utc};

use crate::error::{TrackerError, TrackerResult};

/// Current wall-clock time truncated to whole seconds.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Render an instant in the storage format.
pub fn to_storage(ts: &DateTime<Utc>) -> String {
    ts.trunc_subsecs(0).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Round up to the next whole second when there is a fractional part.
///
/// Stored values are whole seconds, so `stored >= ceil(ts)` holds exactly
/// when `stored >= ts`.
pub fn ceil_secs(ts: &DateTime<Utc>) -> DateTime<Utc> {
    let floor = ts.trunc_subsecs(0);
    if ts.nanosecond() == 0 {
        floor
    } else {
        floor + TimeDelta::seconds(1)
    }
}

/// Parse a stored timestamp.
pub fn from_storage(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|ts| ts.with_timezone(&Utc))
}

/// Parse a client supplied RFC 3339 timestamp, normalised to UTC.
pub fn parse_rfc3339(field: &str, raw: &str) -> TrackerResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| TrackerError::validation(field, format!("expected an RFC 3339 timestamp ({e})")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_format_is_second_precision_utc() {
        let ts = parse_rfc3339("startTime", "2024-05-11T12:08:25.734+03:00").unwrap();
        assert_eq!(to_storage(&ts), "2024-05-11T09:08:25Z");
    }

    #[test]
    fn storage_round_trip() {
        let ts = from_storage("2024-01-16T09:08:25Z").unwrap();
        assert_eq!(to_storage(&ts), "2024-01-16T09:08:25Z");
    }

    #[test]
    fn ceil_rounds_fractions_up() {
        let ts = parse_rfc3339("startTime", "2024-04-01T00:00:00.500Z").unwrap();
        assert_eq!(to_storage(&ceil_secs(&ts)), "2024-04-01T00:00:01Z");

        let whole = parse_rfc3339("startTime", "2024-04-01T00:00:00Z").unwrap();
        assert_eq!(ceil_secs(&whole), whole);
    }

    #[test]
    fn rejects_non_rfc3339() {
        let err = parse_rfc3339("endTime", "2024-05-11 09:08").unwrap_err();
        assert_eq!(err.field(), Some("endTime"));
    }
}
