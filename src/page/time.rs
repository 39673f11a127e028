//! Timestamps
//!
//! ISO-8601 with offset, rounded down to the second.

use chrono::{DateTime, FixedOffset, Local, SecondsFormat, Utc};
use std::time::SystemTime;

/// Format `time` as e.g. `2014-06-12T17:01:11-04:00`.
///
/// Uses `offset` when given, otherwise the host's local offset.
pub fn iso_seconds(time: SystemTime, offset: Option<FixedOffset>) -> String {
    let utc: DateTime<Utc> = time.into();
    match offset {
        Some(offset) => utc
            .with_timezone(&offset)
            .to_rfc3339_opts(SecondsFormat::Secs, false),
        None => utc
            .with_timezone(&Local)
            .to_rfc3339_opts(SecondsFormat::Secs, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_fixed_offset() {
        let time = UNIX_EPOCH + Duration::from_millis(1_402_606_871_900);
        let offset = FixedOffset::west_opt(4 * 3600).unwrap();
        assert_eq!(iso_seconds(time, Some(offset)), "2014-06-12T17:01:11-04:00");
    }

    #[test]
    fn test_utc_offset_is_numeric() {
        let time = UNIX_EPOCH + Duration::from_secs(1_356_998_400);
        let offset = FixedOffset::east_opt(0).unwrap();
        assert_eq!(iso_seconds(time, Some(offset)), "2013-01-01T00:00:00+00:00");
    }
}
