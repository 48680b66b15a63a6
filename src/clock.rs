use time::{OffsetDateTime, PrimitiveDateTime};
use time_tz::{ToTimezone, timezones};

/// Current wall-clock time for the dashboard.
///
/// Uses the named timezone when it is known, the machine's local offset
/// otherwise, and UTC when even that cannot be determined.
pub fn now(tz: Option<&str>) -> OffsetDateTime {
    let utc = OffsetDateTime::now_utc();

    match tz {
        Some(name) => in_timezone(utc, name),
        None => OffsetDateTime::now_local().unwrap_or(utc),
    }
}

pub fn in_timezone(instant: OffsetDateTime, name: &str) -> OffsetDateTime {
    match timezones::get_by_name(name) {
        Some(tz) => instant.to_timezone(tz),
        None => {
            tracing::warn!(timezone = name, "unknown timezone, keeping offset");
            instant
        }
    }
}

/// Drops the offset; planning works on wall-clock date and hour.
pub fn anchor(now: OffsetDateTime) -> PrimitiveDateTime {
    PrimitiveDateTime::new(now.date(), now.time())
}
