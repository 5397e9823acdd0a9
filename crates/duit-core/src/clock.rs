use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

/// Central Indonesia Time (WITA), UTC+8. Every timestamp and report range
/// in the system uses this one fixed offset; there is no DST.
pub const UTC_OFFSET_SECS: i32 = 8 * 3600;

pub fn wita() -> FixedOffset {
    FixedOffset::east_opt(UTC_OFFSET_SECS).expect("+08:00 is within the valid offset range")
}

pub fn now_wita() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&wita())
}

/// RFC 3339 at seconds precision. Fixed width and a single offset mean
/// string order in SQLite equals chronological order.
pub fn to_db_timestamp(dt: DateTime<FixedOffset>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, false)
}
