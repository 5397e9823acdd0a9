use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime};

/// Half-open time window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

fn midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<FixedOffset> {
    // a fixed offset has no gaps or folds, so every local time maps once
    date.and_time(NaiveTime::MIN)
        .and_local_timezone(offset)
        .single()
        .expect("fixed offset maps local midnight exactly once")
}

/// `[midnight today, midnight tomorrow)`.
pub fn today_range(now: DateTime<FixedOffset>) -> TimeRange {
    let start = midnight(now.date_naive(), *now.offset());
    TimeRange {
        start,
        end: start + Duration::days(1),
    }
}

/// Monday-start week: `[Monday 00:00 of the current week, +7 days)`.
pub fn week_range(now: DateTime<FixedOffset>) -> TimeRange {
    let days_from_monday = i64::from(now.weekday().num_days_from_monday());
    let monday = now.date_naive() - Duration::days(days_from_monday);
    let start = midnight(monday, *now.offset());
    TimeRange {
        start,
        end: start + Duration::days(7),
    }
}

/// `[1st of this month 00:00, 1st of next month 00:00)`.
pub fn month_range(now: DateTime<FixedOffset>) -> TimeRange {
    let first = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .expect("every month has a 1st");
    let next_first = if now.month() == 12 {
        NaiveDate::from_ymd_opt(now.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(now.year(), now.month() + 1, 1)
    }
    .expect("every month has a 1st");

    TimeRange {
        start: midnight(first, *now.offset()),
        end: midnight(next_first, *now.offset()),
    }
}
