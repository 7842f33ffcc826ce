use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

/// Number of hour-of-week buckets (7 days * 24 hours)
pub const HOURS_PER_WEEK: u16 = 168;

/// Naive layouts accepted for training timestamps, tried in order after RFC 3339
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Calculate the hour-of-week bucket for a timestamp
///
/// bucket = day_of_week * 24 + hour_of_day, with Monday = 0
#[inline]
pub fn hour_of_week<T: Datelike + Timelike>(ts: &T) -> u16 {
    day_of_week(ts) * 24 + ts.hour() as u16
}

/// Day of week with Monday = 0 ... Sunday = 6
#[inline]
pub fn day_of_week<T: Datelike>(ts: &T) -> u16 {
    ts.weekday().num_days_from_monday() as u16
}

/// Parse a timestamp column value from a training CSV
///
/// Values carrying an offset keep their local wall-clock time, so
/// `2024-01-01T08:00:00+02:00` lands in the 08:00 bucket.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_local());
    }

    for format in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
