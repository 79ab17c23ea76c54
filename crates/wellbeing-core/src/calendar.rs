//! Calendar-day helpers.
//!
//! Entry dates are local wall-clock `NaiveDateTime`s, so "the same day" is a
//! plain comparison against midnight boundaries with no time zone involved.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::ValidationError;

const MONTHS_DE: [&str; 12] = [
    "Jan", "Feb", "März", "Apr", "Mai", "Juni", "Juli", "Aug", "Sept", "Okt", "Nov", "Dez",
];

/// Midnight at the start of `date`'s calendar day.
pub fn start_of_day(date: NaiveDateTime) -> NaiveDateTime {
    date.date().and_time(NaiveTime::MIN)
}

/// Half-open interval `[start, end)` covering `date`'s calendar day.
pub fn day_bounds(date: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let start = start_of_day(date);
    (start, start + Duration::days(1))
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM` or `YYYY-MM-DDTHH:MM:SS`.
///
/// A bare date means midnight of that day.
pub fn parse_date_input(input: &str) -> Result<NaiveDateTime, ValidationError> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ValidationError::InvalidDate {
            input: input.to_string(),
        })
}

/// Parse a `HH:MM` clock time.
pub fn parse_clock_time(input: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M").map_err(|_| ValidationError::InvalidTime {
        input: input.to_string(),
    })
}

/// "Heute", "Gestern", otherwise e.g. "23. Nov".
pub fn friendly_format(date: NaiveDateTime, today: NaiveDate) -> String {
    let day = date.date();
    if day == today {
        "Heute".to_string()
    } else if today.pred_opt() == Some(day) {
        "Gestern".to_string()
    } else {
        format!("{}. {}", day.day(), MONTHS_DE[day.month0() as usize])
    }
}
