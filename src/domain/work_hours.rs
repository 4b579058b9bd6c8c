use std::cmp::Ordering;

use chrono::{DateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use super::{ValidationError, WorkHoursId};

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// A daily working window, interpreted in `timezone`.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkHours {
    pub id: WorkHoursId,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub timezone: Tz,
}

impl WorkHours {
    pub fn new(start: NaiveTime, end: NaiveTime, timezone: Tz) -> Self {
        Self {
            id: WorkHoursId::default(),
            start,
            end,
            timezone,
        }
    }

    pub fn is_working(&self, now: DateTime<Utc>) -> bool {
        let local_time = now.with_timezone(&self.timezone).time();
        is_within_window(local_time, self.start, self.end)
    }
}

/// Half-open membership test for `[start, end)`.
///
/// A window whose end precedes its start runs overnight and wraps past
/// midnight. Equal bounds describe an empty window.
pub fn is_within_window(t: NaiveTime, start: NaiveTime, end: NaiveTime) -> bool {
    match start.cmp(&end) {
        Ordering::Less => start <= t && t < end,
        Ordering::Equal => false,
        Ordering::Greater => t >= start || t < end,
    }
}

pub fn parse_time_of_day(
    field: &str,
    raw: &str,
) -> Result<NaiveTime, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::new(format!("{field} is required")));
    }
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| {
            ValidationError::new(format!(
                "{field} must be a time of day formatted as HH:MM[:SS], got '{raw}'"
            ))
        })
}

/// Parses an IANA zone name. A missing or blank value selects UTC.
pub fn parse_timezone(raw: Option<&str>) -> Result<Tz, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Tz::UTC),
        Some(name) => name.parse::<Tz>().map_err(|e| {
            ValidationError::new(format!("Unknown timezone '{name}': {e}"))
        }),
    }
}

pub fn format_time_of_day(time: &NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}
