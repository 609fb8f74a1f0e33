//! Local wall-clock times for schedule rows.
//!
//! The feed renders times as "HH:mm" once converted from epoch seconds. This
//! module keeps the date alongside the time so that durations and headways
//! stay correct when a schedule crosses midnight.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::cmp::Ordering;
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A date-aware local time for a scheduled or projected train.
///
/// # Examples
///
/// ```
/// use next_train::domain::LocalTime;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let time = LocalTime::parse_hhmm("14:30", date).unwrap();
/// assert_eq!(time.to_string(), "14:30");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalTime {
    date: NaiveDate,
    time: NaiveTime,
}

impl LocalTime {
    /// Create a LocalTime from a naive local datetime.
    ///
    /// Seconds are truncated: schedules only carry minute precision.
    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        let time = dt.time().with_second(0).and_then(|t| t.with_nanosecond(0));
        Self {
            date: dt.date(),
            time: time.unwrap_or_else(|| dt.time()),
        }
    }

    /// Parse a time from "HH:mm" format with a given base date.
    ///
    /// ```
    /// use next_train::domain::LocalTime;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    ///
    /// assert!(LocalTime::parse_hhmm("00:00", date).is_ok());
    /// assert!(LocalTime::parse_hhmm("23:59", date).is_ok());
    ///
    /// assert!(LocalTime::parse_hhmm("1430", date).is_err());
    /// assert!(LocalTime::parse_hhmm("25:00", date).is_err());
    /// assert!(LocalTime::parse_hhmm("Arrives - Copley - By", date).is_err());
    /// ```
    pub fn parse_hhmm(s: &str, date: NaiveDate) -> Result<Self, TimeError> {
        let s = s.trim();
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:mm format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| TimeError::new("invalid time"))?;

        Ok(Self { date, time })
    }

    /// Returns the date component.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the time component.
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    /// Converts to a NaiveDateTime.
    pub fn to_datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Add a duration, advancing the date across midnight.
    ///
    /// ```
    /// use next_train::domain::LocalTime;
    /// use chrono::{Duration, NaiveDate};
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// let time = LocalTime::parse_hhmm("23:50", date).unwrap();
    ///
    /// let later = time.checked_add(Duration::minutes(20)).unwrap();
    /// assert_eq!(later.to_string(), "00:10");
    /// assert_eq!(later.date(), NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
    /// ```
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        let dt = self.to_datetime().checked_add_signed(duration)?;
        Some(Self {
            date: dt.date(),
            time: dt.time(),
        })
    }

    /// Returns the duration between two times.
    ///
    /// Returns a negative duration if `other` is after `self`.
    pub fn signed_duration_since(&self, other: Self) -> Duration {
        self.to_datetime()
            .signed_duration_since(other.to_datetime())
    }

    /// Whole minutes elapsed since `other` (negative if `other` is later).
    pub fn minutes_since(&self, other: Self) -> i64 {
        self.signed_duration_since(other).num_minutes()
    }
}

impl Ord for LocalTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_datetime().cmp(&other.to_datetime())
    }
}

impl PartialOrd for LocalTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LocalTime({} {:02}:{:02})",
            self.date,
            self.hour(),
            self.minute()
        )
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl serde::Serialize for LocalTime {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Strict clock-face comparison of two "HH:mm" strings.
///
/// Both inputs are read on the same day, so "23:59" is never earlier than
/// "00:01". Fails if either side is not a valid `HH:mm` time.
///
/// ```
/// use next_train::domain::is_earlier;
///
/// assert_eq!(is_earlier("08:15", "08:16"), Ok(true));
/// assert_eq!(is_earlier("08:16", "08:16"), Ok(false));
/// assert!(is_earlier("8:16", "08:16").is_err());
/// ```
pub fn is_earlier(first: &str, second: &str) -> Result<bool, TimeError> {
    let day = NaiveDate::MIN;
    let first = LocalTime::parse_hhmm(first, day)?;
    let second = LocalTime::parse_hhmm(second, day)?;
    Ok(first < second)
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_valid_times() {
        let d = date(2024, 3, 15);

        let t = LocalTime::parse_hhmm("00:00", d).unwrap();
        assert_eq!(t.hour(), 0);
        assert_eq!(t.minute(), 0);

        let t = LocalTime::parse_hhmm(" 23:59 ", d).unwrap();
        assert_eq!(t.hour(), 23);
        assert_eq!(t.minute(), 59);
    }

    #[test]
    fn parse_invalid_format() {
        let d = date(2024, 3, 15);

        assert!(LocalTime::parse_hhmm("1430", d).is_err());
        assert!(LocalTime::parse_hhmm("14:3", d).is_err());
        assert!(LocalTime::parse_hhmm("14-30", d).is_err());
        assert!(LocalTime::parse_hhmm("ab:cd", d).is_err());
        assert!(LocalTime::parse_hhmm("", d).is_err());
    }

    #[test]
    fn parse_invalid_values() {
        let d = date(2024, 3, 15);

        assert!(LocalTime::parse_hhmm("24:00", d).is_err());
        assert!(LocalTime::parse_hhmm("12:60", d).is_err());
    }

    #[test]
    fn from_datetime_truncates_seconds() {
        let dt = date(2024, 3, 15).and_hms_opt(9, 41, 59).unwrap();
        let t = LocalTime::from_datetime(dt);
        assert_eq!(t.to_string(), "09:41");
        assert_eq!(t.time().second(), 0);
    }

    #[test]
    fn ordering_across_days() {
        let t1 = LocalTime::parse_hhmm("23:00", date(2024, 3, 15)).unwrap();
        let t2 = LocalTime::parse_hhmm("00:30", date(2024, 3, 16)).unwrap();
        assert!(t1 < t2);
    }

    #[test]
    fn minutes_since_across_midnight() {
        let t1 = LocalTime::parse_hhmm("23:50", date(2024, 3, 15)).unwrap();
        let t2 = LocalTime::parse_hhmm("00:35", date(2024, 3, 16)).unwrap();
        assert_eq!(t2.minutes_since(t1), 45);
        assert_eq!(t1.minutes_since(t2), -45);
    }

    #[test]
    fn minutes_since_over_an_hour() {
        let d = date(2024, 3, 15);
        let t1 = LocalTime::parse_hhmm("10:00", d).unwrap();
        let t2 = LocalTime::parse_hhmm("11:25", d).unwrap();
        assert_eq!(t2.minutes_since(t1), 85);
    }

    #[test]
    fn is_earlier_strict() {
        assert_eq!(is_earlier("05:29", "05:30"), Ok(true));
        assert_eq!(is_earlier("05:30", "05:29"), Ok(false));
        assert_eq!(is_earlier("05:30", "05:30"), Ok(false));
    }

    #[test]
    fn is_earlier_rejects_labels() {
        assert!(is_earlier("Arrives - Copley - By", "05:30").is_err());
        assert!(is_earlier("05:30", "").is_err());
    }

    #[test]
    fn serializes_as_hhmm() {
        let t = LocalTime::parse_hhmm("07:05", date(2024, 3, 15)).unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"07:05\"");
    }
}
