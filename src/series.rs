//! Hour-resolution calendar utilities shared by the profile generators and
//! analysis stages.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Weekday};

/// Join key identifying an hour within a single calendar year.
///
/// The analysis stages join series by month/day/hour rather than absolute
/// timestamp, so all joined series must describe the same year. Feeding
/// multi-year data would silently cross-wire hours across years; single-year
/// analysis is a contract of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourKey {
    pub month: u32,
    pub day: u32,
    pub hour: u32,
}

impl HourKey {
    /// Extracts the key from an hour-aligned timestamp.
    pub fn from_datetime(ts: NaiveDateTime) -> Self {
        Self {
            month: ts.month(),
            day: ts.day(),
            hour: ts.hour(),
        }
    }
}

/// Midnight on January 1st of `year`.
pub fn year_start(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("January 1st 00:00 exists for every supported year")
}

/// Number of hours in `year`: 8760, or 8784 in leap years.
pub fn hours_in_year(year: i32) -> usize {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        8784
    } else {
        8760
    }
}

/// Iterates every hour-aligned timestamp of `year` in chronological order.
pub fn year_hours(year: i32) -> impl Iterator<Item = NaiveDateTime> {
    let start = year_start(year);
    (0..hours_in_year(year)).map(move |h| start + Duration::hours(h as i64))
}

/// `true` on Saturday and Sunday.
pub fn is_weekend(ts: NaiveDateTime) -> bool {
    matches!(ts.weekday(), Weekday::Sat | Weekday::Sun)
}
