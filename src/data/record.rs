//! Case Record Module
//! Typed rows of the daily case dataset and the date helpers shared by the renderers.

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format used by the dataset and by tooltips.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One day of reported numbers for a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub date: NaiveDate,
    pub region: String,
    pub new_cases: u64,
    pub new_deaths: u64,
}

impl CaseRecord {
    pub fn new(date: NaiveDate, region: impl Into<String>, new_cases: u64, new_deaths: u64) -> Self {
        Self {
            date,
            region: region.into(),
            new_cases,
            new_deaths,
        }
    }

    /// Plot coordinates of this record: x in days since 1970-01-01, y in cases.
    pub fn plot_point(&self) -> [f64; 2] {
        [date_to_x(self.date), self.new_cases as f64]
    }
}

/// Inclusive date range of a data subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateExtent {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateExtent {
    pub fn new(min: NaiveDate, max: NaiveDate) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min <= date && date <= self.max
    }

    /// Number of days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.max - self.min).num_days() + 1
    }

    /// The extent as plot x coordinates.
    pub fn x_range(&self) -> (f64, f64) {
        (date_to_x(self.min), date_to_x(self.max))
    }
}

impl fmt::Display for DateExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.min.format(DATE_FORMAT),
            self.max.format(DATE_FORMAT)
        )
    }
}

/// Date and case count of a single data-point marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkerInfo {
    pub date: NaiveDate,
    pub cases: u64,
}

impl MarkerInfo {
    pub fn tooltip(&self) -> String {
        format!("Date: {}\nCases: {}", self.date.format(DATE_FORMAT), self.cases)
    }
}

impl From<&CaseRecord> for MarkerInfo {
    fn from(record: &CaseRecord) -> Self {
        Self {
            date: record.date,
            cases: record.new_cases,
        }
    }
}

/// Days since 1970-01-01 as a plot coordinate.
pub fn date_to_x(date: NaiveDate) -> f64 {
    (date - NaiveDate::default()).num_days() as f64
}

/// Inverse of [`date_to_x`], rounding to the nearest day.
pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() {
        return None;
    }
    TimeDelta::try_days(x.round() as i64).and_then(|d| NaiveDate::default().checked_add_signed(d))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn plot_x_is_days_since_epoch() {
        assert_eq!(date_to_x(ymd(1970, 1, 1)), 0.0);
        assert_eq!(date_to_x(ymd(1970, 1, 11)), 10.0);
        assert_eq!(x_to_date(18_700.4), Some(ymd(2021, 3, 14)));
        assert_eq!(x_to_date(date_to_x(ymd(2022, 1, 8))), Some(ymd(2022, 1, 8)));
        assert_eq!(x_to_date(f64::NAN), None);
    }

    #[test]
    fn extent_counts_both_ends() {
        let extent = DateExtent::new(ymd(2021, 1, 23), ymd(2021, 5, 1));
        assert_eq!(extent.days(), 99);
        assert!(extent.contains(ymd(2021, 1, 23)));
        assert!(extent.contains(ymd(2021, 5, 1)));
        assert!(!extent.contains(ymd(2021, 5, 2)));
        assert_eq!(extent.to_string(), "2021-01-23 to 2021-05-01");
    }

    #[test]
    fn tooltip_echoes_date_and_cases() {
        let record = CaseRecord::new(ymd(2021, 3, 24), "New York", 20184, 110);
        assert_eq!(
            MarkerInfo::from(&record).tooltip(),
            "Date: 2021-03-24\nCases: 20184"
        );
    }
}
