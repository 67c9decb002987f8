//! Data Processor Module
//! Date-window filtering, extents and lookups over the sorted record sequence.

use crate::data::record::{date_to_x, CaseRecord, DateExtent};
use chrono::NaiveDate;

/// Stateless helpers over a dataset sorted ascending by date.
pub struct DataProcessor;

impl DataProcessor {
    /// Records with `start <= date <= end`, in input order.
    pub fn filter_window(records: &[CaseRecord], start: NaiveDate, end: NaiveDate) -> Vec<CaseRecord> {
        records
            .iter()
            .filter(|r| start <= r.date && r.date <= end)
            .cloned()
            .collect()
    }

    /// Minimum and maximum date, or `None` for an empty subset.
    pub fn extent(records: &[CaseRecord]) -> Option<DateExtent> {
        let mut dates = records.iter().map(|r| r.date);
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(DateExtent::new(min, max))
    }

    /// Smallest and largest daily case count.
    pub fn case_extent(records: &[CaseRecord]) -> Option<(u64, u64)> {
        let mut cases = records.iter().map(|r| r.new_cases);
        let first = cases.next()?;
        Some(cases.fold((first, first), |(lo, hi), c| (lo.min(c), hi.max(c))))
    }

    /// Exact-date lookup.
    pub fn find_by_date(records: &[CaseRecord], date: NaiveDate) -> Option<&CaseRecord> {
        records
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|idx| &records[idx])
    }

    /// Record whose date is closest to plot coordinate `x`; ties go to the earlier day.
    pub fn nearest_to_x(records: &[CaseRecord], x: f64) -> Option<&CaseRecord> {
        if records.is_empty() || !x.is_finite() {
            return None;
        }
        let idx = records.partition_point(|r| date_to_x(r.date) < x);
        let after = records.get(idx);
        let before = idx.checked_sub(1).and_then(|i| records.get(i));

        match (before, after) {
            (Some(b), Some(a)) => {
                if x - date_to_x(b.date) <= date_to_x(a.date) - x {
                    Some(b)
                } else {
                    Some(a)
                }
            }
            (Some(b), None) => Some(b),
            (None, a) => a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(date: NaiveDate, cases: u64) -> CaseRecord {
        CaseRecord::new(date, "New York", cases, 0)
    }

    fn sample() -> Vec<CaseRecord> {
        vec![
            record(ymd(2021, 3, 1), 100),
            record(ymd(2021, 3, 24), 20184),
            record(ymd(2021, 5, 1), 2199),
        ]
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let data = sample();
        let hit = DataProcessor::filter_window(&data, ymd(2021, 3, 1), ymd(2021, 5, 1));
        assert_eq!(hit, data);

        let inner = DataProcessor::filter_window(&data, ymd(2021, 3, 2), ymd(2021, 4, 30));
        assert_eq!(inner, vec![data[1].clone()]);
    }

    #[test]
    fn empty_window_is_not_an_error() {
        let data = sample();
        assert!(DataProcessor::filter_window(&data, ymd(2020, 1, 1), ymd(2020, 12, 31)).is_empty());
        assert_eq!(DataProcessor::extent(&[]), None);
        assert_eq!(DataProcessor::case_extent(&[]), None);
    }

    #[test]
    fn extents_cover_subset() {
        let data = sample();
        assert_eq!(
            DataProcessor::extent(&data),
            Some(DateExtent::new(ymd(2021, 3, 1), ymd(2021, 5, 1)))
        );
        assert_eq!(DataProcessor::case_extent(&data), Some((100, 20184)));
    }

    #[test]
    fn lookups() {
        let data = sample();
        assert_eq!(
            DataProcessor::find_by_date(&data, ymd(2021, 3, 24)).map(|r| r.new_cases),
            Some(20184)
        );
        assert!(DataProcessor::find_by_date(&data, ymd(2021, 3, 25)).is_none());

        let x = date_to_x(ymd(2021, 3, 20));
        assert_eq!(
            DataProcessor::nearest_to_x(&data, x).map(|r| r.date),
            Some(ymd(2021, 3, 24))
        );
        let far_right = date_to_x(ymd(2022, 1, 1));
        assert_eq!(
            DataProcessor::nearest_to_x(&data, far_right).map(|r| r.date),
            Some(ymd(2021, 5, 1))
        );
        assert!(DataProcessor::nearest_to_x(&[], x).is_none());
    }
}
