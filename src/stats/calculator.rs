//! Statistics Calculator Module
//! Summary numbers shown beside each scene.

use crate::data::{CaseRecord, MarkerInfo};
use statrs::statistics::{Data, Median, Statistics};

/// Summary of the daily case counts inside one scene window.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneStats {
    pub days: usize,
    pub total_cases: u64,
    pub total_deaths: u64,
    pub mean_cases: f64,
    pub median_cases: f64,
    pub std_cases: f64,
    pub peak: Option<MarkerInfo>,
    pub trough: Option<MarkerInfo>,
}

impl Default for SceneStats {
    fn default() -> Self {
        Self {
            days: 0,
            total_cases: 0,
            total_deaths: 0,
            mean_cases: f64::NAN,
            median_cases: f64::NAN,
            std_cases: f64::NAN,
            peak: None,
            trough: None,
        }
    }
}

impl SceneStats {
    pub fn is_empty(&self) -> bool {
        self.days == 0
    }
}

/// Computes [`SceneStats`] for a filtered subset.
pub struct StatsCalculator;

impl StatsCalculator {
    pub fn scene_stats(records: &[CaseRecord]) -> SceneStats {
        if records.is_empty() {
            return SceneStats::default();
        }

        let values: Vec<f64> = records.iter().map(|r| r.new_cases as f64).collect();
        let mean_cases = values.iter().mean();
        // Sample deviation is undefined for a single day.
        let std_cases = if values.len() > 1 {
            values.iter().std_dev()
        } else {
            0.0
        };
        let median_cases = Data::new(values).median();

        // Earliest day wins on ties: max_by_key keeps the last maximum, hence rev().
        let peak = records
            .iter()
            .rev()
            .max_by_key(|r| r.new_cases)
            .map(MarkerInfo::from);
        let trough = records
            .iter()
            .min_by_key(|r| r.new_cases)
            .map(MarkerInfo::from);

        SceneStats {
            days: records.len(),
            total_cases: records.iter().map(|r| r.new_cases).sum(),
            total_deaths: records.iter().map(|r| r.new_deaths).sum(),
            mean_cases,
            median_cases,
            std_cases,
            peak,
            trough,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(d: u32, cases: u64, deaths: u64) -> CaseRecord {
        CaseRecord::new(
            NaiveDate::from_ymd_opt(2021, 6, d).unwrap(),
            "New York",
            cases,
            deaths,
        )
    }

    #[test]
    fn summarises_window() {
        let records = vec![
            record(27, 400, 4),
            record(28, 300, 2),
            record(29, 244, 1),
            record(30, 800, 3),
        ];
        let stats = StatsCalculator::scene_stats(&records);
        assert_eq!(stats.days, 4);
        assert_eq!(stats.total_cases, 1744);
        assert_eq!(stats.total_deaths, 10);
        assert!((stats.mean_cases - 436.0).abs() < 1e-9);
        assert!((stats.median_cases - 350.0).abs() < 1e-9);
        assert!(stats.std_cases > 0.0);
        assert_eq!(stats.peak.map(|m| m.cases), Some(800));
        let trough = stats.trough.unwrap();
        assert_eq!(trough.cases, 244);
        assert_eq!(trough.date, NaiveDate::from_ymd_opt(2021, 6, 29).unwrap());
    }

    #[test]
    fn ties_report_earliest_day() {
        let records = vec![record(1, 10, 0), record(2, 50, 0), record(3, 50, 0), record(4, 10, 0)];
        let stats = StatsCalculator::scene_stats(&records);
        assert_eq!(stats.peak.map(|m| m.date.to_string()), Some("2021-06-02".into()));
        assert_eq!(stats.trough.map(|m| m.date.to_string()), Some("2021-06-01".into()));
    }

    #[test]
    fn empty_window_has_no_extremes() {
        let stats = StatsCalculator::scene_stats(&[]);
        assert!(stats.is_empty());
        assert!(stats.peak.is_none());
        assert!(stats.mean_cases.is_nan());
    }

    #[test]
    fn single_day_has_zero_spread() {
        let stats = StatsCalculator::scene_stats(&[record(5, 77, 1)]);
        assert_eq!(stats.std_cases, 0.0);
        assert_eq!(stats.median_cases, 77.0);
    }
}
