//! CSV Data Loader Module
//! Reads the daily case CSV with Polars and converts it into typed records.
//!
//! Any malformed row rejects the whole load; there is no partial dataset.

use crate::data::record::{CaseRecord, DATE_FORMAT};
use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const COL_DATE: &str = "date";
pub const COL_STATE: &str = "state";
pub const COL_CASES: &str = "cases";
pub const COL_DEATHS: &str = "deaths";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Dataset not found: {0}")]
    MissingFile(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing column '{0}'")]
    MissingColumn(&'static str),
    #[error("Row {row}: invalid date '{value}'")]
    InvalidDate { row: usize, value: String },
    #[error("Row {row}: '{column}' is not a non-negative integer ('{value}')")]
    InvalidCount {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("Row {row}: missing value for '{column}'")]
    MissingValue { row: usize, column: &'static str },
    #[error("Row {row}: duplicate date {date} (first seen on row {first})")]
    DuplicateDate {
        row: usize,
        first: usize,
        date: NaiveDate,
    },
}

/// Loads the case dataset and keeps the parsed records.
pub struct DataLoader {
    records: Vec<CaseRecord>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            file_path: None,
        }
    }

    /// Load a CSV file and keep its records.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&[CaseRecord], LoadError> {
        let records = Self::read_csv(file_path)?;
        self.file_path = Some(file_path.to_path_buf());
        self.records = records;
        Ok(&self.records)
    }

    /// Read and validate a CSV file without touching loader state.
    pub fn read_csv(file_path: &Path) -> Result<Vec<CaseRecord>, LoadError> {
        if !file_path.is_file() {
            return Err(LoadError::MissingFile(file_path.to_path_buf()));
        }

        let df = Self::csv_options()
            .try_into_reader_with_file_path(Some(file_path.to_path_buf()))?
            .finish()?;

        let records = Self::records_from_frame(&df)?;
        info!(
            path = %file_path.display(),
            rows = records.len(),
            "loaded case dataset"
        );
        Ok(records)
    }

    /// Parse CSV text already held in memory.
    pub fn parse_csv(text: &str) -> Result<Vec<CaseRecord>, LoadError> {
        let df = Self::csv_options()
            .into_reader_with_file_handle(Cursor::new(text.as_bytes().to_vec()))
            .finish()?;
        Self::records_from_frame(&df)
    }

    /// Strict `YYYY-MM-DD` with zero-padded month and day.
    fn parse_date(text: &str) -> Option<NaiveDate> {
        let text = text.trim();
        if text.len() != 10 {
            return None;
        }
        NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
    }

    /// Every column is read as text so that row-level errors can name the row.
    fn csv_options() -> CsvReadOptions {
        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
    }

    /// Convert a frame of text columns into sorted, validated records.
    pub fn records_from_frame(df: &DataFrame) -> Result<Vec<CaseRecord>, LoadError> {
        let dates = Self::text_column(df, COL_DATE)?;
        let states = Self::text_column(df, COL_STATE)?;
        let cases = Self::text_column(df, COL_CASES)?;
        let deaths = Self::text_column(df, COL_DEATHS)?;

        let mut seen: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        let mut records = Vec::with_capacity(df.height());

        let rows = dates
            .into_iter()
            .zip(states)
            .zip(cases)
            .zip(deaths)
            .enumerate();

        for (idx, (((date, state), cases), deaths)) in rows {
            let row = idx + 1;

            let date_text = date.ok_or(LoadError::MissingValue {
                row,
                column: COL_DATE,
            })?;
            let date = Self::parse_date(date_text).ok_or_else(|| LoadError::InvalidDate {
                row,
                value: date_text.to_string(),
            })?;

            if let Some(first) = seen.insert(date, row) {
                return Err(LoadError::DuplicateDate { row, first, date });
            }

            let region = state
                .map(|s| s.trim().to_string())
                .ok_or(LoadError::MissingValue {
                    row,
                    column: COL_STATE,
                })?;

            records.push(CaseRecord {
                date,
                region,
                new_cases: Self::parse_count(row, COL_CASES, cases)?,
                new_deaths: Self::parse_count(row, COL_DEATHS, deaths)?,
            });
        }

        if !records.windows(2).all(|w| w[0].date < w[1].date) {
            debug!("dataset rows were out of order, sorting by date");
            records.sort_by_key(|r| r.date);
        }

        Ok(records)
    }

    fn text_column<'a>(
        df: &'a DataFrame,
        name: &'static str,
    ) -> Result<&'a StringChunked, LoadError> {
        let column = df
            .column(name)
            .map_err(|_| LoadError::MissingColumn(name))?;
        Ok(column.str()?)
    }

    fn parse_count(row: usize, column: &'static str, value: Option<&str>) -> Result<u64, LoadError> {
        let text = value.ok_or(LoadError::MissingValue { row, column })?;
        text.trim().parse::<u64>().map_err(|_| LoadError::InvalidCount {
            row,
            column,
            value: text.to_string(),
        })
    }

    /// Get the loaded records, ascending by date.
    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    /// Get the number of loaded records.
    pub fn get_row_count(&self) -> usize {
        self.records.len()
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Set records directly (used for background loading)
    pub fn set_records(&mut self, records: Vec<CaseRecord>, file_path: PathBuf) {
        self.records = records;
        self.file_path = Some(file_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "date,state,cases,deaths
2021-03-01,New York,100,5
2021-03-24,New York,20184,110
2021-05-01,New York,2199,30
";

    #[test]
    fn parses_every_row_in_order() {
        let records = DataLoader::parse_csv(SAMPLE).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].date, NaiveDate::from_ymd_opt(2021, 3, 24).unwrap());
        assert_eq!(records[1].region, "New York");
        assert_eq!(records[1].new_cases, 20184);
        assert_eq!(records[2].new_deaths, 30);
    }

    #[test]
    fn sorts_unordered_input() {
        let text = "date,state,cases,deaths
2021-05-01,New York,2199,30
2021-03-01,New York,100,5
2021-03-24,New York,20184,110
";
        let records = DataLoader::parse_csv(text).unwrap();
        let dates: Vec<_> = records.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, ["2021-03-01", "2021-03-24", "2021-05-01"]);
    }

    #[test]
    fn rejects_bad_date() {
        let text = "date,state,cases,deaths
2021-03-01,New York,100,5
2021-02-30,New York,1,1
";
        match DataLoader::parse_csv(text) {
            Err(LoadError::InvalidDate { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "2021-02-30");
            }
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn rejects_dates_without_leading_zeros() {
        let text = "date,state,cases,deaths\n2021-3-1,New York,100,10\n";
        match DataLoader::parse_csv(text) {
            Err(LoadError::InvalidDate { row, value }) => {
                assert_eq!(row, 1);
                assert_eq!(value, "2021-3-1");
            }
            other => panic!("expected InvalidDate, got {other:?}"),
        }
        assert!(DataLoader::parse_csv("date,state,cases,deaths\n2021-03-01,New York,100,10\n").is_ok());
    }

    #[test]
    fn rejects_negative_and_non_numeric_counts() {
        let negative = "date,state,cases,deaths\n2021-03-01,New York,-4,0\n";
        assert!(matches!(
            DataLoader::parse_csv(negative),
            Err(LoadError::InvalidCount { row: 1, column: COL_CASES, .. })
        ));

        let text = "date,state,cases,deaths\n2021-03-01,New York,4,many\n";
        assert!(matches!(
            DataLoader::parse_csv(text),
            Err(LoadError::InvalidCount { row: 1, column: COL_DEATHS, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_dates() {
        let text = "date,state,cases,deaths
2021-03-01,New York,100,5
2021-03-02,New York,120,5
2021-03-01,New York,100,5
";
        assert!(matches!(
            DataLoader::parse_csv(text),
            Err(LoadError::DuplicateDate { row: 3, first: 1, .. })
        ));
    }

    #[test]
    fn rejects_missing_column() {
        let text = "date,state,cases\n2021-03-01,New York,100\n";
        assert!(matches!(
            DataLoader::parse_csv(text),
            Err(LoadError::MissingColumn(COL_DEATHS))
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        let mut loader = DataLoader::new();
        let err = loader
            .load_csv(Path::new("does/not/exist.csv"))
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingFile(_)));
        assert_eq!(loader.get_row_count(), 0);
        assert!(loader.get_file_path().is_none());
    }
}
