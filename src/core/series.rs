//! Normalized time-series representation shared by every data source

use crate::core::error::{PipelineError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// First day of the analysis window. Rows before this date are discarded.
pub const ANALYSIS_START: NaiveDate = match NaiveDate::from_ymd_opt(2019, 12, 1) {
    Some(date) => date,
    None => panic!("invalid analysis start date"),
};

/// One dated observation. `values` holds one slot per series column; a slot is
/// `None` when the upstream source reported no value for that date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    pub date: NaiveDate,
    pub values: Vec<Option<f64>>,
}

impl SeriesRow {
    pub fn new(date: NaiveDate, values: Vec<Option<f64>>) -> Self {
        Self { date, values }
    }
}

/// Columnar series sorted ascending by date, with unique dates, restricted to
/// dates on or after [`ANALYSIS_START`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedSeries {
    columns: Vec<String>,
    rows: Vec<SeriesRow>,
}

impl NormalizedSeries {
    /// Builds a series from raw rows: validates arity, sorts, drops duplicate
    /// dates (first occurrence wins) and truncates to the analysis window.
    pub fn normalize(provider: &str, columns: &[&str], mut rows: Vec<SeriesRow>) -> Result<Self> {
        if let Some(bad) = rows.iter().find(|row| row.values.len() != columns.len()) {
            return Err(PipelineError::schema(
                provider,
                format!(
                    "row dated {} has {} values, expected {}",
                    bad.date,
                    bad.values.len(),
                    columns.len()
                ),
            ));
        }

        let received = rows.len();
        rows.sort_by_key(|row| row.date);
        rows.dedup_by_key(|row| row.date);
        rows.retain(|row| row.date >= ANALYSIS_START);
        debug!(
            "Normalized {} series: {} rows received, {} kept",
            provider,
            received,
            rows.len()
        );

        Ok(Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[SeriesRow] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Most recent row that has a value for `column`.
    pub fn latest(&self, column: &str) -> Option<(NaiveDate, f64)> {
        let idx = self.column_index(column)?;
        self.rows
            .iter()
            .rev()
            .find_map(|row| row.values[idx].map(|v| (row.date, v)))
    }
}
