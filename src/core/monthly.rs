//! Calendar-month aggregation of normalized series

use crate::core::series::NormalizedSeries;
use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRow {
    pub month: YearMonth,
    pub values: Vec<Option<f64>>,
}

/// One row per calendar month present in the source series, ascending.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MonthlySeries {
    columns: Vec<String>,
    rows: Vec<MonthlyRow>,
}

impl MonthlySeries {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[MonthlyRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Month -> mean lookup for one column; months without a mean are omitted.
    pub fn column(&self, name: &str) -> Option<BTreeMap<YearMonth, f64>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(
            self.rows
                .iter()
                .filter_map(|row| row.values[idx].map(|v| (row.month, v)))
                .collect(),
        )
    }
}

/// Reduces `series` to one arithmetic mean per calendar month for each of
/// `value_columns`. Empty slots are ignored; a month with no values for a
/// column keeps an empty slot. Unknown columns are skipped.
pub fn to_monthly(series: &NormalizedSeries, value_columns: &[&str]) -> MonthlySeries {
    let selected: Vec<(String, usize)> = value_columns
        .iter()
        .filter_map(|name| match series.column_index(name) {
            Some(idx) => Some((name.to_string(), idx)),
            None => {
                debug!("Skipping unknown column '{}' in monthly aggregation", name);
                None
            }
        })
        .collect();

    let mut buckets: BTreeMap<YearMonth, Vec<(f64, usize)>> = BTreeMap::new();
    for row in series.rows() {
        let sums = buckets
            .entry(YearMonth::of(row.date))
            .or_insert_with(|| vec![(0.0, 0); selected.len()]);
        for (slot, (_, idx)) in sums.iter_mut().zip(&selected) {
            if let Some(value) = row.values[*idx] {
                slot.0 += value;
                slot.1 += 1;
            }
        }
    }

    let rows = buckets
        .into_iter()
        .map(|(month, sums)| MonthlyRow {
            month,
            values: sums
                .into_iter()
                .map(|(sum, count)| (count > 0).then(|| sum / count as f64))
                .collect(),
        })
        .collect();

    MonthlySeries {
        columns: selected.into_iter().map(|(name, _)| name).collect(),
        rows,
    }
}

#[cfg(test)]
pub(crate) fn monthly_from(column: &str, points: &[(YearMonth, f64)]) -> MonthlySeries {
    MonthlySeries {
        columns: vec![column.to_string()],
        rows: points
            .iter()
            .map(|(month, value)| MonthlyRow {
                month: *month,
                values: vec![Some(*value)],
            })
            .collect(),
    }
}
