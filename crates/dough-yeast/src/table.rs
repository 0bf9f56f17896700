//! The fermentation reference table and its validation rules.
//!
//! A valid table:
//! - Has at least one dose column and at least one row
//! - Lists doses strictly increasing and positive
//! - Gives every row exactly one hours value per dose
//! - Lists hours strictly decreasing and positive along each row
//! - Tags each row `room` or `fridge` (never `both`)
//! - Has no two rows at the same temperature

use serde::Deserialize;

use dough_types::{FermentationMethod, YeastType};

use crate::error::{Result, YeastError};

/// One temperature row of the reference table.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TableRow {
    pub method: FermentationMethod,
    pub temperature_celsius: f64,
    /// Hours to full fermentation, one per dose column.
    pub hours: Vec<f64>,
}

/// A single tabulated point, flattened out of a row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YeastTableEntry {
    pub method: FermentationMethod,
    pub temperature_celsius: f64,
    pub duration_hours: f64,
    pub yeast_percent: f64,
}

/// The validated reference table. Rows are kept sorted by temperature.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct YeastTable {
    reference_yeast: YeastType,
    yeast_percent: Vec<f64>,
    rows: Vec<TableRow>,
}

#[derive(Deserialize)]
struct RawTable {
    reference_yeast: YeastType,
    yeast_percent: Vec<f64>,
    rows: Vec<TableRow>,
}

impl TryFrom<RawTable> for YeastTable {
    type Error = YeastError;

    fn try_from(raw: RawTable) -> Result<Self> {
        YeastTable::new(raw.reference_yeast, raw.yeast_percent, raw.rows)
    }
}

impl YeastTable {
    /// Build a table, validating every structural rule.
    pub fn new(
        reference_yeast: YeastType,
        yeast_percent: Vec<f64>,
        mut rows: Vec<TableRow>,
    ) -> Result<Self> {
        if yeast_percent.is_empty() {
            return Err(invalid("no yeast dose columns"));
        }
        if rows.is_empty() {
            return Err(invalid("no temperature rows"));
        }
        if yeast_percent.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(invalid("yeast doses must be positive numbers"));
        }
        if yeast_percent.windows(2).any(|w| w[0] >= w[1]) {
            return Err(invalid("yeast doses must be strictly increasing"));
        }

        for row in &rows {
            let t = row.temperature_celsius;
            if row.method == FermentationMethod::Both {
                return Err(invalid(format!("row at {t}°C: method must be room or fridge")));
            }
            if !t.is_finite() {
                return Err(invalid("row temperature is not a number"));
            }
            if row.hours.len() != yeast_percent.len() {
                return Err(invalid(format!(
                    "row at {t}°C has {} hours values, expected {}",
                    row.hours.len(),
                    yeast_percent.len()
                )));
            }
            if row.hours.iter().any(|h| !h.is_finite() || *h <= 0.0) {
                return Err(invalid(format!("row at {t}°C: hours must be positive numbers")));
            }
            if row.hours.windows(2).any(|w| w[0] <= w[1]) {
                return Err(invalid(format!("row at {t}°C: hours must strictly decrease")));
            }
        }

        rows.sort_by(|a, b| a.temperature_celsius.total_cmp(&b.temperature_celsius));
        if let Some(w) = rows
            .windows(2)
            .find(|w| w[0].temperature_celsius == w[1].temperature_celsius)
        {
            return Err(invalid(format!(
                "duplicate row for {}°C",
                w[0].temperature_celsius
            )));
        }

        Ok(Self {
            reference_yeast,
            yeast_percent,
            rows,
        })
    }

    /// The yeast form the doses are written for.
    pub fn reference_yeast(&self) -> YeastType {
        self.reference_yeast
    }

    /// Dose columns, ascending.
    pub fn yeast_percent(&self) -> &[f64] {
        &self.yeast_percent
    }

    /// All rows, ascending by temperature.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Rows usable for `method`, ascending by temperature.
    ///
    /// `Both` uses every row. A single method with no rows of its own falls
    /// back to every row as well.
    pub fn rows_for(&self, method: FermentationMethod) -> Vec<&TableRow> {
        let rows: Vec<&TableRow> = match method {
            FermentationMethod::Both => self.rows.iter().collect(),
            m => self.rows.iter().filter(|r| r.method == m).collect(),
        };
        if rows.is_empty() {
            self.rows.iter().collect()
        } else {
            rows
        }
    }

    /// Every tabulated point, row by row.
    pub fn entries(&self) -> impl Iterator<Item = YeastTableEntry> + '_ {
        self.rows.iter().flat_map(move |row| {
            row.hours
                .iter()
                .zip(&self.yeast_percent)
                .map(move |(&duration_hours, &yeast_percent)| YeastTableEntry {
                    method: row.method,
                    temperature_celsius: row.temperature_celsius,
                    duration_hours,
                    yeast_percent,
                })
        })
    }
}

fn invalid(reason: impl Into<String>) -> YeastError {
    YeastError::InvalidTable(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(method: FermentationMethod, t: f64, hours: &[f64]) -> TableRow {
        TableRow {
            method,
            temperature_celsius: t,
            hours: hours.to_vec(),
        }
    }

    #[test]
    fn rows_are_sorted_by_temperature() {
        let table = YeastTable::new(
            YeastType::Instant,
            vec![0.1, 0.2],
            vec![
                row(FermentationMethod::Room, 22.0, &[8.0, 5.0]),
                row(FermentationMethod::Fridge, 4.0, &[40.0, 25.0]),
            ],
        )
        .unwrap();
        let temps: Vec<f64> = table.rows().iter().map(|r| r.temperature_celsius).collect();
        assert_eq!(temps, vec![4.0, 22.0]);
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = YeastTable::new(
            YeastType::Instant,
            vec![0.1, 0.2],
            vec![row(FermentationMethod::Room, 22.0, &[8.0])],
        )
        .unwrap_err();
        assert!(matches!(err, YeastError::InvalidTable(ref m) if m.contains("expected 2")));
    }

    #[test]
    fn rejects_non_decreasing_hours() {
        let err = YeastTable::new(
            YeastType::Instant,
            vec![0.1, 0.2],
            vec![row(FermentationMethod::Room, 22.0, &[5.0, 5.0])],
        )
        .unwrap_err();
        assert!(matches!(err, YeastError::InvalidTable(_)));
    }

    #[test]
    fn rejects_unsorted_doses() {
        let err = YeastTable::new(
            YeastType::Instant,
            vec![0.2, 0.1],
            vec![row(FermentationMethod::Room, 22.0, &[8.0, 5.0])],
        )
        .unwrap_err();
        assert!(matches!(err, YeastError::InvalidTable(_)));
    }

    #[test]
    fn rejects_duplicate_temperature() {
        let err = YeastTable::new(
            YeastType::Instant,
            vec![0.1],
            vec![
                row(FermentationMethod::Room, 22.0, &[8.0]),
                row(FermentationMethod::Room, 22.0, &[7.0]),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, YeastError::InvalidTable(ref m) if m.contains("duplicate")));
    }

    #[test]
    fn rejects_both_rows() {
        let err = YeastTable::new(
            YeastType::Instant,
            vec![0.1],
            vec![row(FermentationMethod::Both, 10.0, &[8.0])],
        )
        .unwrap_err();
        assert!(matches!(err, YeastError::InvalidTable(_)));
    }

    #[test]
    fn rows_for_falls_back_to_all_rows() {
        let table = YeastTable::new(
            YeastType::Instant,
            vec![0.1],
            vec![row(FermentationMethod::Room, 22.0, &[8.0])],
        )
        .unwrap();
        assert_eq!(table.rows_for(FermentationMethod::Fridge).len(), 1);
    }

    #[test]
    fn entries_flatten_rows() {
        let table = YeastTable::new(
            YeastType::Instant,
            vec![0.1, 0.2],
            vec![
                row(FermentationMethod::Fridge, 4.0, &[40.0, 25.0]),
                row(FermentationMethod::Room, 22.0, &[8.0, 5.0]),
            ],
        )
        .unwrap();
        let entries: Vec<YeastTableEntry> = table.entries().collect();
        assert_eq!(entries.len(), 4);
        assert_eq!(
            entries[3],
            YeastTableEntry {
                method: FermentationMethod::Room,
                temperature_celsius: 22.0,
                duration_hours: 5.0,
                yeast_percent: 0.2,
            }
        );
    }

    #[test]
    fn deserialize_validates() {
        let src = r#"
            reference_yeast = "instant"
            yeast_percent = [0.1, 0.2]

            [[rows]]
            method = "room"
            temperature_celsius = 20.0
            hours = [5.0, 9.0]
        "#;
        assert!(toml::from_str::<YeastTable>(src).is_err());
    }
}
