use std::path::Path;
use std::sync::OnceLock;

use tracing::debug;

use dough_types::{FermentationMethod, YeastType};

use crate::error::{Result, YeastError};
use crate::table::{TableRow, YeastTable};

const BUILTIN_TABLE: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/yeast_table.toml"));

static BUILTIN: OnceLock<YeastModel> = OnceLock::new();

/// Dose multiplier of each yeast form relative to instant dry yeast.
pub fn conversion_factor(yeast: YeastType) -> f64 {
    match yeast {
        YeastType::Instant => 1.0,
        YeastType::ActiveDry => 1.25,
        YeastType::Fresh => 3.0,
    }
}

/// A request the table could not answer directly and was pulled back to the
/// nearest boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Clamp {
    Temperature { requested: f64, used: f64 },
    Duration { requested: f64, used: f64 },
}

/// Result of a yeast model query.
#[derive(Clone, Debug, PartialEq)]
pub struct YeastLookup {
    /// Yeast dose as a baker's percentage of flour, for the requested form.
    pub percent: f64,
    /// Boundaries the request was clamped to. Empty for in-table requests.
    pub clamped: Vec<Clamp>,
}

impl YeastLookup {
    pub fn is_clamped(&self) -> bool {
        !self.clamped.is_empty()
    }
}

/// The yeast dose model: a validated reference table plus the lookup rules.
#[derive(Clone, Debug)]
pub struct YeastModel {
    table: YeastTable,
}

impl YeastModel {
    pub fn new(table: YeastTable) -> Self {
        Self { table }
    }

    /// The model built from the table embedded in the binary.
    ///
    /// Parsed on first use and shared read-only for the rest of the process.
    pub fn builtin() -> &'static YeastModel {
        BUILTIN.get_or_init(|| {
            let model =
                Self::from_toml_str(BUILTIN_TABLE).expect("embedded yeast table is valid");
            debug!(rows = model.table.rows().len(), "loaded built-in yeast table");
            model
        })
    }

    pub fn from_toml_str(src: &str) -> Result<Self> {
        let table: YeastTable = toml::from_str(src)?;
        Ok(Self::new(table))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)?;
        let model = Self::from_toml_str(&src)?;
        debug!(
            path = %path.display(),
            rows = model.table.rows().len(),
            "loaded yeast table"
        );
        Ok(model)
    }

    pub fn table(&self) -> &YeastTable {
        &self.table
    }

    /// Yeast dose for a dough fermenting `duration_hours` at
    /// `temperature_celsius`.
    ///
    /// Interpolates linearly between the bracketing rows and doses. Exact
    /// table points return the tabulated dose unchanged. Requests outside
    /// the table clamp to its edge and are listed in the returned
    /// [`YeastLookup::clamped`].
    pub fn percent_for(
        &self,
        method: FermentationMethod,
        temperature_celsius: f64,
        duration_hours: f64,
        yeast_type: YeastType,
    ) -> Result<YeastLookup> {
        check_positive("temperature", temperature_celsius)?;
        check_positive("duration", duration_hours)?;

        let rows = self.table.rows_for(method);
        let mut clamped = Vec::new();

        let coldest = rows[0].temperature_celsius;
        let warmest = rows[rows.len() - 1].temperature_celsius;
        let used_temperature = temperature_celsius.clamp(coldest, warmest);
        if used_temperature != temperature_celsius {
            clamped.push(Clamp::Temperature {
                requested: temperature_celsius,
                used: used_temperature,
            });
        }
        let (lower, upper) = bracket_temperature(&rows, used_temperature);

        let doses = self.table.yeast_percent();
        let (low_dose, low_hours) = row_dose(lower, doses, duration_hours);
        let (reference, used_hours, outside) = match upper {
            None => (low_dose, low_hours, low_hours != duration_hours),
            Some((upper, weight)) => {
                let (high_dose, high_hours) = row_dose(upper, doses, duration_hours);
                (
                    lerp(low_dose, high_dose, weight),
                    lerp(low_hours, high_hours, weight),
                    low_hours != duration_hours || high_hours != duration_hours,
                )
            }
        };
        if outside {
            clamped.push(Clamp::Duration {
                requested: duration_hours,
                used: used_hours,
            });
        }

        let percent = reference * conversion_factor(yeast_type)
            / conversion_factor(self.table.reference_yeast());

        if !clamped.is_empty() {
            debug!(
                %method,
                temperature_celsius,
                duration_hours,
                ?clamped,
                "yeast lookup clamped to table bounds"
            );
        }

        Ok(YeastLookup { percent, clamped })
    }

    /// Tabulated temperatures available for `method`, ascending.
    pub fn temperatures(&self, method: FermentationMethod) -> Vec<f64> {
        self.table
            .rows_for(method)
            .iter()
            .map(|r| r.temperature_celsius)
            .collect()
    }

    /// Tabulated durations of the row nearest to `temperature_celsius`,
    /// ascending.
    pub fn durations_at(&self, temperature_celsius: f64) -> Vec<f64> {
        let nearest = self.table.rows().iter().min_by(|a, b| {
            let da = (a.temperature_celsius - temperature_celsius).abs();
            let db = (b.temperature_celsius - temperature_celsius).abs();
            da.total_cmp(&db)
        });
        let mut hours = nearest.map(|r| r.hours.clone()).unwrap_or_default();
        hours.reverse();
        hours
    }
}

fn check_positive(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(YeastError::OutOfRange { parameter, value })
    }
}

fn lerp(a: f64, b: f64, weight: f64) -> f64 {
    a + (b - a) * weight
}

/// Row at or below `temperature`, plus the next row up and its weight when
/// `temperature` falls strictly between two rows. `temperature` must lie
/// within the rows' range.
fn bracket_temperature<'a>(
    rows: &[&'a TableRow],
    temperature: f64,
) -> (&'a TableRow, Option<(&'a TableRow, f64)>) {
    let above = rows
        .partition_point(|r| r.temperature_celsius <= temperature)
        .max(1);
    let lo = rows[above - 1];
    match rows.get(above) {
        Some(&hi) if lo.temperature_celsius < temperature => {
            let weight = (temperature - lo.temperature_celsius)
                / (hi.temperature_celsius - lo.temperature_celsius);
            (lo, Some((hi, weight)))
        }
        _ => (lo, None),
    }
}

/// Dose that ferments in `duration` hours along one row, plus the hours
/// actually used after clamping to the row. Row hours run from longest to
/// shortest.
fn row_dose(row: &TableRow, doses: &[f64], duration: f64) -> (f64, f64) {
    let hours = &row.hours;
    let last = hours.len() - 1;
    if duration >= hours[0] {
        return (doses[0], hours[0]);
    }
    if duration <= hours[last] {
        return (doses[last], hours[last]);
    }
    // hours[0] > duration > hours[last], so 1 <= k <= last.
    let k = hours.partition_point(|&h| h >= duration);
    let j = k - 1;
    let fraction = (hours[j] - duration) / (hours[j] - hours[j + 1]);
    (lerp(doses[j], doses[j + 1], fraction), duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableRow;
    use proptest::prelude::*;

    fn small_model() -> YeastModel {
        let table = YeastTable::new(
            YeastType::Instant,
            vec![0.1, 0.2, 0.4],
            vec![
                TableRow {
                    method: FermentationMethod::Fridge,
                    temperature_celsius: 4.0,
                    hours: vec![60.0, 40.0, 24.0],
                },
                TableRow {
                    method: FermentationMethod::Room,
                    temperature_celsius: 20.0,
                    hours: vec![12.0, 8.0, 4.0],
                },
                TableRow {
                    method: FermentationMethod::Room,
                    temperature_celsius: 24.0,
                    hours: vec![8.0, 6.0, 3.0],
                },
            ],
        )
        .unwrap();
        YeastModel::new(table)
    }

    #[test]
    fn builtin_table_loads() {
        let model = YeastModel::builtin();
        assert_eq!(model.table().reference_yeast(), YeastType::Instant);
        assert!(!model.temperatures(FermentationMethod::Room).is_empty());
        assert!(!model.temperatures(FermentationMethod::Fridge).is_empty());
    }

    #[test]
    fn builtin_is_shared() {
        assert!(std::ptr::eq(YeastModel::builtin(), YeastModel::builtin()));
    }

    #[test]
    fn exact_point_returns_tabulated_value() {
        let model = small_model();
        let lookup = model
            .percent_for(FermentationMethod::Room, 20.0, 8.0, YeastType::Instant)
            .unwrap();
        assert_eq!(lookup.percent, 0.2);
        assert!(!lookup.is_clamped());
    }

    #[test]
    fn exact_last_column_returns_tabulated_value() {
        let model = small_model();
        let lookup = model
            .percent_for(FermentationMethod::Room, 24.0, 3.0, YeastType::Instant)
            .unwrap();
        assert_eq!(lookup.percent, 0.4);
        assert!(!lookup.is_clamped());
    }

    #[test]
    fn lower_row_point_ignores_next_row() {
        // 12h is past the end of the 24°C row but on the 20°C row.
        let model = small_model();
        let lookup = model
            .percent_for(FermentationMethod::Room, 20.0, 12.0, YeastType::Instant)
            .unwrap();
        assert_eq!(lookup.percent, 0.1);
        assert!(lookup.clamped.is_empty());
    }

    #[test]
    fn builtin_room_row_first_column_is_not_clamped() {
        let model = YeastModel::builtin();
        let row = model
            .table()
            .rows_for(FermentationMethod::Room)
            .into_iter()
            .find(|r| r.temperature_celsius == 21.0)
            .unwrap();
        let lookup = model
            .percent_for(FermentationMethod::Room, 21.0, row.hours[0], YeastType::Instant)
            .unwrap();
        assert_eq!(lookup.percent, model.table().yeast_percent()[0]);
        assert!(lookup.clamped.is_empty());
    }

    #[test]
    fn every_builtin_entry_is_exact() {
        let model = YeastModel::builtin();
        for entry in model.table().entries() {
            let lookup = model
                .percent_for(
                    entry.method,
                    entry.temperature_celsius,
                    entry.duration_hours,
                    YeastType::Instant,
                )
                .unwrap();
            assert_eq!(lookup.percent, entry.yeast_percent, "{entry:?}");
            assert!(!lookup.is_clamped(), "{entry:?}");
        }
    }

    #[test]
    fn interpolates_between_doses() {
        let model = small_model();
        let lookup = model
            .percent_for(FermentationMethod::Room, 20.0, 10.0, YeastType::Instant)
            .unwrap();
        assert!((lookup.percent - 0.15).abs() < 1e-12);
    }

    #[test]
    fn interpolates_between_temperatures() {
        let model = small_model();
        // 8h is 0.2 at 20°C and 0.1 at 24°C.
        let lookup = model
            .percent_for(FermentationMethod::Room, 22.0, 8.0, YeastType::Instant)
            .unwrap();
        assert!((lookup.percent - 0.15).abs() < 1e-12);
        assert!(!lookup.is_clamped());
    }

    #[test]
    fn clamps_temperature_to_method_rows() {
        let model = small_model();
        let lookup = model
            .percent_for(FermentationMethod::Room, 30.0, 6.0, YeastType::Instant)
            .unwrap();
        assert_eq!(lookup.percent, 0.2);
        assert_eq!(
            lookup.clamped,
            vec![Clamp::Temperature { requested: 30.0, used: 24.0 }]
        );
    }

    #[test]
    fn room_lookup_ignores_fridge_rows() {
        let model = small_model();
        let lookup = model
            .percent_for(FermentationMethod::Room, 10.0, 8.0, YeastType::Instant)
            .unwrap();
        assert_eq!(lookup.percent, 0.2);
        assert!(matches!(lookup.clamped[0], Clamp::Temperature { used, .. } if used == 20.0));
    }

    #[test]
    fn both_lookup_spans_every_row() {
        let model = small_model();
        let lookup = model
            .percent_for(FermentationMethod::Both, 12.0, 30.0, YeastType::Instant)
            .unwrap();
        assert!(lookup.clamped.iter().all(|c| !matches!(c, Clamp::Temperature { .. })));
    }

    #[test]
    fn clamps_long_duration_to_smallest_dose() {
        let model = small_model();
        let lookup = model
            .percent_for(FermentationMethod::Fridge, 4.0, 500.0, YeastType::Instant)
            .unwrap();
        assert_eq!(lookup.percent, 0.1);
        assert_eq!(
            lookup.clamped,
            vec![Clamp::Duration { requested: 500.0, used: 60.0 }]
        );
    }

    #[test]
    fn clamps_short_duration_to_largest_dose() {
        let model = small_model();
        let lookup = model
            .percent_for(FermentationMethod::Room, 20.0, 1.0, YeastType::Instant)
            .unwrap();
        assert_eq!(lookup.percent, 0.4);
        assert!(lookup.is_clamped());
    }

    #[test]
    fn converts_yeast_forms() {
        let model = small_model();
        let instant = model
            .percent_for(FermentationMethod::Room, 20.0, 8.0, YeastType::Instant)
            .unwrap()
            .percent;
        let fresh = model
            .percent_for(FermentationMethod::Room, 20.0, 8.0, YeastType::Fresh)
            .unwrap()
            .percent;
        let dry = model
            .percent_for(FermentationMethod::Room, 20.0, 8.0, YeastType::ActiveDry)
            .unwrap()
            .percent;
        assert!((fresh - instant * 3.0).abs() < 1e-12);
        assert!((dry - instant * 1.25).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_parameters() {
        let model = small_model();
        for (t, h) in [(0.0, 8.0), (-3.0, 8.0), (20.0, 0.0), (f64::NAN, 8.0), (20.0, f64::INFINITY)] {
            let err = model
                .percent_for(FermentationMethod::Room, t, h, YeastType::Instant)
                .unwrap_err();
            assert!(matches!(err, YeastError::OutOfRange { .. }), "{t} {h}");
        }
    }

    #[test]
    fn builtin_room_example() {
        // 21°C row: 8.5h at 0.125% and 7.4h at 0.15%.
        let lookup = YeastModel::builtin()
            .percent_for(FermentationMethod::Room, 21.0, 8.0, YeastType::Instant)
            .unwrap();
        let expected = 0.125 + (8.5 - 8.0) / (8.5 - 7.4) * 0.025;
        assert!((lookup.percent - expected).abs() < 1e-9);
        assert!(!lookup.is_clamped());
    }

    #[test]
    fn durations_at_nearest_row_ascending() {
        let model = small_model();
        assert_eq!(model.durations_at(21.0), vec![4.0, 8.0, 12.0]);
        assert_eq!(model.durations_at(5.0), vec![24.0, 40.0, 60.0]);
    }

    #[test]
    fn from_path_reads_table_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.toml");
        std::fs::write(&path, BUILTIN_TABLE).unwrap();
        let model = YeastModel::from_path(&path).unwrap();
        assert_eq!(model.table(), YeastModel::builtin().table());
    }

    #[test]
    fn from_path_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = YeastModel::from_path(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, YeastError::Io(_)));
    }

    proptest! {
        #[test]
        fn longer_proof_never_needs_more_yeast(
            temperature in 1.0f64..35.0,
            short in 0.5f64..400.0,
            extra in 0.0f64..100.0,
            method in prop_oneof![
                Just(FermentationMethod::Room),
                Just(FermentationMethod::Fridge),
                Just(FermentationMethod::Both),
            ],
        ) {
            let model = YeastModel::builtin();
            let a = model.percent_for(method, temperature, short, YeastType::Instant).unwrap();
            let b = model.percent_for(method, temperature, short + extra, YeastType::Instant).unwrap();
            prop_assert!(b.percent <= a.percent + 1e-12);
        }

        #[test]
        fn dose_stays_within_table(
            temperature in 0.1f64..50.0,
            hours in 0.1f64..1000.0,
        ) {
            let model = YeastModel::builtin();
            let doses = model.table().yeast_percent();
            let lookup = model
                .percent_for(FermentationMethod::Both, temperature, hours, YeastType::Instant)
                .unwrap();
            prop_assert!(lookup.percent >= doses[0] - 1e-12);
            prop_assert!(lookup.percent <= doses[doses.len() - 1] + 1e-12);
        }
    }
}
