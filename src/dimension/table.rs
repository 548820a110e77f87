use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::warn;

use super::{DimensionSpec, COUNTRY_COLUMN, YEAR_COLUMN};
use crate::country;
use crate::error::PipelineError;
use crate::workbook::{Cell, Workbook};

/// One (year, country) observation of a metric, long form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub year: String,
    pub country: String,
    pub value: f64,
    /// Min-method rank of `value` within `year`, descending: the highest
    /// value ranks 1, ties share the smallest ordinal among them.
    pub rank: u32,
    /// Choropleth join key; `None` for `EU` and `MT`.
    pub numeric_id: Option<u16>,
    pub display_name: Option<&'static str>,
}

/// The long-form table for one metric across every sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTable {
    pub dimension: super::Dimension,
    pub rows: Vec<MetricRow>,
    pub value_min: f64,
    pub value_max: f64,
}

impl MetricTable {
    /// Axis domain padded around the value envelope.
    pub fn axis_domain(&self, pad: f64) -> (f64, f64) {
        (self.value_min - pad, self.value_max + pad)
    }

    /// Rows for one country, in sheet order.
    pub fn country_rows(&self, code: &str) -> Vec<&MetricRow> {
        self.rows.iter().filter(|r| r.country == code).collect()
    }

    /// Distinct years present, sorted.
    pub fn years(&self) -> Vec<&str> {
        let mut years: Vec<&str> = self.rows.iter().map(|r| r.year.as_str()).collect();
        years.sort_unstable();
        years.dedup();
        years
    }
}

/// Build the long-form table for one metric: scan every sheet, attach the
/// roster lookups, rank per year, and record the value envelope.
///
/// A country code outside the roster fails the build. Rows with an empty
/// metric or year cell are dropped with a warning; roster codes missing a
/// lookup entry keep their row and are warned about once.
pub fn build_metric_table(
    workbook: &Workbook,
    spec: &DimensionSpec,
) -> Result<MetricTable, PipelineError> {
    let mut rows = Vec::new();
    let mut warned_codes: HashSet<String> = HashSet::new();

    for sheet in workbook.sheets() {
        let year_idx = sheet.require_column(YEAR_COLUMN)?;
        let country_idx = sheet.require_column(COUNTRY_COLUMN)?;
        let value_idx = sheet.require_column(spec.column)?;

        for row in &sheet.rows {
            let country = match row.get(country_idx).and_then(Cell::as_text) {
                Some(code) => code.to_string(),
                None => continue,
            };
            if !country::is_known(&country) {
                return Err(PipelineError::UnknownCountry {
                    code: country,
                    sheet: sheet.name.clone(),
                });
            }

            let year = match row.get(year_idx).and_then(Cell::as_label) {
                Some(y) => y,
                None => {
                    warn!(sheet = %sheet.name, country = %country, "row has no index year, dropped");
                    continue;
                }
            };
            let value = match row.get(value_idx).and_then(Cell::as_f64) {
                Some(v) => v,
                None => {
                    warn!(
                        sheet = %sheet.name,
                        country = %country,
                        column = spec.column,
                        "empty metric cell, row dropped"
                    );
                    continue;
                }
            };

            let numeric_id = country::numeric_id(&country);
            let display_name = country::display_name(&country);
            if (numeric_id.is_none() || display_name.is_none()) && warned_codes.insert(country.clone())
            {
                warn!(code = %country, "roster code missing from a lookup table");
            }

            rows.push(MetricRow {
                year,
                country,
                value,
                rank: 0,
                numeric_id,
                display_name,
            });
        }
    }

    assign_ranks(&mut rows);

    let (value_min, value_max) = rows.iter().fold((f64::MAX, f64::MIN), |(lo, hi), r| {
        (lo.min(r.value), hi.max(r.value))
    });
    let (value_min, value_max) = if rows.is_empty() {
        (0.0, 0.0)
    } else {
        (value_min, value_max)
    };

    Ok(MetricTable {
        dimension: spec.dimension,
        rows,
        value_min,
        value_max,
    })
}

/// Min-method rank within each year, descending by value. Stable sort keeps
/// sheet order among ties, so repeated builds give identical output.
fn assign_ranks(rows: &mut [MetricRow]) {
    let mut by_year: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (i, row) in rows.iter().enumerate() {
        by_year.entry(row.year.clone()).or_default().push(i);
    }

    for indices in by_year.values() {
        let mut order = indices.clone();
        order.sort_by(|&a, &b| {
            rows[b]
                .value
                .partial_cmp(&rows[a].value)
                .unwrap_or(Ordering::Equal)
        });

        let mut rank = 0u32;
        let mut prev: Option<f64> = None;
        for (pos, &i) in order.iter().enumerate() {
            if prev != Some(rows[i].value) {
                rank = pos as u32 + 1;
                prev = Some(rows[i].value);
            }
            rows[i].rank = rank;
        }
    }
}
