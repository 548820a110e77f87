//! Country detail extraction: the per-country sub-indicator breakdowns behind
//! the six facet charts.

use serde::Serialize;
use tracing::warn;

use crate::dimension::{DimensionSpec, COUNTRY_COLUMN};
use crate::error::PipelineError;
use crate::workbook::{Cell, Workbook};

/// One (year, category) observation for a selected country, long form. The
/// category is either the dimension column itself or one of its
/// sub-indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRow {
    pub year: String,
    pub country: String,
    pub category: String,
    pub value: f64,
}

/// Melt one dimension's columns for one country across every sheet.
///
/// The dimension's own column comes first, then its sub-indicators, one row
/// per (year, category). A sheet with no row for the country is skipped with
/// a warning ("no data for this year"); a country matching no sheet at all is
/// an error.
pub fn extract_country_detail(
    workbook: &Workbook,
    code: &str,
    spec: &DimensionSpec,
) -> Result<Vec<DetailRow>, PipelineError> {
    let mut rows = Vec::new();
    let mut matched = false;

    for sheet in workbook.sheets() {
        let country_idx = sheet.require_column(COUNTRY_COLUMN)?;
        let Some(row) = sheet
            .rows
            .iter()
            .find(|r| r.get(country_idx).and_then(Cell::as_text) == Some(code))
        else {
            warn!(sheet = %sheet.name, code, "no row for country in this sheet");
            continue;
        };
        matched = true;

        let year = sheet.year_label();
        for column in std::iter::once(spec.column).chain(spec.sub_indicators.iter().copied()) {
            let idx = sheet.require_column(column)?;
            match row.get(idx).and_then(Cell::as_f64) {
                Some(value) => rows.push(DetailRow {
                    year: year.clone(),
                    country: code.to_string(),
                    category: column.to_string(),
                    value,
                }),
                None => {
                    warn!(sheet = %sheet.name, code, column, "empty sub-indicator cell, skipped")
                }
            }
        }
    }

    if !matched {
        return Err(PipelineError::CountryNotFound {
            code: code.to_string(),
        });
    }
    Ok(rows)
}
