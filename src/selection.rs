//! Interactive selection state and the aggregations it gates.
//!
//! One state bag per render: the year brush from the trend chart and the
//! country picked on a choropleth. Nothing here is persisted or shared; every
//! interaction rebuilds its dependent tables from the snapshot.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::country;
use crate::dimension::{MetricRow, MetricTable};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selection {
    /// Inclusive year interval from the trend chart brush; `None` means the
    /// full time range.
    pub year_range: Option<(String, String)>,
    /// Country picked on the choropleth. A new pick replaces this wholesale.
    pub country: String,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            year_range: None,
            country: country::EU_AGGREGATE.to_string(),
        }
    }
}

impl Selection {
    pub fn contains_year(&self, year: &str) -> bool {
        match &self.year_range {
            Some((lo, hi)) => lo.as_str() <= year && year <= hi.as_str(),
            None => true,
        }
    }
}

/// One bar of the ranking chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryAverage {
    pub country: String,
    pub average: f64,
}

/// Mean metric per country over the brushed years, descending by average.
/// With no brush this covers the full range, so a brush spanning every year
/// yields the identical aggregate.
pub fn ranking(table: &MetricTable, selection: &Selection) -> Vec<CountryAverage> {
    let mut sums: BTreeMap<&str, (f64, u32)> = BTreeMap::new();
    for row in &table.rows {
        if !selection.contains_year(&row.year) {
            continue;
        }
        let entry = sums.entry(row.country.as_str()).or_insert((0.0, 0));
        entry.0 += row.value;
        entry.1 += 1;
    }

    let mut averages: Vec<CountryAverage> = sums
        .into_iter()
        .map(|(country, (sum, n))| CountryAverage {
            country: country.to_string(),
            average: sum / n as f64,
        })
        .collect();
    averages.sort_by(|a, b| {
        b.average
            .partial_cmp(&a.average)
            .unwrap_or(Ordering::Equal)
    });
    averages
}

/// Rows feeding the selected country's bar/line drill-down, in sheet order.
pub fn country_series<'a>(table: &'a MetricTable, selection: &Selection) -> Vec<&'a MetricRow> {
    table.country_rows(&selection.country)
}
