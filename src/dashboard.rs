//! Snapshot assembly and the per-interaction render.
//!
//! The workbook is parsed once into an immutable `Snapshot` holding all seven
//! metric tables; every interaction is then a pure function of the snapshot
//! and the current selection. Concurrent callers can share one snapshot
//! freely — nothing in a render mutates it.

use std::path::Path;

use serde::Serialize;
use tracing::{info, instrument};

use crate::chart::{self, Chart};
use crate::detail;
use crate::dimension::{build_metric_table, Dimension, MetricTable};
use crate::error::PipelineError;
use crate::selection::Selection;
use crate::workbook::Workbook;

/// All derived state for one loaded workbook.
pub struct Snapshot {
    workbook: Workbook,
    tables: Vec<MetricTable>,
}

impl Snapshot {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        Self::from_workbook(Workbook::open(path)?)
    }

    /// Build every metric table from one in-memory workbook. Each build is
    /// independent; no state carries over between dimensions.
    pub fn from_workbook(workbook: Workbook) -> Result<Self, PipelineError> {
        let mut tables = Vec::with_capacity(Dimension::ALL.len());
        for dimension in Dimension::ALL {
            tables.push(build_metric_table(&workbook, dimension.spec())?);
        }
        info!(tables = tables.len(), "snapshot built");
        Ok(Self { workbook, tables })
    }

    /// Metric table for one dimension. Tables are stored in declaration
    /// order, so the variant index addresses them directly.
    pub fn table(&self, dimension: Dimension) -> &MetricTable {
        &self.tables[dimension as usize]
    }

    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }
}

/// The full chart bundle for one (selection, dimension) interaction.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    /// EU index line the year brush lives on.
    pub trend: Chart,
    /// Brushed per-country average bars.
    pub ranking: Chart,
    /// Map of the active dimension.
    pub choropleth: Chart,
    /// Selected country's metric per year.
    pub country_bars: Chart,
    /// Selected country's rank per year.
    pub country_rank: Chart,
    /// Six per-dimension sub-indicator facets for the selected country.
    pub details: Vec<Chart>,
}

/// Rebuild the whole view for one interaction. Synchronous and pure: the
/// same snapshot and selection always produce the same bundle.
#[instrument(skip(snapshot, selection), fields(country = %selection.country, dimension = ?dimension))]
pub fn render(
    snapshot: &Snapshot,
    dimension: Dimension,
    selection: &Selection,
) -> Result<DashboardView, PipelineError> {
    let index = snapshot.table(Dimension::Index);
    let trend = chart::eu_trend(index)?;
    let ranking = chart::ranking_chart(index, selection)?;

    let table = snapshot.table(dimension);
    let spec = dimension.spec();
    let choropleth = chart::choropleth(table, spec)?;
    let country_bars = chart::country_bars(table, spec, selection)?;
    let country_rank = chart::country_rank_line(table, spec, selection)?;

    let mut details = Vec::with_capacity(Dimension::SUB.len());
    for sub in Dimension::SUB {
        let rows =
            detail::extract_country_detail(snapshot.workbook(), &selection.country, sub.spec())?;
        details.push(chart::detail_facet(&rows, sub.spec())?);
    }

    Ok(DashboardView {
        trend,
        ranking,
        choropleth,
        country_bars,
        country_rank,
        details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::Sheet;

    // every metric column plus the sub-indicator columns the detail facets
    // read
    fn full_headers() -> Vec<&'static str> {
        vec![
            "Index year",
            "Country",
            "Gender Equality Index",
            "WORK",
            "MONEY",
            "KNOWLEDGE",
            "TIME",
            "POWER",
            "HEALTH",
            "Participation",
            "Segregation and quality of work",
            "Financial resources",
            "Economic situation",
            "Attainment and participation",
            "Segregation",
            "Care activities",
            "Social activities",
            "Political",
            "Economic",
            "Social",
            "Status",
            "Behaviour",
            "Access",
        ]
    }

    fn full_sheet(name: &str, year: f64, countries: &[(&str, f64)]) -> Sheet {
        let width = full_headers().len();
        Sheet::new(
            name,
            full_headers(),
            countries
                .iter()
                .map(|(code, base)| {
                    let mut row = vec![year.into(), (*code).into()];
                    for offset in 0..(width - 2) {
                        row.push((base + offset as f64 * 0.5).into());
                    }
                    row
                })
                .collect(),
        )
    }

    fn snapshot() -> Snapshot {
        let workbook = Workbook::from_sheets(vec![
            full_sheet("2021 Index", 2021.0, &[("EU", 65.0), ("SE", 75.0), ("BE", 60.0)]),
            full_sheet("2023 Index", 2023.0, &[("EU", 66.0), ("SE", 76.0), ("BE", 61.0)]),
        ]);
        Snapshot::from_workbook(workbook).unwrap()
    }

    #[test]
    fn snapshot_builds_all_seven_tables() {
        let snapshot = snapshot();
        for dimension in Dimension::ALL {
            let table = snapshot.table(dimension);
            assert_eq!(table.dimension, dimension);
            assert_eq!(table.rows.len(), 6);
        }
    }

    #[test]
    fn render_assembles_the_full_bundle() {
        let snapshot = snapshot();
        let view = render(&snapshot, Dimension::Work, &Selection::default()).unwrap();

        assert_eq!(view.details.len(), 6);
        assert_eq!(view.trend.data.as_array().unwrap().len(), 2);
        // default selection is the EU aggregate
        for row in view.country_bars.data.as_array().unwrap() {
            assert_eq!(row["country"], "EU");
        }
    }

    #[test]
    fn render_is_deterministic() {
        let snapshot = snapshot();
        let selection = Selection {
            country: "SE".into(),
            ..Selection::default()
        };
        let a = serde_json::to_value(render(&snapshot, Dimension::Money, &selection).unwrap());
        let b = serde_json::to_value(render(&snapshot, Dimension::Money, &selection).unwrap());
        assert_eq!(a.unwrap(), b.unwrap());
    }

    #[test]
    fn selecting_a_country_swaps_the_drilldown() {
        let snapshot = snapshot();
        let selection = Selection {
            country: "SE".into(),
            ..Selection::default()
        };
        let view = render(&snapshot, Dimension::Work, &selection).unwrap();
        let bars = view.country_bars.data;
        let rows = bars.as_array().unwrap();
        assert!(rows.iter().all(|r| r["country"] == "SE"));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn unknown_selected_country_fails_detail_extraction() {
        let snapshot = snapshot();
        let selection = Selection {
            country: "FR".into(),
            ..Selection::default()
        };
        let err = render(&snapshot, Dimension::Work, &selection).unwrap_err();
        assert!(matches!(err, PipelineError::CountryNotFound { .. }));
    }

    #[test]
    fn view_serializes_to_one_json_bundle() {
        let snapshot = snapshot();
        let view = render(&snapshot, Dimension::Work, &Selection::default()).unwrap();
        let value = serde_json::to_value(&view).unwrap();
        assert!(value["choropleth"]["lookup"].is_string());
        assert_eq!(value["details"].as_array().unwrap().len(), 6);
    }
}
