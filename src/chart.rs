//! Declarative chart specs for the rendering collaborator.
//!
//! Each chart is a small spec (mark, encodings, scale domains, tooltip
//! fields) bundled with its prepared data rows, serialized as JSON. The
//! renderer owns pixels and interactivity; nothing here draws.

use serde::Serialize;
use serde_json::Value;

use crate::country;
use crate::detail::DetailRow;
use crate::dimension::{DimensionSpec, MetricTable};
use crate::error::PipelineError;
use crate::selection::{self, Selection};

/// Rank axis runs reversed so rank 1 sits at the top.
const RANK_DOMAIN: (f64, f64) = (30.0, 0.0);
/// Detail facets share a fixed index scale.
const DETAIL_DOMAIN: (f64, f64) = (50.0, 100.0);
/// Color ramp for the ranking bars.
const RANKING_COLOR_DOMAIN: (f64, f64) = (45.0, 85.0);

const SCHEME: &str = "purples";
const ACCENT: &str = "purple";
const HIGHLIGHT: &str = "red";
const BAR_FILL: &str = "lavender";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    LinePoint,
    Bar,
    Geoshape,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub field: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<(f64, f64)>,
    pub clamp: bool,
}

impl Axis {
    fn field(field: &'static str) -> Self {
        Self {
            field,
            domain: None,
            clamp: false,
        }
    }

    fn scaled(field: &'static str, domain: (f64, f64)) -> Self {
        Self {
            field,
            domain: Some(domain),
            clamp: false,
        }
    }
}

/// The single condition a color encoding may carry (the EU bar, the
/// dimension's own line in a detail facet).
#[derive(Debug, Clone, Serialize)]
pub struct Highlight {
    pub field: &'static str,
    pub equals: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorEncoding {
    /// Every mark one fixed color.
    Value { value: &'static str },
    /// Sequential scheme over a quantitative field.
    Scale {
        field: &'static str,
        scheme: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        domain: Option<(f64, f64)>,
        #[serde(skip_serializing_if = "Option::is_none")]
        highlight: Option<Highlight>,
    },
    /// Categorical field, one category highlighted against a base color.
    Category {
        field: &'static str,
        base: &'static str,
        highlight: Highlight,
    },
}

/// One chart: spec plus prepared rows.
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub title: String,
    pub mark: Mark,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorEncoding>,
    /// Join key for geoshape lookups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup: Option<&'static str>,
    pub tooltip: Vec<&'static str>,
    pub data: Value,
}

/// The EU trend line the year brush lives on. The y domain hugs the EU
/// series only, padded by the overall-index margin.
pub fn eu_trend(index: &MetricTable) -> Result<Chart, PipelineError> {
    let eu = index.country_rows(country::EU_AGGREGATE);
    let (lo, hi) = eu.iter().fold((f64::MAX, f64::MIN), |(lo, hi), r| {
        (lo.min(r.value), hi.max(r.value))
    });
    let pad = index.dimension.spec().axis_pad;
    let domain = if eu.is_empty() {
        (0.0, 0.0)
    } else {
        (lo - pad, hi + pad)
    };

    Ok(Chart {
        title: "EU Gender Equality Index Over Time".to_string(),
        mark: Mark::LinePoint,
        x: Some(Axis::field("year")),
        y: Some(Axis::scaled("value", domain)),
        color: Some(ColorEncoding::Value { value: ACCENT }),
        lookup: None,
        tooltip: vec!["year", "value"],
        data: serde_json::to_value(&eu)?,
    })
}

/// Per-country average bars for the brushed interval, EU flagged.
pub fn ranking_chart(index: &MetricTable, selection: &Selection) -> Result<Chart, PipelineError> {
    let averages = selection::ranking(index, selection);
    Ok(Chart {
        title: "Gender Equality Index Ranking".to_string(),
        mark: Mark::Bar,
        x: Some(Axis::field("average")),
        y: Some(Axis::field("country")),
        color: Some(ColorEncoding::Scale {
            field: "average",
            scheme: SCHEME,
            domain: Some(RANKING_COLOR_DOMAIN),
            highlight: Some(Highlight {
                field: "country",
                equals: country::EU_AGGREGATE.to_string(),
                color: HIGHLIGHT,
            }),
        }),
        lookup: None,
        tooltip: vec!["country", "average"],
        data: serde_json::to_value(&averages)?,
    })
}

/// Choropleth over one dimension: the renderer joins rows to map regions by
/// `numeric_id`. Rows without an id (`EU`, `MT`) simply have no region.
pub fn choropleth(table: &MetricTable, spec: &DimensionSpec) -> Result<Chart, PipelineError> {
    Ok(Chart {
        title: format!("{} Index Across EU Countries", spec.title),
        mark: Mark::Geoshape,
        x: None,
        y: None,
        color: Some(ColorEncoding::Scale {
            field: "value",
            scheme: SCHEME,
            domain: None,
            highlight: None,
        }),
        lookup: Some("numeric_id"),
        tooltip: vec!["country", "display_name", "value", "rank"],
        data: serde_json::to_value(&table.rows)?,
    })
}

/// The selected country's metric per year, clamped to the padded envelope.
pub fn country_bars(
    table: &MetricTable,
    spec: &DimensionSpec,
    selection: &Selection,
) -> Result<Chart, PipelineError> {
    let series = selection::country_series(table, selection);
    let mut y = Axis::scaled("value", table.axis_domain(spec.axis_pad));
    y.clamp = true;

    Ok(Chart {
        title: format!("{} Index of Selected Country over Time", spec.title),
        mark: Mark::Bar,
        x: Some(Axis::field("year")),
        y: Some(y),
        color: Some(ColorEncoding::Value { value: BAR_FILL }),
        lookup: None,
        tooltip: vec!["country", "year", "value"],
        data: serde_json::to_value(&series)?,
    })
}

/// The selected country's per-year rank, axis reversed so rank 1 is on top.
pub fn country_rank_line(
    table: &MetricTable,
    spec: &DimensionSpec,
    selection: &Selection,
) -> Result<Chart, PipelineError> {
    let series = selection::country_series(table, selection);
    Ok(Chart {
        title: format!("{} Ranking of Selected Country over Time", spec.title),
        mark: Mark::LinePoint,
        x: Some(Axis::field("year")),
        y: Some(Axis::scaled("rank", RANK_DOMAIN)),
        color: Some(ColorEncoding::Value { value: ACCENT }),
        lookup: None,
        tooltip: vec!["country", "year", "rank"],
        data: serde_json::to_value(&series)?,
    })
}

/// One detail facet: the dimension's own line flagged against its
/// sub-indicator lines.
pub fn detail_facet(rows: &[DetailRow], spec: &DimensionSpec) -> Result<Chart, PipelineError> {
    Ok(Chart {
        title: spec.title.to_string(),
        mark: Mark::LinePoint,
        x: Some(Axis::field("year")),
        y: Some(Axis::scaled("value", DETAIL_DOMAIN)),
        color: Some(ColorEncoding::Category {
            field: "category",
            base: ACCENT,
            highlight: Highlight {
                field: "category",
                equals: spec.column.to_string(),
                color: HIGHLIGHT,
            },
        }),
        lookup: None,
        tooltip: vec!["country", "value", "category"],
        data: serde_json::to_value(rows)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::{build_metric_table, Dimension};
    use crate::workbook::{Sheet, Workbook};

    fn index_workbook() -> Workbook {
        let sheet = |name: &str, year: f64, values: &[(&str, f64)]| {
            Sheet::new(
                name,
                vec!["Index year", "Country", "Gender Equality Index", "WORK"],
                values
                    .iter()
                    .map(|(code, v)| vec![year.into(), (*code).into(), (*v).into(), (v - 1.0).into()])
                    .collect(),
            )
        };
        Workbook::from_sheets(vec![
            sheet("2021 Index", 2021.0, &[("EU", 65.0), ("SE", 75.0), ("BE", 60.0)]),
            sheet("2023 Index", 2023.0, &[("EU", 67.0), ("SE", 76.0), ("BE", 61.0)]),
        ])
    }

    #[test]
    fn trend_domain_pads_the_eu_series_only() {
        let table = build_metric_table(&index_workbook(), Dimension::Index.spec()).unwrap();
        let chart = eu_trend(&table).unwrap();
        // EU values span 65..67; ±2 for the overall index
        assert_eq!(chart.y.unwrap().domain, Some((63.0, 69.0)));
        assert_eq!(chart.mark, Mark::LinePoint);
        assert_eq!(chart.data.as_array().unwrap().len(), 2);
    }

    #[test]
    fn drilldown_bars_clamp_to_the_padded_envelope() {
        let table = build_metric_table(&index_workbook(), Dimension::Work.spec()).unwrap();
        let chart = country_bars(&table, Dimension::Work.spec(), &Selection::default()).unwrap();
        let y = chart.y.unwrap();
        // WORK values span 59..75; ±5 for a sub-dimension
        assert_eq!(y.domain, Some((54.0, 80.0)));
        assert!(y.clamp);
    }

    #[test]
    fn rank_axis_is_reversed() {
        let table = build_metric_table(&index_workbook(), Dimension::Work.spec()).unwrap();
        let chart =
            country_rank_line(&table, Dimension::Work.spec(), &Selection::default()).unwrap();
        assert_eq!(chart.y.unwrap().domain, Some((30.0, 0.0)));
    }

    #[test]
    fn choropleth_joins_on_numeric_id() {
        let table = build_metric_table(&index_workbook(), Dimension::Work.spec()).unwrap();
        let chart = choropleth(&table, Dimension::Work.spec()).unwrap();
        assert_eq!(chart.mark, Mark::Geoshape);
        assert_eq!(chart.lookup, Some("numeric_id"));
        assert_eq!(
            chart.tooltip,
            vec!["country", "display_name", "value", "rank"]
        );
    }

    #[test]
    fn ranking_chart_flags_the_eu_bar() {
        let table = build_metric_table(&index_workbook(), Dimension::Index.spec()).unwrap();
        let chart = ranking_chart(&table, &Selection::default()).unwrap();
        match chart.color {
            Some(ColorEncoding::Scale {
                domain, highlight, ..
            }) => {
                assert_eq!(domain, Some((45.0, 85.0)));
                let highlight = highlight.unwrap();
                assert_eq!(highlight.equals, "EU");
                assert_eq!(highlight.color, "red");
            }
            other => panic!("unexpected color encoding: {other:?}"),
        }
        // bars arrive pre-sorted, best average first
        let first = &chart.data.as_array().unwrap()[0];
        assert_eq!(first["country"], "SE");
    }

    #[test]
    fn chart_json_shape_is_stable() {
        let table = build_metric_table(&index_workbook(), Dimension::Index.spec()).unwrap();
        let value = serde_json::to_value(eu_trend(&table).unwrap()).unwrap();
        assert_eq!(value["mark"], "line_point");
        assert_eq!(value["x"]["field"], "year");
        assert_eq!(value["color"]["kind"], "value");
        assert!(value.get("lookup").is_none());
    }
}
