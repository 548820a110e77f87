//! The seven metrics of the index and their fixed configuration.
//!
//! The overall Gender Equality Index plus its six sub-dimensions share one
//! parametrized table pipeline; everything that differs between them (the
//! workbook column, the axis padding, the sub-indicator columns behind the
//! detail charts) lives in a static `DimensionSpec` per metric.

pub mod table;

use serde::{Deserialize, Serialize};

pub use table::{build_metric_table, MetricRow, MetricTable};

/// Workbook column holding the index year of each row.
pub const YEAR_COLUMN: &str = "Index year";

/// Workbook column holding the country code of each row.
pub const COUNTRY_COLUMN: &str = "Country";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Dimension {
    Index,
    Work,
    Money,
    Knowledge,
    Time,
    Power,
    Health,
}

/// Per-metric pipeline configuration.
#[derive(Debug, Clone, Copy)]
pub struct DimensionSpec {
    pub dimension: Dimension,
    /// Workbook column the metric is read from.
    pub column: &'static str,
    pub title: &'static str,
    /// Padding added around the value envelope for chart axis domains.
    pub axis_pad: f64,
    /// Sub-indicator columns shown in the country detail facets.
    pub sub_indicators: &'static [&'static str],
}

static SPECS: [DimensionSpec; 7] = [
    DimensionSpec {
        dimension: Dimension::Index,
        column: "Gender Equality Index",
        title: "Gender Equality Index",
        axis_pad: 2.0,
        sub_indicators: &[],
    },
    DimensionSpec {
        dimension: Dimension::Work,
        column: "WORK",
        title: "Work",
        axis_pad: 5.0,
        sub_indicators: &["Participation", "Segregation and quality of work"],
    },
    DimensionSpec {
        dimension: Dimension::Money,
        column: "MONEY",
        title: "Money",
        axis_pad: 5.0,
        sub_indicators: &["Financial resources", "Economic situation"],
    },
    DimensionSpec {
        dimension: Dimension::Knowledge,
        column: "KNOWLEDGE",
        title: "Knowledge",
        axis_pad: 5.0,
        sub_indicators: &["Attainment and participation", "Segregation"],
    },
    DimensionSpec {
        dimension: Dimension::Time,
        column: "TIME",
        title: "Time",
        axis_pad: 5.0,
        sub_indicators: &["Care activities", "Social activities"],
    },
    DimensionSpec {
        dimension: Dimension::Power,
        column: "POWER",
        title: "Power",
        axis_pad: 5.0,
        sub_indicators: &["Political", "Economic", "Social"],
    },
    DimensionSpec {
        dimension: Dimension::Health,
        column: "HEALTH",
        title: "Health",
        axis_pad: 5.0,
        sub_indicators: &["Status", "Behaviour", "Access"],
    },
];

impl Dimension {
    /// All seven metrics, overall index first. Matches enum declaration order.
    pub const ALL: [Dimension; 7] = [
        Dimension::Index,
        Dimension::Work,
        Dimension::Money,
        Dimension::Knowledge,
        Dimension::Time,
        Dimension::Power,
        Dimension::Health,
    ];

    /// The six sub-dimensions, the drill-down and detail chart choices.
    pub const SUB: [Dimension; 6] = [
        Dimension::Work,
        Dimension::Money,
        Dimension::Knowledge,
        Dimension::Time,
        Dimension::Power,
        Dimension::Health,
    ];

    pub fn spec(self) -> &'static DimensionSpec {
        &SPECS[self as usize]
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::Work
    }
}
