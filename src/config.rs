use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::country;
use crate::dimension::Dimension;
use crate::selection::Selection;

/// Runner configuration, loaded from a YAML file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the index workbook.
    pub workbook: PathBuf,
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    /// Selected country for the drill-down and detail charts.
    #[serde(default = "default_country")]
    pub country: String,
    /// Active sub-dimension for the choropleth drill-down.
    #[serde(default)]
    pub dimension: Dimension,
    /// Optional inclusive year brush for the ranking aggregation.
    #[serde(default)]
    pub year_range: Option<(String, String)>,
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_country() -> String {
    country::EU_AGGREGATE.to_string()
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn selection(&self) -> Selection {
        Selection {
            year_range: self.year_range.clone(),
            country: self.country.clone(),
        }
    }
}
