use thiserror::Error;

/// Pipeline failure taxonomy.
///
/// Structural problems (a sheet without a required column, an unreadable
/// workbook, a country code outside the EU roster) abort the whole load —
/// there is no partial dashboard. Per-row data gaps never reach this enum:
/// they are recovered in place by dropping the row with a logged warning.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("sheet `{sheet}` is missing required column `{column}`")]
    MissingColumn { sheet: String, column: String },

    #[error("country code `{code}` in sheet `{sheet}` is not in the EU roster")]
    UnknownCountry { code: String, sheet: String },

    #[error("country code `{code}` matches no row in any sheet")]
    CountryNotFound { code: String },

    #[error("reading workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("serializing chart data: {0}")]
    ChartData(#[from] serde_json::Error),
}
