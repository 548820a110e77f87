use std::fs::{self, File};
use std::time::Instant;

use anyhow::{Context, Result};
use eigedash::{config::Config, dashboard, Snapshot};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) load config ──────────────────────────────────────────────
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "eigedash.yaml".to_string());
    let config = Config::load(&config_path)?;
    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("creating output dir {}", config.out_dir.display()))?;

    // ─── 3) parse the workbook once ──────────────────────────────────
    let start = Instant::now();
    let snapshot = Snapshot::load(&config.workbook)
        .with_context(|| format!("loading workbook {}", config.workbook.display()))?;
    info!(elapsed = ?start.elapsed(), "snapshot ready");

    // ─── 4) render the chart bundle for the configured selection ────
    let selection = config.selection();
    let start = Instant::now();
    let view = dashboard::render(&snapshot, config.dimension, &selection)?;
    info!(elapsed = ?start.elapsed(), "dashboard rendered");

    // ─── 5) write the bundle ─────────────────────────────────────────
    let out = config.out_dir.join("dashboard.json");
    let file = File::create(&out).with_context(|| format!("creating {}", out.display()))?;
    serde_json::to_writer_pretty(file, &view).context("writing chart bundle")?;
    info!(path = %out.display(), "chart bundle written");

    Ok(())
}
