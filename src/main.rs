mod app;
mod chart;
mod color;
mod config;
mod data;
mod dataset;
mod error;
mod report;
mod state;
mod ui;

use anyhow::{Context, Result};
use eframe::egui;

use app::TitanicApp;
use config::AppConfig;
use data::{aggregate, loader};
use dataset::{CachedProvider, DatasetProvider, ReqwestClient};
use report::DatasetSummary;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::default();

    // ---- Fetch ----
    let provider = CachedProvider::new(
        config.cache_root()?,
        ReqwestClient::new(config.request_timeout),
    );
    let dir = provider
        .resolve(&config.dataset)
        .with_context(|| format!("resolving dataset {}", config.dataset.handle))?;
    let path = dir.join(config.dataset.file_name);

    // ---- Load ----
    let table = loader::load_file(&path).with_context(|| format!("loading {}", path.display()))?;
    let summary = DatasetSummary::of(&table);
    println!("\n{summary}");

    // ---- Aggregate ----
    let by_sex = aggregate::survival_by_sex(&table).context("survival by sex")?;
    let by_age = aggregate::survivors_by_age_and_sex(&table).context("survivors by age and sex")?;
    let by_class = aggregate::survival_by_class(&table).context("survival by class")?;
    println!("{}", report::class_summary(&by_class));

    if log::log_enabled!(log::Level::Debug) {
        log::debug!(
            "aggregates: {}",
            serde_json::json!({
                "by_sex": by_sex,
                "by_age_and_sex": by_age,
                "by_class": by_class,
            })
        );
    }

    // ---- Render ----
    let charts = vec![
        chart::survival_by_sex_chart(&by_sex),
        chart::survivors_by_age_chart(&by_age),
        chart::survival_by_class_chart(&by_class),
    ];
    let state = AppState::new(charts, summary, path.display().to_string());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Titanic – Survival Analysis",
        options,
        Box::new(|_cc| Ok(Box::new(TitanicApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("chart viewer failed: {e}"))
}
