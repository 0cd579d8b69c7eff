//! `swmtrack generate` — Produce a full narrated compliance report.

use std::path::PathBuf;
use std::sync::Arc;

use swmtrack_config::AppConfig;
use swmtrack_narrator::GeminiNarrator;
use swmtrack_report::ReportOrchestrator;

pub async fn run(input: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let body = super::read_request(input)?;

    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let Some(api_key) = config.narrator.api_key.clone() else {
        return Err(
            "No Gemini API key configured — set SWMTRACK_GEMINI_API_KEY or add it to config.toml"
                .into(),
        );
    };

    let narrator = GeminiNarrator::with_timeout_secs(api_key, config.narrator.timeout_secs)
        .with_base_url(config.narrator.base_url.clone())
        .with_model(config.narrator.model.clone());
    let orchestrator = ReportOrchestrator::new(Arc::new(narrator));

    let envelope = orchestrator.generate(&body).await?;
    println!("{}", serde_json::to_string_pretty(&envelope)?);

    Ok(())
}
