//! `swmtrack doctor` — Diagnose configuration health.

use swmtrack_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 SWMTrack Doctor — Configuration Diagnostics");
    println!("==============================================\n");

    let mut issues = 0;

    println!("  ✅ Binary running");

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("  ✅ Config file found at {}", config_path.display());
    } else {
        println!("  ⚠️  No config file — run `swmtrack onboard` (defaults will be used)");
    }

    match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config valid (model: {})", config.narrator.model);
            if config.has_api_key() {
                println!("  ✅ Gemini API key configured");
            } else {
                println!("  ❌ No Gemini API key — set SWMTRACK_GEMINI_API_KEY or add it to config.toml");
                issues += 1;
            }
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
