//! End-to-end report generation against a scripted narrator.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{json, Value};

use swmtrack_core::{Error, NarrativeReport, NarratorError};
use swmtrack_narrator::ScriptedNarrator;
use swmtrack_report::{InMemoryEntryStore, ReportOrchestrator};

fn narrative(summary: &str) -> NarrativeReport {
    NarrativeReport {
        gp_account_holder_summary: summary.into(),
        supervisory_summary: "Steady performance across indicators.".into(),
        zp_mrf_summary: "Dispatch aligned with collection.".into(),
        recommendations: vec!["Maintain current routing".into()],
        risks: vec![],
        notes: None,
        data_irregularities: vec![],
    }
}

fn base_request() -> Value {
    json!({
        "meta": {"taluk": "Udupi", "panchayat": "Alevoor", "vehicleRegNo": "KA-20-1234"},
        "date": "2026-08-24",
        "totals": {"totalHouseholds": 1000, "totalShops": 200},
        "day": {
            "households": 950,
            "commercialShops": 180,
            "wetWasteCollected": 500.0,
            "wetWasteManaged": 490.0,
            "sanitaryWasteCollected": 50.0,
            "sanitaryWasteScientificallyDisposed": 45.0,
            "dryWasteCollected": 300.0,
            "dryWasteStored": 20.0
        }
    })
}

#[tokio::test]
async fn direct_path_first_report_of_week() {
    let narrator = Arc::new(ScriptedNarrator::single(narrative("Good day overall.")));
    let orchestrator = ReportOrchestrator::new(narrator.clone());

    let envelope = orchestrator.generate(&base_request()).await.unwrap();

    assert_eq!(envelope.metrics.score, 90);
    assert_eq!(envelope.metrics.band.to_string(), "Excellent");
    assert_eq!(envelope.report.gp_account_holder_summary, "Good day overall.");
    assert!(envelope.week_to_date.is_none());
    assert!(envelope.entry_summary.is_none());
    assert_eq!(envelope.day.dry_waste_collected, 300.0);

    let prompts = narrator.recorded_prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Since this is the first report of the week"));
    assert!(prompts[0].contains("- Compliance Score: 90 (Band: Excellent)"));
    assert!(!prompts[0].contains("Week-to-Date Performance"));
}

#[tokio::test]
async fn week_history_produces_comparison_prompt() {
    let narrator = Arc::new(ScriptedNarrator::single(narrative("Trend holding.")));
    let orchestrator = ReportOrchestrator::new(narrator.clone());

    let mut body = base_request();
    let day = base_request()["day"].clone();
    body["week"] = json!([
        {"date": "2026-08-22", "day": day.clone()},
        {"date": "2026-08-23", "day": day},
    ]);

    let envelope = orchestrator.generate(&body).await.unwrap();

    let week = envelope.week_to_date.unwrap();
    assert_eq!(week.days_count, 2);
    assert_eq!(week.week_start_date.to_string(), "2026-08-22");
    // identical history days, so the average score equals today's
    assert!((week.avg_score - 90.0).abs() < 1e-9);

    let prompts = narrator.recorded_prompts();
    assert!(prompts[0].contains("Week-to-Date Performance (from 2026-08-22 to 2026-08-24, 2 days):"));
    assert!(prompts[0].contains("Compare today's performance against week-to-date averages."));
    assert!(!prompts[0].contains("first report of the week"));
}

#[tokio::test]
async fn inline_entry_derives_dry_waste_with_default_storage() {
    let narrator = Arc::new(ScriptedNarrator::single(narrative("Entry path.")));
    let orchestrator = ReportOrchestrator::new(narrator);

    let mut body = base_request();
    let day = body["day"].as_object_mut().unwrap();
    day.remove("dryWasteCollected");
    day.remove("dryWasteStored");
    body["entryData"] = json!({"Plastic": 120.0, "Paper": 80.0, "Glass": 100.0});

    let envelope = orchestrator.generate(&body).await.unwrap();

    let summary = envelope.entry_summary.unwrap();
    assert_eq!(summary.dry_waste_collected, 300.0);
    assert_eq!(summary.dry_waste_stored, 30.0); // 10% default
    assert_eq!(summary.material_count, 3);
    assert_eq!(envelope.day.dry_waste_collected, 300.0);
    assert_eq!(envelope.day.dry_waste_stored, 30.0);
}

#[tokio::test]
async fn inline_entry_keeps_supplied_stored_figure() {
    let narrator = Arc::new(ScriptedNarrator::single(narrative("Entry path.")));
    let orchestrator = ReportOrchestrator::new(narrator);

    let mut body = base_request();
    body["day"].as_object_mut().unwrap().remove("dryWasteCollected");
    body["day"]["dryWasteStored"] = json!(55.0);
    body["entryData"] = json!({"Plastic": 200.0});

    let envelope = orchestrator.generate(&body).await.unwrap();
    let summary = envelope.entry_summary.unwrap();
    assert_eq!(summary.dry_waste_collected, 200.0);
    assert_eq!(summary.dry_waste_stored, 55.0);
}

#[tokio::test]
async fn stored_entry_resolved_through_store() {
    let narrator = Arc::new(ScriptedNarrator::single(narrative("Stored entry.")));
    let store = Arc::new(InMemoryEntryStore::new());
    let mut weights = BTreeMap::new();
    weights.insert("Plastic".to_string(), 150.0);
    weights.insert("Metal".to_string(), 50.0);
    store.insert("entry_7", weights);

    let orchestrator = ReportOrchestrator::new(narrator).with_entry_store(store);

    let mut body = base_request();
    let day = body["day"].as_object_mut().unwrap();
    day.remove("dryWasteCollected");
    day.remove("dryWasteStored");
    body["entryId"] = json!("entry_7");

    let envelope = orchestrator.generate(&body).await.unwrap();
    assert_eq!(envelope.day.dry_waste_collected, 200.0);
    assert_eq!(envelope.day.dry_waste_stored, 20.0);
    assert_eq!(envelope.entry_summary.unwrap().material_count, 2);
}

#[tokio::test]
async fn missing_entry_is_not_found() {
    let narrator = Arc::new(ScriptedNarrator::new());
    let store = Arc::new(InMemoryEntryStore::new());
    let orchestrator = ReportOrchestrator::new(narrator.clone()).with_entry_store(store);

    let mut body = base_request();
    let day = body["day"].as_object_mut().unwrap();
    day.remove("dryWasteCollected");
    day.remove("dryWasteStored");
    body["entryId"] = json!("nope");

    let err = orchestrator.generate(&body).await.unwrap_err();
    match err {
        Error::EntryNotFound { entry_id } => assert_eq!(entry_id, "nope"),
        other => panic!("unexpected error: {other:?}"),
    }
    // The narrator must never be called when resolution fails.
    assert!(narrator.recorded_prompts().is_empty());
}

#[tokio::test]
async fn invalid_body_reports_every_violation() {
    let narrator = Arc::new(ScriptedNarrator::new());
    let orchestrator = ReportOrchestrator::new(narrator.clone());

    let mut body = base_request();
    body["date"] = json!("not-a-date");
    body["totals"]["totalShops"] = json!(-3);

    let err = orchestrator.generate(&body).await.unwrap_err();
    match err {
        Error::Validation(v) => {
            let fields: Vec<_> = v.violations.iter().map(|x| x.field.as_str()).collect();
            assert!(fields.contains(&"date"));
            assert!(fields.contains(&"totals.totalShops"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(narrator.recorded_prompts().is_empty());
}

#[tokio::test]
async fn narrator_failure_propagates() {
    let narrator = Arc::new(ScriptedNarrator::new());
    narrator.push_err(NarratorError::ApiError {
        status_code: 429,
        message: "rate limited".into(),
    });
    let orchestrator = ReportOrchestrator::new(narrator);

    let err = orchestrator.generate(&base_request()).await.unwrap_err();
    match err {
        Error::Narrator(NarratorError::ApiError { status_code, .. }) => {
            assert_eq!(status_code, 429);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn envelope_serializes_for_callers() {
    let narrator = Arc::new(ScriptedNarrator::single(narrative("Serializable.")));
    let orchestrator = ReportOrchestrator::new(narrator);

    let envelope = orchestrator.generate(&base_request()).await.unwrap();
    let json = serde_json::to_value(&envelope).unwrap();

    assert_eq!(json["meta"]["vehicleRegNo"], "KA-20-1234");
    assert_eq!(json["metrics"]["score"], 90);
    assert_eq!(json["metrics"]["band"], "Excellent");
    assert_eq!(json["report"]["gpAccountHolderSummary"], "Serializable.");
    assert!(json.get("weekToDate").is_none());
}
