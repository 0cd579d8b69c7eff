//! `swmtrack score` — Offline metric computation, no narrator involved.

use std::path::PathBuf;

use serde_json::json;
use swmtrack_core::DayOperationalInput;
use swmtrack_engine::validate::EntryRef;
use swmtrack_engine::{compute_metrics, validate_request, week_to_date, DailyRecord};

pub async fn run(input: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let body = super::read_request(input)?;
    let request = validate_request(&body).map_err(|e| format!("Invalid request: {e}"))?;

    // Offline mode has no entry store; dry figures must be direct or inline.
    let (dry_waste_collected, dry_waste_stored) = match &request.entry {
        None => (
            request
                .day
                .dry_waste_collected
                .ok_or("day.dryWasteCollected is required")?,
            request
                .day
                .dry_waste_stored
                .ok_or("day.dryWasteStored is required")?,
        ),
        Some(EntryRef::Inline(weights)) => {
            let sum: f64 = weights.values().sum();
            (sum, request.day.dry_waste_stored.unwrap_or(sum * 0.1))
        }
        Some(EntryRef::Stored(_)) => {
            return Err("entryId lookups need the report service; supply entryData instead".into())
        }
    };

    let day = DayOperationalInput {
        households: request.day.households,
        commercial_shops: request.day.commercial_shops,
        wet_waste_collected: request.day.wet_waste_collected,
        wet_waste_managed: request.day.wet_waste_managed,
        sanitary_waste_collected: request.day.sanitary_waste_collected,
        sanitary_waste_scientifically_disposed: request.day.sanitary_waste_scientifically_disposed,
        dry_waste_collected,
        dry_waste_stored,
    };
    let metrics = compute_metrics(&request.totals, &day);

    let history: Vec<DailyRecord> = request
        .week
        .iter()
        .map(|record| DailyRecord {
            date: record.date,
            day: record.day,
            metrics: compute_metrics(&request.totals, &record.day),
        })
        .collect();
    let week = week_to_date(&history);

    let output = json!({
        "date": request.date,
        "metrics": metrics,
        "weekToDate": week,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
