//! The report-generation pipeline.
//!
//! Fixed stage order per request: validate, resolve the day's dry-waste
//! figures, compute today's metrics, recompute the week baseline from raw
//! history, assemble the instruction payload, call the narrator exactly
//! once, and wrap everything in an envelope. The narrator is never retried
//! here and its output is never edited.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use swmtrack_core::{
    DayOperationalInput, EntryStore, EntrySummary, Error, Narrator, ReportEnvelope, Result,
};
use swmtrack_engine::validate::{EntryRef, PartialDayInput, ReportRequest};
use swmtrack_engine::{
    assemble_prompt, compute_metrics, validate_request, week_to_date, DailyRecord, PromptPayload,
    ReferenceData, WeekContext,
};

/// Fraction of collected dry waste assumed to remain in storage when the
/// caller supplies an entry without an explicit stored figure.
const DEFAULT_STORED_FRACTION: f64 = 0.1;

/// Drives one report-generation round trip.
pub struct ReportOrchestrator {
    narrator: Arc<dyn Narrator>,
    entries: Option<Arc<dyn EntryStore>>,
}

impl ReportOrchestrator {
    pub fn new(narrator: Arc<dyn Narrator>) -> Self {
        Self {
            narrator,
            entries: None,
        }
    }

    /// Attach an entry store, enabling `entryId` lookups.
    pub fn with_entry_store(mut self, entries: Arc<dyn EntryStore>) -> Self {
        self.entries = Some(entries);
        self
    }

    /// Validate an untyped request body and generate the report.
    pub async fn generate(&self, body: &serde_json::Value) -> Result<ReportEnvelope> {
        let request = validate_request(body)?;
        self.generate_validated(request).await
    }

    /// Generate a report from an already-validated request.
    pub async fn generate_validated(&self, request: ReportRequest) -> Result<ReportEnvelope> {
        debug!(
            panchayat = %request.meta.panchayat,
            date = %request.date,
            history_days = request.week.len(),
            "Generating compliance report"
        );

        let (day, entry_summary) = self.resolve_day(&request).await?;
        let metrics = compute_metrics(&request.totals, &day);

        // History arrives as raw counts; metrics are recomputed rather than
        // trusted from the caller.
        let history: Vec<DailyRecord> = request
            .week
            .iter()
            .map(|record| DailyRecord {
                date: record.date,
                day: record.day,
                metrics: compute_metrics(&request.totals, &record.day),
            })
            .collect();
        let week_average = week_to_date(&history);
        let week_context = match week_average.clone() {
            Some(avg) => WeekContext::WithHistory(avg),
            None => WeekContext::FirstOfWeek,
        };

        let prompt = assemble_prompt(&PromptPayload {
            meta: &request.meta,
            date: request.date,
            metrics: &metrics,
            reference: Some(ReferenceData {
                totals: &request.totals,
                day: &day,
            }),
            week: week_context,
        });

        debug!(narrator = self.narrator.name(), prompt_len = prompt.len(), "Rendering narrative");
        let report = self.narrator.render(&prompt).await.map_err(|e| {
            warn!(narrator = self.narrator.name(), error = %e, "Narrator call failed");
            e
        })?;

        Ok(ReportEnvelope {
            report_id: Uuid::new_v4(),
            meta: request.meta,
            date: request.date,
            report,
            metrics,
            day,
            week_to_date: week_average,
            entry_summary,
        })
    }

    /// Resolve the day's full operational input, deriving dry-waste figures
    /// from the entry when one is referenced.
    async fn resolve_day(
        &self,
        request: &ReportRequest,
    ) -> Result<(DayOperationalInput, Option<EntrySummary>)> {
        let day = &request.day;

        let Some(entry) = &request.entry else {
            return Ok((direct_day(day)?, None));
        };

        let weights = match entry {
            EntryRef::Inline(weights) => weights.clone(),
            EntryRef::Stored(entry_id) => {
                let store = self.entries.as_ref().ok_or_else(|| {
                    Error::Internal("entryId given but no entry store is configured".into())
                })?;
                store
                    .material_weights(entry_id)
                    .await?
                    .ok_or_else(|| Error::EntryNotFound {
                        entry_id: entry_id.clone(),
                    })?
            }
        };

        // The entry is authoritative for collected dry waste.
        let dry_waste_collected: f64 = weights.values().sum();
        let dry_waste_stored = day
            .dry_waste_stored
            .unwrap_or(dry_waste_collected * DEFAULT_STORED_FRACTION);

        let summary = EntrySummary {
            dry_waste_collected,
            dry_waste_stored,
            material_count: weights.len(),
        };
        let resolved = DayOperationalInput {
            households: day.households,
            commercial_shops: day.commercial_shops,
            wet_waste_collected: day.wet_waste_collected,
            wet_waste_managed: day.wet_waste_managed,
            sanitary_waste_collected: day.sanitary_waste_collected,
            sanitary_waste_scientifically_disposed: day.sanitary_waste_scientifically_disposed,
            dry_waste_collected,
            dry_waste_stored,
        };
        Ok((resolved, Some(summary)))
    }
}

/// On the direct path both dry-waste fields were required upstream, so an
/// absent one here is a pipeline bug, not a caller mistake.
fn direct_day(day: &PartialDayInput) -> Result<DayOperationalInput> {
    let dry_waste_collected = day
        .dry_waste_collected
        .ok_or_else(|| Error::Internal("dryWasteCollected absent without entry data".into()))?;
    let dry_waste_stored = day
        .dry_waste_stored
        .ok_or_else(|| Error::Internal("dryWasteStored absent without entry data".into()))?;
    Ok(DayOperationalInput {
        households: day.households,
        commercial_shops: day.commercial_shops,
        wet_waste_collected: day.wet_waste_collected,
        wet_waste_managed: day.wet_waste_managed,
        sanitary_waste_collected: day.sanitary_waste_collected,
        sanitary_waste_scientifically_disposed: day.sanitary_waste_scientifically_disposed,
        dry_waste_collected,
        dry_waste_stored,
    })
}
