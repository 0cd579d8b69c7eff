//! The response envelope returned to callers after one report-generation
//! round trip.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::metrics::{ComplianceMetrics, WeekToDateAverage};
use crate::narrative::NarrativeReport;
use crate::ops::DayOperationalInput;

/// Report metadata identifying the administrative unit and collection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    /// Taluk (sub-district) name.
    pub taluk: String,

    /// Gram Panchayat name.
    pub panchayat: String,

    /// Collection vehicle registration number.
    pub vehicle_reg_no: String,
}

/// Figures derived on the entry path, echoed back for transparency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySummary {
    /// Sum of all material weights in the entry (kg).
    pub dry_waste_collected: f64,

    /// Supplied value, or the 10% default when the caller omitted it (kg).
    pub dry_waste_stored: f64,

    /// Number of distinct materials in the entry.
    pub material_count: usize,
}

/// Everything one report-generation call produces: the narrator's prose
/// plus the computed metrics and the resolved inputs they came from, so
/// the result is auditable without re-querying anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEnvelope {
    /// Unique identifier for this generation run.
    pub report_id: Uuid,

    pub meta: ReportMeta,

    /// Report date.
    pub date: NaiveDate,

    /// The narrator's structured output, verbatim.
    pub report: NarrativeReport,

    /// Today's computed metrics.
    pub metrics: ComplianceMetrics,

    /// The resolved day input the metrics were computed from.
    pub day: DayOperationalInput,

    /// Week-to-date baseline, absent on the first report of the week.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_to_date: Option<WeekToDateAverage>,

    /// Present only when the day input was derived from a stored entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_summary: Option<EntrySummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Band;

    #[test]
    fn envelope_serializes_camel_case_and_skips_absent_blocks() {
        let envelope = ReportEnvelope {
            report_id: Uuid::nil(),
            meta: ReportMeta {
                taluk: "Udupi".into(),
                panchayat: "Alevoor".into(),
                vehicle_reg_no: "KA-20-1234".into(),
            },
            date: NaiveDate::from_ymd_opt(2026, 8, 24).unwrap(),
            report: NarrativeReport {
                gp_account_holder_summary: "ok".into(),
                supervisory_summary: "ok".into(),
                zp_mrf_summary: "ok".into(),
                recommendations: vec![],
                risks: vec![],
                notes: None,
                data_irregularities: vec![],
            },
            metrics: ComplianceMetrics {
                segregation_households_rate: 1.0,
                segregation_shops_rate: 1.0,
                wet_mgmt_efficiency: 1.0,
                sanitary_disposal_efficiency: 1.0,
                dry_storage_ratio: 0.0,
                per_household_waste_kg: 1.0,
                score: 100,
                band: Band::Excellent,
            },
            day: DayOperationalInput {
                households: 1,
                commercial_shops: 1,
                wet_waste_collected: 1.0,
                wet_waste_managed: 1.0,
                sanitary_waste_collected: 1.0,
                sanitary_waste_scientifically_disposed: 1.0,
                dry_waste_collected: 1.0,
                dry_waste_stored: 0.0,
            },
            week_to_date: None,
            entry_summary: None,
        };
        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.contains("vehicleRegNo"));
        assert!(json.contains("reportId"));
        assert!(!json.contains("weekToDate"));
        assert!(!json.contains("entrySummary"));
    }
}
