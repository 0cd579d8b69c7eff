//! The narrator's structured output — role-targeted summaries plus
//! self-audited data-quality findings.
//!
//! These types mirror the JSON schema embedded in the instruction payload.
//! The narrator is prompted rather than programmed, so the field names and
//! the closed irregularity/metric enumerations here ARE the wire contract:
//! change them and the narrator's output stops parsing.

use serde::{Deserialize, Serialize};

/// The fixed six-category data-irregularity taxonomy the narrator is asked
/// to audit against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrregularityType {
    #[serde(rename = "Completeness Errors")]
    Completeness,
    #[serde(rename = "Consistency Errors")]
    Consistency,
    #[serde(rename = "Accuracy Errors")]
    Accuracy,
    #[serde(rename = "Validity Errors")]
    Validity,
    #[serde(rename = "Duplication Errors")]
    Duplication,
    #[serde(rename = "Timeliness Errors")]
    Timeliness,
}

impl IrregularityType {
    /// The common name the prompt pairs with each error type.
    pub fn common_name(self) -> &'static str {
        match self {
            Self::Completeness => "Missing Data",
            Self::Consistency => "Conflicting/Contradictory Data",
            Self::Accuracy => "Incorrect Values",
            Self::Validity => "Format/Domain Constraint Violations",
            Self::Duplication => "Redundant Records",
            Self::Timeliness => "Stale/Outdated Data",
        }
    }
}

/// Which data quality dimension an irregularity affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataQualityMetric {
    Completeness,
    Consistency,
    Accuracy,
    Validity,
    Uniqueness,
    Timeliness,
}

/// One data-quality finding from the narrator, phrased as a hedged warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataIrregularity {
    pub error_type: IrregularityType,
    pub common_name: String,
    pub description: String,
    pub data_quality_metric_affected: DataQualityMetric,
}

/// The narrator's full structured response, consumed verbatim.
///
/// The three summaries, recommendations, and risks are required; a response
/// missing any of them fails parsing and surfaces as an invalid-response
/// error with the raw text attached. `notes` is optional per the schema and
/// an absent `dataIrregularities` list means "none detected".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeReport {
    /// 2–3 sentences for the GP account holder.
    pub gp_account_holder_summary: String,

    /// Supervisory paragraph, target ≤150 words.
    pub supervisory_summary: String,

    /// Brief summary for district / MRF monitoring.
    pub zp_mrf_summary: String,

    /// 3–5 actionable bullet points.
    pub recommendations: Vec<String>,

    /// Up to 3 potential issues; empty when all metrics are stable.
    pub risks: Vec<String>,

    /// Optional contextual note (weather, festival, etc.).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Data-quality warnings, empty when nothing was flagged.
    #[serde(default)]
    pub data_irregularities: Vec<DataIrregularity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_json() -> &'static str {
        r#"{
            "gpAccountHolderSummary": "Segregation held above target.",
            "supervisorySummary": "Stable day overall.",
            "zpMrfSummary": "No backlog risk.",
            "recommendations": ["Schedule dry waste pickup"],
            "risks": []
        }"#
    }

    #[test]
    fn parses_without_optional_fields() {
        let report: NarrativeReport = serde_json::from_str(minimal_json()).unwrap();
        assert!(report.notes.is_none());
        assert!(report.data_irregularities.is_empty());
        assert_eq!(report.recommendations.len(), 1);
    }

    #[test]
    fn missing_required_field_fails() {
        let json = r#"{"gpAccountHolderSummary": "x", "recommendations": [], "risks": []}"#;
        assert!(serde_json::from_str::<NarrativeReport>(json).is_err());
    }

    #[test]
    fn irregularity_enums_use_wire_names() {
        let json = r#"{
            "errorType": "Consistency Errors",
            "commonName": "Conflicting/Contradictory Data",
            "description": "Managed wet waste exceeds collected, which may indicate a data entry issue",
            "dataQualityMetricAffected": "Consistency"
        }"#;
        let irr: DataIrregularity = serde_json::from_str(json).unwrap();
        assert_eq!(irr.error_type, IrregularityType::Consistency);
        assert_eq!(irr.data_quality_metric_affected, DataQualityMetric::Consistency);
    }

    #[test]
    fn unknown_error_type_rejected() {
        let json = r#"{
            "errorType": "Vibes Errors",
            "commonName": "x",
            "description": "y",
            "dataQualityMetricAffected": "Accuracy"
        }"#;
        assert!(serde_json::from_str::<DataIrregularity>(json).is_err());
    }

    #[test]
    fn common_names_cover_all_six_categories() {
        use IrregularityType::*;
        for t in [Completeness, Consistency, Accuracy, Validity, Duplication, Timeliness] {
            assert!(!t.common_name().is_empty());
        }
        assert_eq!(Completeness.common_name(), "Missing Data");
    }
}
