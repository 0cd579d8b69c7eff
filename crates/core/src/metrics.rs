//! Computed compliance metrics and the ordinal band classification.

use serde::{Deserialize, Serialize};

/// Ordinal compliance classification derived from the numeric score.
///
/// Boundaries are inclusive on the lower bound of each tier; ties resolve
/// to the higher tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Band {
    Excellent,
    Good,
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    Poor,
}

impl Band {
    /// Classify a score into its band. Score ≥90 → Excellent, ≥80 → Good,
    /// ≥70 → Fair, ≥60 → Needs Improvement, else Poor.
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Self::Excellent,
            80..=89 => Self::Good,
            70..=79 => Self::Fair,
            60..=69 => Self::NeedsImprovement,
            _ => Self::Poor,
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "Excellent"),
            Self::Good => write!(f, "Good"),
            Self::Fair => write!(f, "Fair"),
            Self::NeedsImprovement => write!(f, "Needs Improvement"),
            Self::Poor => write!(f, "Poor"),
        }
    }
}

/// Today's normalized compliance metrics.
///
/// Every ratio is clamped to [0,1]. `score` and `band` are pure functions
/// of the ratios and totals; they are recomputed on demand and never
/// stored independently of their inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceMetrics {
    /// Fraction of total households segregating today.
    pub segregation_households_rate: f64,

    /// Fraction of total shops segregating today.
    pub segregation_shops_rate: f64,

    /// Managed / collected wet waste.
    pub wet_mgmt_efficiency: f64,

    /// Scientifically disposed / collected sanitary waste.
    pub sanitary_disposal_efficiency: f64,

    /// Stored / collected dry waste. Lower is better: unstored dry waste
    /// signals disposal progress.
    pub dry_storage_ratio: f64,

    /// (wet + dry + sanitary collected) / segregating households, in kg.
    pub per_household_waste_kg: f64,

    /// Weighted compliance score, 0–100.
    pub score: u8,

    /// Band derived from the score.
    pub band: Band,
}

/// Week-to-date rolling averages, the trend baseline for comparison.
///
/// Arithmetic means of every metric and every raw day-count field across
/// the contributing days. No rounding is applied here; rounding belongs
/// to presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekToDateAverage {
    /// Date of the first contributing day.
    pub week_start_date: chrono::NaiveDate,

    /// Number of contributing days, always ≥ 1.
    pub days_count: u32,

    pub avg_segregation_households_rate: f64,
    pub avg_segregation_shops_rate: f64,
    pub avg_wet_mgmt_efficiency: f64,
    pub avg_sanitary_disposal_efficiency: f64,
    pub avg_dry_storage_ratio: f64,
    pub avg_per_household_waste_kg: f64,
    pub avg_score: f64,

    pub avg_households: f64,
    pub avg_commercial_shops: f64,
    pub avg_wet_waste_collected: f64,
    pub avg_wet_waste_managed: f64,
    pub avg_sanitary_waste_collected: f64,
    pub avg_sanitary_waste_scientifically_disposed: f64,
    pub avg_dry_waste_collected: f64,
    pub avg_dry_waste_stored: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries_inclusive_on_lower_bound() {
        assert_eq!(Band::from_score(90), Band::Excellent);
        assert_eq!(Band::from_score(89), Band::Good);
        assert_eq!(Band::from_score(80), Band::Good);
        assert_eq!(Band::from_score(79), Band::Fair);
        assert_eq!(Band::from_score(70), Band::Fair);
        assert_eq!(Band::from_score(60), Band::NeedsImprovement);
        assert_eq!(Band::from_score(59), Band::Poor);
        assert_eq!(Band::from_score(0), Band::Poor);
        assert_eq!(Band::from_score(100), Band::Excellent);
    }

    #[test]
    fn band_display_matches_wire_strings() {
        assert_eq!(Band::NeedsImprovement.to_string(), "Needs Improvement");
        assert_eq!(
            serde_json::to_string(&Band::NeedsImprovement).unwrap(),
            "\"Needs Improvement\""
        );
        assert_eq!(serde_json::to_string(&Band::Excellent).unwrap(), "\"Excellent\"");
    }

    #[test]
    fn metrics_serialize_camel_case() {
        let metrics = ComplianceMetrics {
            segregation_households_rate: 0.95,
            segregation_shops_rate: 0.9,
            wet_mgmt_efficiency: 0.98,
            sanitary_disposal_efficiency: 0.9,
            dry_storage_ratio: 0.07,
            per_household_waste_kg: 0.89,
            score: 93,
            band: Band::Excellent,
        };
        let json = serde_json::to_string(&metrics).unwrap();
        assert!(json.contains("segregationHouseholdsRate"));
        assert!(json.contains("perHouseholdWasteKg"));
        assert!(json.contains("\"band\":\"Excellent\""));
    }
}
