//! Compliance metric computation — the normative scoring rules.
//!
//! Division by a zero denominator is not an error anywhere in this module:
//! the affected ratio is defined as 0. The weight table and the dry-storage
//! inversion cap are embedded business constants with no documented
//! derivation; they are preserved exactly and must not be re-derived,
//! because historical scores have been issued against them.

use swmtrack_core::{Band, ComplianceMetrics, DayOperationalInput, Totals};

/// Score weight for the household segregation rate.
pub const WEIGHT_SEGREGATION_HOUSEHOLDS: f64 = 0.25;
/// Score weight for the commercial segregation rate.
pub const WEIGHT_SEGREGATION_SHOPS: f64 = 0.15;
/// Score weight for wet waste management efficiency.
pub const WEIGHT_WET_MGMT: f64 = 0.25;
/// Score weight for sanitary disposal efficiency.
pub const WEIGHT_SANITARY_DISPOSAL: f64 = 0.20;
/// Score weight for the (inverted) dry storage ratio.
pub const WEIGHT_DRY_STORAGE: f64 = 0.15;
/// Dry storage ratios at or above this cap contribute zero to the score;
/// a ratio of 0 contributes the full weight. 0–0.2 is the "good" range.
pub const DRY_STORAGE_CAP: f64 = 0.2;

/// A numerator/denominator ratio capped at 1, or 0 when the denominator
/// is zero.
fn capped_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        (numerator / denominator).min(1.0)
    } else {
        0.0
    }
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Compute today's compliance metrics, score, and band from raw counts.
///
/// Pure and deterministic: identical inputs always yield identical output,
/// and there is no error path. Zero denominators produce zero ratios by
/// policy.
pub fn compute_metrics(totals: &Totals, day: &DayOperationalInput) -> ComplianceMetrics {
    let segregation_households_rate = capped_ratio(
        f64::from(day.households),
        f64::from(totals.total_households),
    );
    let segregation_shops_rate = capped_ratio(
        f64::from(day.commercial_shops),
        f64::from(totals.total_shops),
    );
    let wet_mgmt_efficiency = capped_ratio(day.wet_waste_managed, day.wet_waste_collected);
    let sanitary_disposal_efficiency = capped_ratio(
        day.sanitary_waste_scientifically_disposed,
        day.sanitary_waste_collected,
    );
    let dry_storage_ratio = capped_ratio(day.dry_waste_stored, day.dry_waste_collected);

    let total_waste =
        day.wet_waste_collected + day.dry_waste_collected + day.sanitary_waste_collected;
    let per_household_waste_kg = if day.households > 0 {
        total_waste / f64::from(day.households)
    } else {
        0.0
    };

    // Weighted score. The dry-storage term is inverted and capped: low
    // storage is favorable, and anything at or past the cap earns nothing.
    let raw_score = segregation_households_rate * WEIGHT_SEGREGATION_HOUSEHOLDS * 100.0
        + segregation_shops_rate * WEIGHT_SEGREGATION_SHOPS * 100.0
        + wet_mgmt_efficiency * WEIGHT_WET_MGMT * 100.0
        + sanitary_disposal_efficiency * WEIGHT_SANITARY_DISPOSAL * 100.0
        + (1.0 - dry_storage_ratio.min(DRY_STORAGE_CAP) / DRY_STORAGE_CAP)
            * WEIGHT_DRY_STORAGE
            * 100.0;

    let score = raw_score.round().clamp(0.0, 100.0) as u8;

    ComplianceMetrics {
        // Second clamp as a defensive invariant: every ratio leaves this
        // function inside [0,1] no matter what the arithmetic above did.
        segregation_households_rate: clamp_unit(segregation_households_rate),
        segregation_shops_rate: clamp_unit(segregation_shops_rate),
        wet_mgmt_efficiency: clamp_unit(wet_mgmt_efficiency),
        sanitary_disposal_efficiency: clamp_unit(sanitary_disposal_efficiency),
        dry_storage_ratio: clamp_unit(dry_storage_ratio),
        per_household_waste_kg: per_household_waste_kg.max(0.0),
        score,
        band: Band::from_score(score),
    }
}
