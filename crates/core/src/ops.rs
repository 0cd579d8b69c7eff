//! Raw operational counts for one Gram Panchayat.
//!
//! These are the denominators and the per-day numerators everything else
//! is computed from. Counts are integers; masses are kilograms.

use serde::{Deserialize, Serialize};

/// Unit-wide denominators for segregation rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Total households in the panchayat.
    pub total_households: u32,

    /// Total commercial shops in the panchayat.
    pub total_shops: u32,
}

/// One day's operational counts.
///
/// `households` / `commercial_shops` are the units reported as segregating
/// waste today, not the unit-wide totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOperationalInput {
    /// Households segregating today.
    pub households: u32,

    /// Commercial shops segregating today.
    pub commercial_shops: u32,

    /// Wet waste collected (kg).
    pub wet_waste_collected: f64,

    /// Wet waste managed on-site or dispatched (kg).
    pub wet_waste_managed: f64,

    /// Sanitary waste collected (kg).
    pub sanitary_waste_collected: f64,

    /// Sanitary waste scientifically disposed (kg).
    pub sanitary_waste_scientifically_disposed: f64,

    /// Dry waste collected (kg).
    pub dry_waste_collected: f64,

    /// Dry waste still held in storage, not yet dispatched (kg).
    pub dry_waste_stored: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_input_camel_case_wire_names() {
        let day = DayOperationalInput {
            households: 950,
            commercial_shops: 180,
            wet_waste_collected: 500.0,
            wet_waste_managed: 490.0,
            sanitary_waste_collected: 50.0,
            sanitary_waste_scientifically_disposed: 45.0,
            dry_waste_collected: 300.0,
            dry_waste_stored: 20.0,
        };
        let json = serde_json::to_string(&day).unwrap();
        assert!(json.contains("commercialShops"));
        assert!(json.contains("sanitaryWasteScientificallyDisposed"));
        assert!(!json.contains("commercial_shops"));
    }

    #[test]
    fn totals_round_trip() {
        let totals: Totals =
            serde_json::from_str(r#"{"totalHouseholds":1000,"totalShops":200}"#).unwrap();
        assert_eq!(totals.total_households, 1000);
        assert_eq!(totals.total_shops, 200);
    }
}
