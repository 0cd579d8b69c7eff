//! Week-to-date aggregation.
//!
//! Plain arithmetic means over an ordered run of daily records. An empty
//! week yields `None` ("no comparison available"), never a zero-average:
//! a fabricated zero baseline would read as a performance collapse in the
//! narrated comparison.

use chrono::NaiveDate;

use swmtrack_core::{ComplianceMetrics, DayOperationalInput, WeekToDateAverage};

/// One contributing day: its date, raw counts, and the metrics already
/// computed from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub day: DayOperationalInput,
    pub metrics: ComplianceMetrics,
}

/// Arithmetic mean of every metric and raw day-count field across the
/// records. `week_start_date` is the first record's date; `days_count` is
/// the sequence length. Returns `None` for an empty slice.
///
/// No rounding happens here; rounding, if any, belongs to presentation.
pub fn week_to_date(records: &[DailyRecord]) -> Option<WeekToDateAverage> {
    let first = records.first()?;
    let count = records.len() as f64;

    let mut avg = WeekToDateAverage {
        week_start_date: first.date,
        days_count: records.len() as u32,
        avg_segregation_households_rate: 0.0,
        avg_segregation_shops_rate: 0.0,
        avg_wet_mgmt_efficiency: 0.0,
        avg_sanitary_disposal_efficiency: 0.0,
        avg_dry_storage_ratio: 0.0,
        avg_per_household_waste_kg: 0.0,
        avg_score: 0.0,
        avg_households: 0.0,
        avg_commercial_shops: 0.0,
        avg_wet_waste_collected: 0.0,
        avg_wet_waste_managed: 0.0,
        avg_sanitary_waste_collected: 0.0,
        avg_sanitary_waste_scientifically_disposed: 0.0,
        avg_dry_waste_collected: 0.0,
        avg_dry_waste_stored: 0.0,
    };

    for record in records {
        avg.avg_segregation_households_rate += record.metrics.segregation_households_rate;
        avg.avg_segregation_shops_rate += record.metrics.segregation_shops_rate;
        avg.avg_wet_mgmt_efficiency += record.metrics.wet_mgmt_efficiency;
        avg.avg_sanitary_disposal_efficiency += record.metrics.sanitary_disposal_efficiency;
        avg.avg_dry_storage_ratio += record.metrics.dry_storage_ratio;
        avg.avg_per_household_waste_kg += record.metrics.per_household_waste_kg;
        avg.avg_score += f64::from(record.metrics.score);
        avg.avg_households += f64::from(record.day.households);
        avg.avg_commercial_shops += f64::from(record.day.commercial_shops);
        avg.avg_wet_waste_collected += record.day.wet_waste_collected;
        avg.avg_wet_waste_managed += record.day.wet_waste_managed;
        avg.avg_sanitary_waste_collected += record.day.sanitary_waste_collected;
        avg.avg_sanitary_waste_scientifically_disposed +=
            record.day.sanitary_waste_scientifically_disposed;
        avg.avg_dry_waste_collected += record.day.dry_waste_collected;
        avg.avg_dry_waste_stored += record.day.dry_waste_stored;
    }

    avg.avg_segregation_households_rate /= count;
    avg.avg_segregation_shops_rate /= count;
    avg.avg_wet_mgmt_efficiency /= count;
    avg.avg_sanitary_disposal_efficiency /= count;
    avg.avg_dry_storage_ratio /= count;
    avg.avg_per_household_waste_kg /= count;
    avg.avg_score /= count;
    avg.avg_households /= count;
    avg.avg_commercial_shops /= count;
    avg.avg_wet_waste_collected /= count;
    avg.avg_wet_waste_managed /= count;
    avg.avg_sanitary_waste_collected /= count;
    avg.avg_sanitary_waste_scientifically_disposed /= count;
    avg.avg_dry_waste_collected /= count;
    avg.avg_dry_waste_stored /= count;

    Some(avg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_metrics;
    use swmtrack_core::Totals;

    fn record(date: &str, households: u32, wet_collected: f64) -> DailyRecord {
        let totals = Totals {
            total_households: 1000,
            total_shops: 200,
        };
        let day = DayOperationalInput {
            households,
            commercial_shops: 150,
            wet_waste_collected: wet_collected,
            wet_waste_managed: wet_collected * 0.9,
            sanitary_waste_collected: 40.0,
            sanitary_waste_scientifically_disposed: 36.0,
            dry_waste_collected: 200.0,
            dry_waste_stored: 20.0,
        };
        DailyRecord {
            date: date.parse().unwrap(),
            day,
            metrics: compute_metrics(&totals, &day),
        }
    }

    #[test]
    fn empty_week_yields_none() {
        assert!(week_to_date(&[]).is_none());
    }

    #[test]
    fn single_record_mean_is_itself() {
        let r = record("2026-08-24", 900, 450.0);
        let avg = week_to_date(&[r]).unwrap();
        assert_eq!(avg.week_start_date, r.date);
        assert_eq!(avg.days_count, 1);
        assert_eq!(avg.avg_segregation_households_rate, r.metrics.segregation_households_rate);
        assert_eq!(avg.avg_score, f64::from(r.metrics.score));
        assert_eq!(avg.avg_households, f64::from(r.day.households));
        assert_eq!(avg.avg_wet_waste_collected, r.day.wet_waste_collected);
    }

    #[test]
    fn means_over_multiple_days() {
        let records = [
            record("2026-08-24", 800, 400.0),
            record("2026-08-25", 900, 500.0),
            record("2026-08-26", 1000, 600.0),
        ];
        let avg = week_to_date(&records).unwrap();
        assert_eq!(avg.week_start_date, records[0].date);
        assert_eq!(avg.days_count, 3);
        assert!((avg.avg_households - 900.0).abs() < 1e-9);
        assert!((avg.avg_wet_waste_collected - 500.0).abs() < 1e-9);
        let expected_rate = (0.8 + 0.9 + 1.0) / 3.0;
        assert!((avg.avg_segregation_households_rate - expected_rate).abs() < 1e-12);
    }

    #[test]
    fn no_rounding_during_aggregation() {
        let records = [record("2026-08-24", 333, 100.0), record("2026-08-25", 334, 100.0)];
        let avg = week_to_date(&records).unwrap();
        // 333.5 would round away if aggregation rounded
        assert!((avg.avg_households - 333.5).abs() < 1e-12);
    }
}
