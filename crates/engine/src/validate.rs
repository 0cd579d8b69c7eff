//! Input validation — untyped JSON in, an immutable [`ReportRequest`] out.
//!
//! Every problem found is collected as a field-level [`Violation`] with a
//! dotted path, and the whole batch is returned at once so the caller can
//! fix its payload in one round. The input value is never mutated.
//!
//! On the entry path (`entryId` or `entryData` present) the day's
//! `dryWasteCollected` and `dryWasteStored` are optional; they are derived
//! from the stored material weights downstream. Otherwise both are
//! required.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;

use swmtrack_core::{
    DayOperationalInput, ReportMeta, Totals, ValidationError, Violation,
};

/// Where the dry-waste figures come from when not supplied directly.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryRef {
    /// Look the entry up in the store by identifier.
    Stored(String),
    /// Material → weight (kg) supplied inline with the request.
    Inline(BTreeMap<String, f64>),
}

/// The day's counts as validated, before entry resolution. Dry-waste
/// fields are `None` only when an [`EntryRef`] is present to derive them.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialDayInput {
    pub households: u32,
    pub commercial_shops: u32,
    pub wet_waste_collected: f64,
    pub wet_waste_managed: f64,
    pub sanitary_waste_collected: f64,
    pub sanitary_waste_scientifically_disposed: f64,
    pub dry_waste_collected: Option<f64>,
    pub dry_waste_stored: Option<f64>,
}

/// One prior day of the current week, supplied raw so its metrics can be
/// recomputed rather than trusted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekDayRecord {
    pub date: NaiveDate,
    pub day: DayOperationalInput,
}

/// A fully validated report-generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub meta: ReportMeta,
    pub date: NaiveDate,
    pub totals: Totals,
    pub day: PartialDayInput,
    /// Present when dry-waste figures are entry-derived.
    pub entry: Option<EntryRef>,
    /// Prior days of the week, oldest first. Empty = first report of week.
    pub week: Vec<WeekDayRecord>,
}

/// Validate an untyped request body.
///
/// Returns every violation found, not just the first.
pub fn validate_request(value: &Value) -> Result<ReportRequest, ValidationError> {
    let mut violations = Vec::new();

    let Some(root) = value.as_object() else {
        return Err(ValidationError::single("$", "request body must be a JSON object"));
    };

    let meta = validate_meta(root.get("meta"), &mut violations);
    let date = require_date(root.get("date"), "date", &mut violations);
    let totals = validate_totals(root.get("totals"), &mut violations);
    let entry = validate_entry(root, &mut violations);
    let day = validate_day(root.get("day"), "day", entry.is_some(), &mut violations);
    let week = validate_week(root.get("week"), &mut violations);

    if violations.is_empty() {
        // All Options are Some here: a None would have pushed a violation.
        Ok(ReportRequest {
            meta: meta.ok_or_else(missing_internal)?,
            date: date.ok_or_else(missing_internal)?,
            totals: totals.ok_or_else(missing_internal)?,
            day: day.ok_or_else(missing_internal)?,
            entry,
            week,
        })
    } else {
        Err(ValidationError::new(violations))
    }
}

fn missing_internal() -> ValidationError {
    ValidationError::single("$", "internal: field lost without violation")
}

// --- Section validators ---

fn validate_meta(value: Option<&Value>, violations: &mut Vec<Violation>) -> Option<ReportMeta> {
    let obj = require_object(value, "meta", violations)?;
    let taluk = require_string(obj.get("taluk"), "meta.taluk", violations);
    let panchayat = require_string(obj.get("panchayat"), "meta.panchayat", violations);
    let vehicle_reg_no = require_string(obj.get("vehicleRegNo"), "meta.vehicleRegNo", violations);
    Some(ReportMeta {
        taluk: taluk?,
        panchayat: panchayat?,
        vehicle_reg_no: vehicle_reg_no?,
    })
}

fn validate_totals(value: Option<&Value>, violations: &mut Vec<Violation>) -> Option<Totals> {
    let obj = require_object(value, "totals", violations)?;
    let total_households = require_count(obj.get("totalHouseholds"), "totals.totalHouseholds", violations);
    let total_shops = require_count(obj.get("totalShops"), "totals.totalShops", violations);
    Some(Totals {
        total_households: total_households?,
        total_shops: total_shops?,
    })
}

fn validate_entry(
    root: &serde_json::Map<String, Value>,
    violations: &mut Vec<Violation>,
) -> Option<EntryRef> {
    // Inline entryData takes precedence over entryId when both are given.
    if let Some(data) = root.get("entryData") {
        let Some(obj) = data.as_object() else {
            violations.push(Violation::new("entryData", "must be an object of material weights"));
            return None;
        };
        let mut weights = BTreeMap::new();
        for (material, weight) in obj {
            let path = format!("entryData.{material}");
            if let Some(w) = require_mass(Some(weight), &path, violations) {
                weights.insert(material.clone(), w);
            }
        }
        return Some(EntryRef::Inline(weights));
    }

    if let Some(id) = root.get("entryId") {
        let id = require_string(Some(id), "entryId", violations)?;
        return Some(EntryRef::Stored(id));
    }

    None
}

fn validate_day(
    value: Option<&Value>,
    path: &str,
    entry_backed: bool,
    violations: &mut Vec<Violation>,
) -> Option<PartialDayInput> {
    let obj = require_object(value, path, violations)?;
    let field = |name: &str| format!("{path}.{name}");

    let households = require_count(obj.get("households"), &field("households"), violations);
    let commercial_shops =
        require_count(obj.get("commercialShops"), &field("commercialShops"), violations);
    let wet_waste_collected =
        require_mass(obj.get("wetWasteCollected"), &field("wetWasteCollected"), violations);
    let wet_waste_managed =
        require_mass(obj.get("wetWasteManaged"), &field("wetWasteManaged"), violations);
    let sanitary_waste_collected = require_mass(
        obj.get("sanitaryWasteCollected"),
        &field("sanitaryWasteCollected"),
        violations,
    );
    let sanitary_waste_scientifically_disposed = require_mass(
        obj.get("sanitaryWasteScientificallyDisposed"),
        &field("sanitaryWasteScientificallyDisposed"),
        violations,
    );

    let dry_waste_collected = optional_or_required_mass(
        obj.get("dryWasteCollected"),
        &field("dryWasteCollected"),
        entry_backed,
        violations,
    );
    let dry_waste_stored = optional_or_required_mass(
        obj.get("dryWasteStored"),
        &field("dryWasteStored"),
        entry_backed,
        violations,
    );

    Some(PartialDayInput {
        households: households?,
        commercial_shops: commercial_shops?,
        wet_waste_collected: wet_waste_collected?,
        wet_waste_managed: wet_waste_managed?,
        sanitary_waste_collected: sanitary_waste_collected?,
        sanitary_waste_scientifically_disposed: sanitary_waste_scientifically_disposed?,
        dry_waste_collected: dry_waste_collected?,
        dry_waste_stored: dry_waste_stored?,
    })
}

fn validate_week(value: Option<&Value>, violations: &mut Vec<Violation>) -> Vec<WeekDayRecord> {
    let Some(value) = value else {
        return Vec::new();
    };
    let Some(items) = value.as_array() else {
        violations.push(Violation::new("week", "must be an array of daily records"));
        return Vec::new();
    };

    let mut records = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let path = format!("week[{i}]");
        let Some(obj) = require_object(Some(item), &path, violations) else {
            continue;
        };
        let date = require_date(obj.get("date"), &format!("{path}.date"), violations);
        let day = validate_full_day(obj.get("day"), &format!("{path}.day"), violations);
        if let (Some(date), Some(day)) = (date, day) {
            records.push(WeekDayRecord { date, day });
        }
    }

    // History must arrive oldest-first so weekStartDate lands on the first
    // record and the narrated trend reads forward in time.
    for pair in records.windows(2) {
        if pair[1].date < pair[0].date {
            violations.push(Violation::new(
                "week",
                "daily records must be ordered by nondecreasing date",
            ));
            break;
        }
    }

    records
}

fn validate_full_day(
    value: Option<&Value>,
    path: &str,
    violations: &mut Vec<Violation>,
) -> Option<DayOperationalInput> {
    let partial = validate_day(value, path, false, violations)?;
    Some(DayOperationalInput {
        households: partial.households,
        commercial_shops: partial.commercial_shops,
        wet_waste_collected: partial.wet_waste_collected,
        wet_waste_managed: partial.wet_waste_managed,
        sanitary_waste_collected: partial.sanitary_waste_collected,
        sanitary_waste_scientifically_disposed: partial.sanitary_waste_scientifically_disposed,
        dry_waste_collected: partial.dry_waste_collected?,
        dry_waste_stored: partial.dry_waste_stored?,
    })
}

// --- Field-level helpers ---

fn require_object<'a>(
    value: Option<&'a Value>,
    path: &str,
    violations: &mut Vec<Violation>,
) -> Option<&'a serde_json::Map<String, Value>> {
    match value {
        Some(v) => match v.as_object() {
            Some(obj) => Some(obj),
            None => {
                violations.push(Violation::new(path, "must be an object"));
                None
            }
        },
        None => {
            violations.push(Violation::new(path, "is required"));
            None
        }
    }
}

fn require_string(
    value: Option<&Value>,
    path: &str,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    match value.and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Some(s.to_string()),
        Some(_) => {
            violations.push(Violation::new(path, "must not be empty"));
            None
        }
        None => {
            violations.push(Violation::new(path, "is required and must be a string"));
            None
        }
    }
}

fn require_date(
    value: Option<&Value>,
    path: &str,
    violations: &mut Vec<Violation>,
) -> Option<NaiveDate> {
    let s = match value.and_then(Value::as_str) {
        Some(s) => s,
        None => {
            violations.push(Violation::new(path, "is required and must be a string"));
            return None;
        }
    };
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            violations.push(Violation::new(path, "must be a date in YYYY-MM-DD format"));
            None
        }
    }
}

/// A nonnegative integer count. Rejects negatives, fractions, and anything
/// outside u32 range.
fn require_count(
    value: Option<&Value>,
    path: &str,
    violations: &mut Vec<Violation>,
) -> Option<u32> {
    match value.and_then(Value::as_u64) {
        Some(n) if n <= u64::from(u32::MAX) => Some(n as u32),
        Some(_) => {
            violations.push(Violation::new(path, "is out of range"));
            None
        }
        None => {
            violations.push(Violation::new(path, "must be a nonnegative integer"));
            None
        }
    }
}

/// A nonnegative, finite mass in kilograms.
fn require_mass(value: Option<&Value>, path: &str, violations: &mut Vec<Violation>) -> Option<f64> {
    match value.and_then(Value::as_f64) {
        Some(n) if n >= 0.0 && n.is_finite() => Some(n),
        Some(_) => {
            violations.push(Violation::new(path, "must be a nonnegative number"));
            None
        }
        None => {
            violations.push(Violation::new(path, "must be a nonnegative number"));
            None
        }
    }
}

/// Wraps [`require_mass`]: the field may be absent when entry-backed,
/// otherwise it is required. A present-but-invalid value is always a
/// violation. Returns `Some(None)` for a legitimately absent field.
fn optional_or_required_mass(
    value: Option<&Value>,
    path: &str,
    entry_backed: bool,
    violations: &mut Vec<Violation>,
) -> Option<Option<f64>> {
    match value {
        Some(v) => require_mass(Some(v), path, violations).map(Some),
        None if entry_backed => Some(None),
        None => {
            violations.push(Violation::new(path, "is required unless entry data is provided"));
            None
        }
    }
}
