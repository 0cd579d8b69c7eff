//! Narrator instruction assembly.
//!
//! Renders the [`PromptPayload`] into the single text payload the narrator
//! consumes. The narrator is prompted rather than programmed, so the
//! instructional phrases below ARE the external wire contract: they must
//! stay byte-for-byte stable or downstream report text drifts between
//! releases. Do not reword them.
//!
//! Formatting rules: ratios and masses render to two decimal places;
//! today's score renders as the rounded integer, the week-average score to
//! one decimal place; household/shop day-averages to zero decimal places.
//!
//! Assembly is deterministic: identical payloads always produce the
//! identical string.

use std::fmt::Write as _;

use chrono::NaiveDate;

use swmtrack_core::{
    ComplianceMetrics, DayOperationalInput, IrregularityType, ReportMeta, Totals,
    WeekToDateAverage,
};

/// Whether a week-to-date baseline exists for comparison.
///
/// An explicit two-variant sum type rather than an `Option` threaded
/// through string branches: the assembler emits structurally different
/// instruction text per variant, and callers must decide which one they
/// are in.
#[derive(Debug, Clone, PartialEq)]
pub enum WeekContext {
    /// First report of the week: no comparison available.
    FirstOfWeek,
    /// Week-to-date averages to compare today against.
    WithHistory(WeekToDateAverage),
}

/// Raw inputs echoed to the narrator for context, never for recalculation.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceData<'a> {
    pub totals: &'a Totals,
    pub day: &'a DayOperationalInput,
}

/// Everything the assembler needs for one instruction payload.
#[derive(Debug, Clone)]
pub struct PromptPayload<'a> {
    pub meta: &'a ReportMeta,
    pub date: NaiveDate,
    pub metrics: &'a ComplianceMetrics,
    /// Raw day inputs, present whenever the caller resolved them.
    pub reference: Option<ReferenceData<'a>>,
    pub week: WeekContext,
}

const ALL_IRREGULARITY_TYPES: [IrregularityType; 6] = [
    IrregularityType::Completeness,
    IrregularityType::Consistency,
    IrregularityType::Accuracy,
    IrregularityType::Validity,
    IrregularityType::Duplication,
    IrregularityType::Timeliness,
];

fn irregularity_type_label(t: IrregularityType) -> &'static str {
    match t {
        IrregularityType::Completeness => "Completeness Errors",
        IrregularityType::Consistency => "Consistency Errors",
        IrregularityType::Accuracy => "Accuracy Errors",
        IrregularityType::Validity => "Validity Errors",
        IrregularityType::Duplication => "Duplication Errors",
        IrregularityType::Timeliness => "Timeliness Errors",
    }
}

/// Render the full instruction payload.
pub fn assemble_prompt(payload: &PromptPayload<'_>) -> String {
    let metrics = payload.metrics;
    let week_average = match &payload.week {
        WeekContext::WithHistory(avg) => Some(avg),
        WeekContext::FirstOfWeek => None,
    };

    let mut out = String::with_capacity(6144);

    // --- Role/context preamble and today's metrics block ---
    let _ = write!(
        out,
        "You are an SWM (Solid Waste Management) Compliance Narrator. \n\
         \n\
         You are generating a comprehensive daily compliance report for a Gram Panchayat based on pre-computed data.\n\
         \n\
         Do not perform or repeat any mathematical calculations — assume all percentages and scores provided are correct.\n\
         \n\
         Context:\n\
         - Taluk: {taluk}\n\
         - Panchayat: {panchayat}\n\
         - Vehicle Registration No: {vehicle}\n\
         - Report Date: {date}\n\
         \n\
         Today's Metrics (already computed):\n\
         - Household Segregation Rate: {hh:.2} (0–1 scale)\n\
         - Commercial Segregation Rate: {shops:.2}\n\
         - Wet Waste Management Efficiency: {wet:.2}\n\
         - Sanitary Disposal Efficiency: {san:.2}\n\
         - Dry Waste Storage Ratio: {dry:.2}\n\
         - Per-Household Waste Generation (kg): {per_hh:.2}\n\
         - Compliance Score: {score} (Band: {band})",
        taluk = payload.meta.taluk,
        panchayat = payload.meta.panchayat,
        vehicle = payload.meta.vehicle_reg_no,
        date = payload.date,
        hh = metrics.segregation_households_rate,
        shops = metrics.segregation_shops_rate,
        wet = metrics.wet_mgmt_efficiency,
        san = metrics.sanitary_disposal_efficiency,
        dry = metrics.dry_storage_ratio,
        per_hh = metrics.per_household_waste_kg,
        score = metrics.score,
        band = metrics.band,
    );

    // --- Optional week-to-date comparison block ---
    if let (Some(avg), Some(reference)) = (week_average, payload.reference.as_ref()) {
        push_week_section(&mut out, avg, payload.date, metrics, reference.day);
    }

    // --- Six-category data-quality checklist ---
    out.push_str(
        "\n\
         \n\
         DATA VALIDITY CHECK:\n\
         Before generating the report, carefully analyze the data for potential irregularities. Check for:\n\
         \n\
         1. *Completeness Errors (Missing Data)*: Are there unexpected zeros, nulls, or missing values? For example:\n   \
         - Total households/shops is 0 when operations are expected\n   \
         - Waste collected is 0 when households are reported as segregating\n   \
         - Managed waste is 0 when collected waste exists\n\
         \n\
         2. *Consistency Errors (Conflicting Data)*: Are there logical contradictions? For example:\n   \
         - Segregated households exceed total households\n   \
         - Managed waste exceeds collected waste (should be ≤ collected)\n   \
         - Disposed sanitary waste exceeds collected sanitary waste\n   \
         - Stored dry waste exceeds collected dry waste\n\
         \n\
         3. *Accuracy Errors (Incorrect Values)*: Are values realistic for SWM operations? For example:\n   \
         - Per-household waste generation is abnormally high (>10 kg) or low (<0.5 kg) without context\n   \
         - Segregation rates are exactly 0% or 100% when partial compliance is expected\n   \
         - Waste quantities show sudden extreme spikes or drops without explanation\n\
         \n\
         4. *Validity Errors (Format/Domain Violations)*: Do values violate expected constraints? For example:\n   \
         - Negative values for waste quantities\n   \
         - Segregation rates outside 0-1 range\n   \
         - Non-integer values for household/shop counts\n\
         \n\
         5. *Duplication Errors*: Are there signs of duplicate entries? (This is harder to detect from single-day data, but note if patterns suggest it)\n\
         \n\
         6. *Timeliness Errors*: Is the data current and relevant? (Usually not applicable for daily reports, but note if data seems stale)\n\
         \n\
         If you detect any data irregularities, include them in the \"dataIrregularities\" field as warnings (not accusations). Use the following error types:\n",
    );
    for t in ALL_IRREGULARITY_TYPES {
        let _ = writeln!(
            out,
            "- \"{}\" (common name: \"{}\")",
            irregularity_type_label(t),
            t.common_name()
        );
    }
    out.push_str(
        "\n\
         For each irregularity, describe it in the context of SWM operations and specify which data quality metric is affected.\n",
    );

    // --- Seven enumerated narration tasks ---
    push_tasks_section(&mut out, week_average.is_some());

    // --- Rules and canonical output schema ---
    push_rules_and_schema(&mut out, week_average.is_some());

    // --- Reference data, for context only ---
    if let Some(reference) = payload.reference.as_ref() {
        push_reference_section(&mut out, reference);
    }

    out
}

fn push_week_section(
    out: &mut String,
    avg: &WeekToDateAverage,
    date: NaiveDate,
    metrics: &ComplianceMetrics,
    day: &DayOperationalInput,
) {
    let _ = write!(
        out,
        "\n\
         Week-to-Date Performance (from {start} to {date}, {days} days):\n\
         - Average Household Segregation Rate: {a_hh:.2} (Today: {t_hh:.2})\n\
         - Average Commercial Segregation Rate: {a_sh:.2} (Today: {t_sh:.2})\n\
         - Average Wet Waste Management Efficiency: {a_wet:.2} (Today: {t_wet:.2})\n\
         - Average Sanitary Disposal Efficiency: {a_san:.2} (Today: {t_san:.2})\n\
         - Average Dry Storage Ratio: {a_dry:.2} (Today: {t_dry:.2})\n\
         - Average Per-Household Waste Generation: {a_per:.2} kg (Today: {t_per:.2} kg)\n\
         - Average Compliance Score: {a_score:.1} (Today: {t_score})\n\
         - Average Daily Households Segregated: {a_dh:.0} (Today: {t_dh})\n\
         - Average Daily Shops Segregated: {a_ds:.0} (Today: {t_ds})\n\
         - Average Daily Wet Waste Collected: {a_wc:.2} kg (Today: {t_wc:.2} kg)\n\
         - Average Daily Wet Waste Managed: {a_wm:.2} kg (Today: {t_wm:.2} kg)\n\
         - Average Daily Sanitary Waste Collected: {a_sc:.2} kg (Today: {t_sc:.2} kg)\n\
         - Average Daily Sanitary Waste Disposed: {a_sd:.2} kg (Today: {t_sd:.2} kg)\n\
         - Average Daily Dry Waste Collected: {a_dc:.2} kg (Today: {t_dc:.2} kg)\n\
         - Average Daily Dry Waste Stored: {a_dst:.2} kg (Today: {t_dst:.2} kg)\n\
         \n\
         IMPORTANT: Compare today's performance against week-to-date averages. Identify trends, improvements, or declines.",
        start = avg.week_start_date,
        date = date,
        days = avg.days_count,
        a_hh = avg.avg_segregation_households_rate,
        t_hh = metrics.segregation_households_rate,
        a_sh = avg.avg_segregation_shops_rate,
        t_sh = metrics.segregation_shops_rate,
        a_wet = avg.avg_wet_mgmt_efficiency,
        t_wet = metrics.wet_mgmt_efficiency,
        a_san = avg.avg_sanitary_disposal_efficiency,
        t_san = metrics.sanitary_disposal_efficiency,
        a_dry = avg.avg_dry_storage_ratio,
        t_dry = metrics.dry_storage_ratio,
        a_per = avg.avg_per_household_waste_kg,
        t_per = metrics.per_household_waste_kg,
        a_score = avg.avg_score,
        t_score = metrics.score,
        a_dh = avg.avg_households,
        t_dh = day.households,
        a_ds = avg.avg_commercial_shops,
        t_ds = day.commercial_shops,
        a_wc = avg.avg_wet_waste_collected,
        t_wc = day.wet_waste_collected,
        a_wm = avg.avg_wet_waste_managed,
        t_wm = day.wet_waste_managed,
        a_sc = avg.avg_sanitary_waste_collected,
        t_sc = day.sanitary_waste_collected,
        a_sd = avg.avg_sanitary_waste_scientifically_disposed,
        t_sd = day.sanitary_waste_scientifically_disposed,
        a_dc = avg.avg_dry_waste_collected,
        t_dc = day.dry_waste_collected,
        a_dst = avg.avg_dry_waste_stored,
        t_dst = day.dry_waste_stored,
    );
}

fn push_tasks_section(out: &mut String, with_history: bool) {
    out.push_str(
        "\n\
         Tasks:\n\
         1. *gpAccountHolderSummary*: Write 2–3 sentences describing the day's operational performance.\n   \
         Focus on segregation compliance, efficiency, and any immediate action needed.\n   ",
    );
    out.push_str(if with_history {
        "Compare today's performance with week-to-date averages if available."
    } else {
        "Since this is the first report of the week, focus on today's performance."
    });
    out.push_str(
        "\n   \
         Example tone: \"Wet waste management efficiency remained above 95%. Recommend scheduling pickup for stored dry waste exceeding 10%.\"\n\
         \n\
         2. *supervisorySummary*: Write a comprehensive paragraph (max 150 words) summarizing performance from a supervisory viewpoint.",
    );
    out.push_str(if with_history {
        "\n   - Compare today's metrics against week-to-date averages and identify trends\n   \
         - Highlight improvements or declines in key indicators\n   \
         - Identify patterns: Is performance improving, declining, or stable?\n   \
         - Discuss important trends that can be noticed across the week-to-date period"
    } else {
        "\n   - Note: This appears to be the first report for this week, so historical comparison data is not available\n   \
         - Focus on today's performance metrics and identify any immediate concerns or strengths"
    });
    out.push_str(
        "\n   - Mention if any key indicator (segregation < 75%, efficiency < 90%) needs intervention\n\
         \n\
         3. *zpMrfSummary*: Write a brief 2–3 sentence summary for district or MRF monitoring.\n   \
         Emphasize collection-to-dispatch alignment, backlog risks, resource needs",
    );
    if with_history {
        out.push_str(", and overall week-to-date trends");
    }
    out.push_str(
        ".\n\
         \n\
         4. *recommendations*: Provide 3–5 concise bullet points with actionable operational or process improvements.\n   ",
    );
    out.push_str(if with_history {
        "Base recommendations on both today's performance and week-to-date trends."
    } else {
        "Base recommendations on today's performance."
    });
    out.push_str(
        "\n\
         \n\
         5. *risks*: List up to 3 potential issues if performance continues at the current level.\n   ",
    );
    out.push_str(if with_history {
        "Consider both immediate risks and risks based on week-to-date trends."
    } else {
        "Focus on immediate risks based on today's performance."
    });
    out.push_str(
        "\n   \
         Return an empty array if all metrics are stable.\n\
         \n\
         6. *notes*: Optional short note with contextual or situational information (weather, festival, etc.) if relevant.\n\
         \n\
         7. *dataIrregularities*: List any data quality issues detected. Each irregularity should include:\n   \
         - errorType: One of the error types listed above\n   \
         - commonName: The common name for that error type\n   \
         - description: A warning description in SWM context (e.g., \"Warning: Collected wet waste is 0 kg while 450 households are reported as segregating, which may indicate missing data entry\")\n   \
         - dataQualityMetricAffected: The affected metric (Completeness, Consistency, Accuracy, Validity, Uniqueness, or Timeliness)\n   \
         Return an empty array if no irregularities are detected.\n",
    );
}

fn push_rules_and_schema(out: &mut String, with_history: bool) {
    out.push_str(
        "\n\
         Rules:\n\
         - Do not restate raw data or repeat numbers unnecessarily.\n\
         - Keep text clear, factual, and professional.\n\
         - Do not include percentages or values unless it improves clarity.\n\
         - Avoid unnecessary adjectives or filler language.\n",
    );
    if with_history {
        out.push_str(
            "- When comparing with week-to-date, highlight significant differences (>10% change) and trends.\n",
        );
    } else {
        out.push('\n');
    }
    out.push_str(
        "- Present data irregularities as warnings, not accusations. Use phrases like \"may indicate\", \"suggests possible\", \"warrants verification\".\n\
         - Always return valid JSON following this schema:\n\
         \n\
         {\n\
         \x20 \"gpAccountHolderSummary\": \"string\",\n\
         \x20 \"supervisorySummary\": \"string\",\n\
         \x20 \"zpMrfSummary\": \"string\",\n\
         \x20 \"recommendations\": [\"string\"],\n\
         \x20 \"risks\": [\"string\"],\n\
         \x20 \"notes\": \"string (optional)\",\n\
         \x20 \"dataIrregularities\": [\n\
         \x20   {\n\
         \x20     \"errorType\": \"Completeness Errors\" | \"Consistency Errors\" | \"Accuracy Errors\" | \"Validity Errors\" | \"Duplication Errors\" | \"Timeliness Errors\",\n\
         \x20     \"commonName\": \"string\",\n\
         \x20     \"description\": \"string\",\n\
         \x20     \"dataQualityMetricAffected\": \"Completeness\" | \"Consistency\" | \"Accuracy\" | \"Validity\" | \"Uniqueness\" | \"Timeliness\"\n\
         \x20   }\n\
         \x20 ]\n\
         }\n\
         \n\
         Generate only this JSON and nothing else.",
    );
}

fn push_reference_section(out: &mut String, reference: &ReferenceData<'_>) {
    let _ = write!(
        out,
        "\n\
         Reference Data (for context only - do not recalculate):\n\
         - Total Households: {}\n\
         - Total Shops: {}\n\
         - Segregated Households Today: {}\n\
         - Segregated Shops Today: {}\n\
         - Wet Waste Collected: {:.2} kg\n\
         - Wet Waste Managed: {:.2} kg\n\
         - Sanitary Waste Collected: {:.2} kg\n\
         - Sanitary Waste Disposed: {:.2} kg\n\
         - Dry Waste Collected: {:.2} kg\n\
         - Dry Waste Stored: {:.2} kg",
        reference.totals.total_households,
        reference.totals.total_shops,
        reference.day.households,
        reference.day.commercial_shops,
        reference.day.wet_waste_collected,
        reference.day.wet_waste_managed,
        reference.day.sanitary_waste_collected,
        reference.day.sanitary_waste_scientifically_disposed,
        reference.day.dry_waste_collected,
        reference.day.dry_waste_stored,
    );
}
