//! # SWMTrack Engine
//!
//! The deterministic core: raw daily counts in, normalized metrics, band,
//! week-to-date averages, and the narrator instruction payload out.
//!
//! Everything here is a pure, synchronous, stateless function, safe to
//! call concurrently from any number of callers with no shared mutable
//! state and no locking. Identical inputs always produce identical
//! outputs, which is what makes the compliance reports auditable.
//!
//! Pipeline order (leaves first):
//!
//! 1. [`validate`] — untyped JSON → immutable [`validate::ReportRequest`]
//! 2. [`metrics`] — totals + day counts → [`swmtrack_core::ComplianceMetrics`]
//! 3. [`week`] — ordered daily records → week-to-date averages
//! 4. [`prompt`] — metrics + context → the narrator instruction string

pub mod metrics;
pub mod prompt;
pub mod validate;
pub mod week;

pub use metrics::compute_metrics;
pub use prompt::{assemble_prompt, PromptPayload, ReferenceData, WeekContext};
pub use validate::{validate_request, ReportRequest, WeekDayRecord};
pub use week::{week_to_date, DailyRecord};
