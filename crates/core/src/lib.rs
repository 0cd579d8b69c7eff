//! # SWMTrack Core
//!
//! Domain types, traits, and error definitions for the SWMTrack compliance
//! engine. This crate defines the domain model that all other crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! The scoring and assembly pipeline is deterministic and auditable; every
//! non-deterministic collaborator (the narrator service, the entry store)
//! is defined as a trait here so implementations can be swapped for
//! scripted doubles in tests. All wire-facing types serialize in camelCase
//! to match the established report contract.

pub mod entry;
pub mod error;
pub mod metrics;
pub mod narrative;
pub mod narrator;
pub mod ops;
pub mod report;

// Re-export key types at crate root for ergonomics
pub use entry::EntryStore;
pub use error::{Error, NarratorError, Result, StoreError, ValidationError, Violation};
pub use metrics::{Band, ComplianceMetrics, WeekToDateAverage};
pub use narrative::{DataIrregularity, DataQualityMetric, IrregularityType, NarrativeReport};
pub use narrator::Narrator;
pub use ops::{DayOperationalInput, Totals};
pub use report::{EntrySummary, ReportEnvelope, ReportMeta};
