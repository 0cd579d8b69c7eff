//! # SWMTrack Report
//!
//! One level above the pure engine: resolves entry-backed dry-waste
//! figures, recomputes week history, runs the narrator exactly once per
//! request, and packages everything into a [`swmtrack_core::ReportEnvelope`].

pub mod orchestrator;
pub mod store;

pub use orchestrator::ReportOrchestrator;
pub use store::InMemoryEntryStore;
