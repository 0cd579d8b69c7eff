//! Narrator trait — the abstraction over the external text-generation
//! service.
//!
//! A Narrator takes the fully assembled instruction payload and returns the
//! structured report. One blocking round trip per call: no retry, no
//! caching, no deduplication of concurrent identical requests. Cancellation
//! is caller-driven (drop the future or race it against a timeout).
//!
//! Implementations: Gemini (production), scripted double (tests).

use async_trait::async_trait;

use crate::error::NarratorError;
use crate::narrative::NarrativeReport;

/// The narrator capability, injectable so the deterministic core stays
/// independently testable.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// A human-readable name for this narrator (e.g. "gemini", "scripted").
    fn name(&self) -> &str;

    /// Send the instruction payload and get the structured report back.
    async fn render(&self, prompt: &str) -> std::result::Result<NarrativeReport, NarratorError>;
}
