//! # SWMTrack Narrator
//!
//! Implementations of [`swmtrack_core::Narrator`]: the Gemini HTTP backend
//! used in production and a scripted double for tests.

pub mod gemini;
pub mod scripted;

pub use gemini::GeminiNarrator;
pub use scripted::ScriptedNarrator;
