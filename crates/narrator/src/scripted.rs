//! Scripted narrator for tests.
//!
//! Returns queued responses in order and records every prompt it was given,
//! so orchestration tests can assert on the exact instruction text without
//! any network access.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use swmtrack_core::{NarrativeReport, Narrator, NarratorError};

/// A [`Narrator`] that replays pre-loaded outcomes.
#[derive(Default)]
pub struct ScriptedNarrator {
    script: Mutex<VecDeque<Result<NarrativeReport, NarratorError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedNarrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A narrator that returns `report` for the single next call.
    pub fn single(report: NarrativeReport) -> Self {
        let narrator = Self::new();
        narrator.push_ok(report);
        narrator
    }

    /// Queue a successful response.
    pub fn push_ok(&self, report: NarrativeReport) {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(report));
    }

    /// Queue a failure.
    pub fn push_err(&self, error: NarratorError) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    /// Every prompt received so far, in call order.
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Narrator for ScriptedNarrator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn render(&self, prompt: &str) -> Result<NarrativeReport, NarratorError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(NarratorError::InvalidResponse {
                    reason: "scripted responses exhausted".into(),
                    raw: String::new(),
                })
            })
    }
}
