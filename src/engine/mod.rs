//! Rule-based response engine.
//!
//! Turn pipeline: emergency matcher → intent classifier → response templates.
//! Everything here is pure and synchronous; pacing and history live in
//! `crate::session`.

pub mod classify;
pub mod emergency;
pub mod templates;

#[cfg(test)]
mod scenario_tests;

pub use classify::{classify_intent, Intent, IntentRule, Keyword, INTENT_RULES};
pub use emergency::{normalize, EmergencyCategory, EmergencyMatcher};
pub use templates::{render_response, EngineReply};

use crate::config::{ConfigError, EngineConfig};
use crate::models::HealthContext;

/// Emergency matcher plus the fixed intent table.
#[derive(Debug, Clone, Default)]
pub struct ResponseEngine {
    emergency: EmergencyMatcher,
}

impl ResponseEngine {
    pub fn new(emergency: EmergencyMatcher) -> Self {
        Self { emergency }
    }

    /// Build an engine with the config's extra emergency patterns.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        let emergency = EmergencyMatcher::with_extra_patterns(&config.extra_emergency_patterns)?;
        Ok(Self::new(emergency))
    }

    /// Decide the intent for a message. An emergency match always wins.
    pub fn classify(&self, text: &str) -> Intent {
        if let Some(category) = self.emergency.detect(text) {
            tracing::warn!(category = category.as_str(), "Emergency pattern matched");
            return Intent::Emergency(category);
        }
        let intent = classify_intent(text);
        tracing::debug!(intent = intent.as_str(), "Message classified");
        intent
    }

    /// Full turn: classify, then render against the context snapshot.
    pub fn respond(&self, text: &str, ctx: &HealthContext) -> EngineReply {
        render_response(self.classify(text), ctx)
    }

    pub fn emergency_matcher(&self) -> &EmergencyMatcher {
        &self.emergency
    }
}
