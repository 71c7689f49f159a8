//! Outcome of a scenario run

use crate::judge::Judgment;
use agent_core::ConversationMessage;
use serde::Serialize;
use std::time::Duration;

/// What a finished scenario run produced
///
/// `error` carries driver-level problems (such as an unreadable judge
/// reply) that did not abort the run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScenarioResult {
    /// Whether the run counts as passed
    pub success: bool,

    /// Full conversation, oldest first
    pub messages: Vec<ConversationMessage>,

    /// Why the run ended the way it did
    pub reasoning: Option<String>,

    /// Judge criteria met
    pub passed_criteria: Vec<String>,

    /// Judge criteria missed
    pub failed_criteria: Vec<String>,

    /// Last verdict from the judge, if one ran
    pub judgment: Option<Judgment>,

    /// Driver-level error surfaced on the result
    pub error: Option<String>,

    /// Turns started
    pub turns: usize,

    /// Wall time for the whole run
    pub total_time: Duration,

    /// Time spent inside agents under test
    pub agent_time: Duration,
}

impl ScenarioResult {
    /// Result built from a parsed verdict
    pub(crate) fn from_judgment(judgment: Judgment, success: bool) -> Self {
        Self {
            success,
            reasoning: Some(judgment.reasoning.clone()),
            passed_criteria: judgment.passed_criteria.clone(),
            failed_criteria: judgment.failed_criteria.clone(),
            judgment: Some(judgment),
            ..Self::default()
        }
    }

    /// Failed result with a reason
    pub(crate) fn failure(reasoning: impl Into<String>) -> Self {
        Self {
            reasoning: Some(reasoning.into()),
            ..Self::default()
        }
    }

    /// Failed result carrying a driver-level error
    pub(crate) fn errored(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Number of messages exchanged
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Content of the last message, if any
    pub fn last_message(&self) -> Option<&str> {
        self.messages.last().map(|m| m.content.as_str())
    }
}
