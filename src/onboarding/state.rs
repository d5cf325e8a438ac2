//! Onboarding run state — step position and collected answers.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::model::AnswerValue;

/// Mutable state of one onboarding run.
///
/// Serializable so the host can persist a run in progress and restore it.
/// All mutations clamp instead of failing: the step index stays inside
/// `0..step_count` while the run is live, and a completed run ignores
/// further transitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnboardingState {
    /// Index of the step currently shown.
    pub current_step_index: usize,
    /// Collected answers, keyed by question id.
    #[serde(default)]
    pub answers: HashMap<String, AnswerValue>,
    /// Whether the run reached the end. Terminal.
    #[serde(default)]
    pub completed: bool,
}

impl OnboardingState {
    /// Move to the next step, completing the run on the last one.
    ///
    /// No-op once completed. A zero-step flow completes immediately since
    /// there is nothing to show.
    pub fn advance(&mut self, step_count: usize) {
        if self.completed {
            return;
        }
        if step_count == 0 || self.current_step_index + 1 >= step_count {
            self.completed = true;
            return;
        }
        self.current_step_index += 1;
    }

    /// Move to the previous step, clamped at the first. No-op once
    /// completed.
    pub fn back(&mut self) {
        if self.completed {
            return;
        }
        self.current_step_index = self.current_step_index.saturating_sub(1);
    }

    /// Overwrite the answer for a single-select or text question.
    pub fn set_single(&mut self, question_id: &str, value: impl Into<String>) {
        self.answers
            .insert(question_id.to_string(), AnswerValue::Single(value.into()));
    }

    /// Toggle an option value for a multi-select question.
    ///
    /// Absent key creates a singleton set; toggling the last value off
    /// removes the key entirely.
    pub fn toggle_option(&mut self, question_id: &str, value: &str) {
        match self.answers.get_mut(question_id) {
            Some(AnswerValue::Multi(values)) => {
                if !values.remove(value) {
                    values.insert(value.to_string());
                }
                if values.is_empty() {
                    self.answers.remove(question_id);
                }
            }
            // A stale single value under a multi-select key starts over as
            // a fresh set.
            _ => {
                self.answers.insert(
                    question_id.to_string(),
                    AnswerValue::Multi(BTreeSet::from([value.to_string()])),
                );
            }
        }
    }

    /// Record a text answer; blank text clears the entry.
    pub fn set_text(&mut self, question_id: &str, text: &str) {
        if text.trim().is_empty() {
            self.answers.remove(question_id);
        } else {
            self.answers
                .insert(question_id.to_string(), AnswerValue::Single(text.to_string()));
        }
    }

    /// The answer recorded for a question, if any.
    pub fn answer(&self, question_id: &str) -> Option<&AnswerValue> {
        self.answers.get(question_id)
    }

    /// Whether a question has a non-empty answer.
    pub fn has_answer(&self, question_id: &str) -> bool {
        self.answers
            .get(question_id)
            .is_some_and(|answer| !answer.is_empty())
    }

    /// Reset to the start of a fresh run.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
