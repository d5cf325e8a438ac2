//! OnboardingSequencer — walks a user through a flow and collects answers.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::FlowError;

use super::model::{
    AnswerValue, FlowDefinition, OnboardingQuestion, OnboardingStep, QuestionKind, StepKind,
};
use super::state::OnboardingState;

/// Drives one onboarding run over an immutable flow table.
///
/// Inputs that make no sense for the current table (unknown question ids,
/// option taps on a text question, advancing a finished run) are logged and
/// ignored; nothing here fails at runtime. The gate
/// [`can_advance`](Self::can_advance) is advisory: the presenting screen
/// checks it before calling [`advance`](Self::advance), which does not
/// enforce it.
pub struct OnboardingSequencer {
    flow: FlowDefinition,
    state: OnboardingState,
}

impl OnboardingSequencer {
    /// Start a fresh run over a validated flow.
    pub fn new(flow: FlowDefinition) -> Result<Self, FlowError> {
        flow.validate()?;
        info!(steps = flow.len(), "Onboarding started");
        Ok(Self {
            flow,
            state: OnboardingState::default(),
        })
    }

    /// Resume a run the host persisted earlier.
    ///
    /// The restored index is clamped into the flow's range in case the
    /// table shrank between sessions.
    pub fn resume(flow: FlowDefinition, mut state: OnboardingState) -> Result<Self, FlowError> {
        flow.validate()?;
        if !flow.is_empty() && state.current_step_index >= flow.len() {
            state.current_step_index = flow.len() - 1;
        }
        Ok(Self { flow, state })
    }

    /// The step currently shown, or `None` once the run is completed.
    pub fn current_step(&self) -> Option<&OnboardingStep> {
        if self.state.completed {
            return None;
        }
        self.flow.step(self.state.current_step_index)
    }

    /// The question for the current step.
    ///
    /// `None` for non-question steps, after completion, or when the table
    /// has no question matching the step id (such a step renders empty
    /// rather than failing).
    pub fn current_question(&self) -> Option<&OnboardingQuestion> {
        self.flow.question_for(self.current_step()?)
    }

    /// Record a tapped option.
    ///
    /// Single-select overwrites; multi-select toggles membership. Unknown
    /// question ids and option taps on text questions are ignored.
    pub fn select_option(&mut self, question_id: &str, option_value: &str) {
        let Some(question) = self.flow.question(question_id) else {
            debug!(question_id, "Ignoring option for unknown question");
            return;
        };
        match question.kind {
            QuestionKind::SingleSelect => {
                self.state.set_single(question_id, option_value);
                debug!(question_id, value = option_value, "Answer recorded");
            }
            QuestionKind::MultiSelect => {
                self.state.toggle_option(question_id, option_value);
                debug!(question_id, value = option_value, "Answer toggled");
            }
            QuestionKind::TextInput => {
                debug!(question_id, "Ignoring option tap on text question");
            }
        }
    }

    /// Record typed text for a text-input question; blank clears the
    /// answer. Ignored for unknown ids and non-text questions.
    pub fn set_text_answer(&mut self, question_id: &str, text: &str) {
        let Some(question) = self.flow.question(question_id) else {
            debug!(question_id, "Ignoring text for unknown question");
            return;
        };
        if question.kind != QuestionKind::TextInput {
            debug!(question_id, "Ignoring text on select question");
            return;
        }
        self.state.set_text(question_id, text);
    }

    /// Whether the current step is satisfied.
    ///
    /// Only a question step whose question is required and unanswered holds
    /// the user back. Every other step kind passes, as does a question step
    /// whose question is missing from the table. False once completed.
    pub fn can_advance(&self) -> bool {
        let Some(step) = self.current_step() else {
            return false;
        };
        if step.kind != StepKind::Questions {
            return true;
        }
        match self.flow.question_for(step) {
            Some(question) if question.required => self.state.has_answer(&question.id),
            _ => true,
        }
    }

    /// Move to the next step, completing the run on the last one. No-op at
    /// terminal.
    pub fn advance(&mut self) {
        if self.state.completed {
            debug!("Advance ignored, onboarding already completed");
            return;
        }
        self.state.advance(self.flow.len());
        if self.state.completed {
            info!(answers = self.state.answers.len(), "Onboarding completed");
        } else {
            debug!(step_index = self.state.current_step_index, "Step advanced");
        }
    }

    /// Move back one step, clamped at the first. No-op at terminal.
    pub fn back(&mut self) {
        self.state.back();
    }

    /// Whether the run reached the end.
    pub fn completed(&self) -> bool {
        self.state.completed
    }

    /// Index of the current step.
    pub fn current_step_index(&self) -> usize {
        self.state.current_step_index
    }

    /// All answers collected so far.
    pub fn answers(&self) -> &HashMap<String, AnswerValue> {
        &self.state.answers
    }

    /// The run state, for host persistence.
    pub fn state(&self) -> &OnboardingState {
        &self.state
    }

    /// The flow table this run walks.
    pub fn flow(&self) -> &FlowDefinition {
        &self.flow
    }

    /// Abandon the run and start over from the first step.
    pub fn restart(&mut self) {
        info!("Onboarding restarted");
        self.state.reset();
    }

    /// Progress summary for status displays.
    pub fn status(&self) -> OnboardingStatus {
        OnboardingStatus {
            step_index: self.state.current_step_index,
            step_count: self.flow.len(),
            completed: self.state.completed,
        }
    }
}

/// Progress of an onboarding run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OnboardingStatus {
    pub step_index: usize,
    pub step_count: usize,
    pub completed: bool,
}
