//! Onboarding flow definition — steps, questions, and answer values.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::FlowError;

/// What a step shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// A question screen; resolved against the question table by step id.
    Questions,
    /// A promotional/feature screen, no input.
    Promo,
    /// A reminder opt-in screen.
    Reminder,
    /// Host-defined screen driven by the step payload.
    Custom,
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Questions => "questions",
            Self::Promo => "promo",
            Self::Reminder => "reminder",
            Self::Custom => "custom",
        };
        write!(f, "{s}")
    }
}

/// One screen-unit in the onboarding flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingStep {
    /// Unique ID; for question steps this also keys the question table.
    pub id: String,
    /// What the step shows.
    pub kind: StepKind,
    /// Headline shown on the screen.
    pub title: String,
    /// Opaque payload for the presenting screen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Selection cardinality of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    SingleSelect,
    MultiSelect,
    TextInput,
}

/// One selectable option of a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: String,
    /// Label shown to the user.
    pub label: String,
    /// Value recorded when selected.
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Input specification for a question step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingQuestion {
    /// Matches the id of the step this question belongs to.
    pub id: String,
    pub title: String,
    pub kind: QuestionKind,
    /// Whether an answer gates advancing past the step.
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<QuestionOption>,
}

/// A recorded answer.
///
/// Single-select and text questions hold one string; multi-select holds the
/// set of currently toggled-on option values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Multi(BTreeSet<String>),
}

impl AnswerValue {
    /// True when the answer carries no content (blank string or empty set).
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(value) => value.trim().is_empty(),
            Self::Multi(values) => values.is_empty(),
        }
    }
}

/// The immutable step/question table a sequencer runs over.
///
/// Loaded once at startup (built-in or host-supplied JSON) and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowDefinition {
    pub steps: Vec<OnboardingStep>,
    #[serde(default)]
    pub questions: Vec<OnboardingQuestion>,
}

impl FlowDefinition {
    /// Parse a flow table from JSON and validate it.
    pub fn from_json(raw: &str) -> Result<Self, FlowError> {
        let flow: Self = serde_json::from_str(raw)?;
        flow.validate()?;
        Ok(flow)
    }

    /// Reject structurally broken tables.
    ///
    /// A question step with *no* matching question is tolerated at runtime
    /// (it renders empty), but duplicates, orphan questions, and select
    /// questions without options can never render and fail here.
    pub fn validate(&self) -> Result<(), FlowError> {
        if self.steps.is_empty() {
            return Err(FlowError::EmptyFlow);
        }

        let mut step_ids = HashSet::new();
        for step in &self.steps {
            if !step_ids.insert(step.id.as_str()) {
                return Err(FlowError::DuplicateStep {
                    id: step.id.clone(),
                });
            }
        }

        let mut question_ids = HashSet::new();
        for question in &self.questions {
            if !question_ids.insert(question.id.as_str()) {
                return Err(FlowError::DuplicateQuestion {
                    id: question.id.clone(),
                });
            }
            if !step_ids.contains(question.id.as_str()) {
                return Err(FlowError::OrphanQuestion {
                    id: question.id.clone(),
                });
            }
            let needs_options = matches!(
                question.kind,
                QuestionKind::SingleSelect | QuestionKind::MultiSelect
            );
            if needs_options && question.options.is_empty() {
                return Err(FlowError::NoOptions {
                    id: question.id.clone(),
                });
            }
        }

        Ok(())
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the flow has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step at `index`, if in range.
    pub fn step(&self, index: usize) -> Option<&OnboardingStep> {
        self.steps.get(index)
    }

    /// Question with the given id.
    pub fn question(&self, id: &str) -> Option<&OnboardingQuestion> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// The question belonging to a step, for question-kind steps.
    pub fn question_for(&self, step: &OnboardingStep) -> Option<&OnboardingQuestion> {
        if step.kind != StepKind::Questions {
            return None;
        }
        self.question(&step.id)
    }
}
