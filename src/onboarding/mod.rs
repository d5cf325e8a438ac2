//! Onboarding flow — ordered mixed-kind steps with answer collection.
//!
//! A flow is a fixed table of steps (question screens, promos, reminder
//! prompts) loaded once at startup. The sequencer walks the user through
//! them in order, records answers for question steps, and reports
//! completion. Screens own navigation and persistence of the final answers;
//! the sequencer only holds the state.

pub mod flow;
pub mod model;
pub mod sequencer;
pub mod state;

pub use flow::default_flow;
pub use model::{
    AnswerValue, FlowDefinition, OnboardingQuestion, OnboardingStep, QuestionKind, QuestionOption,
    StepKind,
};
pub use sequencer::{OnboardingSequencer, OnboardingStatus};
pub use state::OnboardingState;
