//! Built-in onboarding flow.
//!
//! The table the app ships when the host supplies no flow of its own.
//! Hosts with their own screens load a [`FlowDefinition`] from JSON
//! instead; this one exists so the flow works out of the box.

use serde_json::json;

use super::model::{
    FlowDefinition, OnboardingQuestion, OnboardingStep, QuestionKind, QuestionOption, StepKind,
};

fn option(id: &str, label: &str, value: &str, description: Option<&str>) -> QuestionOption {
    QuestionOption {
        id: id.to_string(),
        label: label.to_string(),
        value: value.to_string(),
        description: description.map(String::from),
    }
}

/// The default first-launch flow: welcome promo, primary-use question,
/// capture-kinds question, display name, reminder opt-in.
pub fn default_flow() -> FlowDefinition {
    FlowDefinition {
        steps: vec![
            OnboardingStep {
                id: "welcome".to_string(),
                kind: StepKind::Promo,
                title: "Capture anything, find it later".to_string(),
                data: Some(json!({
                    "highlights": ["audio", "pdf", "youtube", "text"],
                })),
            },
            OnboardingStep {
                id: "primary-use".to_string(),
                kind: StepKind::Questions,
                title: "What brings you here?".to_string(),
                data: None,
            },
            OnboardingStep {
                id: "capture-kinds".to_string(),
                kind: StepKind::Questions,
                title: "What do you want to capture?".to_string(),
                data: None,
            },
            OnboardingStep {
                id: "display-name".to_string(),
                kind: StepKind::Questions,
                title: "What should we call you?".to_string(),
                data: None,
            },
            OnboardingStep {
                id: "reminders".to_string(),
                kind: StepKind::Reminder,
                title: "Stay on top of your notes".to_string(),
                data: None,
            },
        ],
        questions: vec![
            OnboardingQuestion {
                id: "primary-use".to_string(),
                title: "What will you mostly take notes for?".to_string(),
                kind: QuestionKind::SingleSelect,
                required: true,
                options: vec![
                    option(
                        "school",
                        "School",
                        "academic",
                        Some("Lectures, readings, study sessions"),
                    ),
                    option(
                        "work",
                        "Work",
                        "professional",
                        Some("Meetings, interviews, briefs"),
                    ),
                    option("personal", "Personal", "personal", None),
                    option("research", "Research", "research", None),
                ],
            },
            OnboardingQuestion {
                id: "capture-kinds".to_string(),
                title: "Pick everything you expect to capture".to_string(),
                kind: QuestionKind::MultiSelect,
                required: false,
                options: vec![
                    option("audio", "Voice & audio", "audio", None),
                    option("pdf", "PDFs", "pdf", None),
                    option("youtube", "YouTube links", "youtube", None),
                    option("text", "Typed notes", "text", None),
                    option("image", "Photos & scans", "image", None),
                ],
            },
            OnboardingQuestion {
                id: "display-name".to_string(),
                title: "Your name".to_string(),
                kind: QuestionKind::TextInput,
                required: false,
                options: vec![],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::sequencer::OnboardingSequencer;

    #[test]
    fn default_flow_is_valid() {
        assert!(default_flow().validate().is_ok());
    }

    #[test]
    fn every_question_step_has_a_question() {
        let flow = default_flow();
        for step in &flow.steps {
            if step.kind == StepKind::Questions {
                assert!(
                    flow.question_for(step).is_some(),
                    "step {} has no question",
                    step.id
                );
            }
        }
    }

    #[test]
    fn default_flow_walkthrough() {
        let mut seq = OnboardingSequencer::new(default_flow()).unwrap();

        // welcome promo
        assert!(seq.can_advance());
        seq.advance();

        // primary-use is required
        assert!(!seq.can_advance());
        seq.select_option("primary-use", "academic");
        assert!(seq.can_advance());
        seq.advance();

        // capture-kinds is optional
        seq.select_option("capture-kinds", "audio");
        seq.select_option("capture-kinds", "pdf");
        seq.advance();

        // display name is optional text
        seq.set_text_answer("display-name", "Sam");
        seq.advance();

        // reminder step, then done
        seq.advance();
        assert!(seq.completed());
        assert_eq!(seq.answers().len(), 3);
    }
}
