use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use note_assist::config::{AppConfig, SearchConfig};
use note_assist::notes::{JsonFileSource, Note, NoteKind, NoteLibrary, NoteSource};
use note_assist::onboarding::{
    AnswerValue, FlowDefinition, OnboardingSequencer, QuestionKind, StepKind, default_flow,
};
use note_assist::search::{SearchPipeline, filter_notes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let debounce_ms: u64 = std::env::var("NOTE_ASSIST_DEBOUNCE_MS")
        .unwrap_or_else(|_| "300".to_string())
        .parse()
        .unwrap_or(300);

    let config = AppConfig {
        search: SearchConfig {
            debounce: Duration::from_millis(debounce_ms),
        },
        notes_path: std::env::var("NOTE_ASSIST_NOTES_PATH").ok().map(Into::into),
        flow_path: std::env::var("NOTE_ASSIST_FLOW_PATH").ok().map(Into::into),
    };

    eprintln!("📝 Note Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Debounce: {}ms", debounce_ms);
    eprintln!("   Type to search your notes.");
    eprintln!("   /onboard runs the first-launch flow, /notes lists everything,");
    eprintln!("   /fav lists favorites, /clear resets the search, /quit exits.\n");

    let library = NoteLibrary::new();
    let notes = match &config.notes_path {
        Some(path) => JsonFileSource::new(path)
            .load()
            .await
            .with_context(|| format!("loading notes from {}", path.display()))?,
        None => sample_notes(),
    };
    library.replace_all(notes).await;

    let flow = match &config.flow_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading flow from {}", path.display()))?;
            FlowDefinition::from_json(&raw).context("parsing flow definition")?
        }
        None => default_flow(),
    };

    let pipeline = SearchPipeline::new(config.search.clone());

    // Print results whenever a query settles.
    let mut settled = pipeline.subscribe();
    let results_library = Arc::clone(&library);
    tokio::spawn(async move {
        while let Ok(query) = settled.recv().await {
            let snapshot = results_library.snapshot().await;
            let matches = filter_notes(&snapshot, &query);
            if matches.is_empty() {
                println!("\nNo notes match \"{query}\"\n");
            } else {
                println!("\n{} match(es) for \"{query}\":", matches.len());
                print_notes(&matches);
                println!();
            }
            eprint!("> ");
        }
    });

    let stdin = tokio::io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();
    let mut sequencer: Option<OnboardingSequencer> = None;

    eprint!("> ");
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();

        if let Some(seq) = sequencer.as_mut() {
            handle_onboarding_line(seq, &line);
            if seq.completed() {
                let answers = serde_json::to_string_pretty(seq.answers())?;
                println!("\nAll set! Your answers:\n{answers}\n");
                sequencer = None;
            }
            eprint!("> ");
            continue;
        }

        match line.as_str() {
            "" => {
                eprint!("> ");
            }
            "/quit" => break,
            "/clear" => {
                pipeline.clear().await;
                println!("Search cleared.");
                eprint!("> ");
            }
            "/notes" => {
                let snapshot = library.snapshot().await;
                println!("\n{} note(s):", snapshot.len());
                print_notes(&snapshot);
                println!();
                eprint!("> ");
            }
            "/fav" => {
                let favorites = library.favorites().await;
                println!("\n{} favorite(s):", favorites.len());
                print_notes(&favorites);
                println!();
                eprint!("> ");
            }
            "/onboard" => {
                let seq = OnboardingSequencer::new(flow.clone())?;
                render_step(&seq);
                sequencer = Some(seq);
                eprint!("> ");
            }
            query => {
                pipeline.set_query(query).await;
            }
        }
    }

    Ok(())
}

/// Interpret one line of input while the onboarding flow is active.
///
/// Numbers select options, plain text answers text questions, an empty
/// line or "next" advances, "back" goes back.
fn handle_onboarding_line(seq: &mut OnboardingSequencer, line: &str) {
    match line {
        "" | "next" => {
            if seq.can_advance() {
                seq.advance();
                if !seq.completed() {
                    render_step(seq);
                }
            } else {
                println!("This step needs an answer first.");
            }
        }
        "back" => {
            seq.back();
            render_step(seq);
        }
        other => {
            let Some(question) = seq.current_question() else {
                println!("Press Enter to continue, or type 'back'.");
                return;
            };
            let question_id = question.id.clone();
            match question.kind {
                QuestionKind::SingleSelect | QuestionKind::MultiSelect => {
                    let choice: Option<usize> = other.parse().ok();
                    match choice.and_then(|n| question.options.get(n.checked_sub(1)?)) {
                        Some(option) => {
                            let value = option.value.clone();
                            seq.select_option(&question_id, &value);
                            render_step(seq);
                        }
                        None => println!("Pick an option by number."),
                    }
                }
                QuestionKind::TextInput => {
                    seq.set_text_answer(&question_id, other);
                    render_step(seq);
                }
            }
        }
    }
}

/// Print the current onboarding step.
fn render_step(seq: &OnboardingSequencer) {
    let Some(step) = seq.current_step() else {
        return;
    };
    let status = seq.status();
    println!(
        "\n[{}/{}] {}",
        status.step_index + 1,
        status.step_count,
        step.title
    );

    match step.kind {
        StepKind::Questions => {
            let Some(question) = seq.current_question() else {
                println!("(nothing to answer — press Enter to continue)");
                return;
            };
            println!("{}", question.title);
            for (i, option) in question.options.iter().enumerate() {
                let marker = match seq.answers().get(&question.id) {
                    Some(AnswerValue::Single(v)) if *v == option.value => "●",
                    Some(AnswerValue::Multi(set)) if set.contains(&option.value) => "☑",
                    _ => "○",
                };
                match &option.description {
                    Some(desc) => println!("  {} {}. {} — {}", marker, i + 1, option.label, desc),
                    None => println!("  {} {}. {}", marker, i + 1, option.label),
                }
            }
            if question.kind == QuestionKind::TextInput {
                println!("(type your answer, then press Enter to continue)");
            }
        }
        StepKind::Promo | StepKind::Reminder | StepKind::Custom => {
            println!("(press Enter to continue)");
        }
    }
}

fn print_notes(notes: &[Note]) {
    for note in notes {
        let star = if note.favorite { "★" } else { " " };
        println!("  {star} [{}] {}", note.kind, note.title);
    }
}

/// Built-in demo notes used when no notes file is configured.
fn sample_notes() -> Vec<Note> {
    vec![
        Note::new("Team standup — March 4", NoteKind::Audio)
            .with_content("Discussed the Q3 roadmap and hiring plans")
            .with_folder("work"),
        Note::new("Lecture 4: Derivatives", NoteKind::Pdf)
            .with_content("Limits, chain rule, worked examples")
            .with_folder("school")
            .with_tags(vec!["math".to_string()]),
        Note::new("Grocery list", NoteKind::Text).with_content("Eggs, coffee, oat milk"),
        Note::new("Rust async talk", NoteKind::Youtube)
            .with_content("Pinning, executors, and why futures are lazy"),
        Note::new("Whiteboard sketch", NoteKind::Image).with_folder("work"),
    ]
}
