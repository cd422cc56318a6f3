use learnforge::adapters::JsonFileStore;
use learnforge::cli::{parse_args, CliCommand, USAGE, VERSION};
use learnforge::config::GatewayConfig;
use learnforge::error::StreamFailure;
use learnforge::gateway::GatewayClient;
use learnforge::models::{
    InterviewTurn, LearningModule, LessonDepth, LessonKind, StreamRequest, INTERVIEW_SIM_DEPTH,
};
use learnforge::progress::{ProgressTracker, RECENT_TOPICS_DEFAULT_LIMIT};
use learnforge::quiz;
use learnforge::session::{SessionOutcome, SessionStatus, StreamHandle};
use learnforge::traits::StreamObserver;

use color_eyre::Result;
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Prints deltas to stdout as they arrive. Failures are printed to
/// stderr with the user-facing message; result inspection happens via
/// the session outcome.
struct ConsoleObserver {
    print_deltas: bool,
}

impl StreamObserver for ConsoleObserver {
    fn on_delta(&mut self, text: &str) {
        if self.print_deltas {
            print!("{}", text);
            let _ = io::stdout().flush();
        }
    }

    fn on_done(&mut self) {
        if self.print_deltas {
            println!();
        }
    }

    fn on_error(&mut self, failure: &StreamFailure) {
        if self.print_deltas {
            println!();
        }
        eprintln!("{}", failure.user_message());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let tracker = ProgressTracker::new(Box::new(JsonFileStore::at_default_path()));

    match parse_args(std::env::args()) {
        CliCommand::Version => println!("learnforge {}", VERSION),
        CliCommand::Help => println!("{}", USAGE),
        CliCommand::Stats => print_stats(&tracker),
        CliCommand::Recent => print_recent(&tracker),
        CliCommand::Lesson { topic, depth } => {
            let topic = require_topic(&topic);
            run_lesson(&gateway(), &tracker, topic, depth).await?;
        }
        CliCommand::Code { topic } => {
            let topic = require_topic(&topic);
            run_module(&gateway(), &tracker, topic, LessonKind::Code).await?;
        }
        CliCommand::Audio { topic } => {
            let topic = require_topic(&topic);
            run_module(&gateway(), &tracker, topic, LessonKind::AudioLesson).await?;
        }
        CliCommand::Quiz { topic } => {
            let topic = require_topic(&topic);
            run_quiz(&gateway(), &tracker, topic).await?;
        }
        CliCommand::Interview { topic } => {
            let topic = require_topic(&topic);
            run_interview(&gateway(), &tracker, topic).await?;
        }
    }
    Ok(())
}

fn init_tracing() {
    // Streamed lesson text owns stdout; logs go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn gateway() -> Arc<GatewayClient> {
    Arc::new(GatewayClient::new(GatewayConfig::from_env()))
}

fn require_topic(topic: &str) -> &str {
    let trimmed = topic.trim();
    if trimmed.is_empty() {
        eprintln!("A topic is required.\n\n{}", USAGE);
        std::process::exit(2);
    }
    trimmed
}

/// Open a stream and wait for its terminal outcome. Any failure copy
/// has already reached the user through the observer.
async fn run_stream(
    client: &Arc<GatewayClient>,
    request: StreamRequest,
    print_deltas: bool,
) -> Result<SessionOutcome> {
    let handle = StreamHandle::open(Arc::clone(client), request, ConsoleObserver { print_deltas })?;
    Ok(handle.join().await)
}

async fn run_lesson(
    client: &Arc<GatewayClient>,
    tracker: &ProgressTracker,
    topic: &str,
    depth: LessonDepth,
) -> Result<()> {
    let request = StreamRequest::new(LessonKind::TextLesson, topic).with_depth(depth);
    let outcome = run_stream(client, request, true).await?;
    if outcome.status != SessionStatus::Completed {
        std::process::exit(1);
    }
    tracker.record(topic, LearningModule::Text, Some(depth.label().to_string()));
    Ok(())
}

async fn run_module(
    client: &Arc<GatewayClient>,
    tracker: &ProgressTracker,
    topic: &str,
    kind: LessonKind,
) -> Result<()> {
    let request = StreamRequest::new(kind, topic);
    let outcome = run_stream(client, request, true).await?;
    if outcome.status != SessionStatus::Completed {
        std::process::exit(1);
    }
    if let Some(module) = kind.learning_module() {
        tracker.record(topic, module, None);
    }
    Ok(())
}

async fn run_quiz(
    client: &Arc<GatewayClient>,
    tracker: &ProgressTracker,
    topic: &str,
) -> Result<()> {
    // A quiz is generated from a lesson summary, so stream a quick
    // lesson first. That also creates the unscored text entry the quiz
    // result attaches to.
    println!("Preparing a short lesson on {}...\n", topic);
    let lesson = StreamRequest::new(LessonKind::TextLesson, topic).with_depth(LessonDepth::Quick);
    let lesson_outcome = run_stream(client, lesson, true).await?;
    if lesson_outcome.status != SessionStatus::Completed {
        std::process::exit(1);
    }
    tracker.record(
        topic,
        LearningModule::Text,
        Some(LessonDepth::Quick.label().to_string()),
    );

    println!("\nGenerating quiz...");
    let request =
        StreamRequest::new(LessonKind::Quiz, topic).with_lesson_summary(&lesson_outcome.text);
    let outcome = run_stream(client, request, false).await?;
    if outcome.status != SessionStatus::Completed {
        std::process::exit(1);
    }

    let questions = match quiz::extract_questions(&outcome.text) {
        Ok(questions) => questions,
        Err(err) => {
            eprintln!("Could not read quiz questions from the response: {}", err);
            eprintln!("Try again in a moment.");
            std::process::exit(1);
        }
    };

    let total = questions.len() as u32;
    let mut correct = 0u32;
    for (index, question) in questions.iter().enumerate() {
        println!("\n{}. {}", index + 1, question.question);
        for (option_index, option) in question.options.iter().enumerate() {
            println!("   {}) {}", option_index + 1, option);
        }
        let answer = loop {
            let line = read_line("Your answer [1-4]: ")?;
            match line.parse::<usize>() {
                Ok(choice @ 1..=4) => break choice - 1,
                _ => println!("Enter a number between 1 and 4."),
            }
        };
        if question.is_correct(answer) {
            correct += 1;
            println!("Correct!");
        } else if let Some(right) = question.correct_option() {
            println!("Not quite. The answer was: {}", right);
        } else {
            println!("Not quite.");
        }
    }

    tracker.record_quiz_result(topic, correct, total);
    println!("\nScore: {}/{}", correct, total);
    Ok(())
}

async fn run_interview(
    client: &Arc<GatewayClient>,
    tracker: &ProgressTracker,
    topic: &str,
) -> Result<()> {
    println!(
        "Mock interview on {}. Press Enter on an empty line to finish.\n",
        topic
    );

    let mut turns: Vec<InterviewTurn> = Vec::new();
    let mut request = StreamRequest::interview_start(topic);
    let mut answered = false;
    loop {
        let outcome = run_stream(client, request, true).await?;
        if outcome.status != SessionStatus::Completed {
            std::process::exit(1);
        }
        turns.push(InterviewTurn::interviewer(outcome.text));

        let answer = read_line("\nYou: ")?;
        if answer.is_empty() {
            break;
        }
        turns.push(InterviewTurn::candidate(answer));
        answered = true;
        request = StreamRequest::interview_continue(topic, &turns);
        println!();
    }

    // Only a session with at least one answer counts as practice.
    if answered {
        tracker.record(
            topic,
            LearningModule::Text,
            Some(INTERVIEW_SIM_DEPTH.to_string()),
        );
        println!("Interview recorded. Good practice!");
    }
    Ok(())
}

fn print_stats(tracker: &ProgressTracker) {
    let stats = tracker.stats();
    println!("Topics explored:  {}", stats.unique_topics);
    println!("Coding problems:  {}", stats.coding_problems);
    println!("Quizzes taken:    {}", stats.quizzes_taken);
    println!("Day streak:       {}", stats.streak);
    println!("Total sessions:   {}", stats.total_sessions);
}

fn print_recent(tracker: &ProgressTracker) {
    let recent = tracker.recent_topics(RECENT_TOPICS_DEFAULT_LIMIT);
    if recent.is_empty() {
        println!("No activity recorded yet.");
        return;
    }
    for item in recent {
        println!("{:>6}  {}", item.module.as_str(), item.topic);
    }
}

fn read_line(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
