//! CLI surface for learnforge: argument parsing and usage text.

pub mod args;

pub use args::{parse_args, CliCommand};

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Usage text printed by `help` and on unrecognized input.
pub const USAGE: &str = "\
learnforge - topic-driven AI learning from the terminal

USAGE:
    learnforge <COMMAND> [TOPIC...] [OPTIONS]

COMMANDS:
    lesson <topic>      Stream a text lesson
    code <topic>        Stream a coding exercise
    audio <topic>       Stream an audio lesson script
    quiz <topic>        Generate a quiz and answer it interactively
    interview <topic>   Practice a mock interview
    stats               Show progression statistics
    recent              Show recently studied topics
    version             Show version information
    help                Show this message

OPTIONS:
    --depth <quick|interview|mastery>   Lesson thoroughness (lesson only)

ENVIRONMENT:
    LEARNFORGE_GATEWAY_URL          Override the completion gateway URL
    LEARNFORGE_API_KEY              Bearer token sent with each request
    LEARNFORGE_IDLE_TIMEOUT_SECS    Stream idle timeout (0 disables)";
