//! Command-line argument parsing for the learnforge CLI.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use crate::models::LessonDepth;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Stream a text lesson on a topic
    Lesson { topic: String, depth: LessonDepth },
    /// Stream a coding exercise on a topic
    Code { topic: String },
    /// Stream an audio lesson script on a topic
    Audio { topic: String },
    /// Generate and run a multiple-choice quiz on a topic
    Quiz { topic: String },
    /// Run an interactive mock interview on a topic
    Interview { topic: String },
    /// Show progression statistics
    Stats,
    /// Show recently studied topics
    Recent,
    /// Show version information
    Version,
    /// Show usage (default when no command matches)
    Help,
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Returns
///
/// The `CliCommand` to execute based on the arguments.
///
/// # Examples
///
/// ```
/// use learnforge::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["learnforge".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut args = args.skip(1); // Skip the program name
    let subcommand = match args.next() {
        Some(word) => word,
        None => return CliCommand::Help,
    };
    match subcommand.as_str() {
        "--version" | "-V" | "version" => return CliCommand::Version,
        "--help" | "-h" | "help" => return CliCommand::Help,
        "stats" => return CliCommand::Stats,
        "recent" => return CliCommand::Recent,
        _ => {}
    }

    // Everything after the subcommand is the topic, except flags. An
    // unrecognized --depth value falls back to the default.
    let mut topic_words: Vec<String> = Vec::new();
    let mut depth = LessonDepth::default();
    while let Some(arg) = args.next() {
        if arg == "--depth" {
            if let Some(value) = args.next() {
                if let Some(parsed) = LessonDepth::parse(&value) {
                    depth = parsed;
                }
            }
        } else {
            topic_words.push(arg);
        }
    }
    let topic = topic_words.join(" ");

    match subcommand.as_str() {
        "lesson" => CliCommand::Lesson { topic, depth },
        "code" => CliCommand::Code { topic },
        "audio" => CliCommand::Audio { topic },
        "quiz" => CliCommand::Quiz { topic },
        "interview" => CliCommand::Interview { topic },
        _ => CliCommand::Help,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(words: &[&str]) -> CliCommand {
        let mut args = vec!["learnforge".to_string()];
        args.extend(words.iter().map(|w| w.to_string()));
        parse_args(args.into_iter())
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]), CliCommand::Help);
    }

    #[test]
    fn test_parse_unknown_subcommand() {
        assert_eq!(parse(&["frobnicate", "Rust"]), CliCommand::Help);
    }

    #[test]
    fn test_parse_lesson_joins_topic_words() {
        assert_eq!(
            parse(&["lesson", "Rust", "ownership"]),
            CliCommand::Lesson {
                topic: "Rust ownership".to_string(),
                depth: LessonDepth::Interview,
            }
        );
    }

    #[test]
    fn test_parse_lesson_with_depth() {
        assert_eq!(
            parse(&["lesson", "Rust", "--depth", "mastery"]),
            CliCommand::Lesson {
                topic: "Rust".to_string(),
                depth: LessonDepth::Mastery,
            }
        );
    }

    #[test]
    fn test_parse_depth_before_topic() {
        assert_eq!(
            parse(&["lesson", "--depth", "quick", "Rust"]),
            CliCommand::Lesson {
                topic: "Rust".to_string(),
                depth: LessonDepth::Quick,
            }
        );
    }

    #[test]
    fn test_parse_unknown_depth_falls_back() {
        assert_eq!(
            parse(&["lesson", "Rust", "--depth", "extreme"]),
            CliCommand::Lesson {
                topic: "Rust".to_string(),
                depth: LessonDepth::Interview,
            }
        );
    }

    #[test]
    fn test_parse_code_and_audio_and_quiz() {
        assert_eq!(
            parse(&["code", "binary", "search"]),
            CliCommand::Code {
                topic: "binary search".to_string()
            }
        );
        assert_eq!(
            parse(&["audio", "TCP"]),
            CliCommand::Audio {
                topic: "TCP".to_string()
            }
        );
        assert_eq!(
            parse(&["quiz", "SQL"]),
            CliCommand::Quiz {
                topic: "SQL".to_string()
            }
        );
    }

    #[test]
    fn test_parse_interview() {
        assert_eq!(
            parse(&["interview", "systems", "design"]),
            CliCommand::Interview {
                topic: "systems design".to_string()
            }
        );
    }

    #[test]
    fn test_parse_stats_and_recent() {
        assert_eq!(parse(&["stats"]), CliCommand::Stats);
        assert_eq!(parse(&["recent"]), CliCommand::Recent);
    }

    #[test]
    fn test_parse_missing_topic_is_empty() {
        assert_eq!(
            parse(&["lesson"]),
            CliCommand::Lesson {
                topic: String::new(),
                depth: LessonDepth::Interview,
            }
        );
    }
}
