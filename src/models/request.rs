//! Request construction for the lesson gateway.
//!
//! Each lesson kind maps to one gateway function; the request body is the
//! topic plus kind-specific parameters, flattened into a single JSON
//! object on the wire.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::module::LearningModule;

/// Longest lesson summary forwarded with a quiz request.
pub const LESSON_SUMMARY_MAX_CHARS: usize = 2000;

/// Depth label recorded for interview practice sessions.
pub const INTERVIEW_SIM_DEPTH: &str = "interview-sim";

/// The gateway function a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonKind {
    TextLesson,
    Code,
    AudioLesson,
    Quiz,
    Interview,
}

impl LessonKind {
    /// Function name as it appears in the gateway URL.
    pub fn wire_name(&self) -> &'static str {
        match self {
            LessonKind::TextLesson => "generate-text-lesson",
            LessonKind::Code => "generate-code",
            LessonKind::AudioLesson => "generate-audio-lesson",
            LessonKind::Quiz => "generate-quiz",
            LessonKind::Interview => "generate-interview",
        }
    }

    /// The modality this kind records progression under.
    ///
    /// Quizzes attach to an existing text entry instead of recording
    /// their own, so they have no module of their own.
    pub fn learning_module(&self) -> Option<LearningModule> {
        match self {
            LessonKind::TextLesson => Some(LearningModule::Text),
            LessonKind::Code => Some(LearningModule::Code),
            LessonKind::AudioLesson => Some(LearningModule::Audio),
            LessonKind::Interview => Some(LearningModule::Text),
            LessonKind::Quiz => None,
        }
    }
}

/// How thorough a text lesson should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonDepth {
    Quick,
    #[default]
    Interview,
    Mastery,
}

impl LessonDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonDepth::Quick => "quick",
            LessonDepth::Interview => "interview",
            LessonDepth::Mastery => "mastery",
        }
    }

    /// Human-readable name shown in menus and recorded with entries.
    pub fn label(&self) -> &'static str {
        match self {
            LessonDepth::Quick => "Quick Summary",
            LessonDepth::Interview => "Interview Ready",
            LessonDepth::Mastery => "Comprehensive Mastery",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "quick" => Some(LessonDepth::Quick),
            "interview" => Some(LessonDepth::Interview),
            "mastery" => Some(LessonDepth::Mastery),
            _ => None,
        }
    }
}

/// Who is speaking in an interview exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewRole {
    Interviewer,
    Candidate,
}

impl InterviewRole {
    fn speaker_label(&self) -> &'static str {
        match self {
            InterviewRole::Interviewer => "Interviewer",
            InterviewRole::Candidate => "You",
        }
    }
}

/// One exchange in an interview conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewTurn {
    pub role: InterviewRole,
    pub text: String,
}

impl InterviewTurn {
    pub fn interviewer(text: impl Into<String>) -> Self {
        Self {
            role: InterviewRole::Interviewer,
            text: text.into(),
        }
    }

    pub fn candidate(text: impl Into<String>) -> Self {
        Self {
            role: InterviewRole::Candidate,
            text: text.into(),
        }
    }
}

/// Errors from request construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("topic must not be empty")]
    EmptyTopic,
}

/// A request to stream one lesson from the gateway.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StreamRequest {
    #[serde(skip)]
    pub kind: LessonKind,
    pub topic: String,
    /// Kind-specific parameters, flattened into the request body.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StreamRequest {
    pub fn new(kind: LessonKind, topic: impl Into<String>) -> Self {
        Self {
            kind,
            topic: topic.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Set an arbitrary body parameter (builder pattern).
    pub fn with_param(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    /// Set the lesson depth (builder pattern).
    pub fn with_depth(self, depth: LessonDepth) -> Self {
        self.with_param("depth", depth.as_str())
    }

    /// Attach the source lesson for a quiz, truncated to
    /// [`LESSON_SUMMARY_MAX_CHARS`] characters.
    pub fn with_lesson_summary(self, summary: &str) -> Self {
        let truncated: String = summary.chars().take(LESSON_SUMMARY_MAX_CHARS).collect();
        self.with_param("lessonSummary", truncated)
    }

    /// Open a new interview for a topic.
    pub fn interview_start(topic: impl Into<String>) -> Self {
        Self::new(LessonKind::Interview, topic).with_param("action", "start")
    }

    /// Continue an interview, replaying the conversation so far as a
    /// transcript of labeled lines.
    pub fn interview_continue(topic: impl Into<String>, turns: &[InterviewTurn]) -> Self {
        let transcript = turns
            .iter()
            .map(|turn| format!("{}: {}", turn.role.speaker_label(), turn.text))
            .collect::<Vec<_>>()
            .join("\n");
        Self::new(LessonKind::Interview, topic)
            .with_param("action", "continue")
            .with_param("conversation", transcript)
    }

    /// Validate the request before issuing it.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.topic.trim().is_empty() {
            return Err(RequestError::EmptyTopic);
        }
        Ok(())
    }
}
