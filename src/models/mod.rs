//! Domain models shared across the crate.

pub mod module;
pub mod request;

pub use module::LearningModule;
pub use request::{
    InterviewRole, InterviewTurn, LessonDepth, LessonKind, RequestError, StreamRequest,
    INTERVIEW_SIM_DEPTH, LESSON_SUMMARY_MAX_CHARS,
};
