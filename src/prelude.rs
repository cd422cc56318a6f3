//! Prelude module for convenient imports.
//!
//! Re-exports the types most callers need to open a stream, observe
//! its frames, and record the outcome.
//!
//! # Usage
//!
//! ```ignore
//! use learnforge::prelude::*;
//! ```

// Gateway and session types
pub use crate::config::GatewayConfig;
pub use crate::gateway::GatewayClient;
pub use crate::session::{SessionOutcome, SessionStatus, StreamHandle};

// Model types
pub use crate::models::{
    InterviewRole, InterviewTurn, LearningModule, LessonDepth, LessonKind, StreamRequest,
};

// Error taxonomy
pub use crate::error::StreamFailure;

// Callback and storage seams
pub use crate::traits::{ProgressStore, StreamObserver};

// Progression tracking
pub use crate::progress::{Ledger, ProgressTracker};

// Quiz extraction
pub use crate::quiz::{extract_questions, QuizQuestion};
