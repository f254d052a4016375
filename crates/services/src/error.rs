//! Shared error types for the services crate.

use thiserror::Error;

use skillscan_core::model::{QuestionError, SessionError};
use storage::store::StoreError;

/// Errors emitted by raw `AiClient` requests.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AiError {
    #[error("generative features are not configured")]
    Disabled,
    #[error("the model returned an empty response")]
    EmptyResponse,
    #[error("generative request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by quiz generation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GeneratorError {
    #[error("no question list found in the model reply")]
    MissingQuestionList,
    #[error("the model returned no questions")]
    EmptyQuiz,
    #[error("malformed question list: {0}")]
    MalformedQuestionList(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidQuestion(#[from] QuestionError),
    #[error(transparent)]
    Ai(#[from] AiError),
}

/// Errors emitted by skill analysis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnalysisError {
    #[error("no report object found in the model reply")]
    MissingReport,
    #[error("malformed report: {0}")]
    MalformedReport(#[from] serde_json::Error),
    #[error(transparent)]
    Ai(#[from] AiError),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
