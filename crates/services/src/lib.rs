#![forbid(unsafe_code)]

pub mod ai;
pub mod app_services;
pub mod bank;
pub mod dashboard_service;
pub mod error;
pub mod quiz_service;

pub use skillscan_core::Clock;

pub use error::{AiError, AnalysisError, GeneratorError, QuizServiceError};

pub use ai::{AiClient, AiConfig, AnswerReview, GenerateRequest, SkillReport};
pub use app_services::AppServices;
pub use dashboard_service::{Achievement, CareerMatch, DashboardService, SkillEntry};
pub use quiz_service::{QuizOutcome, QuizRun, QuizService};
