pub mod analyze;
pub mod client;
pub mod generate;

pub use analyze::{AnswerReview, SkillReport};
pub use client::{AiClient, AiConfig};
pub use generate::GenerateRequest;
