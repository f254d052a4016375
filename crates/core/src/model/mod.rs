mod ids;
mod question;
mod results;
mod session;

pub use ids::QuestionId;

pub use question::{Difficulty, Question, QuestionError};
pub use results::{CategoryScore, ResultsSummary, display_label};
pub use session::{Advance, QuizProgress, QuizSession, SessionError};
