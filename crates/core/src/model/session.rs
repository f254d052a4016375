use std::collections::HashMap;
use thiserror::Error;

use crate::model::{Question, ResultsSummary};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("a session needs at least one question")]
    Empty,

    #[error("session is already complete")]
    AlreadyComplete,

    #[error("option {index} is out of range for a question with {count} options")]
    OptionOutOfRange { index: usize, count: usize },

    #[error("only {answered} of {total} questions answered")]
    Incomplete { answered: usize, total: usize },

    #[error("too many questions for a single session: {len}")]
    TooManyQuestions { len: usize },
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Outcome of advancing past the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The cursor moved to the next question.
    Moved,
    /// The last question was passed; the session is now complete.
    Done,
}

/// Snapshot of how far a session has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

/// A learner's walk through a fixed list of questions.
///
/// The cursor and the answers are independent: answers live in a sparse map
/// keyed by question position, so moving back and re-answering overwrites a
/// single entry and a skipped question simply has none. Once the cursor has
/// advanced past the last question the session is complete and stays so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<Question>,
    answers: HashMap<usize, usize>,
    position: usize,
    completed: bool,
}

impl QuizSession {
    /// Starts a session over the given questions.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when `questions` is empty.
    pub fn new(questions: Vec<Question>) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }

        Ok(Self {
            questions,
            answers: HashMap::new(),
            position: 0,
            completed: false,
        })
    }

    // Accessors
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// The question under the cursor.
    ///
    /// The cursor never leaves `0..total_questions()`, so this is always a
    /// real question, even after completion (it stays on the last one).
    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.position]
    }

    /// The recorded answer for a question position, if any.
    #[must_use]
    pub fn answer_at(&self, position: usize) -> Option<usize> {
        self.answers.get(&position).copied()
    }

    /// The recorded answer for the question under the cursor, if any.
    #[must_use]
    pub fn selected_option(&self) -> Option<usize> {
        self.answer_at(self.position)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let total = self.questions.len();
        let answered = self.answers.len();
        QuizProgress {
            total,
            answered,
            remaining: total - answered,
            is_complete: self.completed,
        }
    }

    /// Records `option_index` as the answer to the current question,
    /// overwriting any earlier answer for this position.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyComplete` once the session is complete,
    /// or `SessionError::OptionOutOfRange` when the index does not point at
    /// one of the current question's options.
    pub fn record_answer(&mut self, option_index: usize) -> Result<(), SessionError> {
        if self.completed {
            return Err(SessionError::AlreadyComplete);
        }

        let count = self.current_question().option_count();
        if option_index >= count {
            return Err(SessionError::OptionOutOfRange {
                index: option_index,
                count,
            });
        }

        self.answers.insert(self.position, option_index);
        Ok(())
    }

    /// Moves the cursor forward, completing the session when the last
    /// question is passed. Idempotent once complete.
    pub fn advance(&mut self) -> Advance {
        if self.completed {
            return Advance::Done;
        }

        if self.position + 1 >= self.questions.len() {
            self.completed = true;
            return Advance::Done;
        }

        self.position += 1;
        Advance::Moved
    }

    /// Moves the cursor back one question, keeping recorded answers.
    ///
    /// Returns whether the cursor moved; at the first question or after
    /// completion this is a no-op.
    pub fn retreat(&mut self) -> bool {
        if self.completed || self.position == 0 {
            return false;
        }

        self.position -= 1;
        true
    }

    /// Scores the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Incomplete` while any question lacks an answer.
    /// Completeness is judged on the answers alone, not the cursor, so a
    /// session that was advanced to the end with skips still fails here.
    pub fn results(&self) -> Result<ResultsSummary, SessionError> {
        ResultsSummary::from_answers(&self.questions, &self.answers)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
