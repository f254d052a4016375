use std::collections::HashMap;

use crate::model::{Question, SessionError};

/// Maps a raw category tag to its display label.
///
/// Unknown tags pass through unchanged so generated question sets can
/// introduce their own categories without breaking scoring.
#[must_use]
pub fn display_label(category: &str) -> &str {
    match category {
        "technical" => "Technical Skills",
        "analytical" => "Analytical Thinking",
        "creative" => "Creative Problem Solving",
        "leadership" => "Leadership",
        "communication" => "Communication",
        "General" => "General Knowledge",
        other => other,
    }
}

/// Accumulated points for one display category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryScore {
    pub label: String,
    pub points: u32,
}

/// Aggregate summary for a fully answered quiz.
///
/// Every answered question earns participation credit (1 point) toward its
/// category; a correct answer earns 2 instead. Only questions that define a
/// correct option can count as correct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsSummary {
    category_scores: Vec<CategoryScore>,
    top_category: String,
    correct_count: u32,
    total_questions: u32,
    overall_percentage: u32,
}

impl ResultsSummary {
    /// Scores a complete answer set against its questions.
    ///
    /// Category scores are listed in the order categories first appear in the
    /// question list, and `top_category` is the earliest category holding the
    /// maximum score.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` for an empty question list and
    /// `SessionError::Incomplete` while any question lacks an answer.
    pub fn from_answers(
        questions: &[Question],
        answers: &HashMap<usize, usize>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }

        let total = questions.len();
        let total_questions =
            u32::try_from(total).map_err(|_| SessionError::TooManyQuestions { len: total })?;

        let mut category_scores: Vec<CategoryScore> = Vec::new();
        let mut correct_count = 0_u32;
        let mut answered = 0_usize;

        for (position, question) in questions.iter().enumerate() {
            let Some(selected) = answers.get(&position).copied() else {
                continue;
            };
            answered += 1;

            let is_correct = question
                .correct_option()
                .is_some_and(|correct| correct == selected);
            let points = if is_correct {
                correct_count += 1;
                2
            } else {
                1
            };

            let label = display_label(question.category());
            match category_scores.iter_mut().find(|score| score.label == label) {
                Some(score) => score.points += points,
                None => category_scores.push(CategoryScore {
                    label: label.to_owned(),
                    points,
                }),
            }
        }

        if answered < total {
            return Err(SessionError::Incomplete { answered, total });
        }

        // Strictly-greater comparison in encounter order keeps the earliest
        // category on ties.
        let mut top: Option<&CategoryScore> = None;
        for score in &category_scores {
            if top.is_none_or(|current| score.points > current.points) {
                top = Some(score);
            }
        }
        let top_category = top
            .map(|score| score.label.clone())
            .ok_or(SessionError::Empty)?;

        // correct_count <= total keeps this within 0..=100
        #[allow(clippy::cast_possible_truncation)]
        let overall_percentage = ((u64::from(correct_count) * 100
            + u64::from(total_questions) / 2)
            / u64::from(total_questions)) as u32;

        Ok(Self {
            category_scores,
            top_category,
            correct_count,
            total_questions,
            overall_percentage,
        })
    }

    // Accessors
    #[must_use]
    pub fn category_scores(&self) -> &[CategoryScore] {
        &self.category_scores
    }

    /// Points for a display label, if that category appeared at all.
    #[must_use]
    pub fn points_for(&self, label: &str) -> Option<u32> {
        self.category_scores
            .iter()
            .find(|score| score.label == label)
            .map(|score| score.points)
    }

    #[must_use]
    pub fn top_category(&self) -> &str {
        &self.top_category
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    /// Share of scored-correct answers, rounded half-up to a whole percent.
    #[must_use]
    pub fn overall_percentage(&self) -> u32 {
        self.overall_percentage
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
