use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use skillscan_core::model::{QuizSession, ResultsSummary, display_label};

use crate::error::AnalysisError;

use super::client::AiClient;

//
// ─── REVIEW ROWS ───────────────────────────────────────────────────────────────
//

/// One answered question, flattened for analysis.
///
/// `correct` is `None` for preference-style questions that have no right
/// answer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerReview {
    pub question: String,
    pub selected_answer: String,
    pub correct: Option<bool>,
    pub category: String,
}

impl AnswerReview {
    /// Collects a review row for every answered question in the session.
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Vec<Self> {
        session
            .questions()
            .iter()
            .enumerate()
            .filter_map(|(position, question)| {
                let selected = session.answer_at(position)?;
                Some(Self {
                    question: question.prompt().to_owned(),
                    selected_answer: question.option_text(selected).unwrap_or_default().to_owned(),
                    correct: question.correct_option().map(|correct| correct == selected),
                    category: question.category().to_owned(),
                })
            })
            .collect()
    }
}

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

/// The analysis artifact: an overall score, a per-skill percentage breakdown,
/// and free-form recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillReport {
    pub overall_score: u32,
    #[serde(default)]
    pub skill_breakdown: BTreeMap<String, u32>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl AiClient {
    /// Analyze a finished quiz into a skill report.
    ///
    /// When generative features are not configured the report is derived
    /// locally from the summary instead, so the result is deterministic.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError` when the remote call fails or the reply does
    /// not contain a usable report.
    pub async fn analyze_skills(
        &self,
        reviews: &[AnswerReview],
        summary: &ResultsSummary,
    ) -> Result<SkillReport, AnalysisError> {
        if !self.enabled() {
            debug!("generative features not configured, deriving skill report");
            return Ok(derive_report(reviews, summary));
        }

        let reply = self.generate_text(&analysis_prompt(reviews), 0.2).await?;
        parse_report(&reply)
    }
}

fn analysis_prompt(reviews: &[AnswerReview]) -> String {
    // Plain strings and bools always serialize.
    let serialized = serde_json::to_string(reviews).expect("reviews serialize to JSON");
    format!(
        "Analyze these quiz answers and provide career skill insights: {serialized}. Provide a \
         JSON response with: overallScore (0-100), skillBreakdown (object with skill names and \
         scores), and recommendations (array of strings)."
    )
}

/// Pulls the first JSON object out of the reply text, prose and fences aside.
fn parse_report(reply: &str) -> Result<SkillReport, AnalysisError> {
    let (Some(start), Some(end)) = (reply.find('{'), reply.rfind('}')) else {
        return Err(AnalysisError::MissingReport);
    };
    if end < start {
        return Err(AnalysisError::MissingReport);
    }
    Ok(serde_json::from_str(&reply[start..=end])?)
}

/// Builds the offline report from what the learner actually did.
///
/// Each category is scored as the share of its available points: every answer
/// earns 1 point and a correct one 2, so the ceiling is twice the number of
/// answers.
fn derive_report(reviews: &[AnswerReview], summary: &ResultsSummary) -> SkillReport {
    let mut tallies: Vec<Tally> = Vec::new();
    for review in reviews {
        let label = display_label(&review.category);
        let correct = review.correct == Some(true);
        match tallies.iter_mut().find(|tally| tally.label == label) {
            Some(tally) => tally.record(correct),
            None => tallies.push(Tally::new(label, correct)),
        }
    }

    let mut skill_breakdown = BTreeMap::new();
    let mut weakest: Vec<(&str, u32)> = Vec::new();
    for tally in &tallies {
        let percent = tally.percent();
        skill_breakdown.insert(tally.label.clone(), percent);
        if percent < 75 {
            weakest.push((tally.label.as_str(), percent));
        }
    }
    // Stable sort keeps encounter order between equally weak categories.
    weakest.sort_by_key(|&(_, percent)| percent);

    let recommendations = if weakest.is_empty() {
        vec!["Strong results across every category. Try a harder difficulty next time.".to_owned()]
    } else {
        weakest
            .iter()
            .take(3)
            .map(|(label, _)| format!("Practice {label} with focused exercises."))
            .collect()
    };

    SkillReport {
        overall_score: summary.overall_percentage(),
        skill_breakdown,
        recommendations,
    }
}

struct Tally {
    label: String,
    answered: u32,
    correct: u32,
}

impl Tally {
    fn new(label: &str, correct: bool) -> Self {
        Self {
            label: label.to_owned(),
            answered: 1,
            correct: u32::from(correct),
        }
    }

    fn record(&mut self, correct: bool) {
        self.answered += 1;
        self.correct += u32::from(correct);
    }

    /// Share of available points, rounded half-up to a whole percent.
    fn percent(&self) -> u32 {
        let earned = self.answered + self.correct;
        // The divisor is 2 * answered, so adding `answered` rounds half-up.
        (100 * earned + self.answered) / (2 * self.answered)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use skillscan_core::model::{Difficulty, Question, QuestionId, QuizSession};

    use super::*;

    fn build_question(id: &str, category: &str, correct: Option<usize>) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("prompt {id}"),
            vec!["one".to_owned(), "two".to_owned()],
            correct,
            category,
            Difficulty::Medium,
        )
        .unwrap()
    }

    fn answered_session() -> QuizSession {
        let questions = vec![
            build_question("a", "technical", Some(0)),
            build_question("b", "technical", Some(0)),
            build_question("c", "creative", None),
        ];
        let mut session = QuizSession::new(questions).unwrap();
        session.record_answer(0).unwrap(); // correct
        session.advance();
        session.record_answer(1).unwrap(); // wrong
        session.advance();
        session.record_answer(1).unwrap(); // unscored
        session.advance();
        session
    }

    #[test]
    fn reviews_carry_option_text_and_correctness() {
        let reviews = AnswerReview::from_session(&answered_session());

        assert_eq!(reviews.len(), 3);
        assert_eq!(reviews[0].selected_answer, "one");
        assert_eq!(reviews[0].correct, Some(true));
        assert_eq!(reviews[1].correct, Some(false));
        assert_eq!(reviews[2].correct, None);
        assert_eq!(reviews[2].category, "creative");
    }

    #[test]
    fn reviews_skip_unanswered_questions() {
        let questions = vec![
            build_question("a", "technical", Some(0)),
            build_question("b", "technical", Some(0)),
        ];
        let mut session = QuizSession::new(questions).unwrap();
        session.record_answer(0).unwrap();

        let reviews = AnswerReview::from_session(&session);
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].question, "prompt a");
    }

    #[test]
    fn derived_report_scores_each_category() {
        let session = answered_session();
        let summary = session.results().unwrap();
        let reviews = AnswerReview::from_session(&session);

        let report = derive_report(&reviews, &summary);

        // technical: 2 answered, 1 correct -> 3 of 4 points -> 75
        assert_eq!(report.skill_breakdown.get("Technical Skills"), Some(&75));
        // creative: 1 answered, 0 correct -> 1 of 2 points -> 50
        assert_eq!(
            report.skill_breakdown.get("Creative Problem Solving"),
            Some(&50)
        );
        assert_eq!(report.overall_score, summary.overall_percentage());
    }

    #[test]
    fn derived_report_recommends_the_weakest_categories() {
        let session = answered_session();
        let summary = session.results().unwrap();
        let reviews = AnswerReview::from_session(&session);

        let report = derive_report(&reviews, &summary);

        assert_eq!(report.recommendations.len(), 1);
        assert!(report.recommendations[0].contains("Creative Problem Solving"));
    }

    #[test]
    fn parse_report_reads_the_json_object() {
        let reply = "Here is my analysis:\n{\"overallScore\": 72, \"skillBreakdown\": \
                     {\"Technical Skills\": 80}, \"recommendations\": [\"Keep going\"]}\nThanks!";

        let report = parse_report(reply).unwrap();
        assert_eq!(report.overall_score, 72);
        assert_eq!(report.skill_breakdown.get("Technical Skills"), Some(&80));
        assert_eq!(report.recommendations, vec!["Keep going".to_owned()]);
    }

    #[test]
    fn parse_report_requires_an_object() {
        assert!(matches!(
            parse_report("nothing here"),
            Err(AnalysisError::MissingReport)
        ));
    }

    #[tokio::test]
    async fn disabled_client_derives_the_report() {
        let session = answered_session();
        let summary = session.results().unwrap();
        let reviews = AnswerReview::from_session(&session);

        let report = AiClient::new(None)
            .analyze_skills(&reviews, &summary)
            .await
            .unwrap();

        assert_eq!(report.overall_score, summary.overall_percentage());
        assert!(!report.recommendations.is_empty());
    }
}
