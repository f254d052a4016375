use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use skillscan_core::model::{Advance, Question, QuizProgress, QuizSession, ResultsSummary};
use storage::record::{Fields, RecordId};
use storage::store::RemoteStore;

use crate::Clock;
use crate::ai::{AiClient, AnswerReview, GenerateRequest, SkillReport};
use crate::bank;
use crate::error::QuizServiceError;

/// Collection that finished quiz summaries are written to.
pub const RESULTS_COLLECTION: &str = "quizzes";

/// One quiz in flight: the session plus its finalize bookkeeping.
#[derive(Debug, Clone)]
pub struct QuizRun {
    session: QuizSession,
    started_at: DateTime<Utc>,
    saved_record: Option<RecordId>,
}

impl QuizRun {
    // Accessors
    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Record id of the persisted summary, once `finalize` has succeeded.
    #[must_use]
    pub fn saved_record(&self) -> Option<&RecordId> {
        self.saved_record.as_ref()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        self.session.progress()
    }
}

/// Summary plus the id it was persisted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub summary: ResultsSummary,
    pub record_id: RecordId,
}

/// Orchestrates the quiz flow: question sourcing, the answer loop, and
/// persistence of the finished summary.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    store: Arc<RemoteStore>,
    ai: Arc<AiClient>,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock, store: Arc<RemoteStore>, ai: Arc<AiClient>) -> Self {
        Self { clock, store, ai }
    }

    /// Start a run over AI-generated questions.
    ///
    /// With generation disabled this still succeeds, serving the placeholder
    /// templates.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Generator` when generation fails.
    pub async fn start_generated(
        &self,
        request: &GenerateRequest,
    ) -> Result<QuizRun, QuizServiceError> {
        let questions = self.ai.generate_quiz(request).await?;
        self.start_with(questions)
    }

    /// Start a run over the built-in career assessment.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the bank is non-empty.
    pub fn start_builtin(&self) -> Result<QuizRun, QuizServiceError> {
        self.start_with(bank::assessment_bank())
    }

    /// Start a run over questions from any source.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` when `questions` is empty.
    pub fn start_with(&self, questions: Vec<Question>) -> Result<QuizRun, QuizServiceError> {
        let session = QuizSession::new(questions)?;
        Ok(QuizRun {
            session,
            started_at: self.clock.now(),
            saved_record: None,
        })
    }

    /// Record an answer for the question under the cursor.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` for an out-of-range option or a
    /// completed run.
    pub fn record_answer(
        &self,
        run: &mut QuizRun,
        option_index: usize,
    ) -> Result<(), QuizServiceError> {
        run.session.record_answer(option_index)?;
        Ok(())
    }

    /// Move to the next question, completing the run past the last one.
    pub fn advance(&self, run: &mut QuizRun) -> Advance {
        run.session.advance()
    }

    /// Move back one question; returns whether the cursor moved.
    pub fn retreat(&self, run: &mut QuizRun) -> bool {
        run.session.retreat()
    }

    /// Score the run and persist the summary.
    ///
    /// The persisted record id is memoized on the run, so calling this again
    /// (for example to retry after a write failure) never duplicates the
    /// record.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` while any question is unanswered
    /// and `QuizServiceError::Store` when the configured backend rejects the
    /// write.
    pub async fn finalize(&self, run: &mut QuizRun) -> Result<QuizOutcome, QuizServiceError> {
        let summary = run.session.results()?;

        if let Some(record_id) = run.saved_record.clone() {
            return Ok(QuizOutcome { summary, record_id });
        }

        let fields = results_fields(&summary, run.started_at, self.clock.now());
        let record_id = self.store.create(RESULTS_COLLECTION, fields).await?;
        run.saved_record = Some(record_id.clone());
        Ok(QuizOutcome { summary, record_id })
    }

    /// Build a skill report for a finished run.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` while any question is unanswered
    /// and `QuizServiceError::Analysis` when analysis fails.
    pub async fn analyze(&self, run: &QuizRun) -> Result<SkillReport, QuizServiceError> {
        let summary = run.session.results()?;
        let reviews = AnswerReview::from_session(&run.session);
        Ok(self.ai.analyze_skills(&reviews, &summary).await?)
    }
}

/// Flattens a summary into the camelCase document shape the dashboard reads.
fn results_fields(
    summary: &ResultsSummary,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
) -> Fields {
    let mut category_scores = Map::new();
    for score in summary.category_scores() {
        category_scores.insert(score.label.clone(), Value::from(score.points));
    }

    let mut fields = Fields::new();
    fields.insert("score".to_owned(), Value::from(summary.overall_percentage()));
    fields.insert(
        "correctCount".to_owned(),
        Value::from(summary.correct_count()),
    );
    fields.insert(
        "totalQuestions".to_owned(),
        Value::from(summary.total_questions()),
    );
    fields.insert("topCategory".to_owned(), Value::from(summary.top_category()));
    fields.insert("categoryScores".to_owned(), Value::Object(category_scores));
    fields.insert("startedAt".to_owned(), Value::from(started_at.to_rfc3339()));
    fields.insert(
        "completedAt".to_owned(),
        Value::from(completed_at.to_rfc3339()),
    );
    fields
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use skillscan_core::model::{Difficulty, SessionError};
    use skillscan_core::time::fixed_clock;

    use super::*;

    fn build_service() -> QuizService {
        let clock = fixed_clock();
        QuizService::new(
            clock,
            Arc::new(RemoteStore::unconfigured(clock)),
            Arc::new(AiClient::new(None)),
        )
    }

    fn answer_all(service: &QuizService, run: &mut QuizRun, answers: &[usize]) {
        for &answer in answers {
            service.record_answer(run, answer).unwrap();
            service.advance(run);
        }
    }

    #[tokio::test]
    async fn builtin_run_walks_to_a_saved_summary() {
        let service = build_service();
        let mut run = service.start_builtin().unwrap();
        assert_eq!(run.progress().total, 5);
        assert!(run.saved_record().is_none());

        answer_all(&service, &mut run, &[0, 0, 0, 1, 2]);
        assert!(run.is_complete());

        let outcome = service.finalize(&mut run).await.unwrap();
        assert_eq!(outcome.summary.correct_count(), 5);
        assert_eq!(outcome.summary.overall_percentage(), 100);
        assert!(outcome.record_id.as_str().starts_with("local-"));
        assert_eq!(run.saved_record(), Some(&outcome.record_id));
    }

    #[tokio::test]
    async fn finalize_is_memoized() {
        let service = build_service();
        let mut run = service.start_builtin().unwrap();
        answer_all(&service, &mut run, &[0, 0, 0, 0, 0]);

        let first = service.finalize(&mut run).await.unwrap();
        let second = service.finalize(&mut run).await.unwrap();
        assert_eq!(first.record_id, second.record_id);

        let saved = service.store.fetch_all(RESULTS_COLLECTION).await;
        assert_eq!(saved.len(), 1);
    }

    #[tokio::test]
    async fn finalize_persists_camel_case_summary_fields() {
        let service = build_service();
        let mut run = service.start_builtin().unwrap();
        // only the first question answered correctly
        answer_all(&service, &mut run, &[0, 1, 1, 0, 0]);

        let outcome = service.finalize(&mut run).await.unwrap();
        let saved = service.store.fetch_all(RESULTS_COLLECTION).await;
        assert_eq!(saved.len(), 1);

        let record = &saved[0];
        assert_eq!(record.id, outcome.record_id);
        assert_eq!(record.field("score"), Some(&Value::from(20_u32)));
        assert_eq!(record.field("correctCount"), Some(&Value::from(1_u32)));
        assert_eq!(record.field("totalQuestions"), Some(&Value::from(5_u32)));
        assert_eq!(
            record.field("topCategory"),
            Some(&Value::from("Analytical Thinking"))
        );
        assert_eq!(
            record.field("completedAt"),
            Some(&Value::from(service.clock.now().to_rfc3339()))
        );

        let Some(Value::Object(scores)) = record.field("categoryScores") else {
            panic!("categoryScores should be an object");
        };
        assert_eq!(scores.get("Analytical Thinking"), Some(&Value::from(2_u32)));
        assert_eq!(scores.get("Leadership"), Some(&Value::from(1_u32)));
    }

    #[tokio::test]
    async fn finalize_requires_every_answer() {
        let service = build_service();
        let mut run = service.start_builtin().unwrap();
        service.record_answer(&mut run, 0).unwrap();

        let err = service.finalize(&mut run).await.unwrap_err();
        assert!(matches!(
            err,
            QuizServiceError::Session(SessionError::Incomplete { .. })
        ));
    }

    #[tokio::test]
    async fn generated_run_uses_placeholders_when_disabled() {
        let service = build_service();
        let request = GenerateRequest::new("databases", Difficulty::Easy, 2);

        let run = service.start_generated(&request).await.unwrap();

        assert_eq!(run.progress().total, 2);
        assert!(run.session().questions()[0].prompt().contains("databases"));
    }

    #[tokio::test]
    async fn retreat_allows_revising_an_answer() {
        let service = build_service();
        let mut run = service.start_builtin().unwrap();
        service.record_answer(&mut run, 3).unwrap();
        service.advance(&mut run);

        assert!(service.retreat(&mut run));
        service.record_answer(&mut run, 0).unwrap();

        assert_eq!(run.session().answer_at(0), Some(0));
    }

    #[tokio::test]
    async fn analyze_reports_on_a_complete_run() {
        let service = build_service();
        let mut run = service.start_builtin().unwrap();
        answer_all(&service, &mut run, &[0, 0, 0, 1, 2]);

        let report = service.analyze(&run).await.unwrap();

        assert_eq!(report.overall_score, 100);
        assert_eq!(report.skill_breakdown.len(), 5);
        assert_eq!(
            report.skill_breakdown.get("Analytical Thinking"),
            Some(&100)
        );
    }
}
