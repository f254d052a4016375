use serde_json::Value;

use services::quiz_service::RESULTS_COLLECTION;
use services::{AiClient, AppServices, Clock, GenerateRequest};
use skillscan_core::model::Difficulty;
use skillscan_core::time::fixed_now;
use storage::store::RemoteStore;

#[tokio::test]
async fn quiz_flow_persists_summary() {
    let clock = Clock::fixed(fixed_now());
    let services = AppServices::new(clock, RemoteStore::unconfigured(clock), AiClient::new(None));
    assert!(!services.is_backend_configured());
    assert!(!services.ai_enabled());

    let quiz = services.quiz();
    let mut run = quiz.start_builtin().unwrap();

    for answer in [0, 0, 0, 1, 2] {
        quiz.record_answer(&mut run, answer).unwrap();
        quiz.advance(&mut run);
    }
    assert!(run.is_complete());

    let outcome = quiz.finalize(&mut run).await.unwrap();
    assert_eq!(outcome.summary.overall_percentage(), 100);
    assert_eq!(outcome.summary.correct_count(), 5);

    let saved = services.store().fetch_all(RESULTS_COLLECTION).await;
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, outcome.record_id);
    assert_eq!(saved[0].field("score"), Some(&Value::from(100_u32)));

    let report = quiz.analyze(&run).await.unwrap();
    assert_eq!(report.overall_score, 100);
    assert!(!report.recommendations.is_empty());
}

#[tokio::test]
async fn generated_quiz_flow_runs_offline() {
    let clock = Clock::fixed(fixed_now());
    let services = AppServices::new(clock, RemoteStore::unconfigured(clock), AiClient::new(None));
    let quiz = services.quiz();

    let request = GenerateRequest::new("career planning", Difficulty::Medium, 3)
        .with_categories(vec!["communication".to_owned()]);
    let mut run = quiz.start_generated(&request).await.unwrap();

    while !run.is_complete() {
        quiz.record_answer(&mut run, 0).unwrap();
        quiz.advance(&mut run);
    }

    let outcome = quiz.finalize(&mut run).await.unwrap();
    assert_eq!(outcome.summary.total_questions(), 3);
    assert_eq!(outcome.summary.top_category(), "Communication");
}
