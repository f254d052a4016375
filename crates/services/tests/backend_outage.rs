use std::sync::Arc;

use async_trait::async_trait;

use services::{AiClient, Clock, QuizService, QuizServiceError};
use skillscan_core::time::fixed_now;
use storage::backend::{BackendError, DocumentBackend};
use storage::record::{Fields, RecordId, RemoteRecord};
use storage::store::{RemoteStore, StoreError};

/// Backend double that rejects every call.
struct OfflineBackend;

fn offline() -> BackendError {
    BackendError::Unavailable("connection refused".to_owned())
}

#[async_trait]
impl DocumentBackend for OfflineBackend {
    async fn list(&self, _collection: &str) -> Result<Vec<RemoteRecord>, BackendError> {
        Err(offline())
    }

    async fn insert(&self, _collection: &str, _fields: &Fields) -> Result<RecordId, BackendError> {
        Err(offline())
    }

    async fn update(
        &self,
        _collection: &str,
        _id: &RecordId,
        _fields: &Fields,
    ) -> Result<(), BackendError> {
        Err(offline())
    }

    async fn delete(&self, _collection: &str, _id: &RecordId) -> Result<(), BackendError> {
        Err(offline())
    }
}

fn build_quiz_service() -> QuizService {
    let clock = Clock::fixed(fixed_now());
    let store = RemoteStore::with_backend(Arc::new(OfflineBackend), clock);
    QuizService::new(clock, Arc::new(store), Arc::new(AiClient::new(None)))
}

#[tokio::test]
async fn failed_save_stays_visible_and_is_not_memoized() {
    let quiz = build_quiz_service();

    let mut run = quiz.start_builtin().unwrap();
    while !run.is_complete() {
        quiz.record_answer(&mut run, 0).unwrap();
        quiz.advance(&mut run);
    }

    let err = quiz.finalize(&mut run).await.unwrap_err();
    assert!(matches!(
        err,
        QuizServiceError::Store(StoreError::WriteFailed { .. })
    ));
    assert!(run.saved_record().is_none());

    // the retry hits the backend again instead of serving a phantom id
    assert!(quiz.finalize(&mut run).await.is_err());
}

#[tokio::test]
async fn analysis_still_works_during_an_outage() {
    let quiz = build_quiz_service();

    let mut run = quiz.start_builtin().unwrap();
    while !run.is_complete() {
        quiz.record_answer(&mut run, 0).unwrap();
        quiz.advance(&mut run);
    }

    // the derived report needs no saved record, only the answered session
    let report = quiz.analyze(&run).await.unwrap();
    assert!(report.overall_score <= 100);
    assert!(!report.skill_breakdown.is_empty());
}
