use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::session::SessionId;
use crate::store::RepositoryError;
use crate::tools::diagnosis::domain::DiagnosisAnswer;
use crate::tools::diagnosis::questions::QUESTIONS;
use crate::tools::diagnosis::repository::{DiagnosisRecord, DiagnosisRepository};
use crate::tools::diagnosis::validation::DiagnosisRequest;
use crate::tools::diagnosis::{diagnosis_router, DiagnosisService};

/// One answer per question, every one scoring `score`.
pub(super) fn uniform_answers(score: u8) -> Vec<DiagnosisAnswer> {
    QUESTIONS
        .iter()
        .map(|question| {
            let option = question
                .options
                .iter()
                .find(|option| option.score == score)
                .expect("every question offers each score");
            DiagnosisAnswer {
                question_id: question.id.to_string(),
                option_id: option.id.to_string(),
                score,
            }
        })
        .collect()
}

pub(super) fn answer(question_id: &str, score: u8) -> DiagnosisAnswer {
    DiagnosisAnswer {
        question_id: question_id.to_string(),
        option_id: format!("{question_id}_x"),
        score,
    }
}

pub(super) fn request_with(answers: Value) -> DiagnosisRequest {
    DiagnosisRequest {
        answers: Some(answers),
        session_id: None,
    }
}

pub(super) fn uniform_request(score: u8) -> DiagnosisRequest {
    request_with(json!(uniform_answers(score)))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<Vec<DiagnosisRecord>>>,
}

impl MemoryRepository {
    pub(super) fn records(&self) -> Vec<DiagnosisRecord> {
        self.records.lock().expect("repository mutex poisoned").clone()
    }
}

impl DiagnosisRepository for MemoryRepository {
    fn insert(&self, record: DiagnosisRecord) -> Result<DiagnosisRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.push(record.clone());
        Ok(record)
    }

    fn by_session(&self, session_id: &SessionId) -> Result<Vec<DiagnosisRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| &record.session_id == session_id)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl DiagnosisRepository for UnavailableRepository {
    fn insert(&self, _record: DiagnosisRecord) -> Result<DiagnosisRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn by_session(&self, _session_id: &SessionId) -> Result<Vec<DiagnosisRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}

pub(super) fn build_service() -> (DiagnosisService<MemoryRepository>, MemoryRepository) {
    let repository = MemoryRepository::default();
    let service = DiagnosisService::new(Arc::new(repository.clone()));
    (service, repository)
}

pub(super) fn router_with_service(service: DiagnosisService<MemoryRepository>) -> axum::Router {
    diagnosis_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
