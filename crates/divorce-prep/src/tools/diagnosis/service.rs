use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::domain::{DiagnosisAnswer, DiagnosisQuestion, DiagnosisResult};
use super::questions::QUESTIONS;
use super::repository::{DiagnosisId, DiagnosisRecord, DiagnosisRepository};
use super::scoring::diagnose;
use super::validation::{validate, DiagnosisRequest, DiagnosisValidationError};
use crate::session::SessionId;
use crate::store::{IdSequence, RepositoryError};

static DIAGNOSIS_SEQUENCE: IdSequence = IdSequence::new("diag");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResponse {
    pub id: Option<DiagnosisId>,
    pub session_id: SessionId,
    #[serde(flatten)]
    pub result: DiagnosisResult,
}

/// Scores questionnaire submissions and stores them on a best-effort basis.
pub struct DiagnosisService<R> {
    repository: Arc<R>,
}

impl<R> DiagnosisService<R>
where
    R: DiagnosisRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn questions(&self) -> &'static [DiagnosisQuestion] {
        &QUESTIONS
    }

    pub fn diagnose(
        &self,
        request: DiagnosisRequest,
    ) -> Result<DiagnosisResponse, DiagnosisValidationError> {
        let sheet = validate(&request)?;
        let session_id = SessionId::or_generate(request.session_id);
        let answers = sheet.answers();
        let result = diagnose(&answers);
        let id = self.persist(&session_id, answers, &result);

        Ok(DiagnosisResponse {
            id,
            session_id,
            result,
        })
    }

    pub fn history(&self, session_id: &SessionId) -> Result<Vec<DiagnosisRecord>, RepositoryError> {
        let mut records = self.repository.by_session(session_id)?;
        records.sort_by_key(|record| record.created_at);
        Ok(records)
    }

    fn persist(
        &self,
        session_id: &SessionId,
        answers: Vec<DiagnosisAnswer>,
        result: &DiagnosisResult,
    ) -> Option<DiagnosisId> {
        let record = DiagnosisRecord {
            id: DiagnosisId(DIAGNOSIS_SEQUENCE.next_id()),
            session_id: session_id.clone(),
            answers,
            result: result.clone(),
            created_at: result.created_at,
        };

        match self.repository.insert(record) {
            Ok(stored) => {
                info!(
                    id = %stored.id.0,
                    session = %session_id,
                    result = result.result_type.label(),
                    "stored diagnosis result"
                );
                Some(stored.id)
            }
            Err(error) => {
                warn!(%error, session = %session_id, "failed to store diagnosis result");
                None
            }
        }
    }
}
