use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{DiagnosisAnswer, DiagnosisResult};
use crate::session::SessionId;
use crate::store::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagnosisId(pub String);

/// Stored questionnaire submission and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRecord {
    pub id: DiagnosisId,
    pub session_id: SessionId,
    pub answers: Vec<DiagnosisAnswer>,
    pub result: DiagnosisResult,
    pub created_at: DateTime<Utc>,
}

pub trait DiagnosisRepository: Send + Sync {
    fn insert(&self, record: DiagnosisRecord) -> Result<DiagnosisRecord, RepositoryError>;
    fn by_session(&self, session_id: &SessionId) -> Result<Vec<DiagnosisRecord>, RepositoryError>;
}
