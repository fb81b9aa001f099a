use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ChildSupportInput, ChildSupportResult};
use crate::session::SessionId;
use crate::store::RepositoryError;

/// Identifier wrapper for stored calculations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalculationId(pub String);

/// Stored `{input, result}` pair for one calculator submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRecord {
    pub id: CalculationId,
    pub session_id: SessionId,
    pub input: ChildSupportInput,
    pub result: ChildSupportResult,
    pub created_at: DateTime<Utc>,
}

/// Storage abstraction for calculator results.
pub trait CalculationRepository: Send + Sync {
    fn insert(&self, record: CalculationRecord) -> Result<CalculationRecord, RepositoryError>;
    fn by_session(&self, session_id: &SessionId)
        -> Result<Vec<CalculationRecord>, RepositoryError>;
}
