use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{ChildSupportInput, ChildSupportResult};
use super::engine;
use super::repository::{CalculationId, CalculationRecord, CalculationRepository};
use super::validation::{validate, CalculatorRequest, CalculatorValidationError};
use crate::session::SessionId;
use crate::store::{IdSequence, RepositoryError};

static CALCULATION_SEQUENCE: IdSequence = IdSequence::new("calc");

/// Payload returned to the browser: the record id (absent when storage failed),
/// the session key and the flattened result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    pub id: Option<CalculationId>,
    pub session_id: SessionId,
    #[serde(flatten)]
    pub result: ChildSupportResult,
}

/// Validates requests, runs the engine and stores results on a best-effort basis.
pub struct ChildSupportService<R> {
    repository: Arc<R>,
}

impl<R> ChildSupportService<R>
where
    R: CalculationRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn calculate(
        &self,
        request: CalculatorRequest,
    ) -> Result<CalculationResponse, CalculatorValidationError> {
        let input = validate(&request)?;
        let session_id = SessionId::or_generate(request.session_id);
        let result = engine::calculate(&input);
        let id = self.persist(&session_id, input, &result);

        Ok(CalculationResponse {
            id,
            session_id,
            result,
        })
    }

    /// Results previously stored under `session_id`, oldest first.
    pub fn history(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<CalculationRecord>, RepositoryError> {
        let mut records = self.repository.by_session(session_id)?;
        records.sort_by_key(|record| record.created_at);
        Ok(records)
    }

    fn persist(
        &self,
        session_id: &SessionId,
        input: ChildSupportInput,
        result: &ChildSupportResult,
    ) -> Option<CalculationId> {
        let record = CalculationRecord {
            id: CalculationId(CALCULATION_SEQUENCE.next_id()),
            session_id: session_id.clone(),
            input,
            result: result.clone(),
            created_at: Utc::now(),
        };

        match self.repository.insert(record) {
            Ok(stored) => {
                info!(id = %stored.id.0, session = %session_id, "stored child-support calculation");
                Some(stored.id)
            }
            Err(error) => {
                warn!(%error, session = %session_id, "failed to store child-support calculation");
                None
            }
        }
    }
}
