use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::session::SessionId;
use crate::store::RepositoryError;
use crate::tools::calculator::domain::{
    AdditionalCosts, AgeGroup, ChildSupportInput, CustodialParent,
};
use crate::tools::calculator::repository::{CalculationRecord, CalculationRepository};
use crate::tools::calculator::validation::CalculatorRequest;
use crate::tools::calculator::{calculator_router, ChildSupportService};

pub(super) fn input() -> ChildSupportInput {
    ChildSupportInput {
        parent1_income: 4_000_000,
        parent2_income: 3_000_000,
        children_count: 1,
        children_age_group: AgeGroup::Elementary,
        custodial_parent: CustodialParent::Parent1,
        additional_costs: AdditionalCosts::default(),
    }
}

pub(super) fn request() -> CalculatorRequest {
    CalculatorRequest {
        parent1_income: Some(4_000_000.0),
        parent2_income: Some(3_000_000.0),
        children_count: Some(1),
        children_age_group: Some("6-11".to_string()),
        custodial_parent: Some(1),
        additional_costs: None,
        session_id: None,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<Vec<CalculationRecord>>>,
}

impl MemoryRepository {
    pub(super) fn records(&self) -> Vec<CalculationRecord> {
        self.records.lock().expect("repository mutex poisoned").clone()
    }
}

impl CalculationRepository for MemoryRepository {
    fn insert(&self, record: CalculationRecord) -> Result<CalculationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.push(record.clone());
        Ok(record)
    }

    fn by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<CalculationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| &record.session_id == session_id)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl CalculationRepository for UnavailableRepository {
    fn insert(&self, _record: CalculationRecord) -> Result<CalculationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn by_session(
        &self,
        _session_id: &SessionId,
    ) -> Result<Vec<CalculationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}

pub(super) fn build_service() -> (ChildSupportService<MemoryRepository>, MemoryRepository) {
    let repository = MemoryRepository::default();
    let service = ChildSupportService::new(Arc::new(repository.clone()));
    (service, repository)
}

pub(super) fn router_with_service(service: ChildSupportService<MemoryRepository>) -> axum::Router {
    calculator_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
