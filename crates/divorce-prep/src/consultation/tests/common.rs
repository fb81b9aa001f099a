use std::sync::{Arc, Mutex};

use axum::response::Response;
use axum::{Extension, Router};
use chrono::NaiveDate;
use serde_json::Value;

use crate::auth::{AdminCapability, AuthenticatedUser, Role};
use crate::consultation::domain::{ConsultationTicket, TicketId};
use crate::consultation::repository::ConsultationRepository;
use crate::consultation::validation::ConsultationRequest;
use crate::consultation::{consultation_admin_router, consultation_router, ConsultationService};
use crate::store::RepositoryError;

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    tickets: Arc<Mutex<Vec<ConsultationTicket>>>,
}

impl MemoryRepository {
    pub(super) fn tickets(&self) -> Vec<ConsultationTicket> {
        self.tickets.lock().expect("repository mutex poisoned").clone()
    }
}

impl ConsultationRepository for MemoryRepository {
    fn insert(&self, ticket: ConsultationTicket) -> Result<ConsultationTicket, RepositoryError> {
        self.tickets
            .lock()
            .expect("repository mutex poisoned")
            .push(ticket.clone());
        Ok(ticket)
    }

    fn update(&self, ticket: ConsultationTicket) -> Result<(), RepositoryError> {
        let mut guard = self.tickets.lock().expect("repository mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == ticket.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = ticket;
        Ok(())
    }

    fn fetch(&self, id: &TicketId) -> Result<Option<ConsultationTicket>, RepositoryError> {
        let guard = self.tickets.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|ticket| &ticket.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<ConsultationTicket>, RepositoryError> {
        Ok(self.tickets())
    }
}

pub(super) struct UnavailableRepository;

impl ConsultationRepository for UnavailableRepository {
    fn insert(&self, _ticket: ConsultationTicket) -> Result<ConsultationTicket, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn update(&self, _ticket: ConsultationTicket) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: &TicketId) -> Result<Option<ConsultationTicket>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn list(&self) -> Result<Vec<ConsultationTicket>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
}

pub(super) fn request() -> ConsultationRequest {
    ConsultationRequest {
        name: Some("김민지".to_string()),
        phone: Some("010-1234-5678".to_string()),
        email: Some("minji@example.com".to_string()),
        consultation_type: Some("custody".to_string()),
        preferred_date: Some("2026-03-10".to_string()),
        preferred_time: Some("afternoon".to_string()),
        message: Some("양육권 관련 상담을 원합니다.".to_string()),
        privacy_agreed: Some(true),
        diagnosis_session_id: None,
    }
}

pub(super) fn build_service() -> (Arc<ConsultationService<MemoryRepository>>, MemoryRepository) {
    let repository = MemoryRepository::default();
    let service = Arc::new(ConsultationService::new(Arc::new(repository.clone())));
    (service, repository)
}

pub(super) fn router(service: Arc<ConsultationService<MemoryRepository>>) -> Router {
    let admin = AdminCapability::grant(&AuthenticatedUser {
        user_id: "admin-1".to_string(),
        role: Role::Admin,
    })
    .expect("admin role grants capability");

    consultation_router(service.clone())
        .merge(consultation_admin_router(service).layer(Extension(admin)))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
