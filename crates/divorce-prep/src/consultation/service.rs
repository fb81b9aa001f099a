use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;

use super::domain::{
    ConsultationReceipt, ConsultationTicket, TicketId, TicketStatus, TicketUpdate,
    TransitionError,
};
use super::repository::ConsultationRepository;
use super::validation::{check_note, validate, ConsultationRequest, ConsultationValidationError};
use crate::store::{IdSequence, RepositoryError};

static TICKET_SEQUENCE: IdSequence = IdSequence::new("ticket");

/// Intake and back-office handling of consultation requests.
pub struct ConsultationService<R> {
    repository: Arc<R>,
}

impl<R> ConsultationService<R>
where
    R: ConsultationRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn submit(
        &self,
        request: ConsultationRequest,
    ) -> Result<ConsultationReceipt, ConsultationServiceError> {
        self.submit_on(request, Utc::now().date_naive())
    }

    /// Same as [`submit`](Self::submit) with an explicit "today" for the
    /// preferred-date check.
    pub fn submit_on(
        &self,
        request: ConsultationRequest,
        today: NaiveDate,
    ) -> Result<ConsultationReceipt, ConsultationServiceError> {
        let intake = validate(&request, today)?;
        let now = Utc::now();

        let ticket = ConsultationTicket {
            id: TicketId(TICKET_SEQUENCE.next_id()),
            name: intake.name,
            phone: intake.phone,
            email: intake.email,
            consultation_type: intake.consultation_type,
            preferred_date: intake.preferred_date,
            preferred_time: intake.preferred_time,
            message: intake.message,
            diagnosis_session_id: intake.diagnosis_session_id,
            status: TicketStatus::Pending,
            admin_note: None,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(ticket)?;
        info!(
            id = %stored.id.0,
            consultation_type = stored.consultation_type.code(),
            linked_diagnosis = stored.diagnosis_session_id.is_some(),
            "consultation request received"
        );
        Ok(ConsultationReceipt::from(&stored))
    }

    /// Tickets newest first, optionally limited to one status.
    pub fn list(
        &self,
        status: Option<TicketStatus>,
    ) -> Result<Vec<ConsultationTicket>, ConsultationServiceError> {
        let mut tickets: Vec<ConsultationTicket> = self
            .repository
            .list()?
            .into_iter()
            .filter(|ticket| status.map_or(true, |status| ticket.status == status))
            .collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tickets)
    }

    pub fn get(&self, id: &TicketId) -> Result<ConsultationTicket, ConsultationServiceError> {
        Ok(self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?)
    }

    pub fn update(
        &self,
        id: &TicketId,
        update: TicketUpdate,
    ) -> Result<ConsultationTicket, ConsultationServiceError> {
        let mut ticket = self.get(id)?;
        let closed = ticket.status.is_terminal();

        if let Some(next) = update.status {
            ticket.status = ticket.status.transition_to(next)?;
        }
        if let Some(note) = update.admin_note {
            if closed {
                return Err(TransitionError::Closed(ticket.status).into());
            }
            ticket.admin_note = check_note(&note)?;
        }
        ticket.updated_at = Utc::now();

        self.repository.update(ticket.clone())?;
        info!(id = %ticket.id.0, status = %ticket.status, "consultation ticket updated");
        Ok(ticket)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsultationServiceError {
    #[error(transparent)]
    Validation(#[from] ConsultationValidationError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
