use super::domain::{ConsultationTicket, TicketId};
use crate::store::RepositoryError;

/// Storage abstraction for consultation tickets.
pub trait ConsultationRepository: Send + Sync {
    fn insert(&self, ticket: ConsultationTicket) -> Result<ConsultationTicket, RepositoryError>;
    fn update(&self, ticket: ConsultationTicket) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &TicketId) -> Result<Option<ConsultationTicket>, RepositoryError>;
    fn list(&self) -> Result<Vec<ConsultationTicket>, RepositoryError>;
}
