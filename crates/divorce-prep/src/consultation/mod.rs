pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    ConsultationReceipt, ConsultationTicket, ConsultationType, PreferredTime, TicketId,
    TicketStatus, TicketUpdate, TransitionError,
};
pub use repository::ConsultationRepository;
pub use router::{consultation_admin_router, consultation_router};
pub use service::{ConsultationService, ConsultationServiceError};
pub use validation::{ConsultationRequest, ConsultationValidationError};
