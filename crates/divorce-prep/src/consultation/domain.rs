use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub String);

/// Topic the visitor wants to discuss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationType {
    DivorceProcedure,
    Custody,
    ChildSupport,
    PropertyDivision,
    Alimony,
    Other,
}

impl ConsultationType {
    pub const ALL: [ConsultationType; 6] = [
        ConsultationType::DivorceProcedure,
        ConsultationType::Custody,
        ConsultationType::ChildSupport,
        ConsultationType::PropertyDivision,
        ConsultationType::Alimony,
        ConsultationType::Other,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            ConsultationType::DivorceProcedure => "divorce_procedure",
            ConsultationType::Custody => "custody",
            ConsultationType::ChildSupport => "child_support",
            ConsultationType::PropertyDivision => "property_division",
            ConsultationType::Alimony => "alimony",
            ConsultationType::Other => "other",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ConsultationType::DivorceProcedure => "이혼 절차",
            ConsultationType::Custody => "양육권",
            ConsultationType::ChildSupport => "양육비",
            ConsultationType::PropertyDivision => "재산분할",
            ConsultationType::Alimony => "위자료",
            ConsultationType::Other => "기타",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|kind| kind.code() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredTime {
    Morning,
    Afternoon,
    Evening,
    Anytime,
}

impl PreferredTime {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "morning" => Some(PreferredTime::Morning),
            "afternoon" => Some(PreferredTime::Afternoon),
            "evening" => Some(PreferredTime::Evening),
            "anytime" => Some(PreferredTime::Anytime),
            _ => None,
        }
    }
}

/// Lifecycle of a consultation ticket.
///
/// Tickets move forward through `pending`, `contacted`, `in_progress` and
/// `completed`, and may be cancelled from any open state. `completed` and
/// `cancelled` are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Pending,
    Contacted,
    InProgress,
    Completed,
    Cancelled,
}

impl TicketStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, TicketStatus::Completed | TicketStatus::Cancelled)
    }

    const fn rank(self) -> u8 {
        match self {
            TicketStatus::Pending => 0,
            TicketStatus::Contacted => 1,
            TicketStatus::InProgress => 2,
            TicketStatus::Completed => 3,
            TicketStatus::Cancelled => 4,
        }
    }

    pub fn transition_to(self, next: TicketStatus) -> Result<TicketStatus, TransitionError> {
        if self == next {
            return Ok(next);
        }
        if self.is_terminal() {
            return Err(TransitionError::Closed(self));
        }
        if next != TicketStatus::Cancelled && next.rank() < self.rank() {
            return Err(TransitionError::Backwards {
                from: self,
                to: next,
            });
        }
        Ok(next)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TicketStatus::Pending => "pending",
            TicketStatus::Contacted => "contacted",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Completed => "completed",
            TicketStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("이미 종료된 상담입니다. (상태: {0})")]
    Closed(TicketStatus),
    #[error("상담 상태를 {from}에서 {to}(으)로 되돌릴 수 없습니다.")]
    Backwards { from: TicketStatus, to: TicketStatus },
}

/// Intake that passed validation; phone holds digits only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConsultation {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub consultation_type: ConsultationType,
    pub preferred_date: Option<NaiveDate>,
    pub preferred_time: Option<PreferredTime>,
    pub message: Option<String>,
    pub diagnosis_session_id: Option<SessionId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationTicket {
    pub id: TicketId,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub consultation_type: ConsultationType,
    pub preferred_date: Option<NaiveDate>,
    pub preferred_time: Option<PreferredTime>,
    pub message: Option<String>,
    pub diagnosis_session_id: Option<SessionId>,
    pub status: TicketStatus,
    pub admin_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What the visitor gets back after submitting the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationReceipt {
    pub id: TicketId,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&ConsultationTicket> for ConsultationReceipt {
    fn from(ticket: &ConsultationTicket) -> Self {
        Self {
            id: ticket.id.clone(),
            status: ticket.status,
            created_at: ticket.created_at,
        }
    }
}

/// Back-office change to a ticket; absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketUpdate {
    pub status: Option<TicketStatus>,
    pub admin_note: Option<String>,
}
