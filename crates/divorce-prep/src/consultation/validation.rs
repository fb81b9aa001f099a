use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{ConsultationType, NewConsultation, PreferredTime};
use crate::session::SessionId;

pub const MAX_NAME_CHARS: usize = 50;
pub const MAX_MESSAGE_CHARS: usize = 2000;
pub const MAX_NOTE_CHARS: usize = 1000;

/// Consultation form as posted by the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub consultation_type: Option<String>,
    pub preferred_date: Option<String>,
    pub preferred_time: Option<String>,
    pub message: Option<String>,
    pub privacy_agreed: Option<bool>,
    pub diagnosis_session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsultationValidationError {
    #[error("이름은 1자 이상 50자 이하로 입력해주세요.")]
    InvalidName,
    #[error("연락처는 숫자 10~11자리로 입력해주세요.")]
    InvalidPhone,
    #[error("올바른 이메일 주소를 입력해주세요.")]
    InvalidEmail,
    #[error("상담 유형을 선택해주세요.")]
    UnknownConsultationType(String),
    #[error("희망 날짜는 YYYY-MM-DD 형식이어야 합니다.")]
    InvalidPreferredDate(String),
    #[error("희망 날짜는 오늘 이후로 선택해주세요.")]
    PreferredDateInPast,
    #[error("희망 시간대를 다시 선택해주세요.")]
    UnknownPreferredTime(String),
    #[error("문의 내용은 2000자를 넘을 수 없습니다.")]
    MessageTooLong,
    #[error("개인정보 수집 및 이용에 동의해주세요.")]
    PrivacyNotAgreed,
    #[error("관리자 메모는 1000자를 넘을 수 없습니다.")]
    NoteTooLong,
}

/// Check an intake form against `today` (the service's local date).
pub fn validate(
    request: &ConsultationRequest,
    today: NaiveDate,
) -> Result<NewConsultation, ConsultationValidationError> {
    let name = non_blank(request.name.as_deref()).ok_or(ConsultationValidationError::InvalidName)?;
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(ConsultationValidationError::InvalidName);
    }

    let phone = request
        .phone
        .as_deref()
        .and_then(normalize_phone)
        .ok_or(ConsultationValidationError::InvalidPhone)?;

    let email = match non_blank(request.email.as_deref()) {
        Some(email) if is_plausible_email(email) => Some(email.to_string()),
        Some(_) => return Err(ConsultationValidationError::InvalidEmail),
        None => None,
    };

    let raw_type = request.consultation_type.as_deref().unwrap_or_default();
    let consultation_type = ConsultationType::parse(raw_type).ok_or_else(|| {
        ConsultationValidationError::UnknownConsultationType(raw_type.to_string())
    })?;

    let preferred_date = match non_blank(request.preferred_date.as_deref()) {
        Some(raw) => {
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| ConsultationValidationError::InvalidPreferredDate(raw.to_string()))?;
            if date < today {
                return Err(ConsultationValidationError::PreferredDateInPast);
            }
            Some(date)
        }
        None => None,
    };

    let preferred_time = match non_blank(request.preferred_time.as_deref()) {
        Some(raw) => Some(
            PreferredTime::parse(raw)
                .ok_or_else(|| ConsultationValidationError::UnknownPreferredTime(raw.to_string()))?,
        ),
        None => None,
    };

    let message = non_blank(request.message.as_deref()).map(str::to_string);
    if message
        .as_ref()
        .is_some_and(|message| message.chars().count() > MAX_MESSAGE_CHARS)
    {
        return Err(ConsultationValidationError::MessageTooLong);
    }

    if request.privacy_agreed != Some(true) {
        return Err(ConsultationValidationError::PrivacyNotAgreed);
    }

    Ok(NewConsultation {
        name: name.to_string(),
        phone,
        email,
        consultation_type,
        preferred_date,
        preferred_time,
        message,
        diagnosis_session_id: non_blank(request.diagnosis_session_id.as_deref())
            .map(|id| SessionId(id.to_string())),
    })
}

pub fn check_note(note: &str) -> Result<Option<String>, ConsultationValidationError> {
    let note = note.trim();
    if note.chars().count() > MAX_NOTE_CHARS {
        return Err(ConsultationValidationError::NoteTooLong);
    }
    Ok((!note.is_empty()).then(|| note.to_string()))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Digits of a Korean phone number, allowing hyphen and space separators.
fn normalize_phone(raw: &str) -> Option<String> {
    let mut digits = String::with_capacity(11);
    for c in raw.trim().chars() {
        match c {
            '0'..='9' => digits.push(c),
            '-' | ' ' => {}
            _ => return None,
        }
    }
    (10..=11).contains(&digits.len()).then_some(digits)
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !email.contains(char::is_whitespace)
                && domain
                    .find('.')
                    .is_some_and(|dot| dot > 0 && dot + 1 < domain.len())
        }
        None => false,
    }
}
