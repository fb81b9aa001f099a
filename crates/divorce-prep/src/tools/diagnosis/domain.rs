use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One selectable answer to a questionnaire item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiagnosisOption {
    pub id: &'static str,
    pub text: &'static str,
    pub score: u8,
}

/// Questionnaire item. Options are ordered from most to least amicable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiagnosisQuestion {
    pub id: &'static str,
    pub category: &'static str,
    pub text: &'static str,
    pub options: [DiagnosisOption; 3],
}

impl DiagnosisQuestion {
    pub fn option(&self, option_id: &str) -> Option<&DiagnosisOption> {
        self.options.iter().find(|option| option.id == option_id)
    }
}

/// A visitor's pick for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisAnswer {
    pub question_id: String,
    pub option_id: String,
    pub score: u8,
}

/// The divorce route the answers point to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosisResultType {
    /// Amicable divorce by agreement.
    #[serde(rename = "협의")]
    Agreement,
    /// Court-mediated settlement.
    #[serde(rename = "조정")]
    Mediation,
    /// Contested divorce.
    #[serde(rename = "소송")]
    Litigation,
}

impl DiagnosisResultType {
    pub const fn label(self) -> &'static str {
        match self {
            DiagnosisResultType::Agreement => "협의",
            DiagnosisResultType::Mediation => "조정",
            DiagnosisResultType::Litigation => "소송",
        }
    }

    pub const fn estimated_duration(self) -> &'static str {
        match self {
            DiagnosisResultType::Agreement => "1-3개월",
            DiagnosisResultType::Mediation => "3-6개월",
            DiagnosisResultType::Litigation => "6-12개월",
        }
    }
}

/// Canned explanation attached to a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResultDetail {
    pub estimated_duration: String,
    pub reasons: Vec<String>,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub result_type: DiagnosisResultType,
    pub score: u32,
    pub total_questions: usize,
    pub answered_questions: usize,
    pub detail: DiagnosisResultDetail,
    pub created_at: DateTime<Utc>,
}
