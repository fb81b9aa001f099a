//! Diagnosis questionnaire: weighted-sum scoring into three divorce routes.

pub mod answers;
pub mod domain;
pub mod questions;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use answers::AnswerSheet;
pub use domain::{
    DiagnosisAnswer, DiagnosisOption, DiagnosisQuestion, DiagnosisResult, DiagnosisResultDetail,
    DiagnosisResultType,
};
pub use questions::{find_question, MINIMUM_ANSWERS, QUESTIONS};
pub use repository::{DiagnosisId, DiagnosisRecord, DiagnosisRepository};
pub use router::diagnosis_router;
pub use scoring::{classify, diagnose, explain, score};
pub use service::{DiagnosisResponse, DiagnosisService};
pub use validation::{validate, DiagnosisRequest, DiagnosisValidationError};
