use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::answers::AnswerSheet;
use super::domain::DiagnosisAnswer;
use super::questions::{find_question, MINIMUM_ANSWERS};

/// Raw questionnaire submission. `answers` stays untyped so that shape problems
/// can be reported per answer instead of as a generic body rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRequest {
    #[serde(default)]
    pub answers: Option<Value>,
    pub session_id: Option<String>,
}

impl DiagnosisRequest {
    pub fn from_answers(answers: &[DiagnosisAnswer], session_id: Option<String>) -> Self {
        Self {
            answers: serde_json::to_value(answers).ok(),
            session_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagnosisValidationError {
    #[error("답변 목록이 올바르지 않습니다.")]
    AnswersNotAnArray,
    #[error("{0}번째 답변의 형식이 올바르지 않습니다.")]
    MalformedAnswer(usize),
    #[error("답변 점수는 1점에서 3점 사이여야 합니다.")]
    ScoreOutOfRange(i64),
    #[error("존재하지 않는 질문입니다: {0}")]
    UnknownQuestion(String),
    #[error("질문 {question_id}에 존재하지 않는 선택지입니다: {option_id}")]
    UnknownOption {
        question_id: String,
        option_id: String,
    },
    #[error("선택지 {option_id}의 점수가 질문 {question_id}의 점수와 일치하지 않습니다.")]
    ScoreMismatch {
        question_id: String,
        option_id: String,
    },
    #[error("최소 {required}개 이상의 질문에 답변해주세요.")]
    TooFewAnswers { answered: usize, required: usize },
}

/// Parse and check the posted answers, collapsing repeats to the last answer
/// given for each question.
pub fn validate(request: &DiagnosisRequest) -> Result<AnswerSheet, DiagnosisValidationError> {
    let entries = request
        .answers
        .as_ref()
        .and_then(Value::as_array)
        .ok_or(DiagnosisValidationError::AnswersNotAnArray)?;

    let mut sheet = AnswerSheet::new();
    for (index, entry) in entries.iter().enumerate() {
        let answer = parse_answer(index + 1, entry)?;
        sheet.record(answer)?;
    }

    if sheet.answered() < MINIMUM_ANSWERS {
        return Err(DiagnosisValidationError::TooFewAnswers {
            answered: sheet.answered(),
            required: MINIMUM_ANSWERS,
        });
    }

    Ok(sheet)
}

fn parse_answer(ordinal: usize, entry: &Value) -> Result<DiagnosisAnswer, DiagnosisValidationError> {
    let malformed = DiagnosisValidationError::MalformedAnswer(ordinal);

    let question_id = entry
        .get("questionId")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed.clone())?;
    let option_id = entry
        .get("optionId")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed.clone())?;
    let score = entry
        .get("score")
        .and_then(Value::as_i64)
        .ok_or(malformed)?;

    if !(1..=3).contains(&score) {
        return Err(DiagnosisValidationError::ScoreOutOfRange(score));
    }

    let question = find_question(question_id)
        .ok_or_else(|| DiagnosisValidationError::UnknownQuestion(question_id.to_string()))?;
    let option = question
        .option(option_id)
        .ok_or_else(|| DiagnosisValidationError::UnknownOption {
            question_id: question_id.to_string(),
            option_id: option_id.to_string(),
        })?;
    if i64::from(option.score) != score {
        return Err(DiagnosisValidationError::ScoreMismatch {
            question_id: question_id.to_string(),
            option_id: option_id.to_string(),
        });
    }

    Ok(DiagnosisAnswer {
        question_id: question_id.to_string(),
        option_id: option_id.to_string(),
        score: score as u8,
    })
}
