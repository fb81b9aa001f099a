use std::collections::BTreeMap;

use super::domain::DiagnosisAnswer;
use super::questions::{position, QUESTIONS};
use super::validation::DiagnosisValidationError;

/// Answers collected during one questionnaire session.
///
/// Holds at most one answer per question; recording a second answer for the same
/// question replaces the first. Iteration follows the question bank order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    answers: BTreeMap<usize, DiagnosisAnswer>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `answer`, returning the answer it replaced.
    pub fn record(
        &mut self,
        answer: DiagnosisAnswer,
    ) -> Result<Option<DiagnosisAnswer>, DiagnosisValidationError> {
        let index = position(&answer.question_id)
            .ok_or_else(|| DiagnosisValidationError::UnknownQuestion(answer.question_id.clone()))?;
        Ok(self.answers.insert(index, answer))
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&DiagnosisAnswer> {
        position(question_id).and_then(|index| self.answers.get(&index))
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() == QUESTIONS.len()
    }

    pub fn reset(&mut self) {
        self.answers.clear();
    }

    pub fn answers(&self) -> Vec<DiagnosisAnswer> {
        self.answers.values().cloned().collect()
    }
}
