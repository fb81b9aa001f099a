//! Self-service tools: the child-support calculator and the diagnosis questionnaire.

pub mod calculator;
pub mod diagnosis;
