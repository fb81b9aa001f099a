//! Child-support calculator: income-bracket lookup plus multiplier composition.

pub mod brackets;
pub mod domain;
pub mod engine;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use brackets::{base_amount_for, find_bracket, INCOME_BRACKETS};
pub use domain::{
    AdditionalCosts, AgeGroup, CalculationBreakdown, ChildSupportInput, ChildSupportResult,
    CustodialParent, IncomeBracket,
};
pub use engine::calculate;
pub use repository::{CalculationId, CalculationRecord, CalculationRepository};
pub use router::calculator_router;
pub use service::{CalculationResponse, ChildSupportService};
pub use validation::{validate, AdditionalCostsRequest, CalculatorRequest, CalculatorValidationError};
