use serde::{Deserialize, Serialize};

use super::domain::{AdditionalCosts, AgeGroup, ChildSupportInput, CustodialParent};

pub const MIN_CHILDREN: i64 = 1;
pub const MAX_CHILDREN: i64 = 10;
/// Ceiling for any single amount (one trillion won). Keeps every engine sum
/// and scaled product well inside `u64`.
pub const MAX_AMOUNT_WON: u64 = 1_000_000_000_000;

/// Raw calculator form as posted by the browser. Every field is optional so
/// that missing values can be reported with a readable message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorRequest {
    pub parent1_income: Option<f64>,
    pub parent2_income: Option<f64>,
    pub children_count: Option<i64>,
    pub children_age_group: Option<String>,
    pub custodial_parent: Option<i64>,
    pub additional_costs: Option<AdditionalCostsRequest>,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalCostsRequest {
    pub education: Option<f64>,
    pub medical: Option<f64>,
    pub other: Option<f64>,
}

/// Reasons a calculator request is rejected before any arithmetic runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalculatorValidationError {
    #[error("필수 입력 항목이 누락되었습니다: {0}")]
    MissingField(&'static str),
    #[error("소득은 0원 이상 1조원 이하의 금액이어야 합니다.")]
    InvalidIncome,
    #[error("추가 비용은 0원 이상 1조원 이하의 금액이어야 합니다.")]
    InvalidAdditionalCost,
    #[error("자녀 수는 1명에서 10명 사이여야 합니다.")]
    ChildrenCountOutOfRange(i64),
    #[error("올바른 자녀 연령대를 선택해주세요.")]
    UnknownAgeGroup(String),
    #[error("양육 부모는 1 또는 2로 선택해주세요.")]
    InvalidCustodialParent(i64),
}

/// Check a posted form and turn it into engine input.
///
/// Amounts are rounded to the nearest won; negative, non-finite or oversized
/// amounts are rejected rather than clamped.
pub fn validate(request: &CalculatorRequest) -> Result<ChildSupportInput, CalculatorValidationError> {
    let parent1_income = request
        .parent1_income
        .ok_or(CalculatorValidationError::MissingField("parent1Income"))?;
    let parent2_income = request
        .parent2_income
        .ok_or(CalculatorValidationError::MissingField("parent2Income"))?;
    let children_count = request
        .children_count
        .ok_or(CalculatorValidationError::MissingField("childrenCount"))?;
    let age_group = request
        .children_age_group
        .as_deref()
        .ok_or(CalculatorValidationError::MissingField("childrenAgeGroup"))?;
    let custodial_parent = request
        .custodial_parent
        .ok_or(CalculatorValidationError::MissingField("custodialParent"))?;

    let parent1_income = to_won(parent1_income).ok_or(CalculatorValidationError::InvalidIncome)?;
    let parent2_income = to_won(parent2_income).ok_or(CalculatorValidationError::InvalidIncome)?;

    if !(MIN_CHILDREN..=MAX_CHILDREN).contains(&children_count) {
        return Err(CalculatorValidationError::ChildrenCountOutOfRange(
            children_count,
        ));
    }

    let children_age_group = AgeGroup::parse(age_group)
        .ok_or_else(|| CalculatorValidationError::UnknownAgeGroup(age_group.to_string()))?;

    let custodial_parent = u8::try_from(custodial_parent)
        .ok()
        .and_then(|value| CustodialParent::try_from(value).ok())
        .ok_or(CalculatorValidationError::InvalidCustodialParent(
            custodial_parent,
        ))?;

    let additional_costs = match &request.additional_costs {
        Some(costs) => AdditionalCosts {
            education: optional_cost(costs.education)?,
            medical: optional_cost(costs.medical)?,
            other: optional_cost(costs.other)?,
        },
        None => AdditionalCosts::default(),
    };

    Ok(ChildSupportInput {
        parent1_income,
        parent2_income,
        children_count: children_count as u8,
        children_age_group,
        custodial_parent,
        additional_costs,
    })
}

fn optional_cost(value: Option<f64>) -> Result<u64, CalculatorValidationError> {
    match value {
        Some(amount) => to_won(amount).ok_or(CalculatorValidationError::InvalidAdditionalCost),
        None => Ok(0),
    }
}

fn to_won(amount: f64) -> Option<u64> {
    if !amount.is_finite() || amount < 0.0 {
        return None;
    }
    let won = amount.round();
    if won > MAX_AMOUNT_WON as f64 {
        return None;
    }
    Some(won as u64)
}
