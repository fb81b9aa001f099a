use std::fmt;

use serde::{Deserialize, Serialize};

/// One row of the standard child-support table, keyed by the parents' combined
/// monthly income in won. `max` is inclusive; `None` marks the open-ended top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeBracket {
    pub min: u64,
    pub max: Option<u64>,
    pub label: &'static str,
    pub base_amount: u64,
}

impl IncomeBracket {
    pub fn contains(&self, income: u64) -> bool {
        income >= self.min && self.max.map_or(true, |max| income <= max)
    }
}

/// Age band of the children, used to scale the table amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "0-2")]
    Infant,
    #[serde(rename = "3-5")]
    Preschool,
    #[serde(rename = "6-11")]
    Elementary,
    #[serde(rename = "12-14")]
    MiddleSchool,
    #[serde(rename = "15-17")]
    HighSchool,
    #[serde(rename = "18+")]
    Adult,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 6] = [
        AgeGroup::Infant,
        AgeGroup::Preschool,
        AgeGroup::Elementary,
        AgeGroup::MiddleSchool,
        AgeGroup::HighSchool,
        AgeGroup::Adult,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            AgeGroup::Infant => "0-2",
            AgeGroup::Preschool => "3-5",
            AgeGroup::Elementary => "6-11",
            AgeGroup::MiddleSchool => "12-14",
            AgeGroup::HighSchool => "15-17",
            AgeGroup::Adult => "18+",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|group| group.code() == raw)
    }

    /// Scaling applied to the table amount, as an integer percentage.
    pub const fn multiplier_percent(self) -> u32 {
        match self {
            AgeGroup::Infant => 90,
            AgeGroup::Preschool => 100,
            AgeGroup::Elementary => 110,
            AgeGroup::MiddleSchool => 120,
            AgeGroup::HighSchool => 130,
            AgeGroup::Adult => 140,
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeGroup::Adult => f.write_str("18세 이상"),
            other => write!(f, "{}세", other.code()),
        }
    }
}

/// The parent the children live with. Serialized as `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CustodialParent {
    Parent1,
    Parent2,
}

impl CustodialParent {
    pub const fn number(self) -> u8 {
        match self {
            CustodialParent::Parent1 => 1,
            CustodialParent::Parent2 => 2,
        }
    }

    pub const fn other(self) -> Self {
        match self {
            CustodialParent::Parent1 => CustodialParent::Parent2,
            CustodialParent::Parent2 => CustodialParent::Parent1,
        }
    }
}

impl From<CustodialParent> for u8 {
    fn from(value: CustodialParent) -> Self {
        value.number()
    }
}

impl TryFrom<u8> for CustodialParent {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CustodialParent::Parent1),
            2 => Ok(CustodialParent::Parent2),
            other => Err(format!("custodial parent must be 1 or 2, got {other}")),
        }
    }
}

/// Flat monthly extras added on top of the scaled table amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalCosts {
    pub education: u64,
    pub medical: u64,
    pub other: u64,
}

impl AdditionalCosts {
    pub fn total(&self) -> u64 {
        self.education + self.medical + self.other
    }
}

/// Validated calculator input. Amounts are whole won per month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildSupportInput {
    pub parent1_income: u64,
    pub parent2_income: u64,
    pub children_count: u8,
    pub children_age_group: AgeGroup,
    pub custodial_parent: CustodialParent,
    #[serde(default)]
    pub additional_costs: AdditionalCosts,
}

/// Facts behind a calculation, surfaced to the visitor as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationBreakdown {
    pub income_bracket: String,
    /// Children-count multiplier as an integer percentage (180 means 1.8x).
    pub children_multiplier: u32,
    /// Age-group multiplier as an integer percentage.
    pub age_multiplier: u32,
    pub table_amount: u64,
    pub explanation: String,
}

/// Outcome of a child-support calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildSupportResult {
    pub base_amount: u64,
    pub additional_amount: u64,
    pub total_amount: u64,
    pub non_custodial_payment: u64,
    /// Percentage share of the combined income, two decimals.
    pub parent1_ratio: f64,
    pub parent2_ratio: f64,
    pub combined_income: u64,
    pub breakdown: CalculationBreakdown,
}

impl ChildSupportResult {
    pub fn ratio_of(&self, parent: CustodialParent) -> f64 {
        match parent {
            CustodialParent::Parent1 => self.parent1_ratio,
            CustodialParent::Parent2 => self.parent2_ratio,
        }
    }
}
