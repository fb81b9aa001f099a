use super::brackets::find_bracket;
use super::domain::{CalculationBreakdown, ChildSupportInput, ChildSupportResult, CustodialParent};

/// Multipliers by number of children (percent). Counts above the last row use it.
const CHILDREN_MULTIPLIERS: [(u8, u32); 4] = [(1, 100), (2, 180), (3, 250), (4, 310)];
const MAX_TABLED_CHILDREN: u8 = 4;

pub fn children_multiplier_percent(children_count: u8) -> u32 {
    let capped = children_count.min(MAX_TABLED_CHILDREN);
    CHILDREN_MULTIPLIERS
        .iter()
        .find(|(count, _)| *count == capped)
        .map(|(_, percent)| *percent)
        .unwrap_or(100)
}

/// Share of `combined` contributed by `part`, as a percentage with two decimals.
/// An empty household income splits evenly.
pub fn income_share_percent(part: u64, combined: u64) -> f64 {
    if combined == 0 {
        return 50.0;
    }
    ((part as f64 / combined as f64) * 10_000.0).round() / 100.0
}

/// `amount × a% × b%`, rounded half-up to the won.
fn scale(amount: u64, first_percent: u32, second_percent: u32) -> u64 {
    let numerator = amount * u64::from(first_percent) * u64::from(second_percent);
    (numerator + 5_000) / 10_000
}

/// Compute the monthly child support owed for `input`.
///
/// Pure and total over the input type; range checks on the request (children
/// count, custodial parent, non-negative amounts) happen before this point.
pub fn calculate(input: &ChildSupportInput) -> ChildSupportResult {
    let combined_income = input.parent1_income + input.parent2_income;
    let parent1_ratio = income_share_percent(input.parent1_income, combined_income);
    let parent2_ratio = income_share_percent(input.parent2_income, combined_income);

    let bracket = find_bracket(combined_income);
    let children_multiplier = children_multiplier_percent(input.children_count);
    let age_multiplier = input.children_age_group.multiplier_percent();

    let base_amount = scale(bracket.base_amount, children_multiplier, age_multiplier);
    let additional_amount = input.additional_costs.total();
    let total_amount = base_amount + additional_amount;

    let paying_parent = input.custodial_parent.other();
    let paying_ratio = match paying_parent {
        CustodialParent::Parent1 => parent1_ratio,
        CustodialParent::Parent2 => parent2_ratio,
    };
    let non_custodial_payment = (total_amount as f64 * paying_ratio / 100.0).round() as u64;

    let explanation = explain(&Explanation {
        input,
        combined_income,
        bracket_label: bracket.label,
        table_amount: bracket.base_amount,
        children_multiplier,
        age_multiplier,
        base_amount,
        additional_amount,
        total_amount,
        paying_parent,
        paying_ratio,
        non_custodial_payment,
    });

    ChildSupportResult {
        base_amount,
        additional_amount,
        total_amount,
        non_custodial_payment,
        parent1_ratio,
        parent2_ratio,
        combined_income,
        breakdown: CalculationBreakdown {
            income_bracket: bracket.label.to_string(),
            children_multiplier,
            age_multiplier,
            table_amount: bracket.base_amount,
            explanation,
        },
    }
}

struct Explanation<'a> {
    input: &'a ChildSupportInput,
    combined_income: u64,
    bracket_label: &'a str,
    table_amount: u64,
    children_multiplier: u32,
    age_multiplier: u32,
    base_amount: u64,
    additional_amount: u64,
    total_amount: u64,
    paying_parent: CustodialParent,
    paying_ratio: f64,
    non_custodial_payment: u64,
}

fn explain(facts: &Explanation<'_>) -> String {
    let mut text = format!(
        "부모 합산 월소득 {}원은 {} 구간으로 표준 양육비는 {}원입니다. \
         자녀 {}명 가중치 {}%와 자녀 연령({}) 가중치 {}%를 적용한 기본 양육비는 {}원입니다.",
        format_won(facts.combined_income),
        facts.bracket_label,
        format_won(facts.table_amount),
        facts.input.children_count,
        facts.children_multiplier,
        facts.input.children_age_group,
        facts.age_multiplier,
        format_won(facts.base_amount),
    );

    if facts.additional_amount > 0 {
        text.push_str(&format!(
            " 교육비·의료비 등 추가 비용 {}원을 더한 총 양육비는 {}원입니다.",
            format_won(facts.additional_amount),
            format_won(facts.total_amount),
        ));
    }

    text.push_str(&format!(
        " 비양육 부모(부모{})의 소득 비율 {:.2}%에 따라 매월 {}원을 지급합니다.",
        facts.paying_parent.number(),
        facts.paying_ratio,
        format_won(facts.non_custodial_payment),
    ));

    text
}

/// Render an amount with thousands separators, e.g. `847,000`.
pub fn format_won(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
