use super::domain::IncomeBracket;

const fn bracket(min: u64, max: u64, label: &'static str, base_amount: u64) -> IncomeBracket {
    IncomeBracket {
        min,
        max: Some(max),
        label,
        base_amount,
    }
}

/// Standard monthly child-support amounts for one child, by combined parental
/// income. Rows are contiguous: each `min` is the previous `max + 1`.
pub static INCOME_BRACKETS: [IncomeBracket; 13] = [
    bracket(0, 2_000_000, "200만원 이하", 380_000),
    bracket(2_000_001, 3_000_000, "200~300만원", 470_000),
    bracket(3_000_001, 4_000_000, "300~400만원", 550_000),
    bracket(4_000_001, 5_000_000, "400~500만원", 620_000),
    bracket(5_000_001, 6_000_000, "500~600만원", 700_000),
    bracket(6_000_001, 7_000_000, "600~700만원", 770_000),
    bracket(7_000_001, 8_000_000, "700~800만원", 840_000),
    bracket(8_000_001, 9_000_000, "800~900만원", 910_000),
    bracket(9_000_001, 10_000_000, "900~1000만원", 980_000),
    bracket(10_000_001, 12_000_000, "1000~1200만원", 1_080_000),
    bracket(12_000_001, 15_000_000, "1200~1500만원", 1_230_000),
    bracket(15_000_001, 20_000_000, "1500~2000만원", 1_450_000),
    IncomeBracket {
        min: 20_000_001,
        max: None,
        label: "2000만원 초과",
        base_amount: 1_700_000,
    },
];

/// Find the bracket holding `combined_income`, falling back to the lowest row.
pub fn find_bracket(combined_income: u64) -> &'static IncomeBracket {
    INCOME_BRACKETS
        .iter()
        .find(|bracket| bracket.contains(combined_income))
        .unwrap_or(&INCOME_BRACKETS[0])
}

/// Table amount for `combined_income` before any multiplier is applied.
pub fn base_amount_for(combined_income: u64) -> u64 {
    find_bracket(combined_income).base_amount
}
