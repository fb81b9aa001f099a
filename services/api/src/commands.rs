use clap::Args;
use divorce_prep::error::AppError;
use divorce_prep::tools::calculator::{
    self, engine::format_won, AdditionalCostsRequest, CalculatorRequest, ChildSupportResult,
};
use divorce_prep::tools::diagnosis::{
    self, find_question, AnswerSheet, DiagnosisAnswer, DiagnosisResult, DiagnosisValidationError,
    MINIMUM_ANSWERS, QUESTIONS,
};

#[derive(Args, Debug)]
pub(crate) struct CalculateArgs {
    /// Parent 1 monthly income in won
    #[arg(long)]
    pub(crate) parent1_income: f64,
    /// Parent 2 monthly income in won
    #[arg(long)]
    pub(crate) parent2_income: f64,
    /// Number of children (1-10)
    #[arg(long, default_value_t = 1)]
    pub(crate) children: i64,
    /// Children age group: 0-2, 3-5, 6-11, 12-14, 15-17 or 18+
    #[arg(long)]
    pub(crate) age_group: String,
    /// Parent the children live with (1 or 2)
    #[arg(long, default_value_t = 1)]
    pub(crate) custodial_parent: i64,
    /// Monthly education costs in won
    #[arg(long)]
    pub(crate) education: Option<f64>,
    /// Monthly medical costs in won
    #[arg(long)]
    pub(crate) medical: Option<f64>,
    /// Other monthly costs in won
    #[arg(long)]
    pub(crate) other: Option<f64>,
    /// Print the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DiagnoseArgs {
    /// Answer as QUESTION=OPTION, e.g. q1=q1_a. Repeat for each question.
    #[arg(long = "answer", value_name = "QUESTION=OPTION")]
    pub(crate) answers: Vec<String>,
    /// Print the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl CalculateArgs {
    fn to_request(&self) -> CalculatorRequest {
        let has_costs = self.education.is_some() || self.medical.is_some() || self.other.is_some();
        CalculatorRequest {
            parent1_income: Some(self.parent1_income),
            parent2_income: Some(self.parent2_income),
            children_count: Some(self.children),
            children_age_group: Some(self.age_group.clone()),
            custodial_parent: Some(self.custodial_parent),
            additional_costs: has_costs.then(|| AdditionalCostsRequest {
                education: self.education,
                medical: self.medical,
                other: self.other,
            }),
            session_id: None,
        }
    }
}

pub(crate) fn run_calculate(args: CalculateArgs) -> Result<(), AppError> {
    let input = calculator::validate(&args.to_request())?;
    let result = calculator::calculate(&input);

    if args.json {
        println!("{}", to_json(&result)?);
    } else {
        render_calculation(&result);
    }
    Ok(())
}

fn render_calculation(result: &ChildSupportResult) {
    println!("Child support estimate");
    println!("  income bracket      : {}", result.breakdown.income_bracket);
    println!("  combined income     : {} won", format_won(result.combined_income));
    println!(
        "  parent ratios       : {:.2}% / {:.2}%",
        result.parent1_ratio, result.parent2_ratio
    );
    println!(
        "  multipliers         : children {}%, age {}%",
        result.breakdown.children_multiplier, result.breakdown.age_multiplier
    );
    println!("  base amount         : {} won", format_won(result.base_amount));
    println!("  additional costs    : {} won", format_won(result.additional_amount));
    println!("  total               : {} won", format_won(result.total_amount));
    println!(
        "  non-custodial share : {} won / month",
        format_won(result.non_custodial_payment)
    );
    println!();
    println!("{}", result.breakdown.explanation);
}

/// Turn `q1=q1_a` pairs into scored answers using the question bank.
pub(crate) fn parse_answers(raw: &[String]) -> Result<AnswerSheet, AppError> {
    let mut sheet = AnswerSheet::new();
    for pair in raw {
        let (question_id, option_id) = pair
            .split_once('=')
            .map(|(question, option)| (question.trim(), option.trim()))
            .ok_or_else(|| AppError::Input(format!("expected QUESTION=OPTION, got '{pair}'")))?;

        let question = find_question(question_id).ok_or_else(|| {
            AppError::from(DiagnosisValidationError::UnknownQuestion(
                question_id.to_string(),
            ))
        })?;
        let option = question.option(option_id).ok_or_else(|| {
            AppError::Input(format!("question {question_id} has no option '{option_id}'"))
        })?;

        sheet.record(DiagnosisAnswer {
            question_id: question.id.to_string(),
            option_id: option.id.to_string(),
            score: option.score,
        })?;
    }

    if sheet.answered() < MINIMUM_ANSWERS {
        return Err(DiagnosisValidationError::TooFewAnswers {
            answered: sheet.answered(),
            required: MINIMUM_ANSWERS,
        }
        .into());
    }
    Ok(sheet)
}

pub(crate) fn run_diagnose(args: DiagnoseArgs) -> Result<(), AppError> {
    let sheet = parse_answers(&args.answers)?;
    let result = diagnosis::diagnose(&sheet.answers());

    if args.json {
        println!("{}", to_json(&result)?);
    } else {
        render_diagnosis(&result);
    }
    Ok(())
}

fn render_diagnosis(result: &DiagnosisResult) {
    println!(
        "Suggested route: {} (score {}, {}/{} answered)",
        result.result_type.label(),
        result.score,
        result.answered_questions,
        result.total_questions
    );
    println!("Estimated duration: {}", result.detail.estimated_duration);
    println!();
    println!("Reasons:");
    for reason in &result.detail.reasons {
        println!("  - {reason}");
    }
    println!("Next steps:");
    for (index, step) in result.detail.next_steps.iter().enumerate() {
        println!("  {}. {step}", index + 1);
    }
}

pub(crate) fn run_questions() {
    for question in QUESTIONS.iter() {
        println!("[{}] ({}) {}", question.id, question.category, question.text);
        for option in &question.options {
            println!("    {} ({}점) {}", option.id, option.score, option.text);
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|err| AppError::Input(err.to_string()))
}
