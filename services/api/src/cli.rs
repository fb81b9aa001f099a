use crate::commands::{run_calculate, run_diagnose, run_questions, CalculateArgs, DiagnoseArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use divorce_prep::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "divorce-prep",
    about = "Run the divorce-preparation service or its self-service tools from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Estimate monthly child support from the standard table
    Calculate(CalculateArgs),
    /// Score questionnaire answers and suggest a divorce route
    Diagnose(DiagnoseArgs),
    /// Print the diagnosis question bank
    Questions,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Calculate(args) => run_calculate(args),
        Command::Diagnose(args) => run_diagnose(args),
        Command::Questions => {
            run_questions();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calculate_arguments_parse() {
        let cli = Cli::try_parse_from([
            "divorce-prep",
            "calculate",
            "--parent1-income",
            "4000000",
            "--parent2-income",
            "3000000",
            "--children",
            "2",
            "--age-group",
            "12-14",
            "--custodial-parent",
            "2",
            "--education",
            "100000",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Calculate(args)) => {
                assert_eq!(args.children, 2);
                assert_eq!(args.age_group, "12-14");
                assert_eq!(args.education, Some(100_000.0));
                assert!(!args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn diagnose_accepts_repeated_answers() {
        let cli = Cli::try_parse_from([
            "divorce-prep",
            "diagnose",
            "--answer",
            "q1=q1_a",
            "--answer",
            "q2=q2_b",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Diagnose(args)) => assert_eq!(args.answers.len(), 2),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::try_parse_from(["divorce-prep"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
