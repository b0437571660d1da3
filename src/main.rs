//! Pension System CLI
//!
//! Interactive menu by default; `quote` prices one request from flags and
//! `batch` prices a CSV file of requests.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pension_system::batch::{describe_outcome, write_outcomes_to_path, BatchRunner};
use pension_system::console::{render_quote, ConsoleSession};
use pension_system::request::loader::{load_requests, DEFAULT_REQUESTS_PATH};
use pension_system::request::parse::{parse_age, parse_base_income, parse_loss_percent, parse_weeks};
use pension_system::request::RequestFields;
use pension_system::{Gender, PensionCalculator, PensionRegime, PensionType};
use serde_json::json;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pension_system",
    about = "Compute old-age, survivor and disability pension rates and payments",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive menu (default command)
    Menu,
    /// Price a single request from command-line flags
    Quote(QuoteArgs),
    /// Price every request in a CSV file
    Batch(BatchArgs),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliPensionType {
    OldAge,
    Survivor,
    Disability,
}

impl From<CliPensionType> for PensionType {
    fn from(value: CliPensionType) -> Self {
        match value {
            CliPensionType::OldAge => PensionType::OldAge,
            CliPensionType::Survivor => PensionType::Survivor,
            CliPensionType::Disability => PensionType::Disability,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliGender {
    Male,
    Female,
}

impl From<CliGender> for Gender {
    fn from(value: CliGender) -> Self {
        match value {
            CliGender::Male => Gender::Male,
            CliGender::Female => Gender::Female,
        }
    }
}

#[derive(Args, Debug)]
struct QuoteArgs {
    /// Pension type
    #[arg(long = "type", value_enum)]
    pension_type: CliPensionType,
    /// Base liquidation income
    #[arg(long, value_parser = parse_base_income, allow_hyphen_values = true)]
    base_income: f64,
    /// Weeks contributed
    #[arg(long, value_parser = parse_weeks)]
    weeks: u32,
    /// Gender (old-age only)
    #[arg(long, value_enum)]
    gender: Option<CliGender>,
    /// Age in years (old-age and disability)
    #[arg(long, value_parser = parse_age)]
    age: Option<u32>,
    /// Disability-loss percentage (disability only)
    #[arg(long, value_parser = parse_loss_percent)]
    loss_percent: Option<f64>,
    /// Print the full quote as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Request CSV file
    #[arg(long, default_value = DEFAULT_REQUESTS_PATH)]
    input: PathBuf,
    /// Write per-request results to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,
    /// Print the summary as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let regime = PensionRegime::colombia_2026();

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => run_menu(regime),
        Command::Quote(args) => run_quote(args, regime),
        Command::Batch(args) => run_batch(args, regime),
    }
}

fn run_menu(regime: PensionRegime) -> Result<()> {
    println!("Pension System v{}", env!("CARGO_PKG_VERSION"));
    println!("Regime: {} (minimum wage {:.0})", regime.name, regime.minimum_wage);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = ConsoleSession::new(stdin.lock(), stdout.lock(), PensionCalculator::new(regime));
    session.run().context("Console session failed")
}

fn run_quote(args: QuoteArgs, regime: PensionRegime) -> Result<()> {
    let pension_type = PensionType::from(args.pension_type);
    let fields = RequestFields {
        base_income: Some(args.base_income),
        weeks_contributed: Some(args.weeks),
        gender: args.gender.map(Gender::from),
        age: args.age,
        loss_percent: args.loss_percent,
    };

    let calculator = PensionCalculator::new(regime);
    let result = fields
        .build(pension_type)
        .and_then(|request| calculator.calculate(&request));

    match result {
        Ok(quote) if args.json => {
            println!("{}", serde_json::to_string_pretty(&quote)?);
            Ok(())
        }
        Ok(quote) => {
            print!("{}", render_quote(&quote));
            Ok(())
        }
        Err(err) => {
            if args.json {
                let body = json!({ "error_kind": err.code(), "error": err.to_string() });
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
            Err(err).with_context(|| format!("Unable to price {} request", pension_type))
        }
    }
}

fn run_batch(args: BatchArgs, regime: PensionRegime) -> Result<()> {
    let records = load_requests(&args.input)
        .with_context(|| format!("Failed to load requests from {}", args.input.display()))?;

    let runner = BatchRunner::with_regime(regime);
    let outcomes = runner.run(&records);
    let summary = runner.summarize(&outcomes);

    if let Some(output) = &args.output {
        write_outcomes_to_path(&outcomes, output)
            .with_context(|| format!("Failed to write results to {}", output.display()))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{:>8} {:<10} {:>8} {:>14}", "Request", "Type", "Rate", "Payment");
        println!("{}", "-".repeat(44));
        for outcome in &outcomes {
            println!("{}", describe_outcome(outcome));
        }
        println!("\n{}", summary);
        if let Some(output) = &args.output {
            println!("\nResults written to: {}", output.display());
        }
    }

    Ok(())
}
