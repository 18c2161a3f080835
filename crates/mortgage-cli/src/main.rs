mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::comparison::CompareRatesArgs;
use commands::payment::PaymentArgs;
use commands::refinance::RefinanceArgs;
use commands::scenario::ScenarioCommand;
use commands::schedule::ScheduleArgs;

/// Mortgage payment, amortization, and refinance calculations
#[derive(Parser)]
#[command(
    name = "mtg",
    version,
    about = "Mortgage payment, amortization, and refinance calculations",
    long_about = "A CLI for mortgage calculations with decimal precision. \
                  Computes monthly payment breakdowns (P&I, tax, PMI, insurance, HOA), \
                  year-by-year amortization schedules, rate sweep comparisons, \
                  refinance break-even analysis, and manages saved scenarios."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment breakdown (P&I, tax, PMI, insurance, HOA)
    Payment(PaymentArgs),
    /// Year-by-year amortization schedule
    Schedule(ScheduleArgs),
    /// Compare monthly totals across a rate sweep
    CompareRates(CompareRatesArgs),
    /// Refinance break-even analysis
    Refinance(RefinanceArgs),
    /// Save, list, and delete scenarios
    #[command(subcommand)]
    Scenario(ScenarioCommand),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::payment::run(args),
        Commands::Schedule(args) => commands::schedule::run(args),
        Commands::CompareRates(args) => commands::comparison::run(args),
        Commands::Refinance(args) => commands::refinance::run(args),
        Commands::Scenario(cmd) => commands::scenario::run(cmd),
        Commands::Version => {
            println!("mtg {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
