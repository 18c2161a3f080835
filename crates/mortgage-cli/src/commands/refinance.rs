use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_core::refinance::{self, RefinanceInput};

use crate::commands::LoanArgs;
use crate::input;

#[derive(Args)]
pub struct RefinanceArgs {
    /// Path to a JSON/YAML file with the refinance inputs
    #[arg(long)]
    pub input: Option<String>,

    /// Loan context for tax/PMI/insurance/HOA components
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Payoff balance on the existing loan
    #[arg(long, default_value = "0")]
    pub balance: Decimal,

    /// Annual rate on the existing loan, percent
    #[arg(long, default_value = "0")]
    pub current_rate: Decimal,

    /// Remaining term assumption for the existing loan, years
    #[arg(long, default_value = "30")]
    pub current_term: u32,

    /// Proposed annual rate, percent
    #[arg(long, default_value = "0")]
    pub new_rate: Decimal,

    /// Proposed term, years
    #[arg(long, default_value = "30")]
    pub new_term: u32,

    /// Closing costs for the refinance
    #[arg(long, default_value = "0")]
    pub closing_costs: Decimal,

    /// Years already owned (echoed in assumptions)
    #[arg(long, default_value = "0")]
    pub years_owned: u32,
}

pub fn run(args: RefinanceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let refi_input: RefinanceInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        RefinanceInput {
            params: args.loan.to_params(),
            current_balance: args.balance,
            current_rate: args.current_rate,
            current_term_years: args.current_term,
            new_rate: args.new_rate,
            new_term_years: args.new_term,
            closing_costs: args.closing_costs,
            years_owned: args.years_owned,
            as_of: None,
        }
    };
    let result = refinance::analyze_refinance(&refi_input)?;
    Ok(serde_json::to_value(result)?)
}
