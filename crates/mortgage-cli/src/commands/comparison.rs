use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_core::comparison::{
    self, RateComparisonInput, RateSweep, DEFAULT_SWEEP_SPREAD, DEFAULT_SWEEP_STEP,
};

use crate::commands::LoanArgs;
use crate::input;

#[derive(Args)]
pub struct CompareRatesArgs {
    /// Path to a JSON/YAML file with the loan parameters
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    /// Sweep half-width in percentage points
    #[arg(long, default_value_t = DEFAULT_SWEEP_SPREAD)]
    pub spread: Decimal,

    /// Sweep step in percentage points
    #[arg(long, default_value_t = DEFAULT_SWEEP_STEP)]
    pub step: Decimal,
}

pub fn run(args: CompareRatesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cmp_input: RateComparisonInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        RateComparisonInput {
            params: args.loan.to_params(),
            sweep: RateSweep {
                spread: args.spread,
                step: args.step,
            },
        }
    };
    let result = comparison::compute_rate_comparisons(&cmp_input)?;
    Ok(serde_json::to_value(result)?)
}
