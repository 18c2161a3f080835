use clap::Args;
use serde_json::Value;

use mortgage_core::payment::{self, PaymentInput, PaymentOverrides};

use crate::commands::LoanArgs;
use crate::input;

#[derive(Args)]
pub struct PaymentArgs {
    /// Path to a JSON/YAML file with the loan parameters
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let pay_input: PaymentInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        PaymentInput {
            params: args.loan.to_params(),
            overrides: PaymentOverrides::default(),
        }
    };
    let result = payment::compute_breakdown(&pay_input)?;
    Ok(serde_json::to_value(result)?)
}
