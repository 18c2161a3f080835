use clap::Args;
use serde_json::Value;

use mortgage_core::payment::PaymentOverrides;
use mortgage_core::schedule::{self, ScheduleInput};

use crate::commands::LoanArgs;
use crate::input;

#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to a JSON/YAML file with the loan parameters
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sched_input: ScheduleInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        ScheduleInput {
            params: args.loan.to_params(),
            overrides: PaymentOverrides::default(),
        }
    };
    let result = schedule::compute_schedule(&sched_input)?;
    Ok(serde_json::to_value(result)?)
}
