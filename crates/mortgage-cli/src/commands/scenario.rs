use clap::{Args, Subcommand};
use colored::Colorize;
use serde_json::{json, Value};

use mortgage_core::params::LoanParameters;
use mortgage_core::scenario::{JsonFileStore, SavedScenario, ScenarioStore};

use crate::commands::LoanArgs;
use crate::input;

#[derive(Subcommand)]
pub enum ScenarioCommand {
    /// Save the given loan parameters under a name
    Save(SaveArgs),
    /// List saved scenarios
    List(ListArgs),
    /// Delete a saved scenario by id
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct SaveArgs {
    /// Display name for the scenario
    #[arg(long)]
    pub name: String,

    /// Path of the scenario store file
    #[arg(long, default_value = "scenarios.json")]
    pub store: String,

    /// Path to a JSON/YAML file with the loan parameters
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,
}

#[derive(Args)]
pub struct ListArgs {
    /// Path of the scenario store file
    #[arg(long, default_value = "scenarios.json")]
    pub store: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Id of the scenario to delete
    #[arg(long)]
    pub id: String,

    /// Path of the scenario store file
    #[arg(long, default_value = "scenarios.json")]
    pub store: String,
}

pub fn run(cmd: ScenarioCommand) -> Result<Value, Box<dyn std::error::Error>> {
    match cmd {
        ScenarioCommand::Save(args) => run_save(args),
        ScenarioCommand::List(args) => run_list(args),
        ScenarioCommand::Delete(args) => run_delete(args),
    }
}

fn run_save(args: SaveArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params: LoanParameters = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else {
        args.loan.to_params()
    };

    let scenario = SavedScenario::new(&args.name, params)?;
    let mut store = JsonFileStore::new(&args.store);
    store.insert(scenario.clone())?;
    report_diagnostics(&store);

    Ok(serde_json::to_value(scenario)?)
}

fn run_list(args: ListArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let store = JsonFileStore::new(&args.store);
    let scenarios = store.list()?;
    report_diagnostics(&store);

    Ok(serde_json::to_value(scenarios)?)
}

fn run_delete(args: DeleteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut store = JsonFileStore::new(&args.store);
    store.delete(&args.id)?;
    report_diagnostics(&store);

    Ok(json!({ "deleted": args.id }))
}

/// Store-level issues (e.g. a corrupt blob treated as empty) are reported,
/// never fatal.
fn report_diagnostics(store: &JsonFileStore) {
    for diag in store.take_diagnostics() {
        eprintln!("{}: {}", "warning".yellow().bold(), diag);
    }
}
