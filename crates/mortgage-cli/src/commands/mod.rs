pub mod comparison;
pub mod payment;
pub mod refinance;
pub mod scenario;
pub mod schedule;

use clap::Args;
use rust_decimal::Decimal;

use mortgage_core::params::LoanParameters;

/// Loan parameters shared by the calculation subcommands. A JSON/YAML file
/// (--input) or piped JSON always wins over these flags.
#[derive(Args)]
pub struct LoanArgs {
    /// Purchase price of the home
    #[arg(long, default_value = "0")]
    pub home_value: Decimal,

    /// Down payment amount
    #[arg(long, default_value = "0")]
    pub down_payment: Decimal,

    /// Override the financed principal (defaults to home value minus down payment)
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate as a percentage (e.g. 6.48)
    #[arg(long, default_value = "0")]
    pub rate: Decimal,

    /// Loan term in years
    #[arg(long, default_value = "30")]
    pub term_years: u32,

    /// Yearly property tax
    #[arg(long, default_value = "0")]
    pub property_tax: Decimal,

    /// Annual PMI rate as a percentage of the loan amount
    #[arg(long, default_value = "0")]
    pub pmi_rate: Decimal,

    /// Yearly home insurance premium
    #[arg(long, default_value = "0")]
    pub insurance: Decimal,

    /// Monthly HOA dues
    #[arg(long, default_value = "0")]
    pub hoa: Decimal,
}

impl LoanArgs {
    pub fn to_params(&self) -> LoanParameters {
        let mut params = LoanParameters::new(self.home_value, self.down_payment)
            .with_rate(self.rate)
            .with_term_years(self.term_years);
        if let Some(amount) = self.loan_amount {
            params = params.with_loan_amount(amount);
        }
        params.property_tax_yearly = self.property_tax;
        params.pmi_rate_percent = self.pmi_rate;
        params.home_insurance_yearly = self.insurance;
        params.monthly_hoa = self.hoa;
        params
    }
}
