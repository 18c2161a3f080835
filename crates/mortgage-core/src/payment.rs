//! Monthly payment breakdown: P&I via the closed-form annuity formula plus
//! tax, PMI, insurance, and HOA carried as flat monthly figures.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageError;
use crate::params::LoanParameters;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageResult;

/// Below this fraction of equity (down payment / home value) PMI applies.
pub const PMI_EQUITY_THRESHOLD: Decimal = dec!(0.20);

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Per-call substitutions for the P&I leg of the payment.
///
/// Only principal, rate, and term can be overridden. Tax, PMI, insurance,
/// and HOA always come from the parameter set itself; in particular PMI keeps
/// reading the parameters' own loan amount and home value even under a
/// principal override, which the comparison and refinance paths depend on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_rate: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_years: Option<u32>,
}

/// Payment breakdown input: the loan parameters plus optional overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInput {
    #[serde(flatten)]
    pub params: LoanParameters,
    #[serde(default)]
    pub overrides: PaymentOverrides,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Monthly payment split into its five components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub principal_and_interest: Money,
    pub tax: Money,
    pub pmi: Money,
    pub insurance: Money,
    pub hoa: Money,
    /// Sum of the other five fields.
    pub total: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the monthly payment breakdown for a loan.
pub fn compute_breakdown(
    input: &PaymentInput,
) -> MortgageResult<ComputationOutput<PaymentBreakdown>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate(&input.params, &input.overrides)?;
    collect_warnings(&input.params, &input.overrides, &mut warnings);

    let result = breakdown(&input.params, &input.overrides);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Mortgage Payment (Annuity Formula)",
        input,
        warnings,
        elapsed,
        result,
    ))
}

/// Pure breakdown computation shared with the comparison and refinance paths.
pub fn breakdown(params: &LoanParameters, overrides: &PaymentOverrides) -> PaymentBreakdown {
    let principal = overrides.principal.unwrap_or(params.loan_amount);
    let annual_rate = overrides.annual_rate.unwrap_or(params.interest_rate);
    let term_years = overrides.term_years.unwrap_or(params.loan_term_years);

    let principal_and_interest =
        monthly_principal_and_interest(principal, annual_rate, term_years);
    let tax = params.property_tax_yearly / MONTHS_PER_YEAR;
    let pmi = monthly_pmi(params);
    let insurance = params.home_insurance_yearly / MONTHS_PER_YEAR;
    let hoa = params.monthly_hoa;

    let total = principal_and_interest + tax + pmi + insurance + hoa;

    PaymentBreakdown {
        principal_and_interest,
        tax,
        pmi,
        insurance,
        hoa,
        total,
    }
}

/// Level monthly P&I payment: P * r(1+r)^n / ((1+r)^n - 1).
///
/// Zero rate falls back to straight-line P / n; a zero term yields zero
/// (callers validate the term, this keeps the function total).
pub fn monthly_principal_and_interest(
    principal: Money,
    annual_rate: Percent,
    term_years: u32,
) -> Money {
    let total_months = term_years * 12;
    if total_months == 0 {
        return Decimal::ZERO;
    }

    let monthly_rate = annual_rate / PERCENT / MONTHS_PER_YEAR;
    if monthly_rate.is_zero() {
        // Interest-free: straight-line amortisation
        return principal / Decimal::from(total_months);
    }

    // (1 + r)^n via iterative multiplication
    let mut compound = Decimal::ONE;
    for _ in 0..total_months {
        compound *= Decimal::ONE + monthly_rate;
    }

    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return Decimal::ZERO;
    }

    principal * monthly_rate * compound / denominator
}

/// Monthly PMI charge. Applies only while the down payment is below 20% of
/// home value, and always reads the live loan amount and home value from the
/// parameters rather than any per-call override.
pub fn monthly_pmi(params: &LoanParameters) -> Money {
    let below_threshold = match params.equity_ratio() {
        Some(ratio) => ratio < PMI_EQUITY_THRESHOLD,
        None => false,
    };
    if !below_threshold {
        return Decimal::ZERO;
    }
    params.loan_amount * (params.pmi_rate_percent / PERCENT) / MONTHS_PER_YEAR
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub(crate) fn validate(
    params: &LoanParameters,
    overrides: &PaymentOverrides,
) -> MortgageResult<()> {
    let rate = overrides.annual_rate.unwrap_or(params.interest_rate);
    if rate < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "interest_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }

    let term = overrides.term_years.unwrap_or(params.loan_term_years);
    if term == 0 {
        return Err(MortgageError::InvalidInput {
            field: "loan_term_years".into(),
            reason: "Loan term must be at least 1 year".into(),
        });
    }

    if params.pmi_rate_percent < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "pmi_rate_percent".into(),
            reason: "PMI rate cannot be negative".into(),
        });
    }

    Ok(())
}

fn collect_warnings(
    params: &LoanParameters,
    overrides: &PaymentOverrides,
    warnings: &mut Vec<String>,
) {
    let rate = overrides.annual_rate.unwrap_or(params.interest_rate);
    if rate > dec!(15) {
        warnings.push(format!(
            "Interest rate {rate}% is unusually high; verify the quote"
        ));
    }

    if params.down_payment > params.home_value && params.home_value > Decimal::ZERO {
        warnings.push("Down payment exceeds home value".into());
    }

    let principal = overrides.principal.unwrap_or(params.loan_amount);
    if principal <= Decimal::ZERO {
        warnings.push("Principal is zero or negative; P&I will not be meaningful".into());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
