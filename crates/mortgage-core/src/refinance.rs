//! Refinance break-even analysis: months of payment savings needed to recover
//! closing costs, and cumulative savings at fixed horizons.
//!
//! Both payments are fresh P&I estimates against the stated payoff balance.
//! This mirrors how the calculator has always modelled it; it is not a true
//! re-amortization of the existing schedule.

use chrono::{Months, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageError;
use crate::params::LoanParameters;
use crate::payment::{self, PaymentOverrides};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageResult;

/// A refinance is "worth it" when the break-even lands within this horizon.
pub const WORTH_IT_HORIZON_MONTHS: Decimal = dec!(24);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Refinance analysis input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceInput {
    /// Borrower context for the non-P&I payment components (tax, PMI,
    /// insurance, HOA). PMI keeps reading this parameter set's own loan
    /// amount and home value, not the payoff balance below.
    #[serde(flatten)]
    pub params: LoanParameters,
    /// Payoff balance on the existing loan. Used as the principal for both
    /// payment estimates.
    pub current_balance: Money,
    /// Annual rate on the existing loan, percent.
    pub current_rate: Percent,
    pub current_term_years: u32,
    /// Proposed annual rate, percent.
    pub new_rate: Percent,
    pub new_term_years: u32,
    #[serde(default)]
    pub closing_costs: Money,
    /// Years the borrower has already owned the home. Echoed in the
    /// assumptions; the break-even math itself does not consume it.
    #[serde(default)]
    pub years_owned: u32,
    /// Anchor date for the break-even date. Defaults to today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

/// Refinance analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinanceAnalysis {
    pub current_payment: Money,
    pub new_payment: Money,
    pub monthly_savings: Money,
    pub closing_costs: Money,
    /// closing_costs / monthly_savings. None when savings are zero or
    /// negative — there is no break-even to report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_even_months: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_even_date: Option<NaiveDate>,
    /// monthly_savings * 60 - closing_costs
    pub savings_5y: Money,
    /// monthly_savings * 120 - closing_costs
    pub savings_10y: Money,
    /// monthly_savings * (new term in months) - closing_costs
    pub savings_life: Money,
    pub is_worth_it: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Analyse whether refinancing recovers its closing costs, and how fast.
pub fn analyze_refinance(
    input: &RefinanceInput,
) -> MortgageResult<ComputationOutput<RefinanceAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate(input)?;
    collect_warnings(input, &mut warnings);

    let current_payment = payment_at(input, input.current_rate, input.current_term_years);
    let new_payment = payment_at(input, input.new_rate, input.new_term_years);
    let monthly_savings = current_payment - new_payment;

    let as_of = input.as_of.unwrap_or_else(|| Utc::now().date_naive());

    let (break_even_months, break_even_date) = if monthly_savings > Decimal::ZERO {
        let months = input.closing_costs / monthly_savings;
        // Negative months (negative closing costs) mean the costs are already
        // recovered; the break-even is now.
        let date = months.ceil().to_i64().and_then(|m| {
            if m <= 0 {
                Some(as_of)
            } else {
                u32::try_from(m)
                    .ok()
                    .and_then(|m| as_of.checked_add_months(Months::new(m)))
            }
        });
        if date.is_none() {
            warnings.push("Break-even lies beyond any representable date".into());
        }
        (Some(months), date)
    } else {
        (None, None)
    };

    let savings_at = |months: Decimal| monthly_savings * months - input.closing_costs;
    let life_months = Decimal::from(input.new_term_years * 12);

    let is_worth_it = monthly_savings > Decimal::ZERO
        && break_even_months
            .map(|m| m <= WORTH_IT_HORIZON_MONTHS)
            .unwrap_or(false);

    let result = RefinanceAnalysis {
        current_payment,
        new_payment,
        monthly_savings,
        closing_costs: input.closing_costs,
        break_even_months,
        break_even_date,
        savings_5y: savings_at(dec!(60)),
        savings_10y: savings_at(dec!(120)),
        savings_life: savings_at(life_months),
        is_worth_it,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Refinance Break-Even Analysis",
        input,
        warnings,
        elapsed,
        result,
    ))
}

/// Monthly total with the payoff balance substituted as principal.
fn payment_at(input: &RefinanceInput, rate: Percent, term_years: u32) -> Money {
    let overrides = PaymentOverrides {
        principal: Some(input.current_balance),
        annual_rate: Some(rate),
        term_years: Some(term_years),
    };
    payment::breakdown(&input.params, &overrides).total
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(input: &RefinanceInput) -> MortgageResult<()> {
    if input.current_term_years == 0 {
        return Err(MortgageError::InvalidInput {
            field: "current_term_years".into(),
            reason: "Current term must be at least 1 year".into(),
        });
    }
    if input.new_term_years == 0 {
        return Err(MortgageError::InvalidInput {
            field: "new_term_years".into(),
            reason: "New term must be at least 1 year".into(),
        });
    }
    if input.current_rate < Decimal::ZERO || input.new_rate < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "rate".into(),
            reason: "Rates cannot be negative".into(),
        });
    }
    Ok(())
}

fn collect_warnings(input: &RefinanceInput, warnings: &mut Vec<String>) {
    if input.closing_costs < Decimal::ZERO {
        warnings.push("Closing costs are negative; passed through as stated".into());
    }
    if input.new_rate >= input.current_rate {
        warnings.push("New rate is not below the current rate".into());
    }
    if input.current_balance <= Decimal::ZERO {
        warnings.push("Payoff balance is zero or negative".into());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
