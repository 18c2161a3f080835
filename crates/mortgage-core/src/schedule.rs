//! Year-by-year amortization of a fixed-payment loan.
//!
//! The P&I payment is computed once and held fixed across the whole schedule;
//! only the interest split is recomputed from the running balance each month.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::params::LoanParameters;
use crate::payment::{self, PaymentOverrides};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Amortization schedule input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    #[serde(flatten)]
    pub params: LoanParameters,
    #[serde(default)]
    pub overrides: PaymentOverrides,
}

/// One year of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationYear {
    /// 1-based year index.
    pub year: u32,
    pub principal_paid: Money,
    pub interest_paid: Money,
    /// End-of-year balance, floored at zero.
    pub remaining_balance: Money,
    /// Flat yearly property tax. Not re-estimated over time.
    pub property_tax: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the full amortization schedule, one row per loan year.
pub fn compute_schedule(
    input: &ScheduleInput,
) -> MortgageResult<ComputationOutput<Vec<AmortizationYear>>> {
    let start = Instant::now();

    payment::validate(&input.params, &input.overrides)?;

    let principal = input.overrides.principal.unwrap_or(input.params.loan_amount);
    let annual_rate = input
        .overrides
        .annual_rate
        .unwrap_or(input.params.interest_rate);
    let term_years = input
        .overrides
        .term_years
        .unwrap_or(input.params.loan_term_years);

    let rows = build_schedule(
        principal,
        annual_rate,
        term_years,
        input.params.property_tax_yearly,
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Payment Amortization Schedule",
        input,
        Vec::new(),
        elapsed,
        rows,
    ))
}

/// Pure schedule sweep. Produces exactly `term_years` rows.
pub fn build_schedule(
    principal: Money,
    annual_rate: Percent,
    term_years: u32,
    property_tax_yearly: Money,
) -> Vec<AmortizationYear> {
    let monthly_rate = annual_rate / PERCENT / MONTHS_PER_YEAR;
    let pi = payment::monthly_principal_and_interest(principal, annual_rate, term_years);

    let mut rows = Vec::with_capacity(term_years as usize);
    let mut balance = principal;

    for year in 1..=term_years {
        let mut principal_paid = Decimal::ZERO;
        let mut interest_paid = Decimal::ZERO;

        for _ in 0..12 {
            let interest = balance * monthly_rate;
            let principal_portion = pi - interest;
            principal_paid += principal_portion;
            interest_paid += interest;
            balance -= principal_portion;
        }

        rows.push(AmortizationYear {
            year,
            principal_paid,
            interest_paid,
            remaining_balance: balance.max(Decimal::ZERO),
            property_tax: property_tax_yearly,
        });
    }

    rows
}

/// Total interest paid over the life of the loan at the given terms.
pub fn total_interest(principal: Money, annual_rate: Percent, term_years: u32) -> Money {
    build_schedule(principal, annual_rate, term_years, Decimal::ZERO)
        .iter()
        .map(|row| row.interest_paid)
        .sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TOL: Decimal = dec!(0.01);

    #[test]
    fn test_row_count_matches_term() {
        let rows = build_schedule(dec!(320_000), dec!(6.48), 30, Decimal::ZERO);
        assert_eq!(rows.len(), 30);
        assert_eq!(rows[0].year, 1);
        assert_eq!(rows[29].year, 30);
    }

    #[test]
    fn test_final_balance_amortises_to_zero() {
        let rows = build_schedule(dec!(320_000), dec!(6.48), 30, Decimal::ZERO);
        let last = rows.last().unwrap();
        assert!(
            last.remaining_balance < TOL,
            "expected ~0, got {}",
            last.remaining_balance
        );
    }

    #[test]
    fn test_balance_monotonically_decreasing() {
        let rows = build_schedule(dec!(320_000), dec!(6.48), 30, Decimal::ZERO);
        let mut prev = dec!(320_000);
        for row in &rows {
            assert!(
                row.remaining_balance <= prev,
                "year {}: balance {} should be <= {}",
                row.year,
                row.remaining_balance,
                prev
            );
            prev = row.remaining_balance;
        }
    }

    #[test]
    fn test_principal_plus_interest_is_constant_per_year() {
        // Each year's principal + interest must equal 12 * the fixed payment.
        let pi = payment::monthly_principal_and_interest(dec!(320_000), dec!(6.48), 30);
        let rows = build_schedule(dec!(320_000), dec!(6.48), 30, Decimal::ZERO);
        for row in &rows {
            let paid = row.principal_paid + row.interest_paid;
            assert!(
                (paid - pi * dec!(12)).abs() < TOL,
                "year {}: paid {} vs expected {}",
                row.year,
                paid,
                pi * dec!(12)
            );
        }
    }

    #[test]
    fn test_property_tax_flat_across_rows() {
        let rows = build_schedule(dec!(320_000), dec!(6.48), 30, dec!(4_800));
        assert!(rows.iter().all(|r| r.property_tax == dec!(4_800)));
    }

    #[test]
    fn test_zero_rate_schedule() {
        let rows = build_schedule(dec!(120_000), Decimal::ZERO, 10, Decimal::ZERO);
        assert_eq!(rows.len(), 10);
        // 1000/month, 12k principal per year, no interest.
        for row in &rows {
            assert_eq!(row.interest_paid, Decimal::ZERO);
            assert_eq!(row.principal_paid, dec!(12_000));
        }
        assert_eq!(rows.last().unwrap().remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_fixed_payment_always_covers_first_month_interest() {
        // The annuity payment is P*r*c/(c-1) with c > 1, so it strictly
        // exceeds interest-only P*r for r > 0 and equals P/n at r = 0. The
        // balance therefore shrinks from the first month at any rate.
        for rate in [dec!(0), dec!(0.125), dec!(6.48), dec!(15), dec!(25)] {
            let principal = dec!(320_000);
            let pi = payment::monthly_principal_and_interest(principal, rate, 30);
            let first_month_interest = principal * (rate / PERCENT / MONTHS_PER_YEAR);
            assert!(
                pi > first_month_interest,
                "rate {rate}: payment {pi} vs interest {first_month_interest}"
            );

            let rows = build_schedule(principal, rate, 30, Decimal::ZERO);
            assert!(rows[0].remaining_balance < principal);
            assert!(rows[0].principal_paid > Decimal::ZERO);
        }
    }

    #[test]
    fn test_envelope_and_warning_free_loan() {
        let input = ScheduleInput {
            params: LoanParameters::new(dec!(400_000), dec!(80_000)).with_rate(dec!(6.48)),
            overrides: PaymentOverrides::default(),
        };
        let out = compute_schedule(&input).unwrap();
        assert_eq!(out.result.len(), 30);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_total_interest_positive_rate() {
        let total = total_interest(dec!(320_000), dec!(6.48), 30);
        // Python reference: ~406627.80 total interest over the loan.
        assert!(
            (total - dec!(406_627.80)).abs() < dec!(1),
            "total interest {total}"
        );
    }
}
