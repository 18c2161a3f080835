//! Rate sweep around the current quote: what the monthly total and lifetime
//! interest look like at nearby rates.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageError;
use crate::params::LoanParameters;
use crate::payment::{self, PaymentOverrides};
use crate::schedule;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageResult;

/// Default sweep half-width in percentage points.
pub const DEFAULT_SWEEP_SPREAD: Decimal = dec!(2.0);

/// Default sweep step. 0.125 matches the eighth-point increments lenders quote.
pub const DEFAULT_SWEEP_STEP: Decimal = dec!(0.125);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Sweep configuration: candidate rates cover current ± spread at `step`
/// increments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSweep {
    #[serde(default = "default_spread")]
    pub spread: Percent,
    #[serde(default = "default_step")]
    pub step: Percent,
}

fn default_spread() -> Percent {
    DEFAULT_SWEEP_SPREAD
}

fn default_step() -> Percent {
    DEFAULT_SWEEP_STEP
}

impl Default for RateSweep {
    fn default() -> Self {
        Self {
            spread: DEFAULT_SWEEP_SPREAD,
            step: DEFAULT_SWEEP_STEP,
        }
    }
}

/// Rate comparison input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateComparisonInput {
    #[serde(flatten)]
    pub params: LoanParameters,
    #[serde(default)]
    pub sweep: RateSweep,
}

/// One candidate rate in the sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateComparisonRow {
    /// Candidate annual rate, rounded to 3 decimal places.
    pub rate: Percent,
    pub monthly_total: Money,
    /// Interest paid over the full term at this rate.
    pub total_interest: Money,
    /// Current monthly total minus this candidate's. Positive means the
    /// candidate rate is cheaper.
    pub monthly_savings: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Sweep candidate rates around the current one and compare monthly totals
/// and lifetime interest. Rows are ordered by ascending rate and de-duplicated
/// after rounding to 3 decimal places; non-positive candidates are skipped.
pub fn compute_rate_comparisons(
    input: &RateComparisonInput,
) -> MortgageResult<ComputationOutput<Vec<RateComparisonRow>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    payment::validate(&input.params, &PaymentOverrides::default())?;
    validate_sweep(&input.sweep)?;

    let current_total = payment::breakdown(&input.params, &PaymentOverrides::default()).total;

    let term_years = input.params.loan_term_years;
    let principal = input.params.loan_amount;

    let mut rows: Vec<RateComparisonRow> = Vec::new();
    let mut candidate = input.params.interest_rate - input.sweep.spread;
    let stop = input.params.interest_rate + input.sweep.spread;

    while candidate <= stop {
        if candidate > Decimal::ZERO {
            let rate = candidate.round_dp(3);
            // Rounding can collapse adjacent steps; keep only the first.
            if rows.last().map(|r| r.rate) != Some(rate) {
                let overrides = PaymentOverrides {
                    annual_rate: Some(rate),
                    ..Default::default()
                };
                let monthly_total = payment::breakdown(&input.params, &overrides).total;
                let total_interest = schedule::total_interest(principal, rate, term_years);

                rows.push(RateComparisonRow {
                    rate,
                    monthly_total,
                    total_interest,
                    monthly_savings: current_total - monthly_total,
                });
            }
        }
        candidate += input.sweep.step;
    }

    if rows.is_empty() {
        warnings.push("Sweep produced no positive candidate rates".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Rate Sweep Comparison",
        input,
        warnings,
        elapsed,
        rows,
    ))
}

fn validate_sweep(sweep: &RateSweep) -> MortgageResult<()> {
    if sweep.step <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "sweep.step".into(),
            reason: "Sweep step must be positive".into(),
        });
    }
    if sweep.spread < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "sweep.spread".into(),
            reason: "Sweep spread cannot be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn standard_input() -> RateComparisonInput {
        RateComparisonInput {
            params: LoanParameters::new(dec!(400_000), dec!(80_000))
                .with_rate(dec!(6.48))
                .with_term_years(30),
            sweep: RateSweep::default(),
        }
    }

    #[test]
    fn test_savings_zero_at_current_rate() {
        let out = compute_rate_comparisons(&standard_input()).unwrap();
        let at_current = out
            .result
            .iter()
            .find(|r| r.rate == dec!(6.48))
            .expect("current rate must appear in the sweep");
        assert_eq!(at_current.monthly_savings, Decimal::ZERO);
    }

    #[test]
    fn test_rows_ascending_and_unique() {
        let out = compute_rate_comparisons(&standard_input()).unwrap();
        for pair in out.result.windows(2) {
            assert!(pair[0].rate < pair[1].rate);
        }
    }

    #[test]
    fn test_sweep_bounds() {
        let out = compute_rate_comparisons(&standard_input()).unwrap();
        let first = out.result.first().unwrap();
        let last = out.result.last().unwrap();
        assert_eq!(first.rate, dec!(4.48));
        assert_eq!(last.rate, dec!(8.48));
        // 4.48..=8.48 in 0.125 steps
        assert_eq!(out.result.len(), 33);
    }

    #[test]
    fn test_lower_rate_is_cheaper() {
        let out = compute_rate_comparisons(&standard_input()).unwrap();
        let first = out.result.first().unwrap();
        let last = out.result.last().unwrap();
        assert!(first.monthly_savings > Decimal::ZERO);
        assert!(last.monthly_savings < Decimal::ZERO);
        assert!(first.total_interest < last.total_interest);
    }

    #[test]
    fn test_non_positive_candidates_skipped() {
        let mut input = standard_input();
        input.params.interest_rate = dec!(1.0);
        // Sweep from -1.0 to 3.0; only positive candidates survive.
        let out = compute_rate_comparisons(&input).unwrap();
        assert!(out.result.iter().all(|r| r.rate > Decimal::ZERO));
        assert_eq!(out.result.first().unwrap().rate, dec!(0.125));
    }

    #[test]
    fn test_validation_zero_step() {
        let mut input = standard_input();
        input.sweep.step = Decimal::ZERO;
        assert!(compute_rate_comparisons(&input).is_err());
    }

    #[test]
    fn test_rounding_deduplicates() {
        let mut input = standard_input();
        // A step below rounding resolution collapses adjacent candidates.
        input.sweep.step = dec!(0.0004);
        input.sweep.spread = dec!(0.002);
        let out = compute_rate_comparisons(&input).unwrap();
        let mut rates: Vec<_> = out.result.iter().map(|r| r.rate).collect();
        let before = rates.len();
        rates.dedup();
        assert_eq!(before, rates.len());
    }
}
