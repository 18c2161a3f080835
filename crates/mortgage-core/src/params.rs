use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

/// Purchase vs. refinance loan. Affects nothing in the math itself; carried
/// so saved scenarios round-trip the borrower's context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    #[default]
    Purchase,
    Refinance,
}

/// Immutable snapshot of every input the calculator works from.
///
/// All numeric fields default to zero when absent from JSON, so a partially
/// filled form deserialises cleanly instead of failing. `loan_amount` is
/// normally derived (`home_value - down_payment`) but a manual override is
/// honoured until the next home-value or down-payment edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    #[serde(default)]
    pub home_value: Money,
    #[serde(default)]
    pub down_payment: Money,
    /// Financed principal. See [`LoanParameters::with_loan_amount`].
    #[serde(default)]
    pub loan_amount: Money,
    /// Annual rate as a percentage (6.48 = 6.48%).
    #[serde(default)]
    pub interest_rate: Percent,
    #[serde(default = "default_term_years")]
    pub loan_term_years: u32,
    #[serde(default)]
    pub property_tax_yearly: Money,
    /// Annual PMI rate as a percentage of the loan amount.
    #[serde(default)]
    pub pmi_rate_percent: Percent,
    #[serde(default)]
    pub home_insurance_yearly: Money,
    #[serde(default)]
    pub monthly_hoa: Money,
    #[serde(default)]
    pub loan_type: LoanType,
}

fn default_term_years() -> u32 {
    30
}

impl Default for LoanParameters {
    fn default() -> Self {
        Self {
            home_value: Money::ZERO,
            down_payment: Money::ZERO,
            loan_amount: Money::ZERO,
            interest_rate: Percent::ZERO,
            loan_term_years: default_term_years(),
            property_tax_yearly: Money::ZERO,
            pmi_rate_percent: Percent::ZERO,
            home_insurance_yearly: Money::ZERO,
            monthly_hoa: Money::ZERO,
            loan_type: LoanType::default(),
        }
    }
}

impl LoanParameters {
    /// New parameter set with the loan amount derived from value and down payment.
    pub fn new(home_value: Money, down_payment: Money) -> Self {
        Self {
            home_value,
            down_payment,
            loan_amount: home_value - down_payment,
            ..Self::default()
        }
    }

    /// Set the home value and re-derive the loan amount, discarding any
    /// earlier manual override.
    pub fn with_home_value(mut self, home_value: Money) -> Self {
        self.home_value = home_value;
        self.loan_amount = self.home_value - self.down_payment;
        self
    }

    /// Set the down payment and re-derive the loan amount, discarding any
    /// earlier manual override.
    pub fn with_down_payment(mut self, down_payment: Money) -> Self {
        self.down_payment = down_payment;
        self.loan_amount = self.home_value - self.down_payment;
        self
    }

    /// Manually override the financed principal. The override persists until
    /// the next `with_home_value` / `with_down_payment` edit.
    pub fn with_loan_amount(mut self, loan_amount: Money) -> Self {
        self.loan_amount = loan_amount;
        self
    }

    pub fn with_rate(mut self, interest_rate: Percent) -> Self {
        self.interest_rate = interest_rate;
        self
    }

    pub fn with_term_years(mut self, loan_term_years: u32) -> Self {
        self.loan_term_years = loan_term_years;
        self
    }

    /// Down payment as a fraction of home value. None when the home value is
    /// zero (the ratio is undefined, which the PMI rule treats as
    /// not-below-threshold).
    pub fn equity_ratio(&self) -> Option<Decimal> {
        if self.home_value > Decimal::ZERO {
            Some(self.down_payment / self.home_value)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_loan_amount_derived_from_value_and_down() {
        let params = LoanParameters::new(dec!(400_000), dec!(80_000));
        assert_eq!(params.loan_amount, dec!(320_000));
    }

    #[test]
    fn test_manual_override_persists_until_value_edit() {
        let params = LoanParameters::new(dec!(400_000), dec!(80_000))
            .with_loan_amount(dec!(300_000));
        assert_eq!(params.loan_amount, dec!(300_000));

        // Editing home value discards the override.
        let params = params.with_home_value(dec!(410_000));
        assert_eq!(params.loan_amount, dec!(330_000));
    }

    #[test]
    fn test_down_payment_edit_rederives() {
        let params = LoanParameters::new(dec!(400_000), dec!(80_000))
            .with_loan_amount(dec!(1))
            .with_down_payment(dec!(100_000));
        assert_eq!(params.loan_amount, dec!(300_000));
    }

    #[test]
    fn test_equity_ratio_undefined_for_zero_home_value() {
        let params = LoanParameters::new(Decimal::ZERO, dec!(10_000));
        assert_eq!(params.equity_ratio(), None);
    }

    #[test]
    fn test_missing_json_fields_default_to_zero() {
        let params: LoanParameters =
            serde_json::from_str(r#"{"home_value": "250000"}"#).unwrap();
        assert_eq!(params.home_value, dec!(250_000));
        assert_eq!(params.down_payment, Decimal::ZERO);
        assert_eq!(params.monthly_hoa, Decimal::ZERO);
        assert_eq!(params.loan_term_years, 30);
        assert_eq!(params.loan_type, LoanType::Purchase);
    }
}
