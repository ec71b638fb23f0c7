//! Discounts
//!
//! Percentage arithmetic shared by the coupon and pro-membership policies.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::pricing::PricingError;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Errors bubbled up from line pricing.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Calculate the discount amount in minor units based on a percentage and a minor unit amount.
///
/// Half a minor unit rounds away from zero.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the result cannot be represented.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // `Percentage` only exposes its value through arithmetic
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// Calculate a percentage of a money amount, in the same currency.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the result cannot be represented.
pub fn percent_of(
    amount: Money<'static, Currency>,
    percent: &Percentage,
) -> Result<Money<'static, Currency>, DiscountError> {
    let minor = percent_of_minor(percent, amount.try_to_minor_units()?)?;

    Ok(Money::from_minor(minor, amount.currency()))
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use rusty_money::iso::INR;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let percent = Percentage::from(2.0);
        let result = percent_of_minor(&percent, i64::MAX);

        assert!(matches!(result, Err(DiscountError::PercentConversion)));
    }

    #[test]
    fn percent_of_minor_checked_mul_overflow_returns_error() -> TestResult {
        let percent = Percentage::try_from("100000000000000000000")?;
        let result = percent_of_minor(&percent, i64::MAX);

        assert!(matches!(result, Err(DiscountError::PercentConversion)));

        Ok(())
    }

    #[test]
    fn percent_of_minor_calculates_correctly() -> TestResult {
        let percent = Percentage::from(Decimal::new(20, 2));

        assert_eq!(percent_of_minor(&percent, 990_000)?, 198_000);

        Ok(())
    }

    #[test]
    fn percent_of_minor_rounds_half_away_from_zero() -> TestResult {
        let percent = Percentage::from(Decimal::new(5, 2));

        // 5% of 0.10 is half a minor unit.
        assert_eq!(percent_of_minor(&percent, 10)?, 1);
        assert_eq!(percent_of_minor(&percent, -10)?, -1);

        Ok(())
    }

    #[test]
    fn percent_of_keeps_currency() -> TestResult {
        let percent = Percentage::from(Decimal::new(3, 2));
        let discount = percent_of(Money::from_minor(1_000_000, INR), &percent)?;

        assert_eq!(discount, Money::from_minor(30_000, INR));

        Ok(())
    }
}
