//! Pricing
//!
//! Fixed rate card for programme categories: unit price and the pro-membership
//! discount rate applied to each line.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::programmes::{Category, Programme};

/// Errors that can occur while pricing programme lines.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Line cost does not fit in minor units.
    #[error("line cost overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Unit price of a category, in minor units.
const fn unit_price_minor(category: Category) -> i64 {
    match category {
        Category::Certification => 300_000,
        Category::Degree => 500_000,
        Category::Diploma => 250_000,
        Category::Unrecognised => 0,
    }
}

/// Price of a single unit of the given category.
pub fn unit_price(category: Category, currency: &'static Currency) -> Money<'static, Currency> {
    Money::from_minor(unit_price_minor(category), currency)
}

/// Pro-membership discount rate for the given category.
pub fn membership_rate(category: Category) -> Percentage {
    let points = match category {
        Category::Certification => 2,
        Category::Degree => 3,
        Category::Diploma => 1,
        Category::Unrecognised => 0,
    };

    Percentage::from(Decimal::new(points, 2))
}

/// Cost of `quantity` units of a category.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the cost cannot be represented.
pub fn line_cost(
    category: Category,
    quantity: u32,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PricingError> {
    let minor = unit_price_minor(category)
        .checked_mul(i64::from(quantity))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor, currency))
}

/// Calculates the sum of all programme line costs.
///
/// An empty list totals to zero.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: a line cost or the running total does not fit in minor units.
pub fn total_price(
    programmes: &[Programme],
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PricingError> {
    let minor = programmes.iter().try_fold(0_i64, |acc, programme| {
        let line = unit_price_minor(programme.category())
            .checked_mul(i64::from(programme.quantity()))
            .ok_or(PricingError::Overflow)?;

        acc.checked_add(line).ok_or(PricingError::Overflow)
    })?;

    Ok(Money::from_minor(minor, currency))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::INR;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn unit_prices_match_rate_card() {
        assert_eq!(
            unit_price(Category::Certification, INR),
            Money::from_minor(300_000, INR)
        );
        assert_eq!(unit_price(Category::Degree, INR), Money::from_minor(500_000, INR));
        assert_eq!(unit_price(Category::Diploma, INR), Money::from_minor(250_000, INR));
        assert_eq!(unit_price(Category::Unrecognised, INR), Money::from_minor(0, INR));
    }

    #[test]
    fn membership_rates_match_rate_card() {
        let rate = |category| membership_rate(category) * Decimal::ONE;

        assert_eq!(rate(Category::Certification), Decimal::new(2, 2));
        assert_eq!(rate(Category::Degree), Decimal::new(3, 2));
        assert_eq!(rate(Category::Diploma), Decimal::new(1, 2));
        assert_eq!(rate(Category::Unrecognised), Decimal::ZERO);
    }

    #[test]
    fn line_cost_handles_large_quantities() {
        assert_eq!(
            line_cost(Category::Degree, u32::MAX, INR).map(|m| m.to_minor_units()),
            Ok(500_000 * i64::from(u32::MAX))
        );
    }

    #[test]
    fn test_total_price() -> TestResult {
        let programmes = [
            Programme::new(Category::Certification, 1)?,
            Programme::new(Category::Degree, 2)?,
            Programme::new(Category::Unrecognised, 3)?,
        ];

        assert_eq!(
            total_price(&programmes, INR)?,
            Money::from_minor(1_300_000, INR)
        );

        Ok(())
    }

    #[test]
    fn total_price_overflow_is_an_error() -> TestResult {
        // Each line is about 2.1e15 minor units; i64 runs out before 4300 of them.
        let programmes = vec![Programme::new(Category::Degree, u32::MAX)?; 4300];

        assert_eq!(total_price(&programmes, INR), Err(PricingError::Overflow));

        Ok(())
    }

    #[test]
    fn test_total_price_empty() -> TestResult {
        assert_eq!(total_price(&[], INR)?, Money::from_minor(0, INR));

        Ok(())
    }
}
