//! Enrollment fee

use rusty_money::{Money, MoneyError, iso::Currency};

/// Flat enrollment fee charged on small carts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EnrollmentFeePolicy {
    fee_minor: i64,
    threshold_minor: i64,
}

impl EnrollmentFeePolicy {
    /// Charge `fee_minor` whenever the subtotal is strictly below `threshold_minor`.
    pub const fn new(fee_minor: i64, threshold_minor: i64) -> Self {
        Self {
            fee_minor,
            threshold_minor,
        }
    }

    /// Enrollment fee for a raw, pre-discount subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtotal is not a whole number of minor units
    /// that fits in an `i64`.
    pub fn fee_for(
        &self,
        subtotal: Money<'static, Currency>,
    ) -> Result<Money<'static, Currency>, MoneyError> {
        let fee = if subtotal.try_to_minor_units()? < self.threshold_minor {
            self.fee_minor
        } else {
            0
        };

        Ok(Money::from_minor(fee, subtotal.currency()))
    }
}

impl Default for EnrollmentFeePolicy {
    /// 500 below a subtotal of 6666.
    fn default() -> Self {
        Self::new(50_000, 666_600)
    }
}
