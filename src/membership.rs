//! Pro membership
//!
//! An active membership adds a flat fee and discounts every programme line by
//! its category's membership rate. The discount always covers the whole cart
//! at bill time, including lines added after activation.

use rusty_money::{Money, iso::Currency};

use crate::{
    discounts::{DiscountError, percent_of},
    pricing::membership_rate,
    programmes::Programme,
};

/// Flat pro-membership fee, in minor units.
pub const PRO_MEMBERSHIP_FEE_MINOR: i64 = 20_000;

/// Pro-membership state of a cart.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ProMembership {
    active: bool,
}

impl ProMembership {
    /// Activate the membership. Activating twice still charges the fee once.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Whether the membership is active
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Membership fee, zero when inactive.
    pub fn fee(&self, currency: &'static Currency) -> Money<'static, Currency> {
        let fee = if self.active {
            PRO_MEMBERSHIP_FEE_MINOR
        } else {
            0
        };

        Money::from_minor(fee, currency)
    }

    /// Sum of `line cost * membership rate` over all programmes, zero when inactive.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if a line cannot be priced or discounted.
    pub fn discount(
        &self,
        programmes: &[Programme],
        currency: &'static Currency,
    ) -> Result<Money<'static, Currency>, DiscountError> {
        let zero = Money::from_minor(0, currency);

        if !self.active {
            return Ok(zero);
        }

        programmes.iter().try_fold(zero, |acc, programme| {
            let line_discount = percent_of(
                programme.line_cost(currency)?,
                &membership_rate(programme.category()),
            )?;

            Ok(acc.add(line_discount)?)
        })
    }
}
