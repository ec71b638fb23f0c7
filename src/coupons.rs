//! Coupons
//!
//! The coupon discount policies a cart can select. Percentage coupons discount
//! the pre-coupon payable amount; buy-four-get-one discounts one unit of the
//! cheapest discountable programme once enough units are in the cart.

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::{
    discounts::{DiscountError, percent_of},
    programmes::{Programme, cheapest_discountable, discountable_quantity},
};

/// Discountable units needed before buy-four-get-one takes over.
pub const BUY_FOUR_THRESHOLD: u64 = 4;

/// Cart state a coupon reads when calculating its discount.
#[derive(Debug, Clone, Copy)]
pub struct CouponContext<'c> {
    /// Programme lines in insertion order
    pub programmes: &'c [Programme],

    /// Amount payable before any coupon discount
    pub base: Money<'static, Currency>,
}

/// Coupon discount policy
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Coupon {
    /// One unit of the cheapest discountable programme free once
    /// [`BUY_FOUR_THRESHOLD`] units are in the cart.
    #[default]
    BuyFourGetOneFree,

    /// 20% off the pre-coupon payable amount
    DealG20,

    /// 5% off the pre-coupon payable amount
    DealG5,
}

impl Coupon {
    /// Look up a selectable coupon by label, ignoring case.
    ///
    /// Buy-four-get-one is applied automatically and cannot be requested by label.
    pub fn from_label(label: &str) -> Option<Self> {
        if label.eq_ignore_ascii_case("DEAL_G20") {
            Some(Coupon::DealG20)
        } else if label.eq_ignore_ascii_case("DEAL_G5") {
            Some(Coupon::DealG5)
        } else {
            None
        }
    }

    /// Label printed on the bill.
    pub fn label(self) -> &'static str {
        match self {
            Coupon::BuyFourGetOneFree => "B4G1",
            Coupon::DealG20 => "DEAL_G20",
            Coupon::DealG5 => "DEAL_G5",
        }
    }

    /// Calculate this coupon's discount for the given cart state.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the percentage cannot be represented.
    pub fn discount(
        self,
        context: &CouponContext<'_>,
    ) -> Result<Money<'static, Currency>, DiscountError> {
        match self {
            Coupon::BuyFourGetOneFree => Ok(buy_four_get_one(context)),
            Coupon::DealG20 => percent_off(context, &Percentage::from(Decimal::new(20, 2))),
            Coupon::DealG5 => percent_off(context, &Percentage::from(Decimal::new(5, 2))),
        }
    }
}

impl fmt::Display for Coupon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether the cart holds enough discountable units for buy-four-get-one.
pub fn qualifies_for_buy_four(programmes: &[Programme]) -> bool {
    discountable_quantity(programmes) >= BUY_FOUR_THRESHOLD
}

/// Unit price of the cheapest discountable programme, or zero below the threshold.
fn buy_four_get_one(context: &CouponContext<'_>) -> Money<'static, Currency> {
    let currency = context.base.currency();

    if !qualifies_for_buy_four(context.programmes) {
        return Money::from_minor(0, currency);
    }

    cheapest_discountable(context.programmes, currency).map_or_else(
        || Money::from_minor(0, currency),
        |programme| programme.unit_price(currency),
    )
}

/// Percentage of the pre-coupon base; a negative base earns nothing.
fn percent_off(
    context: &CouponContext<'_>,
    percent: &Percentage,
) -> Result<Money<'static, Currency>, DiscountError> {
    if context.base.is_negative() {
        return Ok(Money::from_minor(0, context.base.currency()));
    }

    percent_of(context.base, percent)
}
