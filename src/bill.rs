//! Bill

use std::io;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::coupons::Coupon;

/// Label printed when no coupon applied.
pub const NO_COUPON_LABEL: &str = "NONE";

/// Errors that can occur when writing a bill.
#[derive(Debug, Error)]
pub enum BillError {
    /// Writing to the output failed.
    #[error("failed to write bill: {0}")]
    Io(#[from] io::Error),
}

/// Final itemised bill for a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Bill {
    /// Sum of all programme line costs
    subtotal: Money<'static, Currency>,

    /// Pro-membership discount across all lines
    pro_membership_discount: Money<'static, Currency>,

    /// Flat pro-membership fee
    pro_membership_fee: Money<'static, Currency>,

    /// Enrollment fee charged on small carts
    enrollment_fee: Money<'static, Currency>,

    /// Coupon that actually applied, if any
    coupon: Option<Coupon>,

    /// Discount granted by `coupon`
    coupon_discount: Money<'static, Currency>,

    /// Amount payable
    total: Money<'static, Currency>,
}

impl Bill {
    /// Create a new bill with the given details.
    pub fn new(
        subtotal: Money<'static, Currency>,
        pro_membership_discount: Money<'static, Currency>,
        pro_membership_fee: Money<'static, Currency>,
        enrollment_fee: Money<'static, Currency>,
        coupon: Option<Coupon>,
        coupon_discount: Money<'static, Currency>,
        total: Money<'static, Currency>,
    ) -> Self {
        Self {
            subtotal,
            pro_membership_discount,
            pro_membership_fee,
            enrollment_fee,
            coupon,
            coupon_discount,
            total,
        }
    }

    /// Sum of all programme line costs
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }

    /// Pro-membership discount
    pub fn pro_membership_discount(&self) -> Money<'static, Currency> {
        self.pro_membership_discount
    }

    /// Pro-membership fee
    pub fn pro_membership_fee(&self) -> Money<'static, Currency> {
        self.pro_membership_fee
    }

    /// Enrollment fee
    pub fn enrollment_fee(&self) -> Money<'static, Currency> {
        self.enrollment_fee
    }

    /// Coupon that applied, if any
    pub fn coupon(&self) -> Option<Coupon> {
        self.coupon
    }

    /// Coupon discount
    pub fn coupon_discount(&self) -> Money<'static, Currency> {
        self.coupon_discount
    }

    /// Amount payable
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Label of the applied coupon, or [`NO_COUPON_LABEL`].
    pub fn coupon_label(&self) -> &'static str {
        self.coupon.map_or(NO_COUPON_LABEL, Coupon::label)
    }

    /// Writes the bill, one field per line with two decimal places.
    ///
    /// # Errors
    ///
    /// Returns a [`BillError`] if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), BillError> {
        writeln!(out, "SUB_TOTAL  {}", fixed_point(self.subtotal))?;
        writeln!(
            out,
            "TOTAL_PRO_DISCOUNT   {}",
            fixed_point(self.pro_membership_discount)
        )?;
        writeln!(
            out,
            "PRO_MEMBERSHIP_FEE   {}",
            fixed_point(self.pro_membership_fee)
        )?;
        writeln!(out, "ENROLLMENT_FEE   {}", fixed_point(self.enrollment_fee))?;
        writeln!(
            out,
            "COUPON_DISCOUNT   {}    {}",
            self.coupon_label(),
            fixed_point(self.coupon_discount)
        )?;
        writeln!(out, "TOTAL   {}", fixed_point(self.total))?;

        Ok(())
    }
}

/// Amount rendered with exactly two decimal places and no currency symbol.
fn fixed_point(money: Money<'static, Currency>) -> String {
    format!("{:.2}", money.amount())
}
