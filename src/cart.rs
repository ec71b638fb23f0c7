//! Cart
//!
//! The cart owns the programme lines and the selected policies, and assembles
//! the bill in a fixed order:
//!
//! 1. subtotal
//! 2. pro-membership discount
//! 3. enrollment fee (gated on the raw subtotal)
//! 4. coupon discount, against `subtotal + enrollment fee + membership fee - membership discount`
//! 5. total

use rusty_money::{
    Money, MoneyError,
    iso::{Currency, INR},
};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    bill::Bill,
    coupons::{Coupon, CouponContext, qualifies_for_buy_four},
    discounts::DiscountError,
    enrollment::EnrollmentFeePolicy,
    membership::ProMembership,
    pricing::{PricingError, total_price},
    programmes::Programme,
};

/// Errors that can occur while computing a bill.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// Error pricing programme lines.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Error calculating a discount.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Result of an apply-coupon request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CouponOutcome {
    /// The coupon is now the cart's coupon.
    Applied(Coupon),

    /// A coupon was already applied this session; the request was ignored.
    AlreadyApplied(Coupon),

    /// The label matched no coupon; nothing changed.
    Unrecognised,
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart {
    programmes: Vec<Programme>,
    coupon: Coupon,
    applied_coupon: Option<Coupon>,
    enrollment: EnrollmentFeePolicy,
    membership: ProMembership,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new, empty cart billed in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            programmes: Vec::new(),
            coupon: Coupon::default(),
            applied_coupon: None,
            enrollment: EnrollmentFeePolicy::default(),
            membership: ProMembership::default(),
            currency,
        }
    }

    /// Replace the enrollment fee policy.
    #[must_use]
    pub fn with_enrollment_policy(mut self, enrollment: EnrollmentFeePolicy) -> Self {
        self.enrollment = enrollment;
        self
    }

    /// Append a programme line.
    pub fn add_programme(&mut self, programme: Programme) {
        debug!(
            category = %programme.category(),
            quantity = programme.quantity(),
            "added programme"
        );

        self.programmes.push(programme);
    }

    /// Activate pro membership.
    pub fn activate_pro_membership(&mut self) {
        debug!("activated pro membership");

        self.membership.activate();
    }

    /// Request a coupon by label.
    ///
    /// Only the first successful request in a session takes effect. Once the
    /// cart qualifies for buy-four-get-one, any label applies that instead.
    pub fn apply_coupon(&mut self, label: &str) -> CouponOutcome {
        if let Some(applied) = self.applied_coupon {
            return CouponOutcome::AlreadyApplied(applied);
        }

        let coupon = if qualifies_for_buy_four(&self.programmes) {
            Coupon::BuyFourGetOneFree
        } else if let Some(coupon) = Coupon::from_label(label) {
            coupon
        } else {
            return CouponOutcome::Unrecognised;
        };

        self.coupon = coupon;
        self.applied_coupon = Some(coupon);

        CouponOutcome::Applied(coupon)
    }

    /// Programme lines in insertion order
    pub fn programmes(&self) -> &[Programme] {
        &self.programmes
    }

    /// Coupon applied by request, if any
    pub fn applied_coupon(&self) -> Option<Coupon> {
        self.applied_coupon
    }

    /// Whether pro membership is active
    pub fn is_pro_member(&self) -> bool {
        self.membership.is_active()
    }

    /// Compute the bill for the current cart state.
    ///
    /// Does not modify the cart, so repeated calls give the same bill.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if pricing, discount or money arithmetic fails.
    pub fn bill(&self) -> Result<Bill, CartError> {
        let subtotal = total_price(&self.programmes, self.currency)?;
        let pro_membership_discount = self.membership.discount(&self.programmes, self.currency)?;
        let pro_membership_fee = self.membership.fee(self.currency);
        let enrollment_fee = self.enrollment.fee_for(subtotal)?;

        let base = subtotal
            .add(enrollment_fee)?
            .add(pro_membership_fee)?
            .sub(pro_membership_discount)?;

        let (coupon, coupon_discount) = self.coupon_discount(base)?;

        let total = base.sub(coupon_discount)?;
        let total_minor = total.try_to_minor_units()?;

        info!(
            subtotal = subtotal.try_to_minor_units()?,
            total = total_minor,
            coupon = coupon.map_or("none", Coupon::label),
            "computed bill"
        );

        Ok(Bill::new(
            subtotal,
            pro_membership_discount,
            pro_membership_fee,
            enrollment_fee,
            coupon,
            coupon_discount,
            total,
        ))
    }

    /// The coupon that actually applies, with its discount.
    ///
    /// Buy-four-get-one overrides any requested coupon once the cart qualifies.
    fn coupon_discount(
        &self,
        base: Money<'static, Currency>,
    ) -> Result<(Option<Coupon>, Money<'static, Currency>), CartError> {
        let context = CouponContext {
            programmes: &self.programmes,
            base,
        };

        let qualifies = qualifies_for_buy_four(&self.programmes);

        let coupon = if qualifies {
            Coupon::BuyFourGetOneFree
        } else {
            self.coupon
        };

        let discount = coupon.discount(&context)?;
        let shown = (qualifies || self.applied_coupon.is_some()).then_some(coupon);

        Ok((shown, discount))
    }
}

impl Default for Cart {
    /// An empty cart billed in Indian rupees.
    fn default() -> Self {
        Self::new(INR)
    }
}
