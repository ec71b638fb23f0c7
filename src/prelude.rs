//! Geekdemy prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    bill::{Bill, BillError},
    cart::{Cart, CartError, CouponOutcome},
    commands::{Command, CommandError},
    coupons::{BUY_FOUR_THRESHOLD, Coupon, CouponContext},
    discounts::DiscountError,
    enrollment::EnrollmentFeePolicy,
    membership::ProMembership,
    pricing::PricingError,
    programmes::{Category, Programme, ProgrammeError},
    session::{Flow, Session, SessionError, run_file},
};
