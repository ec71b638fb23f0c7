//! Geekdemy
//!
//! Geekdemy is a billing engine for programme enrolment carts. It reads cart
//! commands, applies pro-membership, enrollment fee and coupon policies in a
//! fixed order, and produces an itemised bill.

pub mod bill;
pub mod cart;
pub mod commands;
pub mod config;
pub mod coupons;
pub mod discounts;
pub mod enrollment;
pub mod logging;
pub mod membership;
pub mod prelude;
pub mod pricing;
pub mod programmes;
pub mod session;
