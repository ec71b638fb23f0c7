//! Programmes

use std::fmt;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::pricing::{PricingError, line_cost, unit_price};

/// Errors raised while building a programme line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProgrammeError {
    /// Quantity must be at least one.
    #[error("programme quantity must be at least 1")]
    ZeroQuantity,
}

/// Programme category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    /// Certification programme
    Certification,

    /// Degree programme
    Degree,

    /// Diploma programme
    Diploma,

    /// Any category name the pricing table does not know about.
    ///
    /// Kept on the cart but priced at zero and never discountable.
    Unrecognised,
}

impl Category {
    /// Whether lines of this category count towards the buy-four-get-one threshold.
    pub fn is_discountable(self) -> bool {
        !matches!(self, Category::Unrecognised)
    }
}

impl From<&str> for Category {
    /// Category names match exactly; anything else is [`Category::Unrecognised`].
    fn from(name: &str) -> Self {
        match name {
            "CERTIFICATION" => Category::Certification,
            "DEGREE" => Category::Degree,
            "DIPLOMA" => Category::Diploma,
            _ => Category::Unrecognised,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Certification => "CERTIFICATION",
            Category::Degree => "DEGREE",
            Category::Diploma => "DIPLOMA",
            Category::Unrecognised => "UNRECOGNISED",
        })
    }
}

/// A purchased programme line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Programme {
    category: Category,
    quantity: u32,
}

impl Programme {
    /// Creates a new programme line.
    ///
    /// # Errors
    ///
    /// Returns [`ProgrammeError::ZeroQuantity`] if `quantity` is zero.
    pub fn new(category: Category, quantity: u32) -> Result<Self, ProgrammeError> {
        if quantity == 0 {
            return Err(ProgrammeError::ZeroQuantity);
        }

        Ok(Self { category, quantity })
    }

    /// Programme category
    pub fn category(&self) -> Category {
        self.category
    }

    /// Number of units purchased
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price of a single unit of this programme.
    pub fn unit_price(&self, currency: &'static Currency) -> Money<'static, Currency> {
        unit_price(self.category, currency)
    }

    /// Cost of the whole line (`unit price * quantity`).
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the line cost overflows.
    pub fn line_cost(
        &self,
        currency: &'static Currency,
    ) -> Result<Money<'static, Currency>, PricingError> {
        line_cost(self.category, self.quantity, currency)
    }
}

/// Total quantity across discountable programme lines.
pub fn discountable_quantity(programmes: &[Programme]) -> u64 {
    programmes
        .iter()
        .filter(|programme| programme.category.is_discountable())
        .map(|programme| u64::from(programme.quantity))
        .sum()
}

/// Returns the discountable programme with the cheapest unit price.
///
/// Ties resolve to the earliest line.
pub fn cheapest_discountable<'p>(
    programmes: &'p [Programme],
    currency: &'static Currency,
) -> Option<&'p Programme> {
    programmes
        .iter()
        .filter(|programme| programme.category.is_discountable())
        .min_by_key(|programme| programme.unit_price(currency).to_minor_units())
}
