//! Commands
//!
//! One command per input line, fields separated by whitespace.

use std::str::FromStr;

use smallvec::SmallVec;
use thiserror::Error;

use crate::programmes::{Category, Programme, ProgrammeError};

/// Reasons a command line is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The line has no fields.
    #[error("empty command line")]
    Empty,

    /// The first field is not a known command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The command has the wrong number of fields.
    #[error("{command} expects {expected} argument(s), found {found}")]
    Arity {
        /// Command keyword
        command: &'static str,
        /// Number of arguments expected
        expected: usize,
        /// Number of arguments found
        found: usize,
    },

    /// The quantity field is not a whole number.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// The programme line is invalid.
    #[error(transparent)]
    Programme(#[from] ProgrammeError),
}

/// A parsed input command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `ADD_PROGRAMME <CATEGORY> <QUANTITY>`
    AddProgramme(Programme),

    /// `PRO_MEMBERSHIP <Y|other>`; `true` only for `Y`, ignoring case.
    ProMembership(bool),

    /// `APPLY_COUPON <LABEL>`
    ApplyCoupon(String),

    /// `PRINT_BILL`
    PrintBill,
}

impl Command {
    /// Keyword for adding a programme
    pub const ADD_PROGRAMME: &'static str = "ADD_PROGRAMME";

    /// Keyword for pro membership
    pub const PRO_MEMBERSHIP: &'static str = "PRO_MEMBERSHIP";

    /// Keyword for applying a coupon
    pub const APPLY_COUPON: &'static str = "APPLY_COUPON";

    /// Keyword for printing the bill
    pub const PRINT_BILL: &'static str = "PRINT_BILL";

    /// Parse a single input line. Blank lines parse to `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] if the line is not a well-formed command.
    pub fn parse_line(line: &str) -> Result<Option<Self>, CommandError> {
        let fields: SmallVec<[&str; 4]> = line.split_whitespace().collect();

        let Some((&keyword, args)) = fields.split_first() else {
            return Ok(None);
        };

        let command = match keyword {
            Self::ADD_PROGRAMME => {
                let [category, quantity] = expect_args::<2>(Self::ADD_PROGRAMME, args)?;

                let quantity = quantity
                    .parse::<u32>()
                    .map_err(|_err| CommandError::InvalidQuantity(quantity.to_string()))?;

                Command::AddProgramme(Programme::new(Category::from(category), quantity)?)
            }
            Self::PRO_MEMBERSHIP => {
                let [answer] = expect_args::<1>(Self::PRO_MEMBERSHIP, args)?;

                Command::ProMembership(answer.eq_ignore_ascii_case("Y"))
            }
            Self::APPLY_COUPON => {
                let [label] = expect_args::<1>(Self::APPLY_COUPON, args)?;

                Command::ApplyCoupon(label.to_string())
            }
            Self::PRINT_BILL => {
                let [] = expect_args::<0>(Self::PRINT_BILL, args)?;

                Command::PrintBill
            }
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}

impl FromStr for Command {
    type Err = CommandError;

    /// Parse a non-blank command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse_line(s)?.ok_or(CommandError::Empty)
    }
}

/// Check the argument count and hand the arguments back as an array.
fn expect_args<'l, const N: usize>(
    command: &'static str,
    args: &[&'l str],
) -> Result<[&'l str; N], CommandError> {
    <[&str; N]>::try_from(args).map_err(|_err| CommandError::Arity {
        command,
        expected: N,
        found: args.len(),
    })
}
