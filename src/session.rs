//! Session
//!
//! Drives one cart through a command script. Malformed lines are logged and
//! skipped; the bill is produced on `PRINT_BILL`, or at the end of the script
//! if it never appears.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, debug_span, warn};

use crate::{
    bill::{Bill, BillError},
    cart::{Cart, CartError, CouponOutcome},
    commands::Command,
};

/// Errors that end a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The input file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path of the input file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// The bill could not be computed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The bill could not be written.
    #[error(transparent)]
    Bill(#[from] BillError),
}

/// Whether the session should keep reading commands.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command.
    Continue,

    /// Stop and print the bill.
    PrintBill,
}

/// A single billing session over one cart.
#[derive(Debug, Default)]
pub struct Session {
    cart: Cart,
}

impl Session {
    /// Start a session over the given cart.
    pub fn new(cart: Cart) -> Self {
        Self { cart }
    }

    /// The session's cart
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Apply one command to the cart.
    pub fn execute(&mut self, command: Command) -> Flow {
        match command {
            Command::AddProgramme(programme) => self.cart.add_programme(programme),
            Command::ProMembership(true) => self.cart.activate_pro_membership(),
            Command::ProMembership(false) => debug!("pro membership declined"),
            Command::ApplyCoupon(label) => match self.cart.apply_coupon(&label) {
                CouponOutcome::Applied(coupon) => debug!(%coupon, "applied coupon"),
                CouponOutcome::AlreadyApplied(applied) => warn!(
                    label = label.as_str(),
                    %applied,
                    "ignoring coupon, one is already applied"
                ),
                CouponOutcome::Unrecognised => {
                    warn!(label = label.as_str(), "ignoring unrecognised coupon");
                }
            },
            Command::PrintBill => return Flow::PrintBill,
        }

        Flow::Continue
    }

    /// Run every line of `script` up to the first `PRINT_BILL`, then bill the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the bill cannot be computed.
    pub fn run_script(&mut self, script: &str) -> Result<Bill, CartError> {
        for (idx, line) in script.lines().enumerate() {
            let line_no = idx + 1;
            let _line = debug_span!("line", line = line_no).entered();

            let command = match Command::parse_line(line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(error) => {
                    warn!(%error, "skipping malformed command");
                    continue;
                }
            };

            if self.execute(command) == Flow::PrintBill {
                debug!("print bill requested");
                break;
            }
        }

        self.cart.bill()
    }
}

/// Read the command file at `path`, run it through a fresh session and write the bill to `out`.
///
/// The whole file is read before any command runs, so a read failure prints nothing.
///
/// # Errors
///
/// Returns a [`SessionError`] if the file cannot be read, or the bill cannot be computed or written.
pub fn run_file(path: &Path, out: impl io::Write) -> Result<Bill, SessionError> {
    let script = fs::read_to_string(path).map_err(|source| SessionError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let bill = Session::default().run_script(&script)?;

    bill.write_to(out)?;

    Ok(bill)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusty_money::{Money, iso::INR};
    use testresult::TestResult;

    use crate::{
        coupons::Coupon,
        programmes::{Category, Programme},
    };

    use super::*;

    #[test]
    fn execute_reports_print_bill() -> TestResult {
        let mut session = Session::default();

        assert_eq!(
            session.execute(Command::AddProgramme(Programme::new(Category::Diploma, 1)?)),
            Flow::Continue
        );
        assert_eq!(session.execute(Command::PrintBill), Flow::PrintBill);
        assert_eq!(session.cart().programmes().len(), 1);

        Ok(())
    }

    #[test]
    fn declined_membership_leaves_cart_unchanged() {
        let mut session = Session::default();
        session.execute(Command::ProMembership(false));

        assert!(!session.cart().is_pro_member());
    }

    #[test]
    fn run_script_skips_malformed_lines() -> TestResult {
        let script = "ADD_PROGRAMME DEGREE\n\
                      ADD_PROGRAMME DEGREE x\n\
                      FOO BAR\n\
                      \n\
                      ADD_PROGRAMME DIPLOMA 1\n\
                      PRINT_BILL\n";

        let mut session = Session::default();
        let bill = session.run_script(script)?;

        assert_eq!(session.cart().programmes().len(), 1);
        assert_eq!(bill.subtotal(), Money::from_minor(250_000, INR));

        Ok(())
    }

    #[test]
    fn run_script_stops_at_print_bill() -> TestResult {
        let script = "ADD_PROGRAMME CERTIFICATION 1\n\
                      PRINT_BILL\n\
                      ADD_PROGRAMME DEGREE 5\n";

        let bill = Session::default().run_script(script)?;

        assert_eq!(bill.subtotal(), Money::from_minor(300_000, INR));
        assert_eq!(bill.coupon(), None);

        Ok(())
    }

    #[test]
    fn run_script_bills_at_end_without_print_bill() -> TestResult {
        let script = "ADD_PROGRAMME DIPLOMA 1\nAPPLY_COUPON DEAL_G5";

        let bill = Session::default().run_script(script)?;

        assert_eq!(bill.coupon(), Some(Coupon::DealG5));

        Ok(())
    }

    #[derive(Debug, Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> anyhow::Result<String> {
            let buf = self
                .0
                .lock()
                .map_err(|_err| anyhow::anyhow!("log buffer poisoned"))?;

            Ok(String::from_utf8(buf.clone())?)
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .map_err(|_err| io::Error::other("log buffer poisoned"))?
                .extend_from_slice(buf);

            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn ignored_coupons_are_logged_with_their_line() -> TestResult {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();

        let script = "ADD_PROGRAMME DEGREE 1\n\
                      APPLY_COUPON DEAL_G50\n\
                      APPLY_COUPON DEAL_G5\n\
                      APPLY_COUPON DEAL_G20\n";

        let bill = tracing::subscriber::with_default(subscriber, || {
            Session::default().run_script(script)
        })?;
        let output = logs.contents()?;

        let unrecognised = output
            .lines()
            .find(|line| line.contains("ignoring unrecognised coupon"));
        let already_applied = output
            .lines()
            .find(|line| line.contains("one is already applied"));

        assert_eq!(bill.coupon(), Some(Coupon::DealG5));
        assert!(
            unrecognised.is_some_and(|line| line.contains("line{line=2}")),
            "unrecognised coupon logged against line 2:\n{output}"
        );
        assert!(
            already_applied.is_some_and(|line| line.contains("line{line=4}")),
            "second coupon logged against line 4:\n{output}"
        );

        Ok(())
    }

    #[test]
    fn run_file_reports_missing_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("missing.txt");

        let mut out = Vec::new();
        let result = run_file(&path, &mut out);

        assert!(matches!(result, Err(SessionError::Io { .. })));
        assert!(out.is_empty());

        Ok(())
    }
}
