//! Integration tests for the `geekdemy` binary

use std::{fs, process::Command};

use testresult::TestResult;

const BIN: &str = env!("CARGO_BIN_EXE_geekdemy");

#[test]
fn prints_bill_for_input_file() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("input.txt");
    fs::write(&path, "ADD_PROGRAMME CERTIFICATION 1\nPRINT_BILL\n")?;

    let output = Command::new(BIN).arg(&path).env_remove("RUST_LOG").output()?;

    assert!(output.status.success(), "expected success, got {output:?}");
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "SUB_TOTAL  3000.00\n\
         TOTAL_PRO_DISCOUNT   0.00\n\
         PRO_MEMBERSHIP_FEE   0.00\n\
         ENROLLMENT_FEE   500.00\n\
         COUPON_DISCOUNT   NONE    0.00\n\
         TOTAL   3500.00\n"
    );

    Ok(())
}

#[test]
fn missing_argument_exits_with_usage() -> TestResult {
    let output = Command::new(BIN).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "no bill on usage error");
    assert!(String::from_utf8(output.stderr)?.contains("Usage"));

    Ok(())
}

#[test]
fn too_many_arguments_exits_with_usage() -> TestResult {
    let output = Command::new(BIN).args(["a.txt", "b.txt"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "no bill on usage error");

    Ok(())
}

#[test]
fn unreadable_file_exits_without_bill() -> TestResult {
    let dir = tempfile::tempdir()?;

    let output = Command::new(BIN)
        .arg(dir.path().join("missing.txt"))
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "no partial bill on IO failure");
    assert!(String::from_utf8(output.stderr)?.contains("failed to read"));

    Ok(())
}
