//! End-to-end tests for the CLI's exit-code and diagnostic contract.

mod common;

use common::{exe_binary, run_program, stderr_of, stdout_of};
use std::process::Command;

#[test]
fn test_successful_program_exits_zero() {
    let output = run_program(r#"print("ok");"#);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_parse_error_exits_65_with_syntax_diagnostic() {
    let output = run_program("var = ;");
    assert_eq!(output.status.code(), Some(65));
    assert!(stderr_of(&output).contains("Syntax:"));
    assert_eq!(stdout_of(&output), "");
}

#[test]
fn test_runtime_error_exits_1_with_runtime_diagnostic() {
    let output = run_program("var result = 1 / 0;");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Runtime:"));
}

#[test]
fn test_break_level_deeper_than_nesting_is_a_static_error() {
    let output = run_program("while (1) { break 2; }");
    assert_eq!(output.status.code(), Some(65));
}

#[test]
fn test_two_positional_arguments_is_a_usage_error() {
    let output = Command::new(exe_binary()).arg("a.cflat").arg("b.cflat").output().expect("failed to run exe");
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn test_missing_entry_file_is_a_non_zero_exit() {
    let output = Command::new(exe_binary()).arg("/no/such/file.cflat").output().expect("failed to run exe");
    assert!(!output.status.success());
}
