//! End-to-end tests for arrays/lists: indexing, slicing, and mutation.

mod common;

use common::{run_program, stdout_of};

#[test]
fn test_slice_and_mutate() {
    let output = run_program(
        r#"
        arr a = {10, 20, 30, 40};
        print(length(a));
        yeet(a, 1);
        print(a[0]);
        print(a[1]);
        print(length(a));
    "#,
    );
    assert_eq!(stdout_of(&output), "410303");
}

#[test]
fn test_list_plus_any_appends_and_returns_same_list() {
    let output = run_program(
        r#"
        arr xs = {1, 2};
        var grown = xs + 3;
        println(length(grown));
        println(xs[2]);
    "#,
    );
    assert_eq!(stdout_of(&output), "3\n3\n");
}

#[test]
fn test_index_out_of_bounds_is_a_runtime_error() {
    let output = run_program("arr xs = {1, 2}; var result = xs[5];");
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_logical_vs_arithmetic_shift() {
    let output = run_program(
        r#"
        println((-8) >> 1);
        println((-8) >>> 1);
    "#,
    );
    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "-4");
    assert_ne!(lines[1], "-4");
}
