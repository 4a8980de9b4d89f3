//! End-to-end tests for core expression and statement evaluation.

mod common;

use common::{run_program, stdout_of};

#[test]
fn test_hello_world() {
    let output = run_program(r#"void main() { print("hello"); } main();"#);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "hello");
}

#[test]
fn test_arithmetic_precedence() {
    let output = run_program("print(2 + 3 * 4);");
    assert_eq!(stdout_of(&output), "14");
}

#[test]
fn test_if_else_picks_branch() {
    let output = run_program(
        r#"
        var x = 10;
        if (x > 5) { print("big"); } else { print("small"); }
    "#,
    );
    assert_eq!(stdout_of(&output), "big");
}

#[test]
fn test_while_loop_accumulates() {
    let output = run_program(
        r#"
        var i = 0;
        var total = 0;
        while (i < 5) { total = total + i; i = i + 1; }
        print(total);
    "#,
    );
    assert_eq!(stdout_of(&output), "10");
}

#[test]
fn test_cast_round_trips() {
    let output = run_program(
        r#"
        println((str)(int)"42" == "42");
        println((int)(str)7 == 7);
        println((bln)(int)true == true);
    "#,
    );
    assert_eq!(stdout_of(&output), "true\ntrue\ntrue\n");
}

#[test]
fn test_postfix_increment_returns_pre_value() {
    let output = run_program(
        r#"
        var x = 5;
        println(x++);
        println(x);
    "#,
    );
    assert_eq!(stdout_of(&output), "5\n6\n");
}
