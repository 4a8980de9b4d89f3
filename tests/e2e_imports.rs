//! End-to-end tests for `import` resolution and splicing.

mod common;

use common::{stdout_of, stderr_of, Workspace};

#[test]
fn test_import_splices_function_from_sibling_module() {
    let ws = Workspace::new();
    ws.write("math", "func square(n) { return n * n; }");
    let entry = ws.write("main", "import math; print(square(6));");
    let output = ws.run(&entry);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "36");
}

#[test]
fn test_import_does_not_bring_in_library_top_level_vars() {
    let ws = Workspace::new();
    ws.write("consts", "var pi = 3;");
    let entry = ws.write("main", "import consts; var result = pi;");
    let output = ws.run(&entry);
    assert!(!output.status.success());
}

#[test]
fn test_missing_import_is_a_diagnostic_with_no_execution() {
    let ws = Workspace::new();
    let entry = ws.write("main", "import nope; print(\"never runs\");");
    let output = ws.run(&entry);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(65));
    assert_eq!(stdout_of(&output), "");
    assert!(stderr_of(&output).contains("Syntax:"));
}

#[test]
fn test_circular_import_is_a_diagnostic() {
    let ws = Workspace::new();
    ws.write("a", "import b;");
    ws.write("b", "import a;");
    let entry = ws.write("main", "import a;");
    let output = ws.run(&entry);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(65));
}

#[test]
fn test_default_entry_point_is_main_cflat() {
    let ws = Workspace::new();
    ws.write("main", r#"print("default entry");"#);
    let output = ws.run_default_entry();
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "default entry");
}
