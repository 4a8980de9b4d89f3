//! Common test utilities for cflat integration tests.
//!
//! These tests exercise the actual `exe` binary as a subprocess, since
//! `print`/`println` write straight to the process's own stdout rather
//! than through an injectable sink.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

/// Returns the path to the `exe` binary built by cargo for this crate.
pub fn exe_binary() -> String {
    env!("CARGO_BIN_EXE_exe").to_string()
}

/// A scratch directory laid out as `./cflatexe/`, matching the fixed
/// module-lookup path `import` resolves against.
pub struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("cflatexe")).unwrap();
        Workspace { dir }
    }

    /// Writes `name.cflat` under the workspace's `cflatexe/` directory.
    pub fn write(&self, name: &str, source: &str) -> PathBuf {
        let path = self.dir.path().join("cflatexe").join(format!("{}.cflat", name));
        fs::write(&path, source).unwrap();
        path
    }

    /// Runs `exe` against `path` with this workspace as the current
    /// directory, so `./cflatexe/...` imports resolve correctly.
    pub fn run(&self, path: &PathBuf) -> Output {
        Command::new(exe_binary())
            .arg(path)
            .current_dir(self.dir.path())
            .output()
            .expect("failed to run exe")
    }

    pub fn run_default_entry(&self) -> Output {
        Command::new(exe_binary()).current_dir(self.dir.path()).output().expect("failed to run exe")
    }
}

/// Writes `source` as a standalone program (no workspace/imports needed)
/// and runs it, returning the captured output.
pub fn run_program(source: &str) -> Output {
    let ws = Workspace::new();
    let path = ws.write("main", source);
    ws.run(&path)
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
