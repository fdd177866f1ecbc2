//! Embeds the version shown by `wayfare --version`.
//!
//! Prefers an explicit `WAYFARE_BUILD_VERSION`, then `git describe`, then the
//! package version.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=WAYFARE_BUILD_VERSION");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let version = env::var("WAYFARE_BUILD_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(describe)
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=WAYFARE_VERSION={}", version);
}

/// `git describe`, without a leading `v`.
fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let raw = String::from_utf8(output.stdout).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    Some(trimmed.trim_start_matches('v').to_string())
}
