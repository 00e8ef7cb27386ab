//! Build script for fop-view
//!
//! Stamps the `--version` banner with the commit, build time and profile.
//! `SOURCE_DATE_EPOCH` pins the build time so packaged builds are reproducible.

use std::env;
use std::process::Command;

use chrono::{DateTime, SecondsFormat, Utc};

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string()).filter(|s| !s.is_empty())
}

/// Short hash, suffixed `-dirty` when the working tree has local edits
fn commit_id() -> String {
    git(&["describe", "--always", "--dirty", "--abbrev=8", "--match=NONE"])
        .unwrap_or_else(|| "unknown".to_string())
}

fn build_time() -> String {
    let pinned = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));
    pinned
        .unwrap_or_else(Utc::now)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn main() {
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={}", commit_id());
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", build_time());
    println!("cargo:rustc-env=BUILD_PROFILE={}", profile);

    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    if let Some(head) = git(&["rev-parse", "--git-path", "HEAD"]) {
        println!("cargo:rerun-if-changed={}", head);
    }
    if let Some(index) = git(&["rev-parse", "--git-path", "index"]) {
        println!("cargo:rerun-if-changed={}", index);
    }
}
