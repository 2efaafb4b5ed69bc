//! Stamps the binary with `PEOPLE_VERSION`: the package version, plus the
//! short commit hash when built from a git checkout.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let mut version = env!("CARGO_PKG_VERSION").to_string();
    if let Some(commit) = git(&["rev-parse", "--short", "HEAD"]) {
        version.push('+');
        version.push_str(&commit);
        if git(&["status", "--porcelain", "--untracked-files=no"]).is_some() {
            version.push_str(".dirty");
        }
    }

    println!("cargo:rustc-env=PEOPLE_VERSION={}", version);
}

/// Trimmed stdout of a successful git command, `None` if it failed or was empty.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
