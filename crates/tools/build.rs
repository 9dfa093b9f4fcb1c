use std::process::Command;

/// Embeds the hash of the current git commit as `BUILD_HASH`, or `UNKNOWN`
/// when it cannot be determined.
fn main() {
    let build_hash = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "UNKNOWN".to_string());

    println!("cargo:rustc-env=BUILD_HASH={build_hash}");
    println!("cargo:rerun-if-changed=build.rs");
}
