use std::fmt;

use clap::Args;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const BUILD_HASH: &str = env!("BUILD_HASH");

#[derive(Args, Clone, Copy, Debug)]
pub struct VersionFlag {
    #[arg(long, global = true, help = "Print the version of this tool")]
    version: bool,
}

impl From<VersionFlag> for bool {
    fn from(flag: VersionFlag) -> Self {
        flag.version
    }
}

/// Prints the version as `<crate version>-<short commit hash>`.
pub struct Version;

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", VERSION, BUILD_HASH.get(..8).unwrap_or(BUILD_HASH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_starts_with_crate_version() {
        let version = Version.to_string();

        assert!(version.starts_with(&format!("{VERSION}-")));
        assert!(version.len() > VERSION.len() + 1);
    }
}
