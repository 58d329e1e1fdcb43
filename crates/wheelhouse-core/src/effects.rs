use std::fmt;

use anyhow::Result;

use crate::pypi::ReleaseResponse;

/// Version requested for a package in the config: an exact release or
/// whatever the index currently publishes as latest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VersionSelector {
    Latest,
    Exact(String),
}

impl VersionSelector {
    pub fn parse(raw: &str) -> Self {
        if raw == "latest" {
            Self::Latest
        } else {
            Self::Exact(raw.to_string())
        }
    }
}

impl fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str("latest"),
            Self::Exact(version) => f.write_str(version),
        }
    }
}

/// Read side of the package index (the PyPI JSON API in production).
pub trait PackageIndex {
    fn release(&self, package: &str, selector: &VersionSelector) -> Result<ReleaseResponse>;
}

/// Existence probe against the wheel bucket. Implementations must be
/// read-only: the matrix generator never writes or deletes.
pub trait ArtifactStore {
    /// True when at least one object key starts with `key_prefix`.
    fn contains(&self, key_prefix: &str) -> Result<bool>;
}
