use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::effects::{PackageIndex, VersionSelector};
use crate::error::ResolveError;

pub const DEFAULT_INDEX_URL: &str = "https://pypi.org/pypi";

#[derive(Debug, Deserialize)]
pub struct ReleaseResponse {
    pub info: ReleaseInfo,
    pub urls: Vec<ReleaseFile>,
}

#[derive(Debug, Deserialize)]
pub struct ReleaseInfo {
    /// Canonical version string; the index may normalize the requested
    /// selector.
    pub version: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ReleaseFile {
    pub packagetype: String,
    pub url: String,
}

/// PyPI JSON API client. One request per lookup, no retries: a failed
/// lookup aborts the run and the surrounding tooling decides whether to
/// rerun.
pub struct PypiIndex {
    base_url: String,
    client: Client,
}

impl PypiIndex {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .user_agent(concat!("wheelhouse/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { base_url, client })
    }
}

impl PackageIndex for PypiIndex {
    fn release(&self, package: &str, selector: &VersionSelector) -> Result<ReleaseResponse> {
        let url = match selector {
            VersionSelector::Latest => format!("{}/{package}/json", self.base_url),
            VersionSelector::Exact(version) => {
                format!("{}/{package}/{version}/json", self.base_url)
            }
        };
        tracing::debug!(%url, "querying package index");
        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("failed to query package index for {package} {selector}"))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ResolveError::NotFound {
                package: package.to_string(),
                selector: selector.to_string(),
            }
            .into());
        }
        let response = response
            .error_for_status()
            .with_context(|| format!("package index returned an error for {package} {selector}"))?;
        response
            .json::<ReleaseResponse>()
            .with_context(|| format!("invalid package index response for {package} {selector}"))
    }
}
