use thiserror::Error;

/// The wheel matrix document could not be read or parsed. Raised before any
/// network call is made.
#[derive(Debug, Error)]
#[error("invalid wheel matrix config {path}: {reason}")]
pub struct ConfigError {
    pub path: String,
    pub reason: String,
}

/// The package index could not produce a usable release.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("package index has no release for {package} {selector}")]
    NotFound { package: String, selector: String },
    /// A release without an sdist cannot be built; a wheel URL is never
    /// substituted.
    #[error("no sdist published for {package} {version}")]
    NoSdist { package: String, version: String },
}

/// An existence probe against the wheel bucket failed. The run aborts rather
/// than emitting a matrix that silently misses artifacts.
#[derive(Debug, Error)]
#[error("storage lookup failed for key prefix {prefix}")]
pub struct StoreError {
    pub prefix: String,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync + 'static>,
}
