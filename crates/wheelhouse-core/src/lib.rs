#![deny(clippy::all, warnings)]

pub mod config;
pub mod effects;
pub mod enumerate;
pub mod error;
pub mod matrix;
pub mod pypi;
pub mod resolver;
pub mod store;

pub use config::load_matrix_config;
pub use effects::{ArtifactStore, PackageIndex, VersionSelector};
pub use enumerate::{enumerate_missing, DEFAULT_KEY_PREFIX};
pub use error::{ConfigError, ResolveError, StoreError};
pub use matrix::{build_matrix, BuildMatrix, JobMatrixEntry, PackageEntry};
pub use pypi::{PypiIndex, ReleaseFile, ReleaseInfo, ReleaseResponse, DEFAULT_INDEX_URL};
pub use resolver::{resolve, ResolvedRelease};
pub use store::{S3Store, DEFAULT_BUCKET};

use anyhow::Result;
use wheelhouse_domain::MatrixConfig;

/// Run the whole pipeline: enumerate missing wheels, then shape them into
/// the job matrix. Stateless; every invocation recomputes from scratch.
pub fn generate_matrix(
    config: &MatrixConfig,
    key_prefix: &str,
    index: &dyn PackageIndex,
    store: &dyn ArtifactStore,
) -> Result<BuildMatrix> {
    let missing = enumerate_missing(config, key_prefix, index, store)?;
    tracing::info!(missing = missing.len(), "missing wheel artifacts");
    build_matrix(&missing)
}
