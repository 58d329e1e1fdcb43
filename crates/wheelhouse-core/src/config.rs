use std::fs;
use std::path::Path;

use anyhow::Result;
use wheelhouse_domain::MatrixConfig;

use crate::error::ConfigError;

/// Read and parse the wheel matrix document. Any failure is a
/// [`ConfigError`] naming the path, raised before any network call.
pub fn load_matrix_config(path: &Path) -> Result<MatrixConfig> {
    let raw = fs::read_to_string(path).map_err(|err| ConfigError {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;
    let config = serde_yaml::from_str(&raw).map_err(|err| ConfigError {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;
    Ok(config)
}
