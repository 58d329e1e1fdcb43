use indexmap::IndexMap;
use serde::Deserialize;

/// Root of the wheel matrix document (`wheel_matrix.yml`). Map order is
/// preserved so the declaration order in the document is what the pipeline
/// walks.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatrixConfig {
    pub packages: IndexMap<String, PackageConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageConfig {
    /// Keyed by an exact version or the sentinel `latest`.
    pub versions: IndexMap<String, VersionConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionConfig {
    pub wheels: Vec<WheelTarget>,
}

/// One platform to build for, covering one or more interpreters.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WheelTarget {
    pub platform_tag: String,
    pub platform_instance: String,
    pub platform_arch: String,
    pub python: Vec<PythonSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PythonSpec {
    pub tag: String,
    /// Empty means "build against the interpreter ABI"; the filename side
    /// then repeats the python tag.
    #[serde(default)]
    pub abi: String,
}
