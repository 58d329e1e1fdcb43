use std::collections::HashSet;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use pep440_rs::Version;
use tracing::{debug, info};
use wheelhouse_domain::{constraints_for, BuildSpec, MatrixConfig, PythonTag};

use crate::effects::{ArtifactStore, PackageIndex, VersionSelector};
use crate::resolver::{resolve, ResolvedRelease};

/// Key prefix the build jobs publish wheels under.
pub const DEFAULT_KEY_PREFIX: &str = "packages/";

/// Expand the config into concrete build specs and keep the ones whose
/// wheel is absent from the store, sorted for deterministic output.
///
/// Each declared version is resolved once, before the platform × python
/// cross product. Python tags are validated before any storage query for
/// the spec they belong to.
pub fn enumerate_missing(
    config: &MatrixConfig,
    key_prefix: &str,
    index: &dyn PackageIndex,
    store: &dyn ArtifactStore,
) -> Result<Vec<BuildSpec>> {
    let mut missing: HashSet<BuildSpec> = HashSet::new();
    for (package, package_config) in &config.packages {
        for (selector, version_config) in &package_config.versions {
            let selector = VersionSelector::parse(selector);
            let ResolvedRelease { version, sdist_url } = resolve(index, package, &selector)?;
            let parsed_version = Version::from_str(&version).map_err(|err| {
                anyhow!("package index returned unparseable version `{version}` for {package}: {err}")
            })?;
            let constraints = constraints_for(package, &parsed_version);
            for wheel in &version_config.wheels {
                for python in &wheel.python {
                    let python_tag = PythonTag::from_str(&python.tag)
                        .with_context(|| format!("bad python entry for {package} {version}"))?;
                    let spec = BuildSpec {
                        package: package.clone(),
                        version: version.clone(),
                        platform_instance: wheel.platform_instance.clone(),
                        platform_arch: wheel.platform_arch.clone(),
                        python_tag,
                        abi_tag: python.abi.clone(),
                        platform_tag: wheel.platform_tag.clone(),
                        sdist_url: sdist_url.clone(),
                        constraints: constraints.clone(),
                    };
                    if !artifact_exists(store, key_prefix, &spec)? {
                        missing.insert(spec);
                    }
                }
            }
        }
    }

    let mut missing: Vec<BuildSpec> = missing.into_iter().collect();
    missing.sort();
    Ok(missing)
}

fn artifact_exists(store: &dyn ArtifactStore, key_prefix: &str, spec: &BuildSpec) -> Result<bool> {
    let filename = spec.filename();
    debug!(%filename, "checking bucket for wheel");
    let exists = store.contains(&format!("{key_prefix}{filename}"))?;
    if !exists {
        info!(%filename, "wheel not present in bucket");
    }
    Ok(exists)
}
