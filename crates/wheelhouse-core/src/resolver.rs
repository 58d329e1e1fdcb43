use anyhow::Result;

use crate::effects::{PackageIndex, VersionSelector};
use crate::error::ResolveError;

/// A concrete release: the index's canonical version string plus the source
/// archive the build job downloads.
#[derive(Clone, Debug)]
pub struct ResolvedRelease {
    pub version: String,
    pub sdist_url: String,
}

/// Resolve a config version selector against the package index. Called once
/// per declared (package, version), before the platform/python cross
/// product is expanded.
pub fn resolve(
    index: &dyn PackageIndex,
    package: &str,
    selector: &VersionSelector,
) -> Result<ResolvedRelease> {
    let release = index.release(package, selector)?;
    let version = release.info.version;
    let sdist_url = release
        .urls
        .iter()
        .find(|file| file.packagetype == "sdist")
        .map(|file| file.url.clone())
        .ok_or_else(|| ResolveError::NoSdist {
            package: package.to_string(),
            version: version.clone(),
        })?;
    tracing::debug!(package, %version, "resolved release");
    Ok(ResolvedRelease { version, sdist_url })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pypi::{ReleaseFile, ReleaseInfo, ReleaseResponse};

    struct FakeIndex {
        version: &'static str,
        files: Vec<ReleaseFile>,
    }

    impl PackageIndex for FakeIndex {
        fn release(&self, _package: &str, _selector: &VersionSelector) -> Result<ReleaseResponse> {
            Ok(ReleaseResponse {
                info: ReleaseInfo {
                    version: self.version.to_string(),
                },
                urls: self.files.clone(),
            })
        }
    }

    fn file(packagetype: &str, url: &str) -> ReleaseFile {
        ReleaseFile {
            packagetype: packagetype.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn picks_the_sdist_url() {
        let index = FakeIndex {
            version: "36.0.1",
            files: vec![
                file("bdist_wheel", "https://files.example/demo.whl"),
                file("sdist", "https://files.example/demo.tar.gz"),
            ],
        };
        let release = resolve(&index, "demo", &VersionSelector::Latest).expect("resolved");
        assert_eq!(release.version, "36.0.1");
        assert_eq!(release.sdist_url, "https://files.example/demo.tar.gz");
    }

    #[test]
    fn wheels_are_never_substituted_for_a_missing_sdist() {
        let index = FakeIndex {
            version: "36.0.1",
            files: vec![file("bdist_wheel", "https://files.example/demo.whl")],
        };
        let err = resolve(&index, "demo", &VersionSelector::Latest).expect_err("must fail");
        assert!(matches!(
            err.downcast_ref::<ResolveError>(),
            Some(ResolveError::NoSdist { .. })
        ));
    }
}
