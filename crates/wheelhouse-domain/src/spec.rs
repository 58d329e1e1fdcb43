use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::python::PythonTag;

/// One required artifact: a (package, version, platform, python, abi)
/// combination whose wheel must exist in the bucket.
///
/// `sdist_url` and `constraints` are determined by (package, version) and
/// only carried along for the build job, so identity, hashing, and ordering
/// all go through the grouping tuple in [`BuildSpec::key`].
#[derive(Clone, Debug)]
pub struct BuildSpec {
    pub package: String,
    pub version: String,
    pub platform_instance: String,
    pub platform_arch: String,
    pub python_tag: PythonTag,
    pub abi_tag: String,
    pub platform_tag: String,
    pub sdist_url: String,
    pub constraints: String,
}

impl BuildSpec {
    fn key(&self) -> (&str, &str, &str, &str, &str, &str, &str) {
        (
            &self.package,
            &self.version,
            &self.platform_instance,
            &self.platform_arch,
            self.python_tag.as_str(),
            &self.abi_tag,
            &self.platform_tag,
        )
    }

    /// Directory name the sdist unpacks to: `<package>-<version>` with
    /// hyphens in the package name normalized to underscores.
    pub fn sdist_dir(&self) -> String {
        format!("{}-{}", self.package.replace('-', "_"), self.version)
    }

    /// Canonical wheel filename for this spec. An empty ABI tag repeats the
    /// python tag, matching what the build side uploads.
    pub fn filename(&self) -> String {
        let abi = if self.abi_tag.is_empty() {
            self.python_tag.as_str()
        } else {
            &self.abi_tag
        };
        let sdist_dir = self.sdist_dir();
        let components = [
            sdist_dir.as_str(),
            self.python_tag.as_str(),
            abi,
            &self.platform_tag,
        ];
        let mut filename = components
            .into_iter()
            .filter(|component| !component.is_empty())
            .collect::<Vec<_>>()
            .join("-");
        filename.push_str(".whl");
        filename
    }
}

impl PartialEq for BuildSpec {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for BuildSpec {}

impl Hash for BuildSpec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for BuildSpec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BuildSpec {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn spec(abi_tag: &str) -> BuildSpec {
        BuildSpec {
            package: "pkg".to_string(),
            version: "1.2.3".to_string(),
            platform_instance: "freebsd/13.0".to_string(),
            platform_arch: "x86_64".to_string(),
            python_tag: "cp39".parse().expect("valid tag"),
            abi_tag: abi_tag.to_string(),
            platform_tag: "manylinux_2_17_x86_64".to_string(),
            sdist_url: "https://files.example/pkg-1.2.3.tar.gz".to_string(),
            constraints: String::new(),
        }
    }

    #[test]
    fn empty_abi_repeats_the_python_tag() {
        assert_eq!(
            spec("").filename(),
            "pkg-1.2.3-cp39-cp39-manylinux_2_17_x86_64.whl"
        );
    }

    #[test]
    fn explicit_abi_is_used_verbatim() {
        assert_eq!(
            spec("abi3").filename(),
            "pkg-1.2.3-cp39-abi3-manylinux_2_17_x86_64.whl"
        );
    }

    #[test]
    fn package_hyphens_become_underscores_in_the_sdist_dir() {
        let mut hyphenated = spec("");
        hyphenated.package = "my-pkg".to_string();
        assert_eq!(hyphenated.sdist_dir(), "my_pkg-1.2.3");
        assert_eq!(
            hyphenated.filename(),
            "my_pkg-1.2.3-cp39-cp39-manylinux_2_17_x86_64.whl"
        );
    }

    #[test]
    fn dedup_ignores_the_carried_sdist_url() {
        let mut twin = spec("abi3");
        twin.sdist_url = "https://mirror.example/pkg-1.2.3.tar.gz".to_string();

        let mut set = HashSet::new();
        set.insert(spec("abi3"));
        set.insert(twin);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn grouping_fields_distinguish_specs() {
        let mut other = spec("abi3");
        other.platform_tag = "freebsd_13_0_amd64".to_string();

        let mut set = HashSet::new();
        set.insert(spec("abi3"));
        set.insert(other);
        assert_eq!(set.len(), 2);
    }
}
