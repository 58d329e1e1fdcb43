use std::str::FromStr;

use once_cell::sync::Lazy;
use pep440_rs::{Version, VersionSpecifiers};

struct ConstraintRule {
    package: &'static str,
    versions: VersionSpecifiers,
    constraints: &'static [&'static str],
}

/// Build-time pins required to compile specific package releases. The table
/// is fixed at build time; rows are retired once upstream no longer needs
/// the workaround.
static BUILD_CONSTRAINTS: Lazy<Vec<ConstraintRule>> = Lazy::new(|| {
    vec![ConstraintRule {
        package: "pyyaml",
        versions: VersionSpecifiers::from_str(">= 5.4, <= 6.0").expect("static specifier"),
        constraints: &["Cython < 3.0"],
    }]
});

/// Newline-joined constraint lines for building `package` at `version`.
/// Package matching is case-insensitive; the first matching row wins and no
/// match yields an empty string.
pub fn constraints_for(package: &str, version: &Version) -> String {
    let package = package.to_lowercase();
    BUILD_CONSTRAINTS
        .iter()
        .find(|rule| rule.package == package && rule.versions.contains(version))
        .map(|rule| rule.constraints.join("\n"))
        .unwrap_or_default()
}
