use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid python tag `{tag}` (expected the form `cp39`)")]
pub struct TagError {
    pub tag: String,
}

/// Interpreter version parsed out of a python tag. Ordered by the numeric
/// (major, minor) tuple, so 3.10 sorts after 3.9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// CPython implementation tag such as `cp39`: the literal `cp` followed by a
/// one-digit major and a one-or-two-digit minor version.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PythonTag {
    raw: String,
    version: PythonVersion,
}

impl PythonTag {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn version(&self) -> PythonVersion {
        self.version
    }

    /// Interpreter executable name, e.g. `python3.9`.
    pub fn interpreter(&self) -> String {
        format!("python{}", self.version)
    }
}

impl fmt::Display for PythonTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for PythonTag {
    type Err = TagError;

    fn from_str(tag: &str) -> Result<Self, TagError> {
        let invalid = || TagError {
            tag: tag.to_string(),
        };
        let digits = tag.strip_prefix("cp").ok_or_else(invalid)?;
        if !(2..=3).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let (major, minor) = digits.split_at(1);
        Ok(Self {
            raw: tag.to_string(),
            version: PythonVersion {
                major: major.parse().map_err(|_| invalid())?,
                minor: minor.parse().map_err(|_| invalid())?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_digit_minor() {
        let tag: PythonTag = "cp39".parse().expect("valid tag");
        assert_eq!(tag.version(), PythonVersion { major: 3, minor: 9 });
        assert_eq!(tag.interpreter(), "python3.9");
        assert_eq!(tag.as_str(), "cp39");
    }

    #[test]
    fn parses_double_digit_minor() {
        let tag: PythonTag = "cp310".parse().expect("valid tag");
        assert_eq!(
            tag.version(),
            PythonVersion {
                major: 3,
                minor: 10
            }
        );
        assert_eq!(tag.version().to_string(), "3.10");
    }

    #[test]
    fn rejects_malformed_tags() {
        for tag in ["py3", "cp3", "cp3100", "cp3x", "pp39", ""] {
            let err = tag.parse::<PythonTag>().expect_err("tag must be rejected");
            assert!(err.to_string().contains(tag));
        }
    }

    #[test]
    fn orders_versions_numerically() {
        let old: PythonTag = "cp39".parse().expect("valid tag");
        let new: PythonTag = "cp310".parse().expect("valid tag");
        assert!(old.version() < new.version());
    }
}
