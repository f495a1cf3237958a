use std::fmt;

use crate::error::{ReleaseError, Result};

/// A declared project version, normalized to carry exactly one leading `v`.
///
/// The normalized form is used as tag name and release name; the changelog
/// title shows it without the prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    tag: String,
}

impl ReleaseVersion {
    /// Normalize a declared version string.
    ///
    /// # Example
    /// ```ignore
    /// assert_eq!(ReleaseVersion::parse("1.2.3")?.tag_name(), "v1.2.3");
    /// assert_eq!(ReleaseVersion::parse("v1.2.3")?.tag_name(), "v1.2.3");
    /// ```
    pub fn parse(declared: &str) -> Result<Self> {
        let bare = declared.trim().trim_start_matches('v');
        if bare.is_empty() {
            return Err(ReleaseError::version(format!(
                "Invalid version '{}': nothing after the 'v' prefix",
                declared
            )));
        }
        if bare.chars().any(char::is_whitespace) {
            return Err(ReleaseError::version(format!(
                "Invalid version '{}': tag names cannot contain whitespace",
                declared
            )));
        }

        Ok(ReleaseVersion {
            tag: format!("v{}", bare),
        })
    }

    /// Version with its `v` prefix, e.g. `v1.2.3`
    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    /// Version without its `v` prefix, e.g. `1.2.3`
    pub fn display_version(&self) -> &str {
        &self.tag[1..]
    }

    /// Message attached to the annotated tag
    pub fn tag_message(&self) -> String {
        format!("Tag for version {}", self.tag)
    }

    /// Semantic version, when the declared version is one
    pub fn semver(&self) -> Option<semver::Version> {
        semver::Version::parse(self.display_version()).ok()
    }

    /// Whether the version carries a semver pre-release part (`1.0.0-rc.1`)
    pub fn is_prerelease(&self) -> bool {
        self.semver().is_some_and(|v| !v.pre.is_empty())
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}
