//! Publishing of tags and releases on a hosted git forge
//!
//! [`Publisher`] is the seam between the release workflow and the forge API.
//! [`github::GitHubPublisher`] talks to the GitHub REST API.

pub mod github;

pub use github::GitHubPublisher;

use crate::error::Result;

/// Everything the forge needs to create a tag and its release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    /// Tag name, e.g. `v1.2.3`
    pub tag_name: String,
    /// Message of the annotated tag object
    pub tag_message: String,
    /// Title of the release
    pub release_name: String,
    /// Release notes
    pub body: String,
    /// Commit the tag points to
    pub target_commit: String,
    pub draft: bool,
    pub prerelease: bool,
}

/// Result of a successful publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedRelease {
    pub tag_name: String,
    /// Browser URL of the release, when the forge reports one
    pub url: Option<String>,
}

/// A forge able to create a tag and a release for it
pub trait Publisher {
    fn publish(&self, request: &ReleaseRequest) -> Result<PublishedRelease>;
}
