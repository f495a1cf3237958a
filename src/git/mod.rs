//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git operations a
//! release needs, allowing for a real implementation backed by `git2` and an
//! in-memory implementation for testing.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! Revisions are passed around as hex commit ids so callers never depend on
//! `git2` types.
//!
//! ```rust
//! # use git_tag_release::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> git_tag_release::Result<()> {
//! let head = repo.head_commit_id()?;
//! if let Some(root) = repo.root_commit_id()? {
//!     let commits = repo.commits_between(&root, &head)?;
//!     println!("{} commits since the root commit", commits.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{RawCommit, Tag};
use crate::error::Result;

/// Common git operation trait for abstraction
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to [crate::error::ReleaseError] variants.
pub trait Repository {
    /// Fetch branches and tags from every configured remote
    fn fetch_all(&self) -> Result<()>;

    /// All tag names in the repository, in no particular order
    fn list_tags(&self) -> Result<Vec<Tag>>;

    /// Commit id a tag points to, peeling annotated tags
    fn tag_commit_id(&self, tag_name: &str) -> Result<String>;

    /// Commit id of the checked-out branch
    ///
    /// # Returns
    /// * `Err(DetachedHead)` - HEAD does not point at a branch
    /// * `Err(EmptyRepository)` - the branch has no commits yet
    fn head_commit_id(&self) -> Result<String>;

    /// First root commit (a commit without parents) reachable from HEAD
    fn root_commit_id(&self) -> Result<Option<String>>;

    /// Commits reachable from exactly one of `base` and `target`, merges excluded
    ///
    /// When `base` is an ancestor of `target` this is the range `(base, target]`.
    /// Commits are returned newest first.
    fn commits_between(&self, base: &str, target: &str) -> Result<Vec<RawCommit>>;
}
