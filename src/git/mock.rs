use std::cell::Cell;
use std::collections::HashMap;

use crate::domain::{RawCommit, Tag};
use crate::error::{ReleaseError, Result};
use crate::git::Repository;

/// Mock repository for testing without actual git operations
///
/// History is linear: commits are stored newest first and the last one is the
/// root commit.
pub struct MockRepository {
    commits: Vec<RawCommit>,
    tags: HashMap<String, String>,
    detached: bool,
    fetch_error: Option<String>,
    fetches: Cell<usize>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            tags: HashMap::new(),
            detached: false,
            fetch_error: None,
            fetches: Cell::new(0),
        }
    }

    /// Add a commit on top of the current head
    pub fn add_commit(&mut self, revision_id: impl Into<String>, message: impl Into<String>) {
        self.commits.insert(0, RawCommit::new(revision_id, message));
    }

    /// Add a tag pointing to a commit id
    pub fn add_tag(&mut self, name: impl Into<String>, revision_id: impl Into<String>) {
        self.tags.insert(name.into(), revision_id.into());
    }

    /// Detach HEAD from any branch
    pub fn detach_head(&mut self) {
        self.detached = true;
    }

    /// Make every fetch fail with the given message
    pub fn fail_fetch(&mut self, message: impl Into<String>) {
        self.fetch_error = Some(message.into());
    }

    /// Number of times remotes were fetched
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn fetch_all(&self) -> Result<()> {
        self.fetches.set(self.fetches.get() + 1);
        match &self.fetch_error {
            Some(message) => Err(git2::Error::from_str(message).into()),
            None => Ok(()),
        }
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.tags.keys().map(Tag::new).collect())
    }

    fn tag_commit_id(&self, tag_name: &str) -> Result<String> {
        self.tags.get(tag_name).cloned().ok_or_else(|| {
            git2::Error::from_str(&format!("tag '{}' not found", tag_name)).into()
        })
    }

    fn head_commit_id(&self) -> Result<String> {
        if self.detached {
            return Err(ReleaseError::DetachedHead);
        }
        self.commits
            .first()
            .map(|c| c.revision_id.clone())
            .ok_or(ReleaseError::EmptyRepository)
    }

    fn root_commit_id(&self) -> Result<Option<String>> {
        Ok(self.commits.last().map(|c| c.revision_id.clone()))
    }

    fn commits_between(&self, base: &str, target: &str) -> Result<Vec<RawCommit>> {
        Ok(self
            .commits
            .iter()
            .skip_while(|c| c.revision_id != target)
            .take_while(|c| c.revision_id != base)
            .cloned()
            .collect())
    }
}
