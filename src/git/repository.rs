use std::path::Path;

use git2::{AutotagOption, ErrorCode, Oid, Repository as Git2Repo, Sort};
use tracing::{debug, info};

use crate::domain::{RawCommit, Tag};
use crate::error::{ReleaseError, Result};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open the repository whose work tree (or git dir) is exactly `path`.
    ///
    /// Parent directories are not searched, so a project folder nested in
    /// another repository is an error rather than a release of the outer one.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::open(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn fetch_remote(&self, remote_name: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name)?;
        let config = self.repo.config()?;

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(move |url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");

            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }

                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let path = home.join(".ssh").join(key);
                        if path.exists() {
                            if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }
            }

            if allowed_types.contains(git2::CredentialType::USER_PASS_PLAINTEXT) {
                if let Ok(cred) = git2::Cred::credential_helper(&config, url, username_from_url)
                {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(callbacks);
        fetch_options.download_tags(AutotagOption::All);

        // Empty refspecs fall back to the remote's configured ones
        remote.fetch(&[] as &[&str], Some(&mut fetch_options), None)?;

        Ok(())
    }
}

impl super::Repository for Git2Repository {
    fn fetch_all(&self) -> Result<()> {
        let remotes = self.repo.remotes()?;

        for name in remotes.iter().flatten() {
            info!(remote = name, "fetching");
            self.fetch_remote(name)?;
        }

        Ok(())
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(Tag::new).collect())
    }

    fn tag_commit_id(&self, tag_name: &str) -> Result<String> {
        let reference = self
            .repo
            .find_reference(&format!("refs/tags/{}", tag_name))?;
        let commit = reference.peel_to_commit()?;

        Ok(commit.id().to_string())
    }

    fn head_commit_id(&self) -> Result<String> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                return Err(ReleaseError::EmptyRepository)
            }
            Err(e) => return Err(e.into()),
        };

        if !head.is_branch() {
            return Err(ReleaseError::DetachedHead);
        }

        Ok(head.peel_to_commit()?.id().to_string())
    }

    fn root_commit_id(&self) -> Result<Option<String>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        match revwalk.push_head() {
            Ok(()) => {}
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                return Ok(None)
            }
            Err(e) => return Err(e.into()),
        }

        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            if commit.parent_count() == 0 {
                return Ok(Some(commit.id().to_string()));
            }
        }

        Ok(None)
    }

    fn commits_between(&self, base: &str, target: &str) -> Result<Vec<RawCommit>> {
        let base = Oid::from_str(base)?;
        let target = Oid::from_str(target)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push(target)?;
        revwalk.push(base)?;

        // Symmetric difference: hide everything both sides share
        match self.repo.merge_bases(base, target) {
            Ok(bases) => {
                for oid in bases.iter() {
                    revwalk.hide(*oid)?;
                }
            }
            Err(e) if e.code() == ErrorCode::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            if commit.parent_count() > 1 {
                debug!(commit = %commit.id(), "skipping merge commit");
                continue;
            }

            let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
            let raw = RawCommit::new(commit.id().to_string(), message);
            debug!(commit = raw.short_id(), summary = raw.summary(), "collected commit");
            commits.push(raw);
        }

        Ok(commits)
    }
}
