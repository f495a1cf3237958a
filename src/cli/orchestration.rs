//! Release workflow orchestration
//!
//! Keeps the release logic apart from CLI argument parsing: discover the
//! declared version, resolve the commit range, build the changelog and hand
//! the result to a forge publisher.

use std::path::PathBuf;

use tracing::info;

use crate::boundary::BoundaryWarning;
use crate::changelog::aggregate_commits;
use crate::config::Config;
use crate::domain::{contains_tag, latest_tag};
use crate::error::{ReleaseError, Result};
use crate::forge::{PublishedRelease, Publisher, ReleaseRequest};
use crate::git::Repository;
use crate::project;
use crate::version::ReleaseVersion;

/// Arguments for the publish workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic,
/// so the workflow can be called programmatically without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishWorkflowArgs {
    /// Python module declaring `__version__`
    pub module_name: String,

    /// Project folder holding the module and the git repository
    pub folder: PathBuf,

    /// `owner/name` of the forge repository
    pub repo: Option<String>,

    /// Create the release as a draft
    pub draft: bool,

    /// Mark the release as a prerelease
    pub pre_release: bool,

    /// Fetch remotes before looking at tags
    pub fetch: bool,

    /// Preview mode - compute the release but publish nothing
    pub dry_run: bool,
}

impl PublishWorkflowArgs {
    pub fn new(module_name: impl Into<String>, folder: impl Into<PathBuf>) -> Self {
        PublishWorkflowArgs {
            module_name: module_name.into(),
            folder: folder.into(),
            repo: None,
            draft: false,
            pre_release: false,
            fetch: true,
            dry_run: false,
        }
    }
}

/// Everything computed before publishing
#[derive(Debug, Clone, PartialEq)]
pub struct ReleasePlan {
    /// Normalized version, used as tag and release name
    pub tag_name: String,
    /// Annotated tag message, `Tag for version <tag>`
    pub tag_message: String,
    pub release_name: String,
    /// Rendered changelog, used as release notes
    pub changelog: String,
    /// Commit the release points at
    pub target_revision: String,
    /// Tag or root commit the changelog starts after
    pub base_revision: String,
    pub commit_count: usize,
    /// Whether any commit in the range is a breaking change
    pub breaking: bool,
    pub warnings: Vec<BoundaryWarning>,
}

impl ReleasePlan {
    /// Turn the plan into a forge request
    pub fn to_request(&self, draft: bool, prerelease: bool) -> ReleaseRequest {
        ReleaseRequest {
            tag_name: self.tag_name.clone(),
            tag_message: self.tag_message.clone(),
            release_name: self.release_name.clone(),
            body: self.changelog.clone(),
            target_commit: self.target_revision.clone(),
            draft,
            prerelease,
        }
    }
}

/// Result of a successful publish workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub plan: ReleasePlan,

    /// `None` for dry runs
    pub published: Option<PublishedRelease>,
}

/// Resolve the commit range for `version` and render its changelog.
///
/// Fails with [`ReleaseError::DuplicateVersion`] before anything else is
/// computed when a tag named like the version already exists.
pub fn plan_release<R: Repository>(
    repo: &R,
    version: &ReleaseVersion,
    fetch: bool,
) -> Result<ReleasePlan> {
    let mut warnings = Vec::new();

    if fetch {
        repo.fetch_all()?;
    } else {
        warnings.push(BoundaryWarning::FetchSkipped);
    }

    let tags = repo.list_tags()?;
    if contains_tag(&tags, version.tag_name()) {
        return Err(ReleaseError::duplicate(version.tag_name()));
    }

    let (base_name, base_revision) = match latest_tag(&tags) {
        Some(tag) => (tag.name.clone(), repo.tag_commit_id(&tag.name)?),
        None => {
            let root = repo
                .root_commit_id()?
                .ok_or(ReleaseError::EmptyRepository)?;
            warnings.push(BoundaryWarning::NoTags {
                root_commit_hash: root.clone(),
            });
            (root.clone(), root)
        }
    };
    let target_revision = repo.head_commit_id()?;
    info!(base = %base_name, target = %target_revision, "resolved release range");

    let commits = repo.commits_between(&base_revision, &target_revision)?;
    if commits.is_empty() {
        warnings.push(BoundaryWarning::NoNewCommits {
            base: base_name,
            current_commit_hash: target_revision.clone(),
        });
    }

    let document = aggregate_commits(&commits, version.tag_name());

    Ok(ReleasePlan {
        tag_name: version.tag_name().to_string(),
        tag_message: version.tag_message(),
        release_name: version.tag_name().to_string(),
        changelog: document.render(),
        target_revision,
        base_revision,
        commit_count: commits.len(),
        breaking: document.breaking,
        warnings,
    })
}

/// Main publish workflow
///
/// Orchestrates the entire release:
/// 1. Discover the declared version of the module
/// 2. Fetch remotes and refuse versions that are already tagged
/// 3. Collect commits since the latest tag and render the changelog
/// 4. Publish the tag and release, unless this is a dry run
///
/// The publisher is only created once there is something to publish, so dry
/// runs need no forge credentials.
pub fn run_publish_workflow<R, P, F>(
    args: &PublishWorkflowArgs,
    config: &Config,
    repo: &R,
    make_publisher: F,
) -> Result<WorkflowResult>
where
    R: Repository,
    P: Publisher,
    F: FnOnce() -> Result<P>,
{
    let declared = project::discover_version(&args.folder, &args.module_name)?;
    let version = ReleaseVersion::parse(&declared)?;
    info!(module = %args.module_name, version = %version, "discovered version");

    let plan = plan_release(repo, &version, args.fetch && config.git.remote_fetch)?;
    for warning in &plan.warnings {
        info!(%warning, "boundary warning");
    }

    if args.dry_run {
        return Ok(WorkflowResult {
            plan,
            published: None,
        });
    }

    let draft = args.draft || config.release.draft;
    let prerelease = args.pre_release
        || config.release.prerelease
        || (config.release.auto_prerelease && version.is_prerelease());

    let publisher = make_publisher()?;
    let published = publisher.publish(&plan.to_request(draft, prerelease))?;

    Ok(WorkflowResult {
        plan,
        published: Some(published),
    })
}
