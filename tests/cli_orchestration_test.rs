use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use tempfile::TempDir;

use git_tag_release::cli::{run_publish_workflow, PublishWorkflowArgs};
use git_tag_release::config::Config;
use git_tag_release::forge::{PublishedRelease, Publisher, ReleaseRequest};
use git_tag_release::git::MockRepository;
use git_tag_release::{ReleaseError, Result};

#[derive(Clone, Default)]
struct RecordingPublisher {
    requests: Rc<RefCell<Vec<ReleaseRequest>>>,
}

impl Publisher for RecordingPublisher {
    fn publish(&self, request: &ReleaseRequest) -> Result<PublishedRelease> {
        self.requests.borrow_mut().push(request.clone());
        Ok(PublishedRelease {
            tag_name: request.tag_name.clone(),
            url: None,
        })
    }
}

struct FailingPublisher;

impl Publisher for FailingPublisher {
    fn publish(&self, _request: &ReleaseRequest) -> Result<PublishedRelease> {
        Err(ReleaseError::forge(401, "Bad credentials"))
    }
}

fn project(version: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("app.py"),
        format!("__version__ = '{}'\n", version),
    )
    .unwrap();
    dir
}

fn history() -> MockRepository {
    let mut repo = MockRepository::new();
    repo.add_commit("c1", "initial");
    repo.add_tag("v1.0.0", "c1");
    repo.add_commit("c2", "feat: search");
    repo.add_commit("c3", "fix: crash on start");
    repo
}

#[test]
fn test_publish_uses_cli_flags() {
    let dir = project("1.1.0");
    let repo = history();
    let publisher = RecordingPublisher::default();
    let mut args = PublishWorkflowArgs::new("app", dir.path());
    args.draft = true;
    args.pre_release = true;

    let result =
        run_publish_workflow(&args, &Config::default(), &repo, || Ok(publisher.clone())).unwrap();

    let requests = publisher.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].draft);
    assert!(requests[0].prerelease);
    assert_eq!(requests[0].target_commit, "c3");
    assert_eq!(
        result.published,
        Some(PublishedRelease {
            tag_name: "v1.1.0".to_string(),
            url: None
        })
    );
    assert_eq!(repo.fetch_count(), 1);
}

#[test]
fn test_publish_uses_config_defaults() {
    let dir = project("1.1.0");
    let repo = history();
    let publisher = RecordingPublisher::default();
    let args = PublishWorkflowArgs::new("app", dir.path());
    let mut config = Config::default();
    config.release.draft = true;
    config.git.remote_fetch = false;

    run_publish_workflow(&args, &config, &repo, || Ok(publisher.clone())).unwrap();

    let requests = publisher.requests.borrow();
    assert!(requests[0].draft);
    assert!(!requests[0].prerelease);
    assert_eq!(repo.fetch_count(), 0);
}

#[test]
fn test_auto_prerelease_for_semver_prerelease() {
    let dir = project("2.0.0-rc.1");
    let repo = history();
    let publisher = RecordingPublisher::default();
    let args = PublishWorkflowArgs::new("app", dir.path());
    let mut config = Config::default();
    config.release.auto_prerelease = true;

    run_publish_workflow(&args, &config, &repo, || Ok(publisher.clone())).unwrap();

    let requests = publisher.requests.borrow();
    assert_eq!(requests[0].tag_name, "v2.0.0-rc.1");
    assert!(requests[0].prerelease);
}

#[test]
fn test_dry_run_never_creates_publisher() {
    let dir = project("1.1.0");
    let repo = history();
    let mut args = PublishWorkflowArgs::new("app", dir.path());
    args.dry_run = true;

    let result = run_publish_workflow(&args, &Config::default(), &repo, || -> Result<FailingPublisher> {
        panic!("publisher must not be created for a dry run")
    })
    .unwrap();

    assert!(result.published.is_none());
    assert_eq!(
        result.plan.changelog,
        "Version 1.1.0\n\n## Change Log\n### Fix\n* Changes: crash on start\n\n### Feat\n* Changes: search"
    );
}

#[test]
fn test_missing_version_attribute_stops_before_git() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("app.py"), "name = 'app'\n").unwrap();
    let repo = history();
    let args = PublishWorkflowArgs::new("app", dir.path());

    let err = run_publish_workflow(&args, &Config::default(), &repo, || {
        Ok(RecordingPublisher::default())
    })
    .unwrap_err();

    assert!(matches!(err, ReleaseError::MissingVersionAttribute { .. }));
    assert!(err.is_precondition());
    assert_eq!(repo.fetch_count(), 0);
}

#[test]
fn test_duplicate_version_publishes_nothing() {
    let dir = project("1.0.0");
    let repo = history();
    let publisher = RecordingPublisher::default();
    let args = PublishWorkflowArgs::new("app", dir.path());

    let err =
        run_publish_workflow(&args, &Config::default(), &repo, || Ok(publisher.clone())).unwrap_err();

    assert_eq!(err.to_string(), "Tag for version v1.0.0 already exist");
    assert!(publisher.requests.borrow().is_empty());
}

#[test]
fn test_publisher_errors_propagate() {
    let dir = project("1.1.0");
    let repo = history();
    let args = PublishWorkflowArgs::new("app", dir.path());

    let err = run_publish_workflow(&args, &Config::default(), &repo, || Ok(FailingPublisher))
        .unwrap_err();

    assert!(matches!(err, ReleaseError::Forge { status: 401, .. }));
}

#[test]
fn test_publisher_setup_errors_propagate() {
    let dir = project("1.1.0");
    let repo = history();
    let args = PublishWorkflowArgs::new("app", dir.path());

    let err = run_publish_workflow(&args, &Config::default(), &repo, || {
        Err::<RecordingPublisher, _>(ReleaseError::MissingToken {
            variable: "GITHUB_TOKEN".to_string(),
        })
    })
    .unwrap_err();

    assert!(matches!(err, ReleaseError::MissingToken { .. }));
}

#[test]
fn test_publish_workflow_args_defaults() {
    let args = PublishWorkflowArgs::new("pkg.sub", "/tmp/project");

    assert_eq!(args.module_name, "pkg.sub");
    assert_eq!(args.repo, None);
    assert!(args.fetch);
    assert!(!args.draft);
    assert!(!args.pre_release);
    assert!(!args.dry_run);
}
