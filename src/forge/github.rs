use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ForgeConfig;
use crate::error::{ReleaseError, Result};
use crate::forge::{PublishedRelease, Publisher, ReleaseRequest};

/// Environment variable GitHub Actions sets to `owner/name`
pub const REPOSITORY_ENV: &str = "GITHUB_REPOSITORY";

const API_VERSION: &str = "2022-11-28";

#[derive(Debug, Serialize)]
struct CreateTagObject<'a> {
    tag: &'a str,
    message: &'a str,
    object: &'a str,
    #[serde(rename = "type")]
    object_type: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateReference<'a> {
    #[serde(rename = "ref")]
    reference: String,
    sha: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateRelease<'a> {
    tag_name: &'a str,
    name: &'a str,
    body: &'a str,
    draft: bool,
    prerelease: bool,
}

#[derive(Debug, Deserialize)]
struct GitObject {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct Reference {
    #[serde(rename = "ref")]
    name: String,
}

#[derive(Debug, Deserialize)]
struct Release {
    html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Publishes annotated tags and releases through the GitHub REST API.
///
/// A publish is three calls: create the tag object, point `refs/tags/<name>`
/// at it, then create the release for the tag.
pub struct GitHubPublisher {
    client: Client,
    api_url: String,
    repository: String,
    token: String,
}

impl GitHubPublisher {
    /// Create a publisher for `repository` (`owner/name`)
    pub fn new(
        api_url: impl Into<String>,
        repository: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("git-tag-release/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GitHubPublisher {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            repository: repository.into(),
            token: token.into(),
        })
    }

    /// Create a publisher from configuration and the process environment.
    ///
    /// The repository comes from `GITHUB_REPOSITORY`, then `repo_override`,
    /// then the configuration. The token is read from `config.token_env`.
    pub fn from_config(config: &ForgeConfig, repo_override: Option<&str>) -> Result<Self> {
        let repository = resolve_repository(
            std::env::var(REPOSITORY_ENV).ok().as_deref(),
            repo_override,
            &config.repository,
        )?;
        let token = std::env::var(&config.token_env).map_err(|_| ReleaseError::MissingToken {
            variable: config.token_env.clone(),
        })?;

        Self::new(&config.api_url, repository, token)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/repos/{}/{}", self.api_url, self.repository, path)
    }

    fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let url = self.endpoint(path);
        debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .json(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(ReleaseError::forge(status.as_u16(), api_error_message(&text)));
        }

        Ok(response.json()?)
    }
}

impl Publisher for GitHubPublisher {
    fn publish(&self, request: &ReleaseRequest) -> Result<PublishedRelease> {
        let tag_object: GitObject = self.post(
            "git/tags",
            &CreateTagObject {
                tag: &request.tag_name,
                message: &request.tag_message,
                object: &request.target_commit,
                object_type: "commit",
            },
        )?;
        debug!(sha = %tag_object.sha, "created tag object");

        let reference: Reference = self.post(
            "git/refs",
            &CreateReference {
                reference: format!("refs/tags/{}", request.tag_name),
                sha: &tag_object.sha,
            },
        )?;
        debug!(reference = %reference.name, "created tag reference");

        let release: Release = self.post(
            "releases",
            &CreateRelease {
                tag_name: &request.tag_name,
                name: &request.release_name,
                body: &request.body,
                draft: request.draft,
                prerelease: request.prerelease,
            },
        )?;
        info!(tag = %request.tag_name, repository = %self.repository, "release created");

        Ok(PublishedRelease {
            tag_name: request.tag_name.clone(),
            url: release.html_url,
        })
    }
}

/// Pick the target repository: environment, then CLI, then configuration
pub fn resolve_repository(
    from_env: Option<&str>,
    from_cli: Option<&str>,
    from_config: &str,
) -> Result<String> {
    [from_env, from_cli, Some(from_config)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|repo| !repo.is_empty())
        .map(str::to_string)
        .ok_or(ReleaseError::MissingRepository)
}

/// The `message` field of a GitHub error body, or the raw body
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiError>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
