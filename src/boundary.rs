use std::fmt;

/// Warnings that occur when resolving the release range near repository boundaries.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No tag exists yet; the range starts at the root commit
    NoTags { root_commit_hash: String },
    /// No new commits between the base revision and the target
    NoNewCommits {
        base: String,
        current_commit_hash: String,
    },
    /// Remotes were not fetched, local tags may be stale
    FetchSkipped,
}

fn short_hash(hash: &str) -> &str {
    if hash.len() > 7 {
        &hash[..7]
    } else {
        hash
    }
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoTags { root_commit_hash } => {
                write!(
                    f,
                    "No tags found; changelog starts after root commit {}",
                    short_hash(root_commit_hash)
                )
            }
            BoundaryWarning::NoNewCommits {
                base,
                current_commit_hash,
            } => {
                write!(
                    f,
                    "No new commits since '{}' (current: {})",
                    base,
                    short_hash(current_commit_hash)
                )
            }
            BoundaryWarning::FetchSkipped => {
                write!(f, "Remote fetch skipped; local tags may be out of date")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_tags_shortens_hash() {
        let warning = BoundaryWarning::NoTags {
            root_commit_hash: "0123456789abcdef".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "No tags found; changelog starts after root commit 0123456"
        );
    }

    #[test]
    fn test_no_new_commits() {
        let warning = BoundaryWarning::NoNewCommits {
            base: "v1.0.0".to_string(),
            current_commit_hash: "abc".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "No new commits since 'v1.0.0' (current: abc)"
        );
    }

    #[test]
    fn test_fetch_skipped() {
        assert!(BoundaryWarning::FetchSkipped
            .to_string()
            .contains("fetch skipped"));
    }
}
