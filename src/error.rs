use thiserror::Error;

/// Unified error type for git-tag-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Tag for version {tag} already exist")]
    DuplicateVersion { tag: String },

    #[error("Module '{module}' does not declare a __version__ attribute")]
    MissingVersionAttribute { module: String },

    #[error("Module '{module}' not found in '{folder}'")]
    ModuleNotFound { module: String, folder: String },

    #[error("Repository has no tags and no commits to release")]
    EmptyRepository,

    #[error("HEAD is detached; check out a branch to release from")]
    DetachedHead,

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Environment variable {variable} is not set")]
    MissingToken { variable: String },

    #[error("No forge repository given; set GITHUB_REPOSITORY or pass --repo")]
    MissingRepository,

    #[error("Forge request failed ({status}): {message}")]
    Forge { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-tag-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Create a duplicate-version error for the given tag name
    pub fn duplicate(tag: impl Into<String>) -> Self {
        ReleaseError::DuplicateVersion { tag: tag.into() }
    }

    /// Create a forge error from an HTTP status and response text
    pub fn forge(status: u16, msg: impl Into<String>) -> Self {
        ReleaseError::Forge {
            status,
            message: msg.into(),
        }
    }

    /// Whether this error is a precondition failure detected before anything was published
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ReleaseError::DuplicateVersion { .. }
                | ReleaseError::MissingVersionAttribute { .. }
                | ReleaseError::ModuleNotFound { .. }
                | ReleaseError::EmptyRepository
                | ReleaseError::DetachedHead
        )
    }
}
