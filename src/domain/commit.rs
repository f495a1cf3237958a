/// A commit as handed over by the git collaborator: its revision id and full message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommit {
    pub revision_id: String,
    pub message: String,
}

impl RawCommit {
    pub fn new(revision_id: impl Into<String>, message: impl Into<String>) -> Self {
        RawCommit {
            revision_id: revision_id.into(),
            message: message.into(),
        }
    }

    /// First line of the trimmed message
    pub fn summary(&self) -> &str {
        self.message.trim().lines().next().unwrap_or_default()
    }

    /// Abbreviated revision id, as shown in log output
    pub fn short_id(&self) -> &str {
        let end = self
            .revision_id
            .char_indices()
            .nth(7)
            .map(|(i, _)| i)
            .unwrap_or(self.revision_id.len());
        &self.revision_id[..end]
    }
}
