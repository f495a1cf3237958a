/// Represents a git tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    /// Create a new tag from a string
    pub fn new(name: impl Into<String>) -> Self {
        Tag { name: name.into() }
    }
}

/// Pick the tag the next release is based on: the greatest name in plain
/// string order (`v0.9.0` sorts after `v0.10.0`).
pub fn latest_tag(tags: &[Tag]) -> Option<&Tag> {
    tags.iter().max_by(|a, b| a.name.cmp(&b.name))
}

/// Whether a tag named exactly `name` exists (case-sensitive)
pub fn contains_tag(tags: &[Tag], name: &str) -> bool {
    tags.iter().any(|tag| tag.name == name)
}
