use std::sync::LazyLock;

use regex::Regex;

/// Header, body and footer of a conventional commit.
///
/// The blank-line separators are optional, so a missing body or footer never
/// fails the match; it just captures an empty string.
static CONVENTIONAL_COMMIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<type>\w+)(?:\((?P<scope>\w*)\))?(?P<br>!)?: (?P<description>.*)(?:\n\n)?(?P<body>.*)(?:\n\n)?(?P<foot>.*)",
    )
    .expect("conventional commit pattern is valid")
});

const BREAKING_CHANGE: &str = "BREAKING CHANGE:";

/// A commit message split along the conventional commit grammar.
///
/// Optional parts are empty strings rather than `None`: an empty footer is
/// meaningful to [`is_breaking_change`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedCommit {
    pub commit_type: String,
    pub scope: String,
    pub breaking_marker: bool,
    pub description: String,
    pub body: String,
    pub footer: String,
}

impl ParsedCommit {
    /// Whether this commit announces a breaking change
    pub fn is_breaking_change(&self) -> bool {
        is_breaking_change(self)
    }

    /// Render the changelog line for this commit,
    /// e.g. `Breaking Changes over api: drop v1 routes`
    pub fn changelog_line(&self) -> String {
        let breaking = if self.is_breaking_change() {
            "Breaking "
        } else {
            ""
        };
        let over = if self.scope.is_empty() {
            String::new()
        } else {
            format!(" over {}", self.scope)
        };

        format!("{}Changes{}: {}", breaking, over, self.description)
    }
}

/// Parse a commit message according to the conventional commits grammar
///
/// Supports formats:
/// - type(scope)!: description
/// - type(scope): description
/// - type!: description
/// - type: description
///
/// followed by an optional body and footer, each after a blank line.
/// Returns `None` when the first line does not follow the grammar.
pub fn parse_conventional_commit(message: &str) -> Option<ParsedCommit> {
    let captures = CONVENTIONAL_COMMIT.captures(message)?;
    let group = |name: &str| {
        captures
            .name(name)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    };

    Some(ParsedCommit {
        commit_type: group("type"),
        scope: group("scope"),
        breaking_marker: captures.name("br").is_some(),
        description: group("description"),
        body: group("body"),
        footer: group("foot"),
    })
}

/// Breaking when the header carries `!`, when the footer starts with
/// `BREAKING CHANGE:`, or when the body does and there is no footer.
pub fn is_breaking_change(parsed: &ParsedCommit) -> bool {
    parsed.breaking_marker
        || (parsed.body.starts_with(BREAKING_CHANGE) && parsed.footer.is_empty())
        || parsed.footer.starts_with(BREAKING_CHANGE)
}
