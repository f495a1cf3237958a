//! Changelog aggregation and rendering
//!
//! Commits are classified one by one and their changelog lines grouped by
//! commit type. Groups keep the order in which their type was first seen, so
//! the rendered document follows the order the commits were supplied in.

use tracing::debug;

use crate::conventional::parse_conventional_commit;
use crate::domain::RawCommit;

/// Group key for commits that do not follow the conventional commit grammar
pub const OTHERS_GROUP: &str = "others";

const BREAKING_WARNING: &str = "> WARNING: BREAKING CHANGES !";

/// Insertion-ordered mapping from group key to changelog lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangelogGroups {
    groups: Vec<(String, Vec<String>)>,
}

impl ChangelogGroups {
    /// Create an empty grouping
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line to `key`, creating the group at the end if it is new
    pub fn push(&mut self, key: &str, line: impl Into<String>) {
        let line = line.into();
        match self.groups.iter_mut().find(|(k, _)| k == key) {
            Some((_, lines)) => lines.push(line),
            None => self.groups.push((key.to_string(), vec![line])),
        }
    }

    /// Lines filed under `key`, if the group exists
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, lines)| lines.as_slice())
    }

    /// Group keys in first-encountered order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(k, _)| k.as_str())
    }

    /// Groups in first-encountered order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(k, lines)| (k.as_str(), lines.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// A changelog ready to be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogDocument {
    /// Version as given to [`aggregate`]; a leading `v` is stripped when rendered
    pub version: String,
    /// True when any commit in the range is a breaking change
    pub breaking: bool,
    pub groups: ChangelogGroups,
}

impl ChangelogDocument {
    /// Render this document, see [`render`]
    pub fn render(&self) -> String {
        render(self)
    }
}

/// Classify every commit message and group the resulting changelog lines.
///
/// Commits are consumed in the order given. Messages that do not follow the
/// conventional commit grammar are filed under [`OTHERS_GROUP`] by their first line.
pub fn aggregate<I, S>(messages: I, version: &str) -> ChangelogDocument
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut groups = ChangelogGroups::new();
    let mut breaking = false;

    for message in messages {
        let message = message.as_ref().trim();
        let first_line = message.lines().next().unwrap_or_default();

        let Some(parsed) = parse_conventional_commit(message) else {
            debug!(commit = first_line, "not a conventional commit");
            groups.push(OTHERS_GROUP, first_line);
            continue;
        };

        let commit_breaking = parsed.is_breaking_change();
        debug!(
            commit_type = %parsed.commit_type,
            scope = %parsed.scope,
            breaking = commit_breaking,
            "classified commit"
        );
        groups.push(&parsed.commit_type, parsed.changelog_line());
        breaking |= commit_breaking;
    }

    ChangelogDocument {
        version: version.to_string(),
        breaking,
        groups,
    }
}

/// Aggregate the messages of raw commits, see [`aggregate`]
pub fn aggregate_commits(commits: &[RawCommit], version: &str) -> ChangelogDocument {
    aggregate(commits.iter().map(|c| c.message.as_str()), version)
}

/// Render a changelog document as markdown.
///
/// ```text
/// Version 1.2.3
///
/// > WARNING: BREAKING CHANGES !
///
/// ## Change Log
/// ### Feat
/// * Changes over api: add endpoint
///
/// ### Others
/// * wip stuff
/// ```
///
/// Groups are separated by a blank line; older releases of this tool used a
/// single newline, so bodies of past releases differ in that spacing.
pub fn render(doc: &ChangelogDocument) -> String {
    let version = doc.version.strip_prefix('v').unwrap_or(&doc.version);
    let mut out = format!("Version {}", version);
    if doc.breaking {
        out.push_str("\n\n");
        out.push_str(BREAKING_WARNING);
    }
    out.push_str("\n\n## Change Log");

    let sections: Vec<String> = doc
        .groups
        .iter()
        .map(|(key, lines)| format!("### {}\n{}", title_case(key), format_lines(lines)))
        .collect();
    if !sections.is_empty() {
        out.push('\n');
        out.push_str(&sections.join("\n\n"));
    }

    out
}

fn format_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| format!("* {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Upper-case the first letter of every run of letters, lower-case the rest
/// (`ci_cd` -> `Ci_Cd`, `v2fix` -> `V2Fix`)
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_groups_in_first_seen_order() {
        let doc = aggregate(["feat: a", "feat: b", "docs: c"], "v1.0.0");
        assert_eq!(doc.groups.keys().collect::<Vec<_>>(), vec!["feat", "docs"]);
        assert_eq!(
            doc.groups.get("feat").unwrap(),
            &["Changes: a".to_string(), "Changes: b".to_string()]
        );
        assert_eq!(doc.groups.get("docs").unwrap(), &["Changes: c".to_string()]);
        assert!(!doc.breaking);
    }

    #[test]
    fn test_aggregate_files_unparsed_under_others() {
        let doc = aggregate(["wip stuff\n\nmore text", "fix(db): pool size"], "1.0.0");
        assert_eq!(
            doc.groups.get(OTHERS_GROUP).unwrap(),
            &["wip stuff".to_string()]
        );
        assert_eq!(
            doc.groups.get("fix").unwrap(),
            &["Changes over db: pool size".to_string()]
        );
    }

    #[test]
    fn test_aggregate_trims_message() {
        let doc = aggregate(["\n  feat: padded  \n"], "1.0.0");
        assert_eq!(doc.groups.get("feat").unwrap(), &["Changes: padded".to_string()]);

        let doc = aggregate(["   \n"], "1.0.0");
        assert_eq!(doc.groups.get(OTHERS_GROUP).unwrap(), &[String::new()]);
    }

    #[test]
    fn test_aggregate_breaking_flag_is_global() {
        let doc = aggregate(["feat: a", "fix!: b", "docs: c"], "1.0.0");
        assert!(doc.breaking);
        assert_eq!(
            doc.groups.get("fix").unwrap(),
            &["Breaking Changes: b".to_string()]
        );
    }

    #[test]
    fn test_aggregate_empty() {
        let doc = aggregate(Vec::<String>::new(), "v1.2.3");
        assert!(doc.groups.is_empty());
        assert!(!doc.breaking);
        assert_eq!(render(&doc), "Version 1.2.3\n\n## Change Log");
    }

    #[test]
    fn test_aggregate_commits() {
        let commits = vec![
            RawCommit::new("b2", "fix: second"),
            RawCommit::new("a1", "feat(cli): first"),
        ];
        let doc = aggregate_commits(&commits, "v0.2.0");
        assert_eq!(doc.groups.keys().collect::<Vec<_>>(), vec!["fix", "feat"]);
    }

    #[test]
    fn test_render_full_document() {
        let doc = aggregate(
            [
                "feat(api)!: new routes",
                "fix: typo",
                "random commit",
                "feat: more",
            ],
            "v2.0.0",
        );
        let expected = "Version 2.0.0\n\
                        \n\
                        > WARNING: BREAKING CHANGES !\n\
                        \n\
                        ## Change Log\n\
                        ### Feat\n\
                        * Breaking Changes over api: new routes\n\
                        * Changes: more\n\
                        \n\
                        ### Fix\n\
                        * Changes: typo\n\
                        \n\
                        ### Others\n\
                        * random commit";
        assert_eq!(render(&doc), expected);
    }

    #[test]
    fn test_render_strips_single_leading_v() {
        let doc = aggregate(["feat: a"], "1.2.3");
        assert!(render(&doc).starts_with("Version 1.2.3\n"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let doc = aggregate(["feat: a", "chore: b", "oops"], "v1.0.0");
        assert_eq!(render(&doc), render(&doc));
        assert_eq!(doc.render(), render(&doc));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("feat"), "Feat");
        assert_eq!(title_case("others"), "Others");
        assert_eq!(title_case("CI"), "Ci");
        assert_eq!(title_case("ci_cd"), "Ci_Cd");
        assert_eq!(title_case("v2fix"), "V2Fix");
        assert_eq!(title_case(""), "");
    }
}
