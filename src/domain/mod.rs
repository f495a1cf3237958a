//! Domain types shared by the git and forge collaborators

pub mod commit;
pub mod tag;

pub use commit::RawCommit;
pub use tag::{contains_tag, latest_tag, Tag};
