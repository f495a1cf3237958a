pub mod boundary;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod conventional;
pub mod domain;
pub mod error;
pub mod forge;
pub mod git;
pub mod project;
pub mod ui;
pub mod version;

pub use error::{ReleaseError, Result};
