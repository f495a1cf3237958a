//! Discovery of a Python project's declared version
//!
//! The version is the `__version__` attribute of a module inside the project
//! folder. Dotted module names map to nested packages, so `pkg.sub` is looked
//! up as `pkg/sub.py` and then `pkg/sub/__init__.py`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{ReleaseError, Result};

static VERSION_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^__version__\s*(?::\s*[\w.]+\s*)?=\s*["']([^"'\n]+)["']"#)
        .expect("version assignment pattern is valid")
});

/// Candidate source files for a module, in lookup order
pub fn module_candidates(folder: &Path, module_name: &str) -> Vec<PathBuf> {
    let relative: PathBuf = module_name.split('.').collect();
    vec![
        folder.join(relative.with_extension("py")),
        folder.join(&relative).join("__init__.py"),
    ]
}

/// Locate the source file of `module_name` inside `folder`
pub fn find_module(folder: &Path, module_name: &str) -> Result<PathBuf> {
    module_candidates(folder, module_name)
        .into_iter()
        .find(|path| path.is_file())
        .ok_or_else(|| ReleaseError::ModuleNotFound {
            module: module_name.to_string(),
            folder: folder.display().to_string(),
        })
}

/// Extract the string assigned to `__version__` at module level
pub fn parse_version_attribute(source: &str) -> Option<String> {
    VERSION_ASSIGNMENT
        .captures(source)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Read the declared `__version__` of `module_name` found in `folder`
pub fn discover_version(folder: &Path, module_name: &str) -> Result<String> {
    let path = find_module(folder, module_name)?;
    debug!(path = %path.display(), "reading module version");

    let source = fs::read_to_string(&path)?;
    parse_version_attribute(&source).ok_or_else(|| ReleaseError::MissingVersionAttribute {
        module: module_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_double_quoted() {
        let source = "\"\"\"Doc\"\"\"\n__version__ = \"0.1.0\"\n";
        assert_eq!(parse_version_attribute(source), Some("0.1.0".to_string()));
    }

    #[test]
    fn test_parse_single_quoted_and_annotated() {
        assert_eq!(
            parse_version_attribute("__version__='2.0.0rc1'"),
            Some("2.0.0rc1".to_string())
        );
        assert_eq!(
            parse_version_attribute("__version__: str = \"1.4\""),
            Some("1.4".to_string())
        );
    }

    #[test]
    fn test_parse_ignores_nested_and_missing() {
        assert_eq!(parse_version_attribute("import os\n"), None);
        assert_eq!(
            parse_version_attribute("def f():\n    __version__ = \"9.9.9\"\n"),
            None
        );
        assert_eq!(parse_version_attribute("my__version__ = \"1\""), None);
    }

    #[test]
    fn test_module_candidates_for_dotted_name() {
        let candidates = module_candidates(Path::new("/proj"), "pkg.sub");
        assert_eq!(candidates[0], PathBuf::from("/proj/pkg/sub.py"));
        assert_eq!(candidates[1], PathBuf::from("/proj/pkg/sub/__init__.py"));
    }

    #[test]
    fn test_discover_version_from_module_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tool.py"), "__version__ = \"1.2.3\"\n").unwrap();

        assert_eq!(discover_version(dir.path(), "tool").unwrap(), "1.2.3");
    }

    #[test]
    fn test_discover_version_from_package() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("pkg")).unwrap();
        fs::write(dir.path().join("pkg/__init__.py"), "__version__ = 'v0.3.0'\n").unwrap();

        assert_eq!(discover_version(dir.path(), "pkg").unwrap(), "v0.3.0");
    }

    #[test]
    fn test_discover_version_missing_attribute() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tool.py"), "VERSION = \"1.0\"\n").unwrap();

        let err = discover_version(dir.path(), "tool").unwrap_err();
        assert!(matches!(err, ReleaseError::MissingVersionAttribute { .. }));
    }

    #[test]
    fn test_discover_version_missing_module() {
        let dir = TempDir::new().unwrap();

        let err = discover_version(dir.path(), "absent").unwrap_err();
        assert!(matches!(err, ReleaseError::ModuleNotFound { .. }));
    }
}
