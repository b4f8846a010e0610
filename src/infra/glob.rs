//! Glob expansion against the filesystem
//!
//! Resolves glob patterns relative to a working directory and returns the
//! matched file paths, relative to that directory. `*` does not cross path
//! separators; use `**` to match recursively.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::error::ExpandError;

fn compile_globset(patterns: &[String]) -> Result<GlobSet, ExpandError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| ExpandError::Pattern {
                pattern: pattern.clone(),
                error: e.to_string(),
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| ExpandError::Pattern {
        pattern: patterns.join(", "),
        error: e.to_string(),
    })
}

/// Expand glob patterns relative to `cwd`.
///
/// Returns the matched paths relative to `cwd`, sorted. Patterns that match
/// nothing contribute nothing; an invalid pattern is an error.
pub async fn expand(patterns: &[String], cwd: &Path) -> Result<Vec<String>, ExpandError> {
    if patterns.is_empty() {
        return Ok(Vec::new());
    }

    let set = compile_globset(patterns)?;
    let root = cwd.to_path_buf();

    // walkdir is synchronous, keep it off the async executor
    tokio::task::spawn_blocking(move || walk_matches(&set, &root))
        .await
        .map_err(|e| ExpandError::Io {
            path: PathBuf::from(cwd),
            error: e.to_string(),
        })
}

fn walk_matches(set: &GlobSet, root: &Path) -> Vec<String> {
    let mut matched = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        let rel = rel.to_string_lossy().replace('\\', "/");
        if set.is_match(&rel) {
            matched.push(rel);
        }
    }
    matched.sort();
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a.css"), "").unwrap();
        std::fs::write(tmp.path().join("b.css"), "").unwrap();
        std::fs::write(tmp.path().join("index.js"), "").unwrap();
        std::fs::create_dir(tmp.path().join("sub")).unwrap();
        std::fs::write(tmp.path().join("sub").join("c.css"), "").unwrap();
        tmp
    }

    #[tokio::test]
    async fn test_star_stays_within_one_component() {
        let tmp = fixture();
        let files = expand(&["*.css".to_string()], tmp.path()).await.unwrap();
        assert_eq!(files, vec!["a.css".to_string(), "b.css".to_string()]);
    }

    #[tokio::test]
    async fn test_double_star_recurses() {
        let tmp = fixture();
        let files = expand(&["**/*.css".to_string()], tmp.path()).await.unwrap();
        assert_eq!(files, vec!["a.css", "b.css", "sub/c.css"]);
    }

    #[tokio::test]
    async fn test_unmatched_pattern_is_not_an_error() {
        let tmp = fixture();
        let files = expand(&["*.scss".to_string()], tmp.path()).await.unwrap();
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_pattern_propagates() {
        let tmp = fixture();
        let err = expand(&["a{".to_string()], tmp.path()).await.unwrap_err();
        assert_eq!(err.code(), "INVALID_PATTERN");
    }

    #[tokio::test]
    async fn test_empty_pattern_list_short_circuits() {
        let tmp = fixture();
        let files = expand(&[], tmp.path()).await.unwrap();
        assert!(files.is_empty());
    }
}
