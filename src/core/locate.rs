//! Manifest file location
//!
//! Decides which of `cortex.json` and `package.json` represents the
//! manifest of a directory, and finds the project root by walking upward.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::config::defaults::{CORTEX_MANIFEST, NODE_MANIFEST};
use crate::error::StoreError;
use crate::infra::fs;

fn cortex_json_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)cortex\.json$").unwrap())
}

/// Whether a path names a native-format manifest file
pub fn is_cortex_json(file: &Path) -> bool {
    cortex_json_regex().is_match(&file.to_string_lossy())
}

/// Find the manifest file of `cwd`.
///
/// `cortex.json` wins over `package.json`. When neither exists, strict mode
/// fails; otherwise the `cortex.json` path is returned for the caller to
/// create.
pub async fn package_file(cwd: &Path, strict: bool) -> Result<PathBuf, StoreError> {
    let cortex_json = cwd.join(CORTEX_MANIFEST);
    if fs::exists(&cortex_json).await {
        return Ok(cortex_json);
    }

    let package_json = cwd.join(NODE_MANIFEST);
    if fs::exists(&package_json).await {
        tracing::debug!("no cortex.json, using '{}'", package_json.display());
        return Ok(package_json);
    }

    if strict {
        return Err(StoreError::NotFound {
            cwd: cwd.to_path_buf(),
        });
    }

    Ok(cortex_json)
}

/// Find the project root by walking upward from `start`.
///
/// A directory containing either manifest file is the root. Returns `None`
/// at the filesystem root; never reads file content.
pub async fn package_root(start: &Path) -> Option<PathBuf> {
    let mut cwd = start.to_path_buf();

    loop {
        if fs::exists(&cwd.join(CORTEX_MANIFEST)).await
            || fs::exists(&cwd.join(NODE_MANIFEST)).await
        {
            return Some(cwd);
        }

        match cwd.parent() {
            Some(parent) => cwd = parent.to_path_buf(),
            None => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_cortex_json_matches_suffix_case_insensitively() {
        assert!(is_cortex_json(Path::new("/a/b/cortex.json")));
        assert!(is_cortex_json(Path::new("/a/b/Cortex.JSON")));
        assert!(!is_cortex_json(Path::new("/a/b/package.json")));
        assert!(!is_cortex_json(Path::new("/a/b/cortex.json.bak")));
    }

    #[tokio::test]
    async fn test_cortex_json_wins_over_package_json() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("cortex.json"), "{}").unwrap();
        std::fs::write(tmp.path().join("package.json"), "{}").unwrap();

        let file = package_file(tmp.path(), true).await.unwrap();
        assert_eq!(file, tmp.path().join("cortex.json"));
    }

    #[tokio::test]
    async fn test_package_json_is_the_fallback() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("package.json"), "{}").unwrap();

        let file = package_file(tmp.path(), true).await.unwrap();
        assert_eq!(file, tmp.path().join("package.json"));
    }

    #[tokio::test]
    async fn test_strict_lookup_fails_when_nothing_exists() {
        let tmp = TempDir::new().unwrap();

        let err = package_file(tmp.path(), true).await.unwrap_err();
        assert_eq!(err.code(), "PKG_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_lenient_lookup_defaults_to_cortex_json() {
        let tmp = TempDir::new().unwrap();

        let file = package_file(tmp.path(), false).await.unwrap();
        assert_eq!(file, tmp.path().join("cortex.json"));
        assert!(!file.exists());
    }

    #[tokio::test]
    async fn test_package_root_walks_upward() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("package.json"), "{}").unwrap();
        let nested = tmp.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();

        let root = package_root(&nested).await;
        assert_eq!(root, Some(tmp.path().to_path_buf()));
    }

    #[tokio::test]
    async fn test_package_root_stops_at_the_manifest_level() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("cortex.json"), "{}").unwrap();
        let nested = tmp.path().join("src");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("package.json"), "{}").unwrap();

        let root = package_root(&nested).await;
        assert_eq!(root, Some(nested));
    }
}
