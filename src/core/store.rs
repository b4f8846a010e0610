//! Manifest read/save orchestration
//!
//! Ties the locator, the merger and JSON serialization together for
//! external callers. Every call produces a fresh [`Manifest`]; nothing is
//! cached in memory across calls.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::config::defaults::DOCUMENT_CACHE;
use crate::core::clean;
use crate::core::locate;
use crate::core::manifest::Manifest;
use crate::error::StoreError;
use crate::infra::{enrich, fs};

/// Read the manifest of `cwd`.
///
/// Strict lookup: fails when neither manifest file exists. A `package.json`
/// manifest is merged into the native shape; `use_inherits` keeps its
/// top-level fields reachable as a read-through fallback.
pub async fn read(cwd: &Path, use_inherits: bool) -> Result<Manifest, StoreError> {
    let file = locate::package_file(cwd, true).await?;
    let raw = fs::read_json(&file).await?;

    Ok(if locate::is_cortex_json(&file) {
        Manifest::from_native(raw)
    } else {
        Manifest::from_package_json(raw, use_inherits)
    })
}

/// Read the enhanced and cooked manifest of `cwd`, for publishing.
///
/// On top of [`read`], the manifest gains `readme`, `readmeFilename` and
/// `gitHead`, the name is checked for uppercase letters, and the `css` and
/// `main` fields are cleaned against the package directory.
pub async fn enhanced(cwd: &Path) -> Result<Manifest, StoreError> {
    let file = locate::package_file(cwd, true).await?;
    let raw = enrich::enhance_package_file(&file).await?;

    let mut pkg = if locate::is_cortex_json(&file) {
        Manifest::from_native(raw)
    } else {
        Manifest::from_package_json(raw, false)
    };

    clean::check_name(&pkg)?;
    clean::clean_css(cwd, &mut pkg).await?;
    clean::clean_main(cwd, &mut pkg).await?;

    Ok(pkg)
}

/// Save a manifest back to disk.
///
/// A native `cortex.json` receives the manifest directly. Saving through a
/// `package.json` re-reads the raw file, replaces its `cortex` field and
/// writes the whole object back, leaving unrelated metadata untouched.
/// Lenient lookup: a project without any manifest file gets a new
/// `cortex.json`.
pub async fn save(cwd: &Path, pkg: &Manifest) -> Result<(), StoreError> {
    let file = locate::package_file(cwd, false).await?;

    if locate::is_cortex_json(&file) {
        return fs::write_json(&file, &pkg.to_value()).await;
    }

    let mut raw = fs::read_json(&file).await?;
    raw.insert("cortex".to_string(), pkg.to_value());
    fs::write_json(&file, &Value::Object(raw)).await
}

/// Read the cached document of a package, saved by the last install or
/// publish run.
///
/// Never fails: an absent or unreadable cache reads as empty, and a corrupt
/// cache file is removed (best-effort) and also reads as empty.
pub async fn cached_document(name: &str, cache_root: &Path) -> Map<String, Value> {
    let document_file = cache_root.join(name).join(DOCUMENT_CACHE);

    let content = match tokio::fs::read_to_string(&document_file).await {
        Ok(content) => content,
        Err(_) => return Map::new(),
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => map,
        Ok(_) => Map::new(),
        Err(e) => {
            // removes bad data
            tracing::warn!(
                "corrupt document cache '{}': {}",
                document_file.display(),
                e
            );
            fs::remove_file_quiet(&document_file).await;
            Map::new()
        }
    }
}

/// Per-user default cache root
pub fn default_cache_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("cortex")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cache_root_ends_with_cortex() {
        assert!(default_cache_root().ends_with("cortex"));
    }
}
