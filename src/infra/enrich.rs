//! Manifest enrichment
//!
//! Reads a manifest file and augments the parsed object with publishing
//! metadata gathered from the package directory:
//!
//! - `readme` - content of the package readme
//! - `readmeFilename` - the readme filename that was picked up
//! - `gitHead` - the commit the repository HEAD points at

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::infra::fs;

fn readme_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^readme(\.[^.]*)?$").unwrap())
}

/// Read a manifest file and enrich it with `readme`, `readmeFilename` and
/// `gitHead`. Fields that cannot be gathered are left absent; only the
/// manifest read itself can fail.
pub async fn enhance_package_file(file: &Path) -> Result<Map<String, Value>, StoreError> {
    let mut json = fs::read_json(file).await?;

    let dir = file.parent().unwrap_or_else(|| Path::new("."));

    if let Some((filename, content)) = read_readme(dir).await {
        json.insert("readme".to_string(), Value::String(content));
        json.insert("readmeFilename".to_string(), Value::String(filename));
    }

    if let Some(head) = git_head(dir).await {
        json.insert("gitHead".to_string(), Value::String(head));
    }

    Ok(json)
}

/// Find and read the package readme, case-insensitively
async fn read_readme(dir: &Path) -> Option<(String, String)> {
    let mut entries = tokio::fs::read_dir(dir).await.ok()?;
    let mut candidates = Vec::new();

    while let Ok(Some(entry)) = entries.next_entry().await {
        let name = entry.file_name().to_string_lossy().into_owned();
        if readme_regex().is_match(&name) {
            candidates.push(name);
        }
    }

    // deterministic pick when several readme variants exist
    candidates.sort();
    let filename = candidates.into_iter().next()?;

    let content = tokio::fs::read_to_string(dir.join(&filename)).await.ok()?;
    Some((filename, content))
}

/// Resolve the commit hash the repository HEAD points at.
///
/// Follows a symbolic ref through the loose ref file and `packed-refs`.
async fn git_head(dir: &Path) -> Option<String> {
    let git_dir = dir.join(".git");
    let head = tokio::fs::read_to_string(git_dir.join("HEAD")).await.ok()?;
    let head = head.trim();

    let Some(ref_name) = head.strip_prefix("ref: ") else {
        // detached HEAD holds the hash directly
        return Some(head.to_string());
    };
    let ref_name = ref_name.trim();

    if let Ok(content) = tokio::fs::read_to_string(git_dir.join(ref_name)).await {
        return Some(content.trim().to_string());
    }

    let packed = tokio::fs::read_to_string(git_dir.join("packed-refs"))
        .await
        .ok()?;
    packed
        .lines()
        .filter(|line| !line.starts_with('#') && !line.starts_with('^'))
        .find_map(|line| {
            let (hash, name) = line.split_once(' ')?;
            (name.trim() == ref_name).then(|| hash.to_string())
        })
}
