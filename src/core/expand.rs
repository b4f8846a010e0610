//! Field expansion
//!
//! Turns a manifest field value (absent, a single string, or a list of
//! strings) into a concrete list of relative file paths. List entries may be
//! glob patterns or explicit paths; the two are resolved differently:
//!
//! - glob patterns go through the matcher, and matching nothing is fine
//! - explicit paths must exist, and every missing one is reported

use std::path::Path;

use futures::future::join_all;
use serde_json::Value;

use crate::error::ExpandError;
use crate::infra::{fs, glob};

/// Wildcard markers that make an entry a glob pattern
const GLOB_MARKERS: [char; 4] = ['*', '?', '[', '{'];

fn is_glob(entry: &str) -> bool {
    entry.contains(GLOB_MARKERS)
}

/// Drop a leading `./` so entries compare and serialize consistently
fn normalize(entry: &str) -> String {
    entry.strip_prefix("./").unwrap_or(entry).to_string()
}

/// Expand a field value into an ordered list of relative file paths.
///
/// Glob results come first, then the explicit entries; within each group the
/// relative input order is kept for explicit entries and the matcher's order
/// for glob results. Both resolutions run concurrently.
pub async fn expand_field(cwd: &Path, value: Option<&Value>) -> Result<Vec<String>, ExpandError> {
    let entries: Vec<String> = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        Some(_) => return Ok(Vec::new()),
    };

    let (patterns, explicit): (Vec<String>, Vec<String>) =
        entries.into_iter().partition(|entry| is_glob(entry));

    let (matched, existing) = tokio::join!(
        glob::expand(&patterns, cwd),
        check_explicit(cwd, &explicit)
    );

    let mut files = matched?;
    files.extend(existing?);
    Ok(files)
}

/// Probe every explicit entry concurrently; collect all the missing ones
async fn check_explicit(cwd: &Path, entries: &[String]) -> Result<Vec<String>, ExpandError> {
    if entries.is_empty() {
        return Ok(Vec::new());
    }

    let probes = entries.iter().map(|entry| {
        let path = cwd.join(entry);
        async move { fs::is_file(&path).await }
    });
    let found = join_all(probes).await;

    let missing: Vec<String> = entries
        .iter()
        .zip(&found)
        .filter(|(_, ok)| !**ok)
        .map(|(entry, _)| entry.clone())
        .collect();

    if !missing.is_empty() {
        return Err(ExpandError::NotFound { missing });
    }

    Ok(entries.iter().map(|entry| normalize(entry)).collect())
}
