//! Manifest validation and cleaning pipeline
//!
//! Runs field-level checks against a working directory in a fixed order,
//! stopping at the first failure:
//!
//! 1. `name` must be lowercase
//! 2. `directories` keys must be supported and exist on disk
//! 3. `css` expands to a concrete file list
//! 4. `main` resolves to an existing file, or falls back, or is cleared
//! 5. `entries` expands to a concrete file list
//! 6. the package must expose at least one entry
//!
//! Independent probes inside a single step run concurrently; the first
//! failure in input order wins once all of them have completed.

use std::path::{Path, PathBuf};

use futures::future::join_all;
use serde_json::Value;

use crate::config::defaults::{DEFAULT_MAIN, SUPPORTED_DIRS};
use crate::core::expand;
use crate::core::manifest::Manifest;
use crate::error::{ExpandError, ValidateError};
use crate::infra::fs;

/// Validate and clean a manifest in place
pub async fn clean(cwd: &Path, pkg: &mut Manifest) -> Result<(), ValidateError> {
    check_name(pkg)?;
    check_directories(cwd, pkg).await?;
    clean_css(cwd, pkg).await?;
    clean_main(cwd, pkg).await?;
    clean_entries(cwd, pkg).await?;
    check_entry(pkg)
}

/// Fail on a package name with uppercase letters; never silently corrected
pub fn check_name(pkg: &Manifest) -> Result<(), ValidateError> {
    let Some(name) = pkg.name() else {
        return Ok(());
    };

    if name != name.to_lowercase() {
        return Err(ValidateError::UpperName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Validate the `directories` mapping.
///
/// `directories.css` gets its own deprecation error; any other key outside
/// the supported set is rejected. Accepted entries are then probed on disk
/// concurrently.
pub async fn check_directories(cwd: &Path, pkg: &Manifest) -> Result<(), ValidateError> {
    let Some(directories) = pkg.directories() else {
        return Ok(());
    };

    let mut accepted: Vec<(String, PathBuf)> = Vec::new();
    for (dir, value) in directories {
        if dir == "css" {
            return Err(ValidateError::DirCss);
        }
        if !SUPPORTED_DIRS.contains(&dir.as_str()) {
            return Err(ValidateError::UnsupportedDir { dir: dir.clone() });
        }
        let path = value.as_str().unwrap_or(dir);
        accepted.push((dir.clone(), cwd.join(path)));
    }

    let probes = accepted.iter().map(|(_, path)| fs::is_dir(path));
    let found = join_all(probes).await;

    // all probes have completed; report the first miss in input order
    for ((dir, _), ok) in accepted.iter().zip(found) {
        if !ok {
            return Err(ValidateError::DirNotFound { dir: dir.clone() });
        }
    }
    Ok(())
}

/// Expand `css` into a concrete file list; always leaves an array behind
pub async fn clean_css(cwd: &Path, pkg: &mut Manifest) -> Result<(), ValidateError> {
    let value = pkg.get("css").cloned();
    let files = expand::expand_field(cwd, value.as_ref())
        .await
        .map_err(|e| match e {
            ExpandError::NotFound { missing } => ValidateError::CssNotFound { css: missing },
            other => ValidateError::Expand(other),
        })?;

    pkg.set("css", to_string_array(files));
    Ok(())
}

/// Expand `entries` into a concrete file list; always leaves an array behind
pub async fn clean_entries(cwd: &Path, pkg: &mut Manifest) -> Result<(), ValidateError> {
    let value = pkg.get("entries").cloned();
    let files = expand::expand_field(cwd, value.as_ref())
        .await
        .map_err(|e| match e {
            ExpandError::NotFound { missing } => ValidateError::EntriesNotFound { missing },
            other => ValidateError::Expand(other),
        })?;

    pkg.set("entries", to_string_array(files));
    Ok(())
}

/// Resolve `main` to a working-directory-relative path.
///
/// An explicitly declared `main` must exist. Without one, `index.js` and
/// `<name>.js` are tried in turn; when neither resolves the field is
/// cleared rather than left dangling.
pub async fn clean_main(cwd: &Path, pkg: &mut Manifest) -> Result<(), ValidateError> {
    if let Some(main) = pkg.main() {
        let main = main.to_string();
        match resolve_file(cwd, &main).await {
            Some(resolved) => {
                pkg.set("main", Value::String(relative_to(cwd, &resolved)));
            }
            None => return Err(ValidateError::MainNotFound { main }),
        }
        return Ok(());
    }

    let mut resolved = resolve_file(cwd, DEFAULT_MAIN).await;
    if resolved.is_none() {
        if let Some(name) = pkg.name() {
            resolved = resolve_file(cwd, &format!("{name}.js")).await;
        }
    }

    match resolved {
        Some(path) => pkg.set("main", Value::String(relative_to(cwd, &path))),
        None => pkg.clear("main"),
    }
    Ok(())
}

/// A cleaned package must expose something consumable
pub fn check_entry(pkg: &Manifest) -> Result<(), ValidateError> {
    if pkg.main().is_some()
        || !pkg.string_list("css").is_empty()
        || !pkg.string_list("entries").is_empty()
    {
        return Ok(());
    }
    Err(ValidateError::NoEntry)
}

/// Resolve a relative path against `cwd` to a canonical file path
async fn resolve_file(cwd: &Path, rel: &str) -> Option<PathBuf> {
    let joined = cwd.join(rel);
    if !fs::is_file(&joined).await {
        return None;
    }
    tokio::fs::canonicalize(&joined).await.ok()
}

/// Express a resolved absolute path relative to the working directory.
///
/// Canonicalization can rewrite the prefix of a symlinked directory
/// (`/var/folders/...` resolves to `/private/var/folders/...` on macOS), so
/// the working-directory string is located inside the resolved path and the
/// path is sliced from there before relativizing.
fn relative_to(cwd: &Path, resolved: &Path) -> String {
    let cwd_str = cwd.to_string_lossy();
    let resolved_str = resolved.to_string_lossy();

    let sliced = match resolved_str.find(cwd_str.as_ref()) {
        Some(start) => PathBuf::from(&resolved_str[start..]),
        None => resolved.to_path_buf(),
    };

    match sliced.strip_prefix(cwd) {
        Ok(rel) => rel.to_string_lossy().into_owned(),
        Err(_) => sliced.to_string_lossy().into_owned(),
    }
}

fn to_string_array(files: Vec<String>) -> Value {
    Value::Array(files.into_iter().map(Value::String).collect())
}
