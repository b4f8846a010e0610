//! Filesystem probes and JSON file access
//!
//! Existence checks never fail: a path that cannot be stat'ed simply does
//! not exist. Only downstream consequences (a declared directory that is
//! missing, an unreadable manifest) become errors in the calling layer.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::StoreError;

/// Check whether a path exists, whatever its type
pub async fn exists(path: &Path) -> bool {
    tokio::fs::metadata(path).await.is_ok()
}

/// Check whether a path exists and is a regular file
pub async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

/// Check whether a path exists and is a directory
pub async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

/// Read a file and parse it as a JSON object
pub async fn read_json(file: &Path) -> Result<Map<String, Value>, StoreError> {
    let content =
        tokio::fs::read_to_string(file)
            .await
            .map_err(|e| StoreError::ReadJson {
                file: file.to_path_buf(),
                error: e.to_string(),
            })?;

    let value: Value = serde_json::from_str(&content).map_err(|e| StoreError::ReadJson {
        file: file.to_path_buf(),
        error: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::ReadJson {
            file: file.to_path_buf(),
            error: "not a JSON object".to_string(),
        }),
    }
}

/// Serialize a value as pretty-printed JSON (2-space indentation) and write it
pub async fn write_json(file: &Path, value: &Value) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(value).map_err(|e| StoreError::SavePkg {
        file: file.to_path_buf(),
        error: e.to_string(),
    })?;

    tokio::fs::write(file, content)
        .await
        .map_err(|e| StoreError::SavePkg {
            file: file.to_path_buf(),
            error: e.to_string(),
        })
}

/// Remove a file, ignoring any failure
pub async fn remove_file_quiet(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::debug!("could not remove '{}': {}", path.display(), e);
    }
}
