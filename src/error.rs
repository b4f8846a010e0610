//! Error types for cortex-manifest
//!
//! Domain-specific error types using thiserror. Every error carries a stable
//! code string (see [`StoreError::code`] and friends) so that callers can
//! match on the error kind without inspecting the message text.

use std::path::PathBuf;
use thiserror::Error;

/// Field expansion errors
#[derive(Error, Debug)]
pub enum ExpandError {
    /// Explicit entries that do not exist on disk
    #[error("paths not found: {missing:?}")]
    NotFound { missing: Vec<String> },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {error}")]
    Pattern { pattern: String, error: String },

    /// IO error while walking or probing the filesystem
    #[error("IO error for '{path}': {error}")]
    Io { path: PathBuf, error: String },
}

impl ExpandError {
    /// Stable code string for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Pattern { .. } => "INVALID_PATTERN",
            Self::Io { .. } => "EIO",
        }
    }
}

/// Manifest validation and cleaning errors
#[derive(Error, Debug)]
pub enum ValidateError {
    /// Package name contains uppercase letters
    #[error("package.name '{name}' should not contain uppercased letters")]
    UpperName { name: String },

    /// `directories.css` is a removed legacy field
    #[error("`directories.css` is no longer supported, use the `css` field instead")]
    DirCss,

    /// Unsupported key under `directories`
    #[error("`directories.{dir}` is not supported")]
    UnsupportedDir { dir: String },

    /// A declared directory does not exist
    #[error("`directories.{dir}` is defined, but not found")]
    DirNotFound { dir: String },

    /// The declared `main` file does not exist
    #[error("`main` is defined, but '{main}' is not found")]
    MainNotFound { main: String },

    /// Explicit `css` entries do not exist
    #[error("`css` is defined, but no css files were found: {css:?}")]
    CssNotFound { css: Vec<String> },

    /// Explicit `entries` entries do not exist
    #[error("`entries` is defined, but not found: {missing:?}")]
    EntriesNotFound { missing: Vec<String> },

    /// The package exposes no entry at all
    #[error("package must expose at least one of `main`, `css` or `entries`")]
    NoEntry,

    /// Underlying expansion failure (bad pattern or IO), forwarded unchanged
    #[error(transparent)]
    Expand(ExpandError),
}

impl ValidateError {
    /// Stable code string for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::UpperName { .. } => "ERROR_UPPER_NAME",
            Self::DirCss => "NO_SUPPORT_DIR_CSS",
            Self::UnsupportedDir { .. } => "NO_SUPPORT_DIR",
            Self::DirNotFound { .. } => "DIR_NOT_FOUND",
            Self::MainNotFound { .. } => "CORTEX_MAIN_NOT_FOUND",
            Self::CssNotFound { .. } => "INVALID_CORTEX_CSS",
            Self::EntriesNotFound { .. } => "CORTEX_ENTRIES_NOT_FOUND",
            Self::NoEntry => "CORTEX_NO_ENTRY",
            Self::Expand(e) => e.code(),
        }
    }
}

/// Manifest lookup, read and save errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Neither manifest file exists (strict lookup)
    #[error("Both cortex.json and package.json are not found in '{cwd}'")]
    NotFound { cwd: PathBuf },

    /// Failed to read or parse a manifest file
    #[error("Error reading '{file}': {error}")]
    ReadJson { file: PathBuf, error: String },

    /// Failed to write a manifest file
    #[error("Failed to save package to '{file}': {error}")]
    SavePkg { file: PathBuf, error: String },

    /// Validation failure while cooking a manifest
    #[error(transparent)]
    Validate(#[from] ValidateError),
}

impl StoreError {
    /// Stable code string for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "PKG_NOT_FOUND",
            Self::ReadJson { .. } => "ERROR_READ_JSON",
            Self::SavePkg { .. } => "ERROR_SAVE_PKG",
            Self::Validate(e) => e.code(),
        }
    }
}
