//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use tempfile::TempDir;

/// Test package context
///
/// Creates a temporary directory for test packages and provides
/// utilities for setting up manifest scenarios.
pub struct TestPackage {
    /// Temporary directory for the test package
    pub dir: TempDir,
}

impl TestPackage {
    /// Create a new test package in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test package directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test package
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test package
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the test package
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test package
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Parse a file from the test package as JSON
    pub fn read_json(&self, name: &str) -> serde_json::Value {
        serde_json::from_str(&self.read_file(name)).expect("Failed to parse JSON")
    }
}

impl Default for TestPackage {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample native manifest JSON for testing
#[allow(dead_code)]
pub const SAMPLE_CORTEX_JSON: &str = r#"{
  "name": "neuron",
  "version": "1.0.0",
  "main": "index.js",
  "css": ["neuron.css"]
}"#;

/// Sample legacy manifest JSON for testing
#[allow(dead_code)]
pub const SAMPLE_PACKAGE_JSON: &str = r#"{
  "name": "neuron",
  "version": "1.0.0",
  "description": "a test package",
  "dependencies": {"express": "4.0.0"},
  "scripts": {"test": "make test"},
  "cortex": {
    "main": "lib/neuron.js",
    "dependencies": {"jquery": "2.0.0"}
  }
}"#;
