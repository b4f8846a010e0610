//! Default configuration values

/// Native manifest filename
pub const CORTEX_MANIFEST: &str = "cortex.json";

/// Fallback manifest filename from the node ecosystem
pub const NODE_MANIFEST: &str = "package.json";

/// Keys allowed under the `directories` field
pub const SUPPORTED_DIRS: &[&str] = &["src", "dist"];

/// Fields that always default to an empty object on a merged manifest
pub const DEPENDENCY_FIELDS: &[&str] = &[
    "dependencies",
    "asyncDependencies",
    "devDependencies",
    "engines",
    "scripts",
];

/// Filename of the per-package document cache
pub const DOCUMENT_CACHE: &str = "document.cache";

/// Entry file probed when `main` is not set
pub const DEFAULT_MAIN: &str = "index.js";
