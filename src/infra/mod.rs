//! Infrastructure layer
//!
//! Handles all I/O operations: filesystem probes, JSON reading and writing,
//! glob expansion and manifest enrichment. This module is the only place
//! where side effects occur.

pub mod enrich;
pub mod fs;
pub mod glob;
