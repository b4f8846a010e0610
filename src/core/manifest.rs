//! Manifest data model and merging
//!
//! A [`Manifest`] is a two-layer view over JSON objects: a `base` layer that
//! receives all writes, and an optional `fallback` layer that reads pass
//! through to when the base does not set a field. The fallback layer exists
//! only for manifests merged from `package.json` in inherits mode, where
//! unset fields transparently read the node-ecosystem values.
//!
//! A `null` in the base layer is the explicit "no value" marker: it masks
//! any fallback value and is dropped on serialization, so a cleared field
//! never reaches disk.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::config::defaults::DEPENDENCY_FIELDS;

/// Normalized package manifest
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    /// Own fields; all writes land here
    base: Map<String, Value>,

    /// Read-through layer for unset fields (inherits mode only)
    fallback: Option<Map<String, Value>>,
}

impl Manifest {
    /// Build a manifest from a native `cortex.json` object
    pub fn from_native(raw: Map<String, Value>) -> Self {
        let mut pkg = Self {
            base: raw,
            fallback: None,
        };
        pkg.default_fields();
        pkg
    }

    /// Merge a legacy `package.json` object into manifest shape.
    ///
    /// The nested `cortex` sub-object is the authoritative layer. With
    /// `use_inherits` set, the remaining top-level fields stay reachable as
    /// a read-through fallback; otherwise they are copied in once, without
    /// overwriting anything the `cortex` block already set.
    pub fn from_package_json(mut raw: Map<String, Value>, use_inherits: bool) -> Self {
        let nested = match raw.remove("cortex") {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };

        if use_inherits {
            let mut pkg = Self {
                base: nested,
                fallback: Some(raw),
            };
            pkg.default_fields();
            pkg
        } else {
            let mut pkg = Self {
                base: nested,
                fallback: None,
            };
            // default first: the dependency fields of package.json belong to
            // the node ecosystem and must not leak through the mix below
            pkg.default_fields();
            for (key, value) in raw {
                pkg.base.entry(key).or_insert(value);
            }
            pkg.base.remove("cortex");
            pkg
        }
    }

    /// Set every absent dependency-like field to an empty object.
    ///
    /// Operates on the base layer only; in inherits mode this intentionally
    /// shadows the fallback values of the same names.
    pub fn default_fields(&mut self) {
        for key in DEPENDENCY_FIELDS {
            self.base
                .entry((*key).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
    }

    /// Read a field, checking the base layer first, then the fallback
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.base
            .get(key)
            .or_else(|| self.fallback.as_ref().and_then(|f| f.get(key)))
    }

    /// Write a field to the base layer
    pub fn set(&mut self, key: &str, value: Value) {
        self.base.insert(key.to_string(), value);
    }

    /// Clear a field.
    ///
    /// Writes an explicit `null` to the base layer rather than removing the
    /// key: removal could not mask a value inherited from the fallback.
    pub fn clear(&mut self, key: &str) {
        self.base.insert(key.to_string(), Value::Null);
    }

    /// Package name
    pub fn name(&self) -> Option<&str> {
        self.get("name")?.as_str()
    }

    /// `main` entry, if set to a string
    pub fn main(&self) -> Option<&str> {
        match self.get("main") {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// The `directories` mapping, if present
    pub fn directories(&self) -> Option<&Map<String, Value>> {
        self.get("directories")?.as_object()
    }

    /// Read a field as a list of strings.
    ///
    /// A single string reads as a one-element list; anything else reads as
    /// empty. Non-string items are skipped.
    pub fn string_list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::String(s)) => vec![s.clone()],
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Serialize the manifest to a JSON object.
    ///
    /// Only the base layer is written; cleared (`null`) fields are dropped.
    pub fn to_value(&self) -> Value {
        let mut map = self.base.clone();
        map.retain(|_, value| !value.is_null());
        Value::Object(map)
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}
