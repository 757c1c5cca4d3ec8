//! JSON schema contributions.
//!
//! Contributions register schemas for the synthetic JSON documents they
//! produce (cell metadata, for one) so the host's JSON language support can
//! validate and complete them. The registry only stores the schema values;
//! interpreting them is the host's business.

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::error::{RegistryError, Result};

/// Registry of contributed JSON schemas, keyed by schema URI.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
	schemas: FxHashMap<String, Value>,
}

impl SchemaRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a schema under its URI.
	pub fn register(&mut self, uri: impl Into<String>, schema: Value) -> Result<()> {
		let uri = uri.into();
		if self.schemas.contains_key(&uri) {
			return Err(RegistryError::duplicate("schema", uri));
		}
		self.schemas.insert(uri, schema);
		Ok(())
	}

	/// Looks a schema up by URI.
	pub fn get(&self, uri: &str) -> Option<&Value> {
		self.schemas.get(uri)
	}

	/// Number of registered schemas.
	pub fn len(&self) -> usize {
		self.schemas.len()
	}

	/// Whether the registry is empty.
	pub fn is_empty(&self) -> bool {
		self.schemas.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_register_and_get() {
		let mut registry = SchemaRegistry::new();
		registry.register("quill://schemas/test", json!({"type": "object"})).unwrap();
		assert_eq!(registry.get("quill://schemas/test"), Some(&json!({"type": "object"})));
	}

	#[test]
	fn test_duplicate_uri_is_rejected() {
		let mut registry = SchemaRegistry::new();
		registry.register("quill://schemas/test", json!({})).unwrap();
		let err = registry.register("quill://schemas/test", json!({})).unwrap_err();
		assert!(matches!(err, RegistryError::DuplicateId { .. }));
	}
}
