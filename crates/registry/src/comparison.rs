//! Per-scheme resource comparison keys.
//!
//! The host's undo/redo service groups operations by a comparison key
//! derived from the resource. Schemes with synthetic URIs register a
//! computer here so related resources (all cells of one notebook, say)
//! share a key. Unregistered schemes compare by the resource itself.

use quill_primitives::Resource;
use rustc_hash::FxHashMap;

use crate::error::{RegistryError, Result};

/// Computes a comparison key for resources of one scheme.
pub type ComparisonKeyFn = fn(&Resource) -> String;

/// Registry of per-scheme comparison key computers.
#[derive(Debug, Default)]
pub struct ComparisonKeyRegistry {
	by_scheme: FxHashMap<String, ComparisonKeyFn>,
}

impl ComparisonKeyRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a computer for a scheme.
	pub fn register(&mut self, scheme: impl Into<String>, computer: ComparisonKeyFn) -> Result<()> {
		let scheme = scheme.into();
		if self.by_scheme.contains_key(&scheme) {
			return Err(RegistryError::duplicate("comparison key computer", scheme));
		}
		self.by_scheme.insert(scheme, computer);
		Ok(())
	}

	/// The comparison key for a resource.
	pub fn key_for(&self, resource: &Resource) -> String {
		match self.by_scheme.get(resource.scheme()) {
			Some(computer) => computer(resource),
			None => resource.to_string(),
		}
	}
}
