//! Error types for registry operations.

use thiserror::Error;

/// Errors that can occur when populating a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
	/// An entry with the same id is already registered.
	#[error("{registry} '{id}' is already registered")]
	DuplicateId {
		/// Which registry rejected the entry.
		registry: &'static str,
		/// The conflicting id.
		id: String,
	},

	/// A selector pattern could not be compiled.
	#[error("invalid selector pattern '{pattern}': {source}")]
	InvalidSelector {
		/// The offending glob pattern.
		pattern: String,
		/// The underlying glob error.
		source: globset::Error,
	},
}

impl RegistryError {
	pub(crate) fn duplicate(registry: &'static str, id: impl Into<String>) -> Self {
		Self::DuplicateId { registry, id: id.into() }
	}
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
