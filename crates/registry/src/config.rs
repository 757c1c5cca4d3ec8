//! Configuration surface.
//!
//! Two halves: [`SettingsRegistry`] holds the *declarations* of settings a
//! contribution registers (key, description, type, default), and
//! [`ConfigSource`] is the accessor the resolver reads *values* through.
//! Values are read on every resolution and never cached here; whatever
//! storage the host uses stays behind the trait.

use quill_primitives::Resource;

use crate::associations::EditorAssociation;
use crate::error::{RegistryError, Result};

/// The type and default of a declared setting.
#[derive(Clone, Debug, PartialEq)]
pub enum SettingKind {
	/// Boolean flag.
	Bool {
		/// Value when the user has not set the key.
		default: bool,
	},
	/// Ordered list of strings.
	StringList {
		/// Value when the user has not set the key.
		default: Vec<String>,
	},
	/// One of a fixed set of string values.
	Enum {
		/// Accepted values.
		values: &'static [&'static str],
		/// Value when the user has not set the key.
		default: &'static str,
	},
}

/// Declaration of a single configuration setting.
#[derive(Clone, Debug, PartialEq)]
pub struct SettingDef {
	/// Configuration key, e.g. `notebook.cellToolbarLocation`.
	pub key: &'static str,
	/// User-facing description.
	pub description: &'static str,
	/// Type and default value.
	pub kind: SettingKind,
}

/// Registry of declared settings.
#[derive(Debug, Default)]
pub struct SettingsRegistry {
	settings: Vec<SettingDef>,
}

impl SettingsRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a batch of setting declarations.
	///
	/// Keys are unique; registration stops at the first duplicate, leaving
	/// the declarations before it in place.
	pub fn register<I>(&mut self, settings: I) -> Result<()>
	where
		I: IntoIterator<Item = SettingDef>,
	{
		for setting in settings {
			if self.get(setting.key).is_some() {
				return Err(RegistryError::duplicate("setting", setting.key));
			}
			self.settings.push(setting);
		}
		Ok(())
	}

	/// Looks a declaration up by key.
	pub fn get(&self, key: &str) -> Option<&SettingDef> {
		self.settings.iter().find(|setting| setting.key == key)
	}

	/// All declarations in registration order.
	pub fn iter(&self) -> impl Iterator<Item = &SettingDef> {
		self.settings.iter()
	}
}

/// Read access to configuration values.
///
/// Implementations must return current values on every call; the resolver
/// re-reads associations per resolution by design.
pub trait ConfigSource {
	/// The user's editor association list.
	fn editor_associations(&self) -> Vec<EditorAssociation>;

	/// Whether the enhanced diff editor preview is enabled.
	fn diff_preview_enabled(&self) -> bool;
}

/// In-memory [`ConfigSource`] for tests and embedders without a host
/// configuration store.
#[derive(Clone, Debug)]
pub struct MemoryConfig {
	/// Editor association list.
	pub associations: Vec<EditorAssociation>,
	/// Diff preview flag.
	pub diff_preview: bool,
}

impl Default for MemoryConfig {
	fn default() -> Self {
		Self { associations: Vec::new(), diff_preview: true }
	}
}

impl MemoryConfig {
	/// Adds an association for a pattern.
	pub fn associate(&mut self, view_type: impl Into<String>, pattern: impl Into<String>) {
		self.associations.push(EditorAssociation::new(view_type, pattern));
	}

	/// Associations that apply to `resource`.
	pub fn associations_for(&self, resource: &Resource) -> Vec<EditorAssociation> {
		self.associations.iter().filter(|a| a.matches(resource)).cloned().collect()
	}
}

impl ConfigSource for MemoryConfig {
	fn editor_associations(&self) -> Vec<EditorAssociation> {
		self.associations.clone()
	}

	fn diff_preview_enabled(&self) -> bool {
		self.diff_preview
	}
}
