//! Contributed editor providers.
//!
//! A provider is a registered editor implementation identified by its view
//! type. Providers declare which resources they want through a glob
//! [`Selector`] and whether they apply by default or only when explicitly
//! targeted.
//!
//! The registry preserves registration order and every query iterates in
//! that order. When several exclusive providers match the same resource the
//! first registered one wins; there is deliberately no further tie-break.

use quill_primitives::Resource;
use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::selector::Selector;

/// How strongly a provider claims matching resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderPriority {
	/// Applies when no other choice was made.
	Default,
	/// Preferred over default providers without an explicit request.
	Exclusive,
}

/// A registered editor provider.
#[derive(Debug)]
pub struct ProviderInfo {
	/// View type identifier, unique within the registry.
	pub id: String,
	/// Human-readable editor name.
	pub display_name: String,
	/// Human-readable name of the contributing extension.
	pub provider_display_name: String,
	/// Claim strength for matching resources.
	pub priority: ProviderPriority,
	selector: Selector,
}

impl ProviderInfo {
	/// Creates a provider descriptor, compiling its selector patterns.
	pub fn new<I, S>(
		id: impl Into<String>,
		display_name: impl Into<String>,
		provider_display_name: impl Into<String>,
		priority: ProviderPriority,
		selector: I,
	) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Ok(Self {
			id: id.into(),
			display_name: display_name.into(),
			provider_display_name: provider_display_name.into(),
			priority,
			selector: Selector::new(selector)?,
		})
	}

	/// Whether this provider wants the resource.
	pub fn matches(&self, resource: &Resource) -> bool {
		self.selector.matches(resource)
	}

	/// Whether this provider is exclusive.
	pub fn is_exclusive(&self) -> bool {
		self.priority == ProviderPriority::Exclusive
	}

	/// The provider's selector patterns.
	pub fn selector_patterns(&self) -> &[String] {
		self.selector.patterns()
	}
}

/// Registry of contributed providers, ordered by registration.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
	providers: Vec<ProviderInfo>,
}

impl ProviderRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a provider.
	///
	/// Ids are unique within the registry; a second registration with the
	/// same id is rejected.
	pub fn register(&mut self, info: ProviderInfo) -> Result<()> {
		if self.get(&info.id).is_some() {
			return Err(RegistryError::duplicate("provider", &info.id));
		}
		debug!(id = info.id, priority = ?info.priority, "Registered notebook provider");
		self.providers.push(info);
		Ok(())
	}

	/// Looks a provider up by id.
	pub fn get(&self, id: &str) -> Option<&ProviderInfo> {
		self.providers.iter().find(|info| info.id == id)
	}

	/// All providers whose selector matches the resource, in registration
	/// order.
	pub fn matching(&self, resource: &Resource) -> Vec<&ProviderInfo> {
		self.providers.iter().filter(|info| info.matches(resource)).collect()
	}

	/// All registered providers in registration order.
	pub fn iter(&self) -> impl Iterator<Item = &ProviderInfo> {
		self.providers.iter()
	}

	/// Number of registered providers.
	pub fn len(&self) -> usize {
		self.providers.len()
	}

	/// Whether the registry is empty.
	pub fn is_empty(&self) -> bool {
		self.providers.is_empty()
	}
}
