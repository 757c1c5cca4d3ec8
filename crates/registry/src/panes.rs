//! Editor pane registrations.
//!
//! A pane descriptor names an editor implementation; each registration lists
//! the input kinds the pane renders. The host consults the registry when it
//! has an input to show and needs the pane that owns it.

use crate::error::{RegistryError, Result};

/// Descriptor of an editor pane implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditorPaneDescriptor {
	/// Pane identifier, unique within the registry.
	pub id: &'static str,
	/// Human-readable pane name.
	pub display_name: &'static str,
}

#[derive(Debug)]
struct PaneRegistration {
	descriptor: EditorPaneDescriptor,
	input_kinds: Vec<&'static str>,
}

/// Registry of editor panes, ordered by registration.
#[derive(Debug, Default)]
pub struct EditorPaneRegistry {
	panes: Vec<PaneRegistration>,
}

impl EditorPaneRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a pane for the input kinds it renders.
	pub fn register(&mut self, descriptor: EditorPaneDescriptor, input_kinds: &[&'static str]) -> Result<()> {
		if self.panes.iter().any(|pane| pane.descriptor.id == descriptor.id) {
			return Err(RegistryError::duplicate("editor pane", descriptor.id));
		}
		self.panes.push(PaneRegistration { descriptor, input_kinds: input_kinds.to_vec() });
		Ok(())
	}

	/// The first registered pane that renders the given input kind.
	pub fn pane_for_input(&self, input_kind: &str) -> Option<&EditorPaneDescriptor> {
		self.panes
			.iter()
			.find(|pane| pane.input_kinds.contains(&input_kind))
			.map(|pane| &pane.descriptor)
	}

	/// Looks a pane up by id.
	pub fn get(&self, id: &str) -> Option<&EditorPaneDescriptor> {
		self.panes.iter().find(|pane| pane.descriptor.id == id).map(|pane| &pane.descriptor)
	}

	/// All registered panes in registration order.
	pub fn iter(&self) -> impl Iterator<Item = &EditorPaneDescriptor> {
		self.panes.iter().map(|pane| &pane.descriptor)
	}
}
