//! Editor inputs.
//!
//! An input is the identity of an open (or openable) editor tab: what
//! resource it shows and which implementation renders it. Inputs are cheap
//! to clone; a clone keeps the [`InputId`] and therefore still refers to the
//! same logical tab. Constructing a new input always allocates a fresh id.

use std::sync::atomic::{AtomicU64, Ordering};

use quill_primitives::{Resource, basename};

/// Counter for generating unique input IDs.
static NEXT_INPUT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of one editor input instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputId(pub u64);

impl InputId {
	/// Generates a new unique input ID.
	pub fn next() -> Self {
		Self(NEXT_INPUT_ID.fetch_add(1, Ordering::Relaxed))
	}
}

/// Kind id of the generic resource (text file) input.
pub const RESOURCE_EDITOR_INPUT: &str = "quill.input.resource";
/// Kind id of the notebook input.
pub const NOTEBOOK_EDITOR_INPUT: &str = "quill.input.notebook";
/// Kind id of the generic two-sided diff input.
pub const DIFF_EDITOR_INPUT: &str = "quill.input.diff";
/// Kind id of the notebook diff input.
pub const NOTEBOOK_DIFF_EDITOR_INPUT: &str = "quill.input.notebookDiff";

/// A generic resource editor input.
#[derive(Clone, Debug)]
pub struct ResourceInput {
	id: InputId,
	/// The resource being shown.
	pub resource: Resource,
	/// Tab label.
	pub name: String,
}

impl ResourceInput {
	/// Creates a resource input labeled with the resource basename.
	pub fn new(resource: Resource) -> Self {
		let name = basename(&resource);
		Self { id: InputId::next(), resource, name }
	}
}

/// A notebook editor input.
#[derive(Clone, Debug)]
pub struct NotebookInput {
	id: InputId,
	/// The notebook document.
	pub resource: Resource,
	/// The provider that renders it.
	pub view_type: String,
	/// Tab label.
	pub name: String,
	/// Whether the document opens with unsaved changes (backup restore).
	pub start_dirty: bool,
}

impl NotebookInput {
	/// Creates a notebook input for a provider.
	pub fn new(resource: Resource, view_type: impl Into<String>) -> Self {
		let name = basename(&resource);
		Self {
			id: InputId::next(),
			resource,
			view_type: view_type.into(),
			name,
			start_dirty: false,
		}
	}

	/// This input's instance id.
	pub fn id(&self) -> InputId {
		self.id
	}
}

/// A generic two-sided comparison input.
///
/// Either side may lack a resource (in-memory comparisons); such inputs can
/// never resolve to a notebook diff.
#[derive(Clone, Debug)]
pub struct DiffInput {
	id: InputId,
	/// Resource of the modified (right) side, if any.
	pub modified: Option<Resource>,
	/// Resource of the original (left) side, if any.
	pub original: Option<Resource>,
	/// Label of the modified side.
	pub modified_name: String,
	/// Label of the original side.
	pub original_name: String,
	/// Label of the comparison as a whole.
	pub name: String,
}

impl DiffInput {
	/// Creates a diff input over two optional resources.
	pub fn new(modified: Option<Resource>, original: Option<Resource>) -> Self {
		let modified_name = modified.as_ref().map(basename).unwrap_or_default();
		let original_name = original.as_ref().map(basename).unwrap_or_default();
		let name = format!("{original_name} ↔ {modified_name}");
		Self { id: InputId::next(), modified, original, modified_name, original_name, name }
	}
}

/// A resolved notebook comparison input.
#[derive(Clone, Debug)]
pub struct NotebookDiffInput {
	id: InputId,
	/// The modified (right) side.
	pub resource: Resource,
	/// The original (left) side.
	pub original_resource: Resource,
	/// Label of the modified side.
	pub name: String,
	/// Label of the original side.
	pub original_name: String,
	/// Label of the comparison as a whole.
	pub text_diff_name: String,
	/// The provider that renders both sides.
	pub view_type: String,
}

impl NotebookDiffInput {
	/// Creates a notebook diff input.
	pub fn new(
		resource: Resource,
		name: impl Into<String>,
		original_resource: Resource,
		original_name: impl Into<String>,
		text_diff_name: impl Into<String>,
		view_type: impl Into<String>,
	) -> Self {
		Self {
			id: InputId::next(),
			resource,
			original_resource,
			name: name.into(),
			original_name: original_name.into(),
			text_diff_name: text_diff_name.into(),
			view_type: view_type.into(),
		}
	}

	/// This input's instance id.
	pub fn id(&self) -> InputId {
		self.id
	}
}

/// Any editor input the workbench can open.
#[derive(Clone, Debug)]
pub enum EditorInput {
	/// Generic resource (text file) editor.
	Resource(ResourceInput),
	/// Notebook editor.
	Notebook(NotebookInput),
	/// Generic two-sided diff editor.
	Diff(DiffInput),
	/// Notebook diff editor.
	NotebookDiff(NotebookDiffInput),
}

impl EditorInput {
	/// This input's instance id.
	pub fn id(&self) -> InputId {
		match self {
			Self::Resource(input) => input.id,
			Self::Notebook(input) => input.id,
			Self::Diff(input) => input.id,
			Self::NotebookDiff(input) => input.id,
		}
	}

	/// The stable kind id used for serializer and pane lookups.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Resource(_) => RESOURCE_EDITOR_INPUT,
			Self::Notebook(_) => NOTEBOOK_EDITOR_INPUT,
			Self::Diff(_) => DIFF_EDITOR_INPUT,
			Self::NotebookDiff(_) => NOTEBOOK_DIFF_EDITOR_INPUT,
		}
	}

	/// The primary resource the input addresses.
	///
	/// Generic diff inputs have none; a notebook diff input answers with its
	/// modified side.
	pub fn resource(&self) -> Option<&Resource> {
		match self {
			Self::Resource(input) => Some(&input.resource),
			Self::Notebook(input) => Some(&input.resource),
			Self::Diff(_) => None,
			Self::NotebookDiff(input) => Some(&input.resource),
		}
	}

	/// Tab label.
	pub fn name(&self) -> &str {
		match self {
			Self::Resource(input) => &input.name,
			Self::Notebook(input) => &input.name,
			Self::Diff(input) => &input.name,
			Self::NotebookDiff(input) => &input.text_diff_name,
		}
	}

	/// The notebook input, if this is one.
	pub fn as_notebook(&self) -> Option<&NotebookInput> {
		match self {
			Self::Notebook(input) => Some(input),
			_ => None,
		}
	}

	/// The notebook diff input, if this is one.
	pub fn as_notebook_diff(&self) -> Option<&NotebookDiffInput> {
		match self {
			Self::NotebookDiff(input) => Some(input),
			_ => None,
		}
	}

	/// Whether this is a notebook input.
	pub fn is_notebook(&self) -> bool {
		matches!(self, Self::Notebook(_))
	}

	/// Whether this is a notebook diff input.
	pub fn is_notebook_diff(&self) -> bool {
		matches!(self, Self::NotebookDiff(_))
	}
}

impl From<ResourceInput> for EditorInput {
	fn from(input: ResourceInput) -> Self {
		Self::Resource(input)
	}
}

impl From<NotebookInput> for EditorInput {
	fn from(input: NotebookInput) -> Self {
		Self::Notebook(input)
	}
}

impl From<DiffInput> for EditorInput {
	fn from(input: DiffInput) -> Self {
		Self::Diff(input)
	}
}

impl From<NotebookDiffInput> for EditorInput {
	fn from(input: NotebookDiffInput) -> Self {
		Self::NotebookDiff(input)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_clone_keeps_identity() {
		let input = NotebookInput::new(Resource::parse("file:///a.ipynb").unwrap(), "nb");
		let clone = input.clone();
		assert_eq!(input.id(), clone.id());
	}

	#[test]
	fn test_new_inputs_are_distinct() {
		let resource = Resource::parse("file:///a.ipynb").unwrap();
		let first = NotebookInput::new(resource.clone(), "nb");
		let second = NotebookInput::new(resource, "nb");
		assert_ne!(first.id(), second.id());
	}

	#[test]
	fn test_name_defaults_to_basename() {
		let input = NotebookInput::new(Resource::parse("file:///dir/report.ipynb").unwrap(), "nb");
		assert_eq!(input.name, "report.ipynb");
	}
}
