//! Host collaborator traits.
//!
//! The resolver and tracker never talk to the host directly; they read
//! group state, open editors and query accessibility through these traits,
//! injected at construction. The host owns all of the state behind them.

use quill_primitives::Resource;

use crate::input::{EditorInput, InputId, NotebookInput};
use crate::options::OpenOptions;

/// Read access to one editor group's open editors.
pub trait EditorGroup {
	/// All open editors in tab order.
	fn editors(&self) -> Vec<EditorInput>;

	/// The group's active editor, if any.
	fn active_editor(&self) -> Option<EditorInput>;

	/// Tab index of an open editor.
	fn index_of(&self, editor: InputId) -> Option<usize>;

	/// Whether an open editor's tab is pinned.
	fn is_pinned(&self, editor: InputId) -> bool;

	/// Open editors showing `resource`, in tab order.
	fn find_editors(&self, resource: &Resource) -> Vec<EditorInput> {
		self.editors()
			.into_iter()
			.filter(|editor| editor.resource() == Some(resource))
			.collect()
	}
}

/// Accessibility state of the host.
pub trait Accessibility {
	/// Whether the UI runs in screen-reader-optimized mode.
	fn screen_reader_optimized(&self) -> bool;
}

/// Workbench-wide editor operations, used by the dirty tracker.
pub trait EditorService: Send + Sync {
	/// Whether any editor anywhere shows the resource.
	fn is_open(&self, resource: &Resource) -> bool;

	/// Opens a batch of notebook editors.
	fn open_editors(&self, editors: Vec<(NotebookInput, OpenOptions)>);
}
