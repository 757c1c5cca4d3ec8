//! Options attached to an open request.

use quill_primitives::Resource;

/// Cell-scoped options carried when a cell URI was rewritten to its
/// notebook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellOpenOptions {
	/// The original cell resource to reveal once the notebook is open.
	pub resource: Resource,
}

/// Options for opening an editor input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OpenOptions {
	/// Tab position to open at; `None` appends.
	pub index: Option<usize>,
	/// Open the tab pinned.
	pub pinned: bool,
	/// Open without activating the tab.
	pub inactive: bool,
	/// Open without stealing focus.
	pub preserve_focus: bool,
	/// Skip editor resolution for this open.
	///
	/// Set on every input the resolver itself produces, so handing it back
	/// to the host cannot re-enter the resolver.
	pub suppress_resolution: bool,
	/// Cell to reveal after opening.
	pub cell: Option<CellOpenOptions>,
}

impl OpenOptions {
	/// Options for an open produced by the resolver.
	pub fn resolved() -> Self {
		Self { suppress_resolution: true, ..Self::default() }
	}

	/// Sets the tab position.
	pub fn at_index(mut self, index: Option<usize>) -> Self {
		self.index = index;
		self
	}

	/// Sets the pinned flag.
	pub fn pinned(mut self, pinned: bool) -> Self {
		self.pinned = pinned;
		self
	}

	/// Options for a background open that must not disturb the user.
	pub fn background() -> Self {
		Self { inactive: true, preserve_focus: true, pinned: true, ..Self::default() }
	}
}
