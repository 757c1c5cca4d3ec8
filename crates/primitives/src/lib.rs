//! Basic resource primitives for the notebook workbench.
//!
//! This crate defines how documents and their sub-resources are addressed:
//!
//! - [`resource`] - Resource URIs and scheme helpers
//! - [`cell`] - Synthetic cell URIs embedded in a notebook URI

pub mod cell;
pub mod resource;

pub use cell::{
	CELL_METADATA_SCHEME, CELL_SCHEME, CellAddress, cell_metadata_uri, cell_uri, parse_cell_metadata_uri,
	parse_cell_uri, undo_redo_comparison_key,
};
pub use resource::{Resource, UNTITLED_SCHEME, basename, is_untitled};
