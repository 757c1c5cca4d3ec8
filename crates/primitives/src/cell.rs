//! Synthetic cell URIs.
//!
//! A notebook cell is addressed by a URI derived from its owning notebook:
//! the cell scheme replaces the notebook's scheme while authority, path and
//! query are kept, and the fragment carries `{handle}@{original-scheme}` so
//! the notebook URI can be reconstructed from the cell URI alone. Metadata
//! projections of a cell use the same layout under their own scheme.
//!
//! Parsing is total: any URI that does not follow this layout yields `None`.

use crate::resource::Resource;

/// Scheme of cell text sub-resources.
pub const CELL_SCHEME: &str = "notebook-cell";

/// Scheme of cell metadata sub-resources.
pub const CELL_METADATA_SCHEME: &str = "notebook-cell-metadata";

/// A cell sub-resource resolved back to its owning notebook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellAddress {
	/// The owning notebook document.
	pub notebook: Resource,
	/// The cell's handle within the notebook.
	pub handle: u64,
}

/// Builds the cell text URI for a cell of `notebook`.
pub fn cell_uri(notebook: &Resource, handle: u64) -> Option<Resource> {
	reschemed(notebook, CELL_SCHEME, Some(&cell_fragment(notebook, handle)))
}

/// Builds the cell metadata URI for a cell of `notebook`.
pub fn cell_metadata_uri(notebook: &Resource, handle: u64) -> Option<Resource> {
	reschemed(notebook, CELL_METADATA_SCHEME, Some(&cell_fragment(notebook, handle)))
}

/// Parses a cell text URI back into its owning notebook and handle.
pub fn parse_cell_uri(resource: &Resource) -> Option<CellAddress> {
	parse_with_scheme(resource, CELL_SCHEME)
}

/// Parses a cell metadata URI back into its owning notebook and handle.
pub fn parse_cell_metadata_uri(resource: &Resource) -> Option<CellAddress> {
	parse_with_scheme(resource, CELL_METADATA_SCHEME)
}

/// Undo/redo comparison key for a resource.
///
/// All cells of the same notebook share the notebook's key, so edits across
/// cells coalesce into one undo scope. Any other resource compares by itself.
pub fn undo_redo_comparison_key(resource: &Resource) -> String {
	match parse_cell_uri(resource) {
		Some(address) => address.notebook.to_string(),
		None => resource.to_string(),
	}
}

fn cell_fragment(notebook: &Resource, handle: u64) -> String {
	format!("{handle}@{}", notebook.scheme())
}

fn parse_with_scheme(resource: &Resource, scheme: &str) -> Option<CellAddress> {
	if resource.scheme() != scheme {
		return None;
	}
	let fragment = resource.fragment()?;
	let (handle, original_scheme) = fragment.split_once('@')?;
	let handle = handle.parse().ok()?;
	if original_scheme.is_empty() {
		return None;
	}
	let notebook = reschemed(resource, original_scheme, None)?;
	Some(CellAddress { notebook, handle })
}

/// Rebuilds `resource` under another scheme, dropping any fragment and
/// optionally attaching a new one.
///
/// String surgery instead of [`Resource::set_scheme`], which refuses
/// transitions between special and non-special schemes.
fn reschemed(resource: &Resource, scheme: &str, fragment: Option<&str>) -> Option<Resource> {
	let raw = resource.as_str();
	let rest = raw.strip_prefix(resource.scheme())?.strip_prefix(':')?;
	let rest = match rest.split_once('#') {
		Some((before, _)) => before,
		None => rest,
	};
	let mut out = String::with_capacity(scheme.len() + rest.len() + 2);
	out.push_str(scheme);
	out.push(':');
	out.push_str(rest);
	if let Some(fragment) = fragment {
		out.push('#');
		out.push_str(fragment);
	}
	Resource::parse(&out).ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn notebook() -> Resource {
		Resource::parse("file:///work/analysis.ipynb").unwrap()
	}

	#[test]
	fn test_cell_uri_round_trip() {
		let uri = cell_uri(&notebook(), 3).unwrap();
		assert_eq!(uri.scheme(), CELL_SCHEME);

		let address = parse_cell_uri(&uri).unwrap();
		assert_eq!(address.notebook, notebook());
		assert_eq!(address.handle, 3);
	}

	#[test]
	fn test_metadata_uri_round_trip() {
		let uri = cell_metadata_uri(&notebook(), 7).unwrap();
		assert_eq!(uri.scheme(), CELL_METADATA_SCHEME);

		let address = parse_cell_metadata_uri(&uri).unwrap();
		assert_eq!(address.notebook, notebook());
		assert_eq!(address.handle, 7);
	}

	#[test]
	fn test_round_trip_preserves_query() {
		let notebook = Resource::parse("vault://host/nb.ipynb?rev=4").unwrap();
		let uri = cell_uri(&notebook, 0).unwrap();
		let address = parse_cell_uri(&uri).unwrap();
		assert_eq!(address.notebook, notebook);
	}

	#[test]
	fn test_round_trip_of_opaque_notebook() {
		let notebook = Resource::parse("untitled:Untitled-1").unwrap();
		let uri = cell_uri(&notebook, 1).unwrap();
		let address = parse_cell_uri(&uri).unwrap();
		assert_eq!(address.notebook, notebook);
	}

	#[test]
	fn test_parse_rejects_other_schemes() {
		assert!(parse_cell_uri(&notebook()).is_none());

		let metadata = cell_metadata_uri(&notebook(), 2).unwrap();
		assert!(parse_cell_uri(&metadata).is_none());
	}

	#[test]
	fn test_parse_rejects_malformed_fragment() {
		let no_fragment = Resource::parse("notebook-cell:///work/analysis.ipynb").unwrap();
		assert!(parse_cell_uri(&no_fragment).is_none());

		let bad_handle = Resource::parse("notebook-cell:///work/analysis.ipynb#x@file").unwrap();
		assert!(parse_cell_uri(&bad_handle).is_none());

		let no_scheme = Resource::parse("notebook-cell:///work/analysis.ipynb#4@").unwrap();
		assert!(parse_cell_uri(&no_scheme).is_none());
	}

	#[test]
	fn test_cells_share_comparison_key() {
		let first = cell_uri(&notebook(), 0).unwrap();
		let second = cell_uri(&notebook(), 9).unwrap();
		assert_eq!(undo_redo_comparison_key(&first), undo_redo_comparison_key(&second));
		assert_eq!(undo_redo_comparison_key(&first), notebook().to_string());
	}

	#[test]
	fn test_comparison_key_of_plain_resource() {
		let resource = notebook();
		assert_eq!(undo_redo_comparison_key(&resource), resource.to_string());
	}
}
