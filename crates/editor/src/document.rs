//! The notebook document model, as seen by this crate.
//!
//! The real document lifecycle (loading, saving, backups) belongs to the
//! host; this crate only reads documents through [`DocumentResolver`] and
//! holds on to them through [`DocumentRef`], a reference-counted guard that
//! releases the document exactly when dropped. Content providers hand the
//! guard to the model they produce, so the document lives as long as the
//! model does and not a moment longer.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use quill_primitives::{Resource, cell_uri};
use ropey::Rope;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a cell contains.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
	/// Executable code.
	Code,
	/// Rendered markup.
	Markup,
}

/// Recognized cell metadata, plus whatever else the document carries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellMetadata {
	/// The language for the cell.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub language: Option<String>,
	/// Whether the cell's editor is editable.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub editable: Option<bool>,
	/// Whether the cell has a margin for breakpoints.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub breakpoint_margin: Option<bool>,
	/// Whether the execution order indicator is displayed.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub has_execution_order: Option<bool>,
	/// The order in which the cell was executed.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub execution_order: Option<f64>,
	/// Status message for the cell's status bar.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub status_message: Option<String>,
	/// The cell's current run state.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub run_state: Option<i64>,
	/// When the current run started.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub run_start_time: Option<f64>,
	/// Duration of the last run.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub last_run_duration: Option<f64>,
	/// Whether the cell's input is collapsed.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub input_collapsed: Option<bool>,
	/// Whether the cell's outputs are collapsed.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub output_collapsed: Option<bool>,
	/// Additional properties are permitted and preserved.
	#[serde(flatten)]
	pub additional: serde_json::Map<String, serde_json::Value>,
}

/// One cell of a notebook document.
#[derive(Clone, Debug)]
pub struct Cell {
	/// Handle, unique within the owning document.
	pub handle: u64,
	/// What the cell contains.
	pub kind: CellKind,
	/// Language of the cell's source.
	pub language: String,
	/// The cell's text buffer.
	pub text: Rope,
	/// The cell's metadata.
	pub metadata: CellMetadata,
}

impl Cell {
	/// The cell's synthetic URI under its owning notebook.
	pub fn uri(&self, notebook: &Resource) -> Option<Resource> {
		cell_uri(notebook, self.handle)
	}
}

/// A resolved notebook document.
#[derive(Clone, Debug)]
pub struct NotebookDocument {
	/// The document's resource.
	pub resource: Resource,
	/// The provider that owns the document.
	pub view_type: String,
	/// The document's cells in order.
	pub cells: Vec<Cell>,
}

impl NotebookDocument {
	/// The cell whose synthetic URI equals `uri`.
	pub fn cell_by_uri(&self, uri: &Resource) -> Option<&Cell> {
		self.cells.iter().find(|cell| cell.uri(&self.resource).as_ref() == Some(uri))
	}

	/// The cell with the given handle.
	pub fn cell_by_handle(&self, handle: u64) -> Option<&Cell> {
		self.cells.iter().find(|cell| cell.handle == handle)
	}
}

/// The metadata of a cell as a formatted JSON document.
///
/// The cell's language is included when the metadata does not override it.
pub fn formatted_metadata_json(cell: &Cell) -> String {
	let mut metadata = cell.metadata.clone();
	if metadata.language.is_none() {
		metadata.language = Some(cell.language.clone());
	}
	serde_json::to_string_pretty(&metadata).unwrap_or_default()
}

/// A counted reference to a resolved document.
///
/// Dropping the guard releases the reference, once. Whoever needs the
/// document to stay resolved keeps the guard; content providers store it in
/// the model they produce.
pub struct DocumentRef {
	document: Arc<NotebookDocument>,
	release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl DocumentRef {
	/// A reference with no release hook.
	pub fn new(document: Arc<NotebookDocument>) -> Self {
		Self { document, release: None }
	}

	/// A reference that runs `release` when dropped.
	pub fn with_release(document: Arc<NotebookDocument>, release: impl FnOnce() + Send + Sync + 'static) -> Self {
		Self { document, release: Some(Box::new(release)) }
	}

	/// The resolved document.
	pub fn document(&self) -> &NotebookDocument {
		&self.document
	}
}

impl Drop for DocumentRef {
	fn drop(&mut self) {
		if let Some(release) = self.release.take() {
			release();
		}
	}
}

impl fmt::Debug for DocumentRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DocumentRef").field("resource", &self.document.resource).finish_non_exhaustive()
	}
}

/// Errors from resolving a notebook document.
#[derive(Debug, Error)]
pub enum DocumentError {
	/// The owning document could not be resolved.
	#[error("failed to resolve notebook document {0}")]
	ResolveFailed(Resource),
}

/// Resolves notebook documents on demand.
///
/// Resolutions run to completion; there is no cancellation. Each resolution
/// hands out one counted reference.
#[async_trait]
pub trait DocumentResolver: Send + Sync {
	/// Resolves the document at `notebook`.
	async fn resolve(&self, notebook: &Resource) -> Result<DocumentRef, DocumentError>;
}

#[cfg(test)]
mod tests {
	use super::*;

	fn cell(handle: u64) -> Cell {
		Cell {
			handle,
			kind: CellKind::Code,
			language: "python".to_owned(),
			text: Rope::from("x = 1\n"),
			metadata: CellMetadata::default(),
		}
	}

	#[test]
	fn test_cell_lookup_by_uri_and_handle() {
		let resource = Resource::parse("file:///nb.ipynb").unwrap();
		let document = NotebookDocument {
			resource: resource.clone(),
			view_type: "nb".to_owned(),
			cells: vec![cell(0), cell(1)],
		};

		let uri = cell_uri(&resource, 1).unwrap();
		assert_eq!(document.cell_by_uri(&uri).map(|c| c.handle), Some(1));
		assert!(document.cell_by_handle(0).is_some());
		assert!(document.cell_by_handle(9).is_none());
	}

	#[test]
	fn test_metadata_json_includes_language() {
		let cell = cell(0);
		let json = formatted_metadata_json(&cell);
		let value: serde_json::Value = serde_json::from_str(&json).unwrap();
		assert_eq!(value["language"], "python");
	}

	#[test]
	fn test_metadata_preserves_additional_properties() {
		let raw = r#"{"language": "rust", "customKey": 42}"#;
		let metadata: CellMetadata = serde_json::from_str(raw).unwrap();
		assert_eq!(metadata.language.as_deref(), Some("rust"));
		assert_eq!(metadata.additional["customKey"], 42);

		let round_tripped = serde_json::to_string(&metadata).unwrap();
		let value: serde_json::Value = serde_json::from_str(&round_tripped).unwrap();
		assert_eq!(value["customKey"], 42);
	}

	#[test]
	fn test_document_ref_release_runs_once() {
		use std::sync::atomic::{AtomicUsize, Ordering};

		let released = Arc::new(AtomicUsize::new(0));
		let document = Arc::new(NotebookDocument {
			resource: Resource::parse("file:///nb.ipynb").unwrap(),
			view_type: "nb".to_owned(),
			cells: Vec::new(),
		});

		let counter = Arc::clone(&released);
		let guard = DocumentRef::with_release(document, move || {
			counter.fetch_add(1, Ordering::SeqCst);
		});
		assert_eq!(released.load(Ordering::SeqCst), 0);
		drop(guard);
		assert_eq!(released.load(Ordering::SeqCst), 1);
	}
}
