use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use quill_primitives::{cell_metadata_uri, cell_uri};
use ropey::Rope;

use super::*;
use crate::document::{Cell, CellMetadata, NotebookDocument};

/// Resolver over one fixed document, counting outstanding references.
struct FixedResolver {
	document: Arc<NotebookDocument>,
	outstanding: Arc<AtomicUsize>,
}

impl FixedResolver {
	fn new(document: NotebookDocument) -> Self {
		Self { document: Arc::new(document), outstanding: Arc::new(AtomicUsize::new(0)) }
	}

	fn outstanding(&self) -> usize {
		self.outstanding.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl DocumentResolver for FixedResolver {
	async fn resolve(&self, notebook: &Resource) -> Result<DocumentRef, DocumentError> {
		if *notebook != self.document.resource {
			return Err(DocumentError::ResolveFailed(notebook.clone()));
		}
		self.outstanding.fetch_add(1, Ordering::SeqCst);
		let outstanding = Arc::clone(&self.outstanding);
		Ok(DocumentRef::with_release(Arc::clone(&self.document), move || {
			outstanding.fetch_sub(1, Ordering::SeqCst);
		}))
	}
}

fn notebook_resource() -> Resource {
	Resource::parse("file:///work/analysis.ipynb").unwrap()
}

fn document() -> NotebookDocument {
	NotebookDocument {
		resource: notebook_resource(),
		view_type: "web.notebook".to_owned(),
		cells: vec![
			Cell {
				handle: 0,
				kind: CellKind::Code,
				language: "python".to_owned(),
				text: Rope::from("import sys\n"),
				metadata: CellMetadata::default(),
			},
			Cell {
				handle: 1,
				kind: CellKind::Markup,
				language: "markdown".to_owned(),
				text: Rope::from("# Heading\n"),
				metadata: CellMetadata { editable: Some(false), ..CellMetadata::default() },
			},
		],
	}
}

fn providers() -> (Arc<FixedResolver>, Arc<InMemoryModels>, CellContentProvider, CellMetadataContentProvider) {
	let resolver = Arc::new(FixedResolver::new(document()));
	let models = Arc::new(InMemoryModels::new());
	let cells = CellContentProvider::new(
		Arc::clone(&resolver) as Arc<dyn DocumentResolver>,
		Arc::clone(&models) as Arc<dyn ModelStore>,
	);
	let metadata = CellMetadataContentProvider::new(
		Arc::clone(&resolver) as Arc<dyn DocumentResolver>,
		Arc::clone(&models) as Arc<dyn ModelStore>,
	);
	(resolver, models, cells, metadata)
}

#[tokio::test]
async fn test_cell_model_materializes_cell_text() {
	let (resolver, _models, cells, _) = providers();
	let uri = cell_uri(&notebook_resource(), 0).unwrap();

	let model = cells.provide(&uri).await.unwrap().unwrap();
	assert_eq!(model.language(), "python");
	assert_eq!(model.text().to_string(), "import sys\n");
	assert_eq!(resolver.outstanding(), 1);
}

#[tokio::test]
async fn test_markup_cells_use_markdown_language() {
	let (_, _, cells, _) = providers();
	let uri = cell_uri(&notebook_resource(), 1).unwrap();

	let model = cells.provide(&uri).await.unwrap().unwrap();
	assert_eq!(model.language(), "markdown");
}

#[tokio::test]
async fn test_existing_model_is_returned_without_resolving() {
	let (resolver, _, cells, _) = providers();
	let uri = cell_uri(&notebook_resource(), 0).unwrap();

	let first = cells.provide(&uri).await.unwrap().unwrap();
	let second = cells.provide(&uri).await.unwrap().unwrap();
	assert!(Arc::ptr_eq(&first, &second));
	assert_eq!(resolver.outstanding(), 1);
}

#[tokio::test]
async fn test_non_cell_uri_produces_no_model() {
	let (resolver, _, cells, _) = providers();

	let model = cells.provide(&notebook_resource()).await.unwrap();
	assert!(model.is_none());
	assert_eq!(resolver.outstanding(), 0);
}

#[tokio::test]
async fn test_cell_miss_releases_the_document() {
	let (resolver, _, cells, _) = providers();
	let uri = cell_uri(&notebook_resource(), 42).unwrap();

	let model = cells.provide(&uri).await.unwrap();
	assert!(model.is_none());
	assert_eq!(resolver.outstanding(), 0);
}

#[tokio::test]
async fn test_model_disposal_releases_the_document() {
	let (resolver, models, cells, _) = providers();
	let uri = cell_uri(&notebook_resource(), 0).unwrap();

	let model = cells.provide(&uri).await.unwrap().unwrap();
	assert_eq!(resolver.outstanding(), 1);

	drop(model);
	models.remove(&uri);
	assert_eq!(resolver.outstanding(), 0);
}

#[tokio::test]
async fn test_resolve_failure_propagates() {
	let (_, models, _, _) = providers();
	let other = Resource::parse("file:///elsewhere.ipynb").unwrap();
	let resolver = Arc::new(FixedResolver::new(document()));
	let cells = CellContentProvider::new(
		Arc::clone(&resolver) as Arc<dyn DocumentResolver>,
		models as Arc<dyn ModelStore>,
	);

	let uri = cell_uri(&other, 0).unwrap();
	let err = cells.provide(&uri).await.unwrap_err();
	assert!(matches!(err, DocumentError::ResolveFailed(_)));
}

#[tokio::test]
async fn test_metadata_model_is_formatted_json() {
	let (resolver, _, _, metadata) = providers();
	let uri = cell_metadata_uri(&notebook_resource(), 1).unwrap();

	let model = metadata.provide(&uri).await.unwrap().unwrap();
	assert_eq!(model.language(), "json");
	let value: serde_json::Value = serde_json::from_str(&model.text().to_string()).unwrap();
	assert_eq!(value["editable"], false);
	assert_eq!(value["language"], "markdown");
	assert_eq!(resolver.outstanding(), 1);
}

#[tokio::test]
async fn test_metadata_miss_produces_no_model() {
	let (resolver, _, _, metadata) = providers();
	let uri = cell_metadata_uri(&notebook_resource(), 42).unwrap();

	let model = metadata.provide(&uri).await.unwrap();
	assert!(model.is_none());
	assert_eq!(resolver.outstanding(), 0);
}
