//! Virtual text models for cell sub-resources.
//!
//! Cell text and cell metadata are not files; they are projections of a
//! resolved notebook document, materialized lazily as read-only text models
//! when something asks for them. A provider resolves the owning document,
//! locates the cell, and produces a model that owns the document reference,
//! so the document stays resolved for exactly the model's lifetime.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use parking_lot::Mutex;
use quill_primitives::{Resource, parse_cell_metadata_uri, parse_cell_uri};
use ropey::Rope;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::document::{
	CellKind, DocumentError, DocumentRef, DocumentResolver, formatted_metadata_json,
};

/// A materialized read-only text model.
#[derive(Debug)]
pub struct TextModel {
	resource: Resource,
	language: String,
	text: Rope,
	_document: Option<DocumentRef>,
}

impl TextModel {
	/// A model with no backing document.
	pub fn new(resource: Resource, language: impl Into<String>, text: Rope) -> Self {
		Self { resource, language: language.into(), text, _document: None }
	}

	/// A model that keeps its backing document resolved while it lives.
	pub fn with_document(
		resource: Resource,
		language: impl Into<String>,
		text: Rope,
		document: DocumentRef,
	) -> Self {
		Self { resource, language: language.into(), text, _document: Some(document) }
	}

	/// The model's resource.
	pub fn resource(&self) -> &Resource {
		&self.resource
	}

	/// The model's language id.
	pub fn language(&self) -> &str {
		&self.language
	}

	/// The model's content.
	pub fn text(&self) -> &Rope {
		&self.text
	}
}

/// Storage for materialized models, keyed by resource.
pub trait ModelStore: Send + Sync {
	/// The model for `resource`, if already materialized.
	fn existing(&self, resource: &Resource) -> Option<Arc<TextModel>>;

	/// Stores a model and returns the shared handle.
	fn insert(&self, model: TextModel) -> Arc<TextModel>;
}

/// In-memory [`ModelStore`].
///
/// Removal stands in for host-side model disposal: dropping the last handle
/// drops the model and with it the document reference it owns.
#[derive(Default)]
pub struct InMemoryModels {
	models: Mutex<FxHashMap<Resource, Arc<TextModel>>>,
}

impl InMemoryModels {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Removes a model from the store.
	pub fn remove(&self, resource: &Resource) -> Option<Arc<TextModel>> {
		self.models.lock().remove(resource)
	}
}

impl ModelStore for InMemoryModels {
	fn existing(&self, resource: &Resource) -> Option<Arc<TextModel>> {
		self.models.lock().get(resource).cloned()
	}

	fn insert(&self, model: TextModel) -> Arc<TextModel> {
		let model = Arc::new(model);
		self.models.lock().insert(model.resource().clone(), Arc::clone(&model));
		model
	}
}

/// Materializes cell text models from cell URIs.
pub struct CellContentProvider {
	resolver: Arc<dyn DocumentResolver>,
	models: Arc<dyn ModelStore>,
}

impl CellContentProvider {
	/// Creates a provider over a document resolver and model store.
	pub fn new(resolver: Arc<dyn DocumentResolver>, models: Arc<dyn ModelStore>) -> Self {
		Self { resolver, models }
	}

	/// Provides the text model for a cell URI.
	///
	/// Returns the existing model when already materialized, `Ok(None)` for
	/// URIs that are not cell URIs or name no cell of the resolved
	/// document.
	pub async fn provide(&self, resource: &Resource) -> Result<Option<Arc<TextModel>>, DocumentError> {
		if let Some(existing) = self.models.existing(resource) {
			return Ok(Some(existing));
		}
		let Some(address) = parse_cell_uri(resource) else {
			return Ok(None);
		};

		let document = self.resolver.resolve(&address.notebook).await?;
		let Some((language, text)) = document.document().cell_by_uri(resource).map(|cell| {
			let language = match cell.kind {
				CellKind::Markup => "markdown".to_owned(),
				CellKind::Code => cell.language.clone(),
			};
			(language, cell.text.clone())
		}) else {
			// Dropping the reference here releases the document again.
			debug!(%resource, "No cell found for resource");
			return Ok(None);
		};

		let model = TextModel::with_document(resource.clone(), language, text, document);
		Ok(Some(self.models.insert(model)))
	}
}

/// Materializes cell metadata models from metadata URIs.
pub struct CellMetadataContentProvider {
	resolver: Arc<dyn DocumentResolver>,
	models: Arc<dyn ModelStore>,
}

impl CellMetadataContentProvider {
	/// Creates a provider over a document resolver and model store.
	pub fn new(resolver: Arc<dyn DocumentResolver>, models: Arc<dyn ModelStore>) -> Self {
		Self { resolver, models }
	}

	/// Provides the JSON metadata model for a cell metadata URI.
	pub async fn provide(&self, resource: &Resource) -> Result<Option<Arc<TextModel>>, DocumentError> {
		if let Some(existing) = self.models.existing(resource) {
			return Ok(Some(existing));
		}
		let Some(address) = parse_cell_metadata_uri(resource) else {
			return Ok(None);
		};

		let document = self.resolver.resolve(&address.notebook).await?;
		let Some(source) =
			document.document().cell_by_handle(address.handle).map(formatted_metadata_json)
		else {
			debug!(%resource, "No cell found for metadata resource");
			return Ok(None);
		};

		let model =
			TextModel::with_document(resource.clone(), "json", Rope::from(source.as_str()), document);
		Ok(Some(self.models.insert(model)))
	}
}
