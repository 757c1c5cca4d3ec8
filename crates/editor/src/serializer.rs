//! Persisted editor state.
//!
//! Open editors survive a session restart as small JSON records. Each input
//! kind has a serializer registered under its kind id; restore looks the
//! serializer up by the persisted kind and asks it to rebuild the input.
//! Malformed records restore nothing: deserialization validates presence
//! and types through serde and any failure maps to `None`.

use quill_primitives::Resource;
use quill_registry::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::{EditorInput, NotebookDiffInput, NotebookInput};

/// Persisted state of a notebook editor.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotebookEditorState {
	resource: Resource,
	name: String,
	view_type: String,
}

/// Persisted state of a notebook diff editor.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotebookDiffEditorState {
	resource: Resource,
	original_resource: Resource,
	name: String,
	original_name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	text_diff_name: Option<String>,
	view_type: String,
}

/// Serializes one input kind to and from its persisted record.
pub trait InputSerializer: Send + Sync {
	/// Whether this serializer handles the input.
	fn can_serialize(&self, input: &EditorInput) -> bool;

	/// The persisted record for the input, when handled.
	fn serialize(&self, input: &EditorInput) -> Option<String>;

	/// The input restored from a persisted record, when well-formed.
	fn deserialize(&self, raw: &str) -> Option<EditorInput>;
}

/// Serializer for notebook editor inputs.
pub struct NotebookEditorSerializer;

impl InputSerializer for NotebookEditorSerializer {
	fn can_serialize(&self, input: &EditorInput) -> bool {
		input.is_notebook()
	}

	fn serialize(&self, input: &EditorInput) -> Option<String> {
		let notebook = input.as_notebook()?;
		let state = NotebookEditorState {
			resource: notebook.resource.clone(),
			name: notebook.name.clone(),
			view_type: notebook.view_type.clone(),
		};
		serde_json::to_string(&state).ok()
	}

	fn deserialize(&self, raw: &str) -> Option<EditorInput> {
		let state: NotebookEditorState = serde_json::from_str(raw).ok()?;
		Some(NotebookInput::new(state.resource, state.view_type).into())
	}
}

/// Serializer for notebook diff editor inputs.
pub struct NotebookDiffEditorSerializer;

impl InputSerializer for NotebookDiffEditorSerializer {
	fn can_serialize(&self, input: &EditorInput) -> bool {
		input.is_notebook_diff()
	}

	fn serialize(&self, input: &EditorInput) -> Option<String> {
		let diff = input.as_notebook_diff()?;
		let state = NotebookDiffEditorState {
			resource: diff.resource.clone(),
			original_resource: diff.original_resource.clone(),
			name: diff.name.clone(),
			original_name: diff.original_name.clone(),
			text_diff_name: Some(diff.text_diff_name.clone()),
			view_type: diff.view_type.clone(),
		};
		serde_json::to_string(&state).ok()
	}

	fn deserialize(&self, raw: &str) -> Option<EditorInput> {
		let state: NotebookDiffEditorState = serde_json::from_str(raw).ok()?;
		let text_diff_name = state.text_diff_name.unwrap_or_else(|| {
			format!("{} ⟷ {}", state.original_resource, state.resource)
		});
		Some(
			NotebookDiffInput::new(
				state.resource,
				state.name,
				state.original_resource,
				state.original_name,
				text_diff_name,
				state.view_type,
			)
			.into(),
		)
	}
}

/// Registry of input serializers, keyed by input kind id.
#[derive(Default)]
pub struct SerializerRegistry {
	serializers: Vec<(&'static str, Box<dyn InputSerializer>)>,
}

impl SerializerRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a serializer for an input kind.
	pub fn register(&mut self, kind: &'static str, serializer: Box<dyn InputSerializer>) -> Result<()> {
		if self.get(kind).is_some() {
			return Err(RegistryError::DuplicateId { registry: "input serializer", id: kind.to_owned() });
		}
		self.serializers.push((kind, serializer));
		Ok(())
	}

	/// The serializer for an input kind.
	pub fn get(&self, kind: &str) -> Option<&dyn InputSerializer> {
		self.serializers
			.iter()
			.find(|(registered, _)| *registered == kind)
			.map(|(_, serializer)| serializer.as_ref())
	}

	/// Serializes an input with its registered serializer.
	///
	/// Returns the input's kind id and record.
	pub fn serialize(&self, input: &EditorInput) -> Option<(&'static str, String)> {
		let kind = input.kind();
		let serializer = self.get(kind)?;
		if !serializer.can_serialize(input) {
			return None;
		}
		serializer.serialize(input).map(|raw| (kind, raw))
	}

	/// Restores an input from a persisted kind id and record.
	///
	/// Unknown kinds and malformed records restore nothing.
	pub fn restore(&self, kind: &str, raw: &str) -> Option<EditorInput> {
		let restored = self.get(kind)?.deserialize(raw);
		if restored.is_none() {
			debug!(kind, "Dropping malformed persisted editor record");
		}
		restored
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn resource(uri: &str) -> Resource {
		Resource::parse(uri).unwrap()
	}

	#[test]
	fn test_notebook_round_trip() {
		let input: EditorInput =
			NotebookInput::new(resource("file:///work/a.ipynb"), "web.notebook").into();
		let serializer = NotebookEditorSerializer;

		let raw = serializer.serialize(&input).unwrap();
		let restored = serializer.deserialize(&raw).unwrap();
		let notebook = restored.as_notebook().unwrap();
		assert_eq!(notebook.resource, resource("file:///work/a.ipynb"));
		assert_eq!(notebook.view_type, "web.notebook");
	}

	#[test]
	fn test_diff_round_trip() {
		let input: EditorInput = NotebookDiffInput::new(
			resource("file:///work/a.ipynb"),
			"a.ipynb",
			resource("file:///work/a.orig.ipynb"),
			"a.orig.ipynb",
			"a.orig.ipynb ⟷ a.ipynb",
			"web.notebook",
		)
		.into();
		let serializer = NotebookDiffEditorSerializer;

		let raw = serializer.serialize(&input).unwrap();
		let restored = serializer.deserialize(&raw).unwrap();
		let diff = restored.as_notebook_diff().unwrap();
		assert_eq!(diff.resource, resource("file:///work/a.ipynb"));
		assert_eq!(diff.original_resource, resource("file:///work/a.orig.ipynb"));
		assert_eq!(diff.text_diff_name, "a.orig.ipynb ⟷ a.ipynb");
		assert_eq!(diff.view_type, "web.notebook");
	}

	#[test]
	fn test_diff_label_is_synthesized_when_absent() {
		let raw = r#"{
			"resource": "file:///work/a.ipynb",
			"originalResource": "file:///work/a.orig.ipynb",
			"name": "a.ipynb",
			"originalName": "a.orig.ipynb",
			"viewType": "web.notebook"
		}"#;
		let restored = NotebookDiffEditorSerializer.deserialize(raw).unwrap();
		let diff = restored.as_notebook_diff().unwrap();
		assert_eq!(diff.text_diff_name, "file:///work/a.orig.ipynb ⟷ file:///work/a.ipynb");
	}

	#[test]
	fn test_malformed_records_restore_nothing() {
		let serializer = NotebookEditorSerializer;
		assert!(serializer.deserialize("not json").is_none());
		assert!(serializer.deserialize(r#"{"resource": "file:///a"}"#).is_none());
		assert!(serializer.deserialize(r#"{"resource": 4, "name": "a", "viewType": "v"}"#).is_none());
	}

	#[test]
	fn test_registry_round_trip() {
		use crate::input::NOTEBOOK_EDITOR_INPUT;

		let mut registry = SerializerRegistry::new();
		registry.register(NOTEBOOK_EDITOR_INPUT, Box::new(NotebookEditorSerializer)).unwrap();

		let input: EditorInput = NotebookInput::new(resource("file:///b.ipynb"), "nb").into();
		let (kind, raw) = registry.serialize(&input).unwrap();
		assert_eq!(kind, NOTEBOOK_EDITOR_INPUT);

		let restored = registry.restore(kind, &raw).unwrap();
		assert_eq!(restored.as_notebook().unwrap().resource, resource("file:///b.ipynb"));

		assert!(registry.restore("quill.input.unknown", &raw).is_none());
	}
}
