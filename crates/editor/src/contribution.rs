//! Startup wiring of the notebook contribution.
//!
//! Everything the notebook feature contributes to the workbench is
//! registered here, once, against the registries the embedder owns:
//! editor panes, input serializers, settings, the cell metadata schema and
//! the cell undo/redo comparison key.

use quill_primitives::{CELL_SCHEME, undo_redo_comparison_key};
use quill_registry::comparison::ComparisonKeyRegistry;
use quill_registry::config::{SettingDef, SettingKind, SettingsRegistry};
use quill_registry::error::Result;
use quill_registry::panes::{EditorPaneDescriptor, EditorPaneRegistry};
use quill_registry::provider::ProviderRegistry;
use quill_registry::schema::SchemaRegistry;
use serde_json::{Value, json};

use crate::input::{NOTEBOOK_DIFF_EDITOR_INPUT, NOTEBOOK_EDITOR_INPUT};
use crate::serializer::{NotebookDiffEditorSerializer, NotebookEditorSerializer, SerializerRegistry};

/// Pane id of the notebook editor.
pub const NOTEBOOK_EDITOR_ID: &str = "quill.editor.notebook";
/// Pane id of the notebook diff editor.
pub const NOTEBOOK_DIFF_EDITOR_ID: &str = "quill.editor.notebookTextDiff";

/// Schema URI of the cell metadata schema.
pub const CELL_METADATA_SCHEMA_URI: &str = "quill://schemas/notebook/cellmetadata";

/// Configuration key of the output MIME type priority list.
pub const OUTPUT_MIME_ORDER_KEY: &str = "notebook.displayOrder";
/// Configuration key of the cell toolbar location.
pub const CELL_TOOLBAR_LOCATION_KEY: &str = "notebook.cellToolbarLocation";
/// Configuration key of the cell status bar visibility.
pub const SHOW_CELL_STATUS_BAR_KEY: &str = "notebook.showCellStatusbar";
/// Configuration key of the diff preview flag.
pub const DIFF_PREVIEW_KEY: &str = "notebook.diff.enablePreview";
/// Configuration key of the extensible markdown renderer flag.
pub const USE_MARKDOWN_RENDERER_KEY: &str = "notebook.experimental.useMarkdownRenderer";

/// The registries a notebook contribution registers into.
///
/// The embedder owns one of these and passes it to every contribution at
/// startup; there is no global state.
#[derive(Default)]
pub struct Workbench {
	/// Editor pane registrations.
	pub editor_panes: EditorPaneRegistry,
	/// Input serializer registrations.
	pub serializers: SerializerRegistry,
	/// Declared settings.
	pub settings: SettingsRegistry,
	/// Contributed JSON schemas.
	pub schemas: SchemaRegistry,
	/// Contributed editor providers.
	pub providers: ProviderRegistry,
	/// Per-scheme undo/redo comparison keys.
	pub comparison_keys: ComparisonKeyRegistry,
}

impl Workbench {
	/// Creates a workbench with empty registries.
	pub fn new() -> Self {
		Self::default()
	}
}

/// Registers the notebook contribution.
pub fn register_notebook(workbench: &mut Workbench) -> Result<()> {
	workbench.editor_panes.register(
		EditorPaneDescriptor { id: NOTEBOOK_EDITOR_ID, display_name: "Notebook Editor" },
		&[NOTEBOOK_EDITOR_INPUT],
	)?;
	workbench.editor_panes.register(
		EditorPaneDescriptor { id: NOTEBOOK_DIFF_EDITOR_ID, display_name: "Notebook Diff Editor" },
		&[NOTEBOOK_DIFF_EDITOR_INPUT],
	)?;

	workbench.serializers.register(NOTEBOOK_EDITOR_INPUT, Box::new(NotebookEditorSerializer))?;
	workbench
		.serializers
		.register(NOTEBOOK_DIFF_EDITOR_INPUT, Box::new(NotebookDiffEditorSerializer))?;

	workbench.settings.register(notebook_settings())?;
	workbench.schemas.register(CELL_METADATA_SCHEMA_URI, cell_metadata_schema())?;
	workbench.comparison_keys.register(CELL_SCHEME, undo_redo_comparison_key)?;

	Ok(())
}

/// The notebook setting declarations.
pub fn notebook_settings() -> Vec<SettingDef> {
	vec![
		SettingDef {
			key: OUTPUT_MIME_ORDER_KEY,
			description: "Priority list for output mime types",
			kind: SettingKind::StringList { default: Vec::new() },
		},
		SettingDef {
			key: CELL_TOOLBAR_LOCATION_KEY,
			description: "Where the cell toolbar should be shown, or whether it should be hidden.",
			kind: SettingKind::Enum { values: &["left", "right", "hidden"], default: "right" },
		},
		SettingDef {
			key: SHOW_CELL_STATUS_BAR_KEY,
			description: "Whether the cell status bar should be shown.",
			kind: SettingKind::Bool { default: true },
		},
		SettingDef {
			key: DIFF_PREVIEW_KEY,
			description: "Whether to use the enhanced text diff editor for notebook.",
			kind: SettingKind::Bool { default: true },
		},
		SettingDef {
			key: USE_MARKDOWN_RENDERER_KEY,
			description: "Enable/disable using the new extensible markdown renderer.",
			kind: SettingKind::Bool { default: true },
		},
	]
}

/// The JSON schema of cell metadata documents.
///
/// Additional properties are permitted; comments and trailing commas are
/// tolerated by the consuming JSON support.
pub fn cell_metadata_schema() -> Value {
	json!({
		"properties": {
			"language": {
				"type": "string",
				"description": "The language for the cell"
			},
			"editable": {
				"type": "boolean",
				"description": "Controls whether a cell's editor is editable/readonly"
			},
			"breakpointMargin": {
				"type": "boolean",
				"description": "Controls if the cell has a margin to support the breakpoint UI"
			},
			"hasExecutionOrder": {
				"type": "boolean",
				"description": "Whether the execution order indicator will be displayed"
			},
			"executionOrder": {
				"type": "number",
				"description": "The order in which this cell was executed"
			},
			"statusMessage": {
				"type": "string",
				"description": "A status message to be shown in the cell's status bar"
			},
			"runState": {
				"type": "integer",
				"description": "The cell's current run state"
			},
			"runStartTime": {
				"type": "number",
				"description": "If the cell is running, the time at which the cell started running"
			},
			"lastRunDuration": {
				"type": "number",
				"description": "The total duration of the cell's last run"
			},
			"inputCollapsed": {
				"type": "boolean",
				"description": "Whether a code cell's editor is collapsed"
			},
			"outputCollapsed": {
				"type": "boolean",
				"description": "Whether a code cell's outputs are collapsed"
			}
		},
		"additionalProperties": true,
		"allowTrailingCommas": true,
		"allowComments": true
	})
}
