//! Notebook editor wiring and resolution policy.
//!
//! This crate decides how notebook documents surface in an editor
//! workbench. The host owns documents, groups and configuration; this
//! crate reads them through injected traits and answers the questions the
//! host asks while opening editors:
//!
//! - [`resolver`] - Which editor implementation opens a resource
//! - [`input`] - Editor input identities and kinds
//! - [`serializer`] - Persisted editor state for session restore
//! - [`restore`] - Restoring notebooks from ephemeral backups
//! - [`content`] - Virtual text models for cell sub-resources
//! - [`tracker`] - Background editors for dirty, unopened documents
//! - [`contribution`] - Startup registration of all of the above

/// Virtual cell content.
pub mod content;
/// Startup wiring.
pub mod contribution;
/// Notebook document model and resolution traits.
pub mod document;
/// Host collaborator traits.
pub mod group;
/// Editor inputs.
pub mod input;
/// Open request options.
pub mod options;
/// Editor resolution policy.
pub mod resolver;
/// Backup restore.
pub mod restore;
/// Persisted editor state.
pub mod serializer;
/// Dirty-document tracking.
pub mod tracker;

pub use content::{CellContentProvider, CellMetadataContentProvider, InMemoryModels, ModelStore, TextModel};
pub use contribution::{Workbench, register_notebook};
pub use document::{
	Cell, CellKind, CellMetadata, DocumentError, DocumentRef, DocumentResolver, NotebookDocument,
};
pub use group::{Accessibility, EditorGroup, EditorService};
pub use input::{
	DiffInput, EditorInput, InputId, NOTEBOOK_DIFF_EDITOR_INPUT, NOTEBOOK_EDITOR_INPUT,
	NotebookDiffInput, NotebookInput, ResourceInput,
};
pub use options::{CellOpenOptions, OpenOptions};
pub use resolver::{EditorResolver, OverrideChoice, Resolution};
pub use restore::{BackupMeta, BackupStore, RestoreError, can_resolve_backup, restore_from_backup};
pub use serializer::{InputSerializer, SerializerRegistry};
pub use tracker::{DIRTY_DEBOUNCE, DirtyModel, DirtyTracker};
