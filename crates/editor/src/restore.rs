//! Restoring notebooks from ephemeral backups.
//!
//! An unsaved notebook can come back after a crash through a backup keyed
//! by an ephemeral URI: the `notebook` scheme wrapping the document's real
//! URI. Restoring needs the backup's metadata to know which provider owns
//! the document; a backup without metadata fails that one restore.

use async_trait::async_trait;
use quill_primitives::Resource;
use thiserror::Error;

use crate::input::{EditorInput, NotebookInput};

/// Scheme of ephemeral backup resources.
pub const EPHEMERAL_SCHEME: &str = "notebook";

/// Metadata persisted alongside a notebook backup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackupMeta {
	/// The provider that owned the document.
	pub view_type: String,
}

/// Access to persisted backups.
#[async_trait]
pub trait BackupStore: Send + Sync {
	/// The backup metadata for a resource, if a backup exists and carries
	/// metadata.
	async fn resolve_meta(&self, resource: &Resource) -> Option<BackupMeta>;
}

/// Errors from restoring a notebook editor from backup.
#[derive(Debug, Error)]
pub enum RestoreError {
	/// The backup exists without usable metadata; the restore fails.
	#[error("no backup found for notebook editor: {0}")]
	MissingMetadata(Resource),
}

/// The ephemeral backup resource for a document.
pub fn backup_resource_for(resource: &Resource) -> Option<Resource> {
	Resource::parse(&format!("{EPHEMERAL_SCHEME}:{resource}")).ok()
}

/// Restores the notebook editor input for an ephemeral resource.
///
/// The restored input starts dirty, since only unsaved documents leave
/// backups behind.
pub async fn restore_from_backup(
	store: &dyn BackupStore,
	resource: &Resource,
) -> Result<NotebookInput, RestoreError> {
	let meta = store
		.resolve_meta(resource)
		.await
		.ok_or_else(|| RestoreError::MissingMetadata(resource.clone()))?;
	let mut input = NotebookInput::new(resource.clone(), meta.view_type);
	input.start_dirty = true;
	Ok(input)
}

/// Whether a notebook input owns the given backup resource.
pub fn can_resolve_backup(input: &EditorInput, backup_resource: &Resource) -> bool {
	input
		.as_notebook()
		.and_then(|notebook| backup_resource_for(&notebook.resource))
		.is_some_and(|expected| expected == *backup_resource)
}

#[cfg(test)]
mod tests {
	use super::*;

	struct FixedStore(Option<BackupMeta>);

	#[async_trait]
	impl BackupStore for FixedStore {
		async fn resolve_meta(&self, _resource: &Resource) -> Option<BackupMeta> {
			self.0.clone()
		}
	}

	fn resource() -> Resource {
		Resource::parse("file:///work/a.ipynb").unwrap()
	}

	#[tokio::test]
	async fn test_restore_uses_backed_up_view_type() {
		let store = FixedStore(Some(BackupMeta { view_type: "web.notebook".to_owned() }));
		let input = restore_from_backup(&store, &resource()).await.unwrap();
		assert_eq!(input.view_type, "web.notebook");
		assert!(input.start_dirty);
	}

	#[tokio::test]
	async fn test_missing_metadata_is_fatal_for_the_restore() {
		let store = FixedStore(None);
		let err = restore_from_backup(&store, &resource()).await.unwrap_err();
		assert!(matches!(err, RestoreError::MissingMetadata(_)));
	}

	#[test]
	fn test_backup_resource_ownership() {
		let input: EditorInput = NotebookInput::new(resource(), "nb").into();
		let backup = backup_resource_for(&resource()).unwrap();
		assert_eq!(backup.scheme(), EPHEMERAL_SCHEME);
		assert!(can_resolve_backup(&input, &backup));

		let other = backup_resource_for(&Resource::parse("file:///other.ipynb").unwrap()).unwrap();
		assert!(!can_resolve_backup(&input, &other));
	}
}
