//! Dirty-document tracking.
//!
//! A notebook that becomes dirty while no editor shows it would be
//! invisible to the user at save time. The tracker watches the dirty-state
//! stream of the document service and opens a background editor for every
//! dirty document that has none, so unsaved work always has a tab.
//!
//! Events are coalesced: the first event of a burst opens a 100ms window
//! and everything arriving within it flushes as one batch. Dirtiness and
//! open-state are re-checked at flush time, not at event time.

use std::sync::Arc;
use std::time::Duration;

use quill_primitives::Resource;
use rustc_hash::FxHashSet;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::group::EditorService;
use crate::input::NotebookInput;
use crate::options::OpenOptions;

/// Coalescing window for dirty-state events.
pub const DIRTY_DEBOUNCE: Duration = Duration::from_millis(100);

/// A document model as the tracker sees it.
pub trait DirtyModel: Send + Sync {
	/// The document's resource.
	fn resource(&self) -> &Resource;

	/// The provider that owns the document.
	fn view_type(&self) -> &str;

	/// Whether the document currently has unsaved changes.
	fn is_dirty(&self) -> bool;
}

/// Watches dirty-state events and opens editors for unrepresented
/// documents.
pub struct DirtyTracker;

impl DirtyTracker {
	/// Spawns the tracker task over a dirty-state event stream.
	///
	/// The task ends when the stream closes, flushing any pending batch
	/// first.
	pub fn spawn(
		mut events: UnboundedReceiver<Arc<dyn DirtyModel>>,
		editors: Arc<dyn EditorService>,
	) -> JoinHandle<()> {
		tokio::spawn(async move {
			while let Some(first) = events.recv().await {
				let mut batch = vec![first];
				let mut closed = false;
				let deadline = tokio::time::sleep(DIRTY_DEBOUNCE);
				tokio::pin!(deadline);
				loop {
					tokio::select! {
						_ = &mut deadline => break,
						next = events.recv() => match next {
							Some(model) => batch.push(model),
							None => {
								closed = true;
								break;
							}
						},
					}
				}
				open_missing_editors(editors.as_ref(), batch);
				if closed {
					return;
				}
			}
		})
	}
}

/// Opens one background editor per dirty, unopened document in the batch.
fn open_missing_editors(editors: &dyn EditorService, batch: Vec<Arc<dyn DirtyModel>>) {
	let mut seen = FxHashSet::default();
	let mut to_open = Vec::new();
	for model in batch {
		if !model.is_dirty() || editors.is_open(model.resource()) {
			continue;
		}
		if !seen.insert(model.resource().clone()) {
			continue;
		}
		let input = NotebookInput::new(model.resource().clone(), model.view_type());
		to_open.push((input, OpenOptions::background()));
	}
	if !to_open.is_empty() {
		debug!(count = to_open.len(), "Opening editors for dirty notebooks");
		editors.open_editors(to_open);
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicBool, Ordering};

	use parking_lot::Mutex;
	use tokio::sync::mpsc::unbounded_channel;

	use super::*;

	struct TestModel {
		resource: Resource,
		dirty: AtomicBool,
	}

	impl TestModel {
		fn new(uri: &str) -> Arc<Self> {
			Arc::new(Self {
				resource: Resource::parse(uri).unwrap(),
				dirty: AtomicBool::new(true),
			})
		}
	}

	impl DirtyModel for TestModel {
		fn resource(&self) -> &Resource {
			&self.resource
		}

		fn view_type(&self) -> &str {
			"web.notebook"
		}

		fn is_dirty(&self) -> bool {
			self.dirty.load(Ordering::SeqCst)
		}
	}

	#[derive(Default)]
	struct RecordingService {
		open: Mutex<FxHashSet<Resource>>,
		calls: Mutex<Vec<Vec<(NotebookInput, OpenOptions)>>>,
	}

	impl EditorService for RecordingService {
		fn is_open(&self, resource: &Resource) -> bool {
			self.open.lock().contains(resource)
		}

		fn open_editors(&self, editors: Vec<(NotebookInput, OpenOptions)>) {
			let mut open = self.open.lock();
			for (input, _) in &editors {
				open.insert(input.resource.clone());
			}
			self.calls.lock().push(editors);
		}
	}

	#[tokio::test(start_paused = true)]
	async fn test_burst_flushes_as_one_batch() {
		let service = Arc::new(RecordingService::default());
		let (tx, rx) = unbounded_channel();
		let handle = DirtyTracker::spawn(rx, Arc::clone(&service) as Arc<dyn EditorService>);

		tx.send(TestModel::new("file:///a.ipynb")).unwrap();
		tx.send(TestModel::new("file:///b.ipynb")).unwrap();
		tx.send(TestModel::new("file:///c.ipynb")).unwrap();
		tokio::time::sleep(DIRTY_DEBOUNCE * 2).await;

		{
			let calls = service.calls.lock();
			assert_eq!(calls.len(), 1);
			assert_eq!(calls[0].len(), 3);
			let (_, options) = &calls[0][0];
			assert!(options.inactive && options.preserve_focus && options.pinned);
		}

		drop(tx);
		handle.await.unwrap();
	}

	#[tokio::test(start_paused = true)]
	async fn test_flush_skips_clean_open_and_duplicate_documents() {
		let service = Arc::new(RecordingService::default());
		service.open.lock().insert(Resource::parse("file:///open.ipynb").unwrap());
		let (tx, rx) = unbounded_channel();
		let handle = DirtyTracker::spawn(rx, Arc::clone(&service) as Arc<dyn EditorService>);

		let clean = TestModel::new("file:///clean.ipynb");
		clean.dirty.store(false, Ordering::SeqCst);
		tx.send(clean).unwrap();
		tx.send(TestModel::new("file:///open.ipynb")).unwrap();
		let dirty = TestModel::new("file:///dirty.ipynb");
		tx.send(Arc::clone(&dirty) as Arc<dyn DirtyModel>).unwrap();
		tx.send(dirty).unwrap();
		tokio::time::sleep(DIRTY_DEBOUNCE * 2).await;

		let calls = service.calls.lock();
		assert_eq!(calls.len(), 1);
		assert_eq!(calls[0].len(), 1);
		assert_eq!(calls[0][0].0.resource, Resource::parse("file:///dirty.ipynb").unwrap());
		drop(calls);

		drop(tx);
		handle.await.unwrap();
	}

	#[tokio::test(start_paused = true)]
	async fn test_separate_bursts_flush_separately() {
		let service = Arc::new(RecordingService::default());
		let (tx, rx) = unbounded_channel();
		let handle = DirtyTracker::spawn(rx, Arc::clone(&service) as Arc<dyn EditorService>);

		tx.send(TestModel::new("file:///a.ipynb")).unwrap();
		tokio::time::sleep(DIRTY_DEBOUNCE * 2).await;
		tx.send(TestModel::new("file:///b.ipynb")).unwrap();
		tokio::time::sleep(DIRTY_DEBOUNCE * 2).await;

		assert_eq!(service.calls.lock().len(), 2);

		drop(tx);
		handle.await.unwrap();
	}

	#[tokio::test(start_paused = true)]
	async fn test_stream_close_flushes_pending_batch() {
		let service = Arc::new(RecordingService::default());
		let (tx, rx) = unbounded_channel();
		let handle = DirtyTracker::spawn(rx, Arc::clone(&service) as Arc<dyn EditorService>);

		tx.send(TestModel::new("file:///a.ipynb")).unwrap();
		drop(tx);
		handle.await.unwrap();

		assert_eq!(service.calls.lock().len(), 1);
	}
}
