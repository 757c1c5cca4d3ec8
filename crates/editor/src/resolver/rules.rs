//! The named rules of the resolution sequence.
//!
//! Each rule either settles the outcome (`Break`) or passes the context to
//! the next rule (`Continue`). Rules run in the order listed in
//! [`super::RULES`]; several of them refine the context (view type id,
//! notebook URI, cell options) for the rules after them.

use std::ops::ControlFlow;

use quill_primitives::{is_untitled, parse_cell_uri};

use super::{AssociationOutcome, EditorResolver, Resolution, RuleCtx};
use crate::input::{EditorInput, NotebookInput};
use crate::options::{CellOpenOptions, OpenOptions};

/// Untitled documents stay with the default editor unless a view type was
/// requested explicitly.
pub(super) fn skip_untitled(
	_resolver: &EditorResolver<'_>,
	ctx: &mut RuleCtx<'_>,
) -> ControlFlow<Resolution> {
	if ctx.id.is_none() && ctx.input.resource().is_some_and(is_untitled) {
		return ControlFlow::Break(Resolution::Decline);
	}
	ControlFlow::Continue(())
}

/// Routes two-sided comparisons to diff resolution when the diff preview is
/// enabled and the UI is not screen-reader optimized.
///
/// With the preview disabled the comparison falls through and declines at
/// `require-resource`, since a generic diff input has no resource of its
/// own.
pub(super) fn diff_preview(
	resolver: &EditorResolver<'_>,
	ctx: &mut RuleCtx<'_>,
) -> ControlFlow<Resolution> {
	let EditorInput::Diff(diff) = ctx.input else {
		return ControlFlow::Continue(());
	};
	if !resolver.config.diff_preview_enabled() || resolver.accessibility.screen_reader_optimized() {
		return ControlFlow::Continue(());
	}
	ControlFlow::Break(resolver.resolve_diff(diff, ctx.group))
}

/// Establishes the notebook URI from the input's resource; inputs without
/// one are never ours.
pub(super) fn require_resource(
	_resolver: &EditorResolver<'_>,
	ctx: &mut RuleCtx<'_>,
) -> ControlFlow<Resolution> {
	match ctx.input.resource() {
		Some(resource) => {
			ctx.notebook_uri = Some(resource.clone());
			ControlFlow::Continue(())
		}
		None => ControlFlow::Break(Resolution::Decline),
	}
}

/// Honors an explicitly requested view type.
///
/// A notebook input already showing that view type is a no-op. A notebook
/// input of another view type is replaced in place. For any other input
/// kind, an open notebook editor with the requested view type is reused,
/// the first open notebook editor is otherwise replaced, and when none is
/// open at all the id is carried into provider resolution.
pub(super) fn explicit_override(
	_resolver: &EditorResolver<'_>,
	ctx: &mut RuleCtx<'_>,
) -> ControlFlow<Resolution> {
	let Some(id) = ctx.id.clone() else {
		return ControlFlow::Continue(());
	};
	let Some(resource) = ctx.notebook_uri.clone() else {
		return ControlFlow::Continue(());
	};

	if let EditorInput::Notebook(original) = ctx.input {
		if original.view_type == id {
			return ControlFlow::Break(Resolution::Decline);
		}
		let options = OpenOptions::resolved()
			.at_index(ctx.group.index_of(original.id()))
			.pinned(ctx.group.is_pinned(original.id()));
		let replacement = NotebookInput::new(original.resource.clone(), id);
		return ControlFlow::Break(Resolution::Replace {
			close: original.id(),
			input: replacement.into(),
			options,
		});
	}

	// Requested from outside the notebook world (a file browser, say).
	let existing: Vec<NotebookInput> = ctx
		.group
		.find_editors(&resource)
		.into_iter()
		.filter_map(|editor| editor.as_notebook().cloned())
		.collect();
	if existing.is_empty() {
		return ControlFlow::Continue(());
	}

	if let Some(found) = existing.iter().find(|editor| editor.view_type == id) {
		return ControlFlow::Break(Resolution::OpenExisting {
			editor: found.clone().into(),
			options: OpenOptions::resolved(),
		});
	}

	let first = &existing[0];
	let options = OpenOptions::resolved()
		.at_index(ctx.group.index_of(first.id()))
		.pinned(ctx.group.is_pinned(first.id()));
	let replacement = NotebookInput::new(resource, id);
	ControlFlow::Break(Resolution::Replace {
		close: first.id(),
		input: replacement.into(),
		options,
	})
}

/// Re-opening a notebook instance that is already in the group is a no-op.
pub(super) fn already_open(
	_resolver: &EditorResolver<'_>,
	ctx: &mut RuleCtx<'_>,
) -> ControlFlow<Resolution> {
	if ctx.id.is_none()
		&& let EditorInput::Notebook(original) = ctx.input
		&& ctx
			.group
			.find_editors(&original.resource)
			.iter()
			.any(|editor| editor.id() == original.id())
	{
		return ControlFlow::Break(Resolution::Decline);
	}
	ControlFlow::Continue(())
}

/// Already-resolved comparisons are never re-resolved.
pub(super) fn skip_notebook_diff(
	_resolver: &EditorResolver<'_>,
	ctx: &mut RuleCtx<'_>,
) -> ControlFlow<Resolution> {
	if ctx.input.is_notebook_diff() {
		return ControlFlow::Break(Resolution::Decline);
	}
	ControlFlow::Continue(())
}

/// A cell URI resolves against its owning notebook; the cell itself is
/// carried as cell-scoped open options.
pub(super) fn rewrite_cell_uri(
	_resolver: &EditorResolver<'_>,
	ctx: &mut RuleCtx<'_>,
) -> ControlFlow<Resolution> {
	if let Some(resource) = ctx.notebook_uri.clone()
		&& let Some(address) = parse_cell_uri(&resource)
	{
		ctx.cell = Some(CellOpenOptions { resource });
		ctx.notebook_uri = Some(address.notebook);
	}
	ControlFlow::Continue(())
}

/// A generic resource input adopts the view type of a notebook editor that
/// already shows the document.
pub(super) fn adopt_open_view_type(
	_resolver: &EditorResolver<'_>,
	ctx: &mut RuleCtx<'_>,
) -> ControlFlow<Resolution> {
	if ctx.id.is_some() || !matches!(ctx.input, EditorInput::Resource(_)) {
		return ControlFlow::Continue(());
	}
	let Some(notebook_uri) = ctx.notebook_uri.as_ref() else {
		return ControlFlow::Continue(());
	};
	ctx.id = ctx.group.editors().iter().find_map(|editor| {
		editor
			.as_notebook()
			.filter(|notebook| notebook.resource == *notebook_uri)
			.map(|notebook| notebook.view_type.clone())
	});
	ControlFlow::Continue(())
}

/// With no view type settled, respects open non-notebook editors and the
/// user's association choices before letting a default provider claim the
/// document.
pub(super) fn association_policy(
	resolver: &EditorResolver<'_>,
	ctx: &mut RuleCtx<'_>,
) -> ControlFlow<Resolution> {
	if ctx.id.is_some() {
		return ControlFlow::Continue(());
	}
	let Some(notebook_uri) = ctx.notebook_uri.as_ref() else {
		return ControlFlow::Continue(());
	};

	let other_editors = ctx
		.group
		.find_editors(notebook_uri)
		.into_iter()
		.filter(|editor| !editor.is_notebook() && !editor.is_notebook_diff())
		.count();
	if other_editors > 0 {
		return ControlFlow::Break(Resolution::Decline);
	}

	match resolver.association_candidates(notebook_uri) {
		AssociationOutcome::NonNotebookChoice | AssociationOutcome::NoCandidates => {
			ControlFlow::Break(Resolution::Decline)
		}
		AssociationOutcome::Candidates(_) => ControlFlow::Continue(()),
	}
}

/// Picks the concrete provider and produces the open.
///
/// Exclusive providers matching the (possibly absent) id win over default
/// ones; a requested id falls back to a direct registry lookup. When the
/// original input is the group's active editor for the same document, the
/// replacement opens at its index, or right after it when the tab is
/// pinned.
pub(super) fn resolve_provider(
	resolver: &EditorResolver<'_>,
	ctx: &mut RuleCtx<'_>,
) -> ControlFlow<Resolution> {
	let Some(notebook_uri) = ctx.notebook_uri.clone() else {
		return ControlFlow::Break(Resolution::Decline);
	};
	let id = ctx.id.as_deref();

	let matching = resolver.providers.matching(&notebook_uri);
	let mut info = matching
		.iter()
		.find(|info| id.is_none_or(|id| info.id == id) && info.is_exclusive())
		.or_else(|| matching.iter().find(|info| id.is_none_or(|id| info.id == id)))
		.copied();
	if info.is_none()
		&& let Some(id) = id
	{
		info = resolver.providers.get(id);
	}
	let Some(info) = info else {
		return ControlFlow::Break(Resolution::Decline);
	};

	let mut index = None;
	if let Some(active) = ctx.group.active_editor()
		&& active.id() == ctx.input.id()
		&& ctx.input.resource() == Some(&notebook_uri)
		&& let Some(position) = ctx.group.index_of(active.id())
	{
		// A pinned tab stays; the notebook editor opens in a new tab
		// right after it. An unpinned tab is taken over in place.
		index = Some(if ctx.group.is_pinned(active.id()) { position + 1 } else { position });
	}

	let input = NotebookInput::new(notebook_uri, info.id.clone());
	let mut options = OpenOptions::resolved().at_index(index);
	options.cell = ctx.cell.take();
	ControlFlow::Break(Resolution::Open { input: input.into(), options })
}
