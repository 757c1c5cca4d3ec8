//! Diff-specific resolution.

use super::{AssociationOutcome, EditorResolver, Resolution};
use crate::group::EditorGroup;
use crate::input::{DiffInput, NotebookDiffInput};
use crate::options::OpenOptions;

impl EditorResolver<'_> {
	/// Resolves a two-sided comparison to a notebook diff editor.
	///
	/// Both sides need a resource, nothing but notebook editors may already
	/// show the modified side, and the association policy of the modified
	/// side must yield at least one candidate; the first candidate renders
	/// the comparison.
	pub(crate) fn resolve_diff(&self, diff: &DiffInput, group: &dyn EditorGroup) -> Resolution {
		let (Some(modified), Some(original)) = (&diff.modified, &diff.original) else {
			return Resolution::Decline;
		};

		if group.find_editors(modified).iter().any(|editor| !editor.is_notebook()) {
			return Resolution::Decline;
		}

		let AssociationOutcome::Candidates(candidates) = self.association_candidates(modified)
		else {
			return Resolution::Decline;
		};
		let Some(info) = candidates.first() else {
			return Resolution::Decline;
		};

		let input = NotebookDiffInput::new(
			modified.clone(),
			diff.modified_name.clone(),
			original.clone(),
			diff.original_name.clone(),
			diff.name.clone(),
			info.id.clone(),
		);
		Resolution::Open { input: input.into(), options: OpenOptions::resolved() }
	}
}
