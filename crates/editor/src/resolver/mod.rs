//! Editor resolution policy.
//!
//! When the host is about to open an input, the [`EditorResolver`] decides
//! whether a notebook editor should handle it instead of the default path.
//! The policy is a fixed, ordered list of named rules evaluated in
//! sequence over a shared context; the first rule to settle the outcome
//! wins and is traced. Resolution is synchronous, reads injected state
//! only, and never fails: every dead end is a [`Resolution::Decline`].
//!
//! # Rule Order
//!
//! 1. `skip-untitled` - never claim untitled documents unasked
//! 2. `diff-preview` - route comparisons to diff resolution when enabled
//! 3. `require-resource` - inputs without a resource are not ours
//! 4. `explicit-override` - honor a requested view type, replacing or
//!    reusing open editors
//! 5. `already-open` - re-opening the same notebook instance is a no-op
//! 6. `skip-notebook-diff` - resolved comparisons stay as they are
//! 7. `rewrite-cell-uri` - cell resources resolve against their notebook
//! 8. `adopt-open-view-type` - follow a notebook editor already showing
//!    the document
//! 9. `association-policy` - respect user associations and default
//!    providers
//! 10. `resolve-provider` - pick the provider and produce the open

mod diff;
mod rules;


use std::ops::ControlFlow;

use quill_primitives::Resource;
use quill_registry::associations::{EditorAssociation, matching_associations};
use quill_registry::config::ConfigSource;
use quill_registry::provider::{ProviderInfo, ProviderPriority, ProviderRegistry};
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::group::{Accessibility, EditorGroup};
use crate::input::{EditorInput, InputId};
use crate::options::{CellOpenOptions, OpenOptions};

/// Outcome of a resolution.
#[derive(Clone, Debug)]
pub enum Resolution {
	/// Let the host's default editor path handle the input.
	Decline,
	/// Open a newly constructed input.
	Open {
		/// The input to open.
		input: EditorInput,
		/// How to open it.
		options: OpenOptions,
	},
	/// Re-activate an editor that is already open in the group.
	OpenExisting {
		/// The open editor to activate.
		editor: EditorInput,
		/// How to activate it.
		options: OpenOptions,
	},
	/// Close (and dispose) an open editor, then open a replacement.
	///
	/// The host awaits the close before opening; the options carry the
	/// vacated index and the original's pin state.
	Replace {
		/// The open editor to close.
		close: InputId,
		/// The replacement input.
		input: EditorInput,
		/// How to open the replacement.
		options: OpenOptions,
	},
}

impl Resolution {
	/// Whether this resolution declines to override.
	pub fn is_decline(&self) -> bool {
		matches!(self, Self::Decline)
	}
}

/// Mutable state threaded through the rule sequence.
pub(crate) struct RuleCtx<'a> {
	/// The input being opened.
	pub input: &'a EditorInput,
	/// The group the open targets.
	pub group: &'a dyn EditorGroup,
	/// Requested or derived view type; rules may fill this in.
	pub id: Option<String>,
	/// The notebook document URI, once established.
	pub notebook_uri: Option<Resource>,
	/// Cell options when the input addressed a cell sub-resource.
	pub cell: Option<CellOpenOptions>,
}

type RuleFn = fn(&EditorResolver<'_>, &mut RuleCtx<'_>) -> ControlFlow<Resolution>;

const RULES: &[(&str, RuleFn)] = &[
	("skip-untitled", rules::skip_untitled),
	("diff-preview", rules::diff_preview),
	("require-resource", rules::require_resource),
	("explicit-override", rules::explicit_override),
	("already-open", rules::already_open),
	("skip-notebook-diff", rules::skip_notebook_diff),
	("rewrite-cell-uri", rules::rewrite_cell_uri),
	("adopt-open-view-type", rules::adopt_open_view_type),
	("association-policy", rules::association_policy),
	("resolve-provider", rules::resolve_provider),
];

/// An entry of the override picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverrideChoice {
	/// The provider's view type.
	pub id: String,
	/// The provider's editor name.
	pub label: String,
	/// The contributing extension's name.
	pub detail: String,
	/// Whether the resource is currently shown by this provider.
	pub active: bool,
}

/// Decides which editor implementation opens a resource.
///
/// Collaborators are injected once; group state is passed per call since
/// each open targets one group.
pub struct EditorResolver<'a> {
	providers: &'a ProviderRegistry,
	config: &'a dyn ConfigSource,
	accessibility: &'a dyn Accessibility,
}

impl<'a> EditorResolver<'a> {
	/// Creates a resolver over the injected collaborators.
	pub fn new(
		providers: &'a ProviderRegistry,
		config: &'a dyn ConfigSource,
		accessibility: &'a dyn Accessibility,
	) -> Self {
		Self { providers, config, accessibility }
	}

	/// Resolves an about-to-open input.
	///
	/// `requested` is the explicit view type override, if the open carried
	/// one.
	pub fn on_editor_opening(
		&self,
		input: &EditorInput,
		requested: Option<&str>,
		group: &dyn EditorGroup,
	) -> Resolution {
		let mut ctx = RuleCtx {
			input,
			group,
			id: requested.map(str::to_owned),
			notebook_uri: None,
			cell: None,
		};
		for &(name, rule) in RULES {
			if let ControlFlow::Break(resolution) = rule(self, &mut ctx) {
				trace!(rule = name, decline = resolution.is_decline(), "Editor resolution settled");
				return resolution;
			}
		}
		Resolution::Decline
	}

	/// The override choices to offer for a resource.
	///
	/// User-associated providers come first, then contributed ones,
	/// deduplicated by id and sorted exclusive-first (stable within each
	/// class).
	pub fn available_overrides(&self, resource: &Resource, group: &dyn EditorGroup) -> Vec<OverrideChoice> {
		let current = group.find_editors(resource).into_iter().next();
		let mut choices = self.user_associated_providers(resource);
		choices.extend(self.providers.matching(resource));

		let mut seen = FxHashSet::default();
		let mut choices: Vec<&ProviderInfo> =
			choices.into_iter().filter(|info| seen.insert(info.id.clone())).collect();
		choices.sort_by_key(|info| !info.is_exclusive());

		choices
			.into_iter()
			.map(|info| OverrideChoice {
				id: info.id.clone(),
				label: info.display_name.clone(),
				detail: info.provider_display_name.clone(),
				active: current
					.as_ref()
					.and_then(|editor| editor.as_notebook())
					.is_some_and(|notebook| notebook.view_type == info.id),
			})
			.collect()
	}

	/// User associations from configuration that apply to `resource`.
	fn user_associations(&self, resource: &Resource) -> Vec<EditorAssociation> {
		let associations = self.config.editor_associations();
		matching_associations(&associations, resource).into_iter().cloned().collect()
	}

	/// Applicable user associations resolved to known providers.
	fn user_associated_providers(&self, resource: &Resource) -> Vec<&'a ProviderInfo> {
		self.user_associations(resource)
			.iter()
			.filter_map(|association| self.providers.get(&association.view_type))
			.collect()
	}

	/// Evaluates the association policy for a resource.
	pub(crate) fn association_candidates(&self, resource: &Resource) -> AssociationOutcome<'a> {
		let user_associations = self.user_associations(resource);
		let user_providers: Vec<&ProviderInfo> = user_associations
			.iter()
			.filter_map(|association| self.providers.get(&association.view_type))
			.collect();

		// The user explicitly chose an editor we do not know about.
		if !user_associations.is_empty() && user_providers.is_empty() {
			return AssociationOutcome::NonNotebookChoice;
		}

		let mut candidates = user_providers;
		candidates.extend(
			self.providers
				.matching(resource)
				.into_iter()
				.filter(|info| info.priority == ProviderPriority::Default),
		);

		let mut seen = FxHashSet::default();
		let candidates: Vec<&ProviderInfo> =
			candidates.into_iter().filter(|info| seen.insert(info.id.clone())).collect();

		if candidates.is_empty() {
			AssociationOutcome::NoCandidates
		} else {
			AssociationOutcome::Candidates(candidates)
		}
	}
}

/// Result of the association policy.
pub(crate) enum AssociationOutcome<'a> {
	/// The user associated the resource with a non-notebook editor.
	NonNotebookChoice,
	/// No provider wants the resource by default.
	NoCandidates,
	/// Providers that may open the resource, most preferred first.
	Candidates(Vec<&'a ProviderInfo>),
}
