//! User-configured editor associations.
//!
//! An association maps a filename pattern to the view type the user wants
//! for matching resources. Associations live in user configuration and are
//! re-read on every resolution, so edits take effect on the next open.

use quill_primitives::Resource;
use serde::{Deserialize, Serialize};

use crate::selector::pattern_matches;

/// A single user association from configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorAssociation {
	/// The editor the user chose.
	pub view_type: String,
	/// Glob pattern selecting the resources it applies to.
	pub filename_pattern: String,
}

impl EditorAssociation {
	/// Creates an association.
	pub fn new(view_type: impl Into<String>, filename_pattern: impl Into<String>) -> Self {
		Self { view_type: view_type.into(), filename_pattern: filename_pattern.into() }
	}

	/// Whether this association applies to the resource.
	pub fn matches(&self, resource: &Resource) -> bool {
		pattern_matches(&self.filename_pattern, resource)
	}
}

/// Associations from `associations` that apply to `resource`, in list order.
pub fn matching_associations<'a>(
	associations: &'a [EditorAssociation],
	resource: &Resource,
) -> Vec<&'a EditorAssociation> {
	associations.iter().filter(|association| association.matches(resource)).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_matching_associations_filters_by_pattern() {
		let associations = vec![
			EditorAssociation::new("web.notebook", "*.ipynb"),
			EditorAssociation::new("hexEditor", "*.bin"),
			EditorAssociation::new("data.notebook", "**/data/*.ipynb"),
		];
		let resource = Resource::parse("file:///repo/data/run.ipynb").unwrap();

		let matched: Vec<&str> = matching_associations(&associations, &resource)
			.iter()
			.map(|a| a.view_type.as_str())
			.collect();
		assert_eq!(matched, ["web.notebook", "data.notebook"]);
	}

	#[test]
	fn test_association_serde_uses_camel_case() {
		let association = EditorAssociation::new("web.notebook", "*.ipynb");
		let json = serde_json::to_string(&association).unwrap();
		assert_eq!(json, r#"{"viewType":"web.notebook","filenamePattern":"*.ipynb"}"#);

		let parsed: EditorAssociation = serde_json::from_str(&json).unwrap();
		assert_eq!(parsed, association);
	}
}
