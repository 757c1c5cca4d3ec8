//! Glob selectors over resources.
//!
//! Selectors decide whether an editor implementation wants a resource.
//! Patterns containing a path separator match the resource's full path;
//! bare patterns match the basename only, so `*.ipynb` matches
//! `file:///work/a.ipynb` without needing a `**/` prefix. Matching is
//! case-insensitive.

use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use quill_primitives::{Resource, basename};
use tracing::warn;

use crate::error::{RegistryError, Result};

/// A compiled list of glob patterns.
#[derive(Debug)]
pub struct Selector {
	patterns: Vec<String>,
	path_globs: GlobSet,
	basename_globs: GlobSet,
}

impl Selector {
	/// Compiles a selector from glob patterns.
	pub fn new<I, S>(patterns: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
		let mut path_globs = GlobSetBuilder::new();
		let mut basename_globs = GlobSetBuilder::new();
		for pattern in &patterns {
			let glob = compile(pattern)?;
			if pattern.contains('/') {
				path_globs.add(glob);
			} else {
				basename_globs.add(glob);
			}
		}
		let build = |builder: GlobSetBuilder| {
			builder.build().map_err(|source| RegistryError::InvalidSelector {
				pattern: patterns.join(","),
				source,
			})
		};
		Ok(Self {
			path_globs: build(path_globs)?,
			basename_globs: build(basename_globs)?,
			patterns,
		})
	}

	/// Whether any pattern matches the resource.
	pub fn matches(&self, resource: &Resource) -> bool {
		self.path_globs.is_match(Path::new(resource.path()))
			|| self.basename_globs.is_match(Path::new(&basename(resource)))
	}

	/// The source patterns this selector was compiled from.
	pub fn patterns(&self) -> &[String] {
		&self.patterns
	}

	/// Whether the selector has no patterns at all.
	pub fn is_empty(&self) -> bool {
		self.patterns.is_empty()
	}
}

/// One-off match of a single pattern against a resource.
///
/// Used for user associations, which are re-read from configuration on every
/// resolution and therefore never pre-compiled. An invalid pattern matches
/// nothing and is logged once per call.
pub fn pattern_matches(pattern: &str, resource: &Resource) -> bool {
	let Ok(glob) = compile(pattern) else {
		warn!(pattern, "Ignoring unparsable association pattern");
		return false;
	};
	let matcher = glob.compile_matcher();
	if pattern.contains('/') {
		matcher.is_match(Path::new(resource.path()))
	} else {
		matcher.is_match(Path::new(&basename(resource)))
	}
}

fn compile(pattern: &str) -> Result<globset::Glob> {
	GlobBuilder::new(pattern)
		.case_insensitive(true)
		.build()
		.map_err(|source| RegistryError::InvalidSelector { pattern: pattern.to_owned(), source })
}

#[cfg(test)]
mod tests {
	use super::*;

	fn resource(uri: &str) -> Resource {
		Resource::parse(uri).unwrap()
	}

	#[test]
	fn test_basename_pattern_matches_anywhere() {
		let selector = Selector::new(["*.ipynb"]).unwrap();
		assert!(selector.matches(&resource("file:///deep/nested/dir/a.ipynb")));
		assert!(!selector.matches(&resource("file:///deep/nested/dir/a.txt")));
	}

	#[test]
	fn test_path_pattern_matches_full_path() {
		let selector = Selector::new(["**/notebooks/*.nb"]).unwrap();
		assert!(selector.matches(&resource("file:///work/notebooks/a.nb")));
		assert!(!selector.matches(&resource("file:///work/scripts/a.nb")));
	}

	#[test]
	fn test_matching_is_case_insensitive() {
		let selector = Selector::new(["*.IPYNB"]).unwrap();
		assert!(selector.matches(&resource("file:///a/b.ipynb")));
	}

	#[test]
	fn test_invalid_pattern_is_an_error() {
		let err = Selector::new(["a[" ]).unwrap_err();
		assert!(matches!(err, RegistryError::InvalidSelector { .. }));
	}

	#[test]
	fn test_one_off_pattern_match() {
		assert!(pattern_matches("*.ipynb", &resource("file:///x/y.ipynb")));
		assert!(!pattern_matches("*.ipynb", &resource("file:///x/y.md")));
		assert!(!pattern_matches("a[", &resource("file:///x/y.ipynb")));
	}
}
