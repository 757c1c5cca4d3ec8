//! Resource identity for workbench documents.
//!
//! Every document the workbench knows about is addressed by a URI. The
//! workbench never interprets the URI beyond its scheme and path: the scheme
//! selects the storage backing (file, untitled, synthetic cell, ...) and the
//! path is what selectors and associations match against.

pub use url::Url as Resource;

/// Scheme of documents that have never been saved to disk.
pub const UNTITLED_SCHEME: &str = "untitled";

/// Whether a resource refers to a never-saved document.
pub fn is_untitled(resource: &Resource) -> bool {
	resource.scheme() == UNTITLED_SCHEME
}

/// Last path segment of a resource, used as the default display name.
///
/// Falls back to the full path when the resource has no usable segment
/// (opaque URIs, trailing slashes).
pub fn basename(resource: &Resource) -> String {
	resource
		.path_segments()
		.and_then(|mut segments| segments.next_back())
		.filter(|segment| !segment.is_empty())
		.unwrap_or(resource.path())
		.to_owned()
}
