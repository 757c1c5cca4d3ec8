//! Registries for notebook workbench contributions.
//!
//! Everything a contribution can register lives behind an explicit registry
//! value that the embedder owns and passes around; there are no process-wide
//! singletons. Registration happens once at startup, reads happen on every
//! resolution.
//!
//! - [`provider`] - Contributed editor providers and their selectors
//! - [`associations`] - User-configured pattern-to-editor associations
//! - [`config`] - Setting declarations and the configuration accessor
//! - [`schema`] - Contributed JSON schemas
//! - [`panes`] - Editor pane registrations
//! - [`comparison`] - Per-scheme undo/redo comparison keys
//! - [`selector`] - Glob matching over resources

pub mod associations;
pub mod comparison;
pub mod config;
pub mod error;
pub mod panes;
pub mod provider;
pub mod schema;
pub mod selector;

pub use associations::{EditorAssociation, matching_associations};
pub use comparison::{ComparisonKeyFn, ComparisonKeyRegistry};
pub use config::{ConfigSource, MemoryConfig, SettingDef, SettingKind, SettingsRegistry};
pub use error::{RegistryError, Result};
pub use panes::{EditorPaneDescriptor, EditorPaneRegistry};
pub use provider::{ProviderInfo, ProviderPriority, ProviderRegistry};
pub use schema::SchemaRegistry;
pub use selector::{Selector, pattern_matches};
