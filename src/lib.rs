//! Repository size overlay engine
//!
//! Resolves the on-disk size of the GitHub repository a page is showing
//! and injects it into the page's stats area, prompting for a personal
//! access token when the repository is private. The browser shell stays
//! external: it backs [`PageSurface`] with real DOM bindings and drives
//! [`NavigationHook`] from script load and client-side navigation
//! events. Settings go through [`SettingsStore`]; the bundled
//! [`FileSettingsStore`] covers hosts without storage of their own.

pub mod format;
pub mod github;
pub mod inject;
pub mod page;
pub mod settings;

pub use format::{human_size, HumanSize};
pub use github::api::SizeProvider;
pub use github::types::RepoSlug;
pub use inject::{InjectionController, NavigationHook};
pub use page::{PageSurface, StatContent, StatsAnchor};
pub use settings::{FileSettingsStore, SettingsStore};
