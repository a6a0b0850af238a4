//! Settings module
//!
//! Async key-value persistence for the access token and the auto-prompt
//! flag. The `SettingsStore` trait is the port the pipeline is written
//! against; `FileSettingsStore` is the bundled JSON-file implementation.

pub mod file;
pub mod store;

pub use file::FileSettingsStore;
pub use store::{SettingsStore, AUTO_PROMPT_KEY, TOKEN_KEY};
