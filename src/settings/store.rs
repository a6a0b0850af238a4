//! The settings port the pipeline reads and writes through

/// Settings key holding the personal access token
pub const TOKEN_KEY: &str = "access_token";

/// Settings key holding the auto-prompt opt-out flag
///
/// Stored as `"true"`/`"false"`. Absent (or anything other than
/// `"false"`) means the credential prompt may open automatically; only
/// `"false"` is ever written, on prompt dismissal.
pub const AUTO_PROMPT_KEY: &str = "auto_prompt";

/// Async key-value persistence for user settings
///
/// Backed by the browser's extension storage in a real host; the crate
/// bundles a JSON-file implementation. Per-key writes are atomic; there
/// is no cross-key transaction.
#[allow(async_fn_in_trait)]
pub trait SettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>, String>;

    async fn set(&self, key: &str, value: &str) -> Result<(), String>;
}

impl<T: SettingsStore> SettingsStore for &T {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), String> {
        (**self).set(key, value).await
    }
}
