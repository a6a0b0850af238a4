use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use once_cell::sync::Lazy;

use super::store::SettingsStore;

/// Directory under the user config dir holding the settings file
const SETTINGS_DIR_NAME: &str = "repo-size";

/// Name of the settings file
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Global mutex to prevent concurrent read-modify-write races on
/// settings.json. The prompt handlers and the pipeline can touch the
/// store from overlapping invocations.
static SETTINGS_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// JSON-file-backed settings store
///
/// One flat string-to-string object in `{config_dir}/repo-size/settings.json`.
/// Reads and writes run on the blocking thread pool; writes are atomic
/// (temp file + rename).
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new() -> Result<Self, String> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| "Failed to get config directory".to_string())?;

        let settings_dir = config_dir.join(SETTINGS_DIR_NAME);
        std::fs::create_dir_all(&settings_dir)
            .map_err(|e| format!("Failed to create settings directory: {e}"))?;

        Ok(Self {
            path: settings_dir.join(SETTINGS_FILE_NAME),
        })
    }

    /// Store backed by an explicit file path
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the settings map from disk (missing file reads as empty)
    fn load(path: &Path) -> Result<HashMap<String, String>, String> {
        log::trace!("Loading settings from disk");

        if !path.exists() {
            log::trace!("Settings file not found, returning empty settings");
            return Ok(HashMap::new());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            log::error!("Failed to read settings file: {e}");
            format!("Failed to read settings file: {e}")
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            log::error!("Failed to parse settings JSON: {e}");
            format!("Failed to parse settings: {e}")
        })
    }

    /// Save the settings map to disk (atomic write: temp file + rename)
    fn save(path: &Path, settings: &HashMap<String, String>) -> Result<(), String> {
        log::trace!("Saving {} setting(s) to disk", settings.len());

        let json_content = serde_json::to_string_pretty(settings)
            .map_err(|e| format!("Failed to serialize settings: {e}"))?;

        let temp_path = path.with_extension("tmp");

        std::fs::write(&temp_path, json_content).map_err(|e| {
            log::error!("Failed to write settings file: {e}");
            format!("Failed to write settings file: {e}")
        })?;

        std::fs::rename(&temp_path, path).map_err(|e| {
            log::error!("Failed to finalize settings file: {e}");
            format!("Failed to finalize settings file: {e}")
        })?;

        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let path = self.path.clone();
        let key = key.to_string();

        tokio::task::spawn_blocking(move || {
            let _lock = SETTINGS_LOCK.lock().unwrap();
            Self::load(&path).map(|settings| settings.get(&key).cloned())
        })
        .await
        .map_err(|e| format!("Settings read task failed: {e}"))?
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let path = self.path.clone();
        let key = key.to_string();
        let value = value.to_string();

        tokio::task::spawn_blocking(move || {
            let _lock = SETTINGS_LOCK.lock().unwrap();
            let mut settings = Self::load(&path)?;
            settings.insert(key, value);
            Self::save(&path, &settings)
        })
        .await
        .map_err(|e| format!("Settings write task failed: {e}"))?
    }
}
