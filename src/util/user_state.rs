use crate::config::DefaultsConfig;
use crate::util::stepper::{MAX_FILE_COUNT, MIN_FILE_COUNT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The user's last chosen file count and size, persisted across sessions.
/// Stored at ~/.local/share/spaceeater/state.json.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserState {
    pub file_count: usize,

    pub file_size_bytes: f64,

    /// Name of the active color theme (e.g. "Dracula").  Empty = use default.
    #[serde(default)]
    pub theme_name: String,
}

impl UserState {
    pub fn from_defaults(d: &DefaultsConfig) -> Self {
        Self {
            file_count:      d.file_count.clamp(MIN_FILE_COUNT, MAX_FILE_COUNT),
            file_size_bytes: d.file_size_bytes,
            theme_name:      String::new(),
        }
    }

    fn path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("spaceeater").join("state.json"))
    }

    pub fn load(defaults: &DefaultsConfig) -> Self {
        match Self::path() {
            Some(p) => Self::load_from(&p, defaults),
            None    => Self::from_defaults(defaults),
        }
    }

    pub fn load_from(path: &Path, defaults: &DefaultsConfig) -> Self {
        std::fs::read_to_string(path).ok()
            .and_then(|s| serde_json::from_str::<Self>(&s).ok())
            .map(|mut s| {
                s.file_count = s.file_count.clamp(MIN_FILE_COUNT, MAX_FILE_COUNT);
                if !s.file_size_bytes.is_finite() || s.file_size_bytes < 0.0 {
                    s.file_size_bytes = defaults.file_size_bytes;
                }
                s
            })
            .unwrap_or_else(|| Self::from_defaults(defaults))
    }

    pub fn save(&self) {
        if let Some(path) = Self::path() {
            self.save_to(&path);
        }
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(self) {
            Ok(s) => {
                if let Err(e) = std::fs::write(path, s) {
                    debug!(path = %path.display(), error = %e, "could not save user state");
                }
            }
            Err(e) => debug!(error = %e, "could not serialize user state"),
        }
    }
}
