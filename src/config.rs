use crate::util::stepper::{DEFAULT_FILE_COUNT, DEFAULT_FILE_SIZE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// How often the TUI re-reads disk figures, in milliseconds
    pub refresh_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory the filler files are written to. Unset = data dir.
    pub working_dir: Option<PathBuf>,
    /// Any path on the volume to report capacity for. Unset = home dir.
    pub volume_path: Option<PathBuf>,
    /// Share of the volume (percent) not counted as opportunistic capacity.
    pub opportunistic_reserve_pct: f64,
    /// Descend through symlinked directories when measuring eaten space.
    pub follow_symlinks: bool,
}

/// Starting values for the file count and size when no saved state exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub file_count:      usize,
    pub file_size_bytes: f64,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { refresh_interval_ms: 2000 }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            working_dir:               None,
            volume_path:               None,
            opportunistic_reserve_pct: 5.0,
            follow_symlinks:           false,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { file_count: DEFAULT_FILE_COUNT, file_size_bytes: DEFAULT_FILE_SIZE }
    }
}

// ── Resolved paths ────────────────────────────────────────────────────

impl StorageConfig {
    pub fn resolved_working_dir(&self) -> PathBuf {
        self.working_dir.clone()
            .or_else(|| dirs::data_local_dir().map(|p| p.join("spaceeater").join("filler")))
            .unwrap_or_else(|| PathBuf::from("spaceeater-filler"))
    }

    pub fn resolved_volume_path(&self) -> PathBuf {
        self.volume_path.clone()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("/"))
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };
        if !path.exists() {
            // Write defaults on first run (best-effort)
            if let Err(e) = write_defaults(&path) {
                warn!(error = %e, "could not write default config");
            }
            return Config::default();
        }
        match Self::load_from(&path) {
            Ok(c)  => c,
            Err(e) => {
                warn!(error = %format!("{:#}", e), "ignoring unreadable config");
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let cfg: Config = toml::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(cfg)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("spaceeater").join("spaceeater.toml"))
    }
}

fn write_defaults(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# spaceeater configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("spaceeater.toml");
        fs::write(&path, "[storage]\nworking_dir = \"/srv/filler\"\nopportunistic_reserve_pct = 10.0\nfollow_symlinks = true\n")
            .expect("write");

        let cfg = Config::load_from(&path).expect("load");
        assert_eq!(cfg.storage.resolved_working_dir(), PathBuf::from("/srv/filler"));
        assert_eq!(cfg.storage.opportunistic_reserve_pct, 10.0);
        assert!(cfg.storage.follow_symlinks);
        assert_eq!(cfg.general.refresh_interval_ms, 2000);
        assert_eq!(cfg.defaults.file_count, 1);
        assert_eq!(cfg.defaults.file_size_bytes, 100_000_000.0);
    }

    #[test]
    fn section_with_only_working_dir_keeps_it() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("spaceeater.toml");
        fs::write(&path, "[storage]\nworking_dir = \"/srv/filler\"\n\n[defaults]\nfile_count = 4\n")
            .expect("write");

        let cfg = Config::load_from(&path).expect("load");
        assert_eq!(cfg.storage.resolved_working_dir(), PathBuf::from("/srv/filler"));
        assert_eq!(cfg.storage.opportunistic_reserve_pct, 5.0);
        assert!(!cfg.storage.follow_symlinks);
        assert_eq!(cfg.defaults.file_count, 4);
        assert_eq!(cfg.defaults.file_size_bytes, DEFAULT_FILE_SIZE);
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("spaceeater.toml");
        write_defaults(&path).expect("write defaults");
        let cfg = Config::load_from(&path).expect("load");
        assert!(cfg.storage.working_dir.is_none());
        assert_eq!(cfg.defaults.file_count, DEFAULT_FILE_COUNT);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("bad.toml");
        fs::write(&path, "[general\nrefresh_interval_ms = ").expect("write");
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("parsing"));
    }
}
