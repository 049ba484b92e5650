// Configuration Storage Service
// Handles config file read/write and version backup

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::services::error::ConfigError;

const BACKUPS_KEPT: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            analysis: AnalysisConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Limits enforced at the boundary. Detector constants are not configurable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisConfig {
    #[serde(default = "default_max_text_bytes")]
    pub max_text_bytes: usize,
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    #[serde(default = "default_true")]
    pub apply_behavior: bool,
    #[serde(default = "default_batch_parallel")]
    pub batch_parallel: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_text_bytes: default_max_text_bytes(),
            max_file_bytes: default_max_file_bytes(),
            apply_behavior: true,
            batch_parallel: default_batch_parallel(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_true")]
    pub file_log: bool,
    /// Log directory override; the platform data dir is used otherwise.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_keep_logs")]
    pub keep_logs: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file_log: true,
            dir: None,
            keep_logs: default_keep_logs(),
        }
    }
}

fn default_version() -> String { env!("CARGO_PKG_VERSION").to_string() }
fn default_true() -> bool { true }
fn default_max_text_bytes() -> usize { 10 * 1024 * 1024 }
fn default_max_file_bytes() -> u64 { 50 * 1024 * 1024 }
fn default_batch_parallel() -> usize { 4 }
fn default_level() -> String { "info".to_string() }
fn default_keep_logs() -> usize { 30 }

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self { config_dir, config_file }
    }

    /// Get default config directory
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ai-detector"))
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Ensure config directory exists
    pub fn ensure_dir(&self) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.config_dir).map_err(ConfigError::io("create config dir"))
    }

    /// Load configuration from file; a missing file yields the defaults.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.config_file.exists() {
            debug!(path = %self.config_file.display(), "config.missing_using_defaults");
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_file).map_err(ConfigError::io("read config"))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to file
    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        self.ensure_dir()?;

        // Create backup if file exists
        if self.config_file.exists() {
            self.create_backup()?;
        }

        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_file, content).map_err(ConfigError::io("write config"))?;
        info!(path = %self.config_file.display(), "config.saved");
        Ok(())
    }

    fn backup_dir(&self) -> PathBuf {
        self.config_dir.join("backups")
    }

    /// Create a backup of current config
    fn create_backup(&self) -> Result<(), ConfigError> {
        let backup_dir = self.backup_dir();
        fs::create_dir_all(&backup_dir).map_err(ConfigError::io("create backup dir"))?;

        // Sub-second precision keeps rapid successive saves from colliding.
        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S_%6f");
        let backup_file = backup_dir.join(format!("config_{}.json", timestamp));

        fs::copy(&self.config_file, &backup_file).map_err(ConfigError::io("create backup"))?;

        self.cleanup_old_backups(&backup_dir, BACKUPS_KEPT)
    }

    /// Remove old backups, keeping only the most recent N
    fn cleanup_old_backups(&self, backup_dir: &Path, keep: usize) -> Result<(), ConfigError> {
        let mut entries: Vec<_> = fs::read_dir(backup_dir)
            .map_err(ConfigError::io("read backup dir"))?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
            .collect();

        if entries.len() <= keep {
            return Ok(());
        }

        // Timestamped names sort chronologically; mtime granularity is too coarse.
        entries.sort_by_key(|e| e.file_name());

        let remove_count = entries.len() - keep;
        for entry in entries.iter().take(remove_count) {
            let _ = fs::remove_file(entry.path());
        }
        debug!(removed = remove_count, "config.backups_pruned");

        Ok(())
    }

    /// Backup files currently on disk, oldest first.
    pub fn backups(&self) -> Result<Vec<PathBuf>, ConfigError> {
        let backup_dir = self.backup_dir();
        if !backup_dir.exists() {
            return Ok(Vec::new());
        }
        let mut paths: Vec<PathBuf> = fs::read_dir(&backup_dir)
            .map_err(ConfigError::io("read backup dir"))?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.analysis.max_file_bytes, 50 * 1024 * 1024);
        assert_eq!(config.analysis.batch_parallel, 4);
        assert!(config.analysis.apply_behavior);
        assert_eq!(config.logging.keep_logs, 30);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: AppConfig =
            serde_json::from_str(r#"{"version":"0.9.0","analysis":{"batchParallel":8}}"#).unwrap();
        assert_eq!(parsed.version, "0.9.0");
        assert_eq!(parsed.analysis.batch_parallel, 8);
        assert_eq!(parsed.analysis.max_text_bytes, 10 * 1024 * 1024);
        assert_eq!(parsed.logging.level, "info");
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("nested"));
        assert_eq!(store.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().to_path_buf());

        let mut config = AppConfig::default();
        config.analysis.apply_behavior = false;
        config.logging.dir = Some(PathBuf::from("/var/log/ai-detector"));
        store.save(&config).unwrap();

        assert_eq!(store.load().unwrap(), config);
        assert!(store.backups().unwrap().is_empty());
    }

    #[test]
    fn test_keeps_ten_backups() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().to_path_buf());

        let mut config = AppConfig::default();
        for i in 0..14 {
            config.analysis.batch_parallel = i + 1;
            store.save(&config).unwrap();
        }
        assert_eq!(store.backups().unwrap().len(), BACKUPS_KEPT);
        assert_eq!(store.load().unwrap().analysis.batch_parallel, 14);
    }

    #[test]
    fn test_corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().to_path_buf());
        store.ensure_dir().unwrap();
        fs::write(store.config_file(), "{ not json").unwrap();
        assert!(matches!(store.load(), Err(ConfigError::Parse(_))));
    }
}
