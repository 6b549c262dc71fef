pub mod types;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::DailyError;

pub use types::{Config, ConfigFile, Finder};

/// Overrides the dailies directory
pub const DIR_ENV: &str = "DAILY_DIR";
/// Points at an alternate config file
pub const CONFIG_ENV: &str = "DAILY_CONFIG";

const DEFAULT_DAILIES_DIR: &str = "~/.daily/dailies";

impl Config {
    /// Resolve the configuration once at startup.
    ///
    /// Priority: `DAILY_DIR` > config file > built-in default.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        let file = match &path {
            Some(path) if path.exists() => Some(ConfigFile::read(path)?),
            _ => None,
        };
        let env_dir = std::env::var(DIR_ENV).ok();

        let mut config = Self::resolve(file.as_ref(), env_dir.as_deref());
        config.source = path.filter(|_| file.is_some());

        debug!(
            dailies_dir = %config.dailies_dir.display(),
            skip_weekends = config.skip_weekends,
            finder = %config.finder,
            "configuration resolved"
        );
        Ok(config)
    }

    /// Merge the config file and environment without touching the filesystem
    pub fn resolve(file: Option<&ConfigFile>, env_dir: Option<&str>) -> Self {
        let file_dir = file.and_then(|f| f.dailies_dir.as_deref());
        let dir = env_dir
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .or(file_dir)
            .unwrap_or(DEFAULT_DAILIES_DIR);

        Self {
            dailies_dir: expand(dir),
            skip_weekends: file.and_then(|f| f.skip_weekends).unwrap_or(true),
            finder: file.and_then(|f| f.finder).unwrap_or_default(),
            source: None,
        }
    }

    /// `$DAILY_CONFIG`, else `~/.daily/config.toml`
    pub fn config_path() -> Option<PathBuf> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => Some(expand(&path)),
            _ => dirs::home_dir().map(|home| home.join(".daily/config.toml")),
        }
    }
}

impl ConfigFile {
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::parse(path, &content)
    }

    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            DailyError::Config {
                path: path.to_path_buf(),
                message: e.to_string().trim().to_string(),
            }
            .into()
        })
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path.trim()).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = Config::resolve(None, None);
        assert!(config.skip_weekends);
        assert_eq!(config.finder, Finder::Fzf);
        assert!(config.dailies_dir.ends_with(".daily/dailies"));
        assert!(!config.dailies_dir.to_string_lossy().contains('~'));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = ConfigFile {
            dailies_dir: Some("/srv/notes".to_string()),
            skip_weekends: Some(false),
            finder: Some(Finder::Skim),
        };
        let config = Config::resolve(Some(&file), None);
        assert_eq!(config.dailies_dir, PathBuf::from("/srv/notes"));
        assert!(!config.skip_weekends);
        assert_eq!(config.finder, Finder::Skim);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = ConfigFile {
            dailies_dir: Some("/srv/notes".to_string()),
            ..Default::default()
        };
        let config = Config::resolve(Some(&file), Some("/tmp/dailies"));
        assert_eq!(config.dailies_dir, PathBuf::from("/tmp/dailies"));
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let file = ConfigFile {
            dailies_dir: Some("/srv/notes".to_string()),
            ..Default::default()
        };
        let config = Config::resolve(Some(&file), Some("  "));
        assert_eq!(config.dailies_dir, PathBuf::from("/srv/notes"));
    }

    #[test]
    fn test_parse_config_file() {
        let content = "dailies_dir = \"~/notes\"\nskip_weekends = false\nfinder = \"skim\"\n";
        let file = ConfigFile::parse(Path::new("config.toml"), content).unwrap();
        assert_eq!(file.dailies_dir.as_deref(), Some("~/notes"));
        assert_eq!(file.skip_weekends, Some(false));
        assert_eq!(file.finder, Some(Finder::Skim));
    }

    #[test]
    fn test_malformed_config_is_config_error() {
        let err = ConfigFile::parse(Path::new("config.toml"), "skip_weekends = \"maybe\"")
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DailyError>(),
            Some(DailyError::Config { .. })
        ));
    }

    #[test]
    fn test_read_from_disk() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "skip_weekends = false\n").unwrap();

        let file = ConfigFile::read(&path).unwrap();
        let config = Config::resolve(Some(&file), None);
        assert!(!config.skip_weekends);
    }
}
