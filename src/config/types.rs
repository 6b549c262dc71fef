use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Contents of `~/.daily/config.toml`. Every key is optional.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dailies_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_weekends: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finder: Option<Finder>,
}

/// Which fuzzy finder drives `daily search`
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Finder {
    /// External `fzf` binary
    #[default]
    Fzf,
    /// Embedded skim finder
    Skim,
}

impl fmt::Display for Finder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finder::Fzf => write!(f, "fzf"),
            Finder::Skim => write!(f, "skim"),
        }
    }
}

/// Resolved settings for one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub dailies_dir: PathBuf,
    pub skip_weekends: bool,
    pub finder: Finder,
    /// Config file that was read, if any
    pub source: Option<PathBuf>,
}
