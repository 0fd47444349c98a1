//! Wrapper configuration.
//!
//! Compiled-in defaults match the stock Slack RPM layout (`/usr/bin/slack`
//! symlinked to `/usr/lib/slack/slack`); an optional
//! `~/.config/slackfix/config.toml` overrides individual fields.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

const CONFIG_FILENAME: &str = "config.toml";
const CONFIG_DIR: &str = "slackfix";

fn default_launcher() -> PathBuf {
    PathBuf::from("/usr/bin/slack")
}

fn default_replacement() -> PathBuf {
    PathBuf::from("/usr/lib/slack/slack")
}

fn default_replacement_args() -> Vec<String> {
    vec!["--enable-crashpad".to_string()]
}

fn default_scheme() -> String {
    "slack".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Executable launched and supervised, invoked with no arguments.
    #[serde(default = "default_launcher")]
    pub launcher: PathBuf,
    /// Executable re-launched once with the corrected URI.
    #[serde(default = "default_replacement")]
    pub replacement: PathBuf,
    /// Fixed flags passed to the replacement ahead of the URI.
    #[serde(default = "default_replacement_args")]
    pub replacement_args: Vec<String>,
    /// URI scheme watched for in the launcher's output.
    #[serde(default = "default_scheme")]
    pub scheme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            launcher: default_launcher(),
            replacement: default_replacement(),
            replacement_args: default_replacement_args(),
            scheme: default_scheme(),
        }
    }
}

impl Config {
    /// Load the config file from the user config directory. Returns the
    /// default config if no file exists; a file that cannot be read or
    /// parsed is an error.
    pub fn load() -> Result<(Self, Option<PathBuf>)> {
        match dirs::config_dir() {
            Some(dir) => Self::load_path(&dir.join(CONFIG_DIR).join(CONFIG_FILENAME)),
            None => Ok((Self::default(), None)),
        }
    }

    fn load_path(path: &Path) -> Result<(Self, Option<PathBuf>)> {
        if !path.is_file() {
            return Ok((Self::default(), None));
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok((config, Some(path.to_path_buf())))
    }
}
