//! Runtime settings for vaultplay.
//!
//! Settings come from `$XDG_CONFIG_HOME/vaultplay/config.toml` (falling back to
//! `~/.config/vaultplay/config.toml`), then environment overrides, then CLI
//! flags applied by the binary. Every key has a default, so a missing file is
//! not an error.
//!
//! ```toml
//! base_url = "http://localhost:8000"
//! theme = "catppuccin-mocha"
//! probe = false
//! probe_timeout_secs = 10
//! log_file = "vaultplay.log"
//! headless = false
//!
//! [player]
//! command = "mpv"
//! args = ["--force-window=yes", "--no-terminal"]
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::request::{StreamEndpoint, DEFAULT_BASE_URL};

/// Overrides `base_url`.
pub const ENV_BASE_URL: &str = "VAULTPLAY_BASE_URL";
/// Overrides `player.command`.
pub const ENV_PLAYER: &str = "VAULTPLAY_PLAYER";

/// External player launched by the playback surface.
///
/// The request URL is appended as the final argument.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            command: "mpv".to_owned(),
            args: vec!["--force-window=yes".to_owned(), "--no-terminal".to_owned()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Streaming backend base URL; `/video/stream` is appended to it.
    pub base_url: String,
    /// Theme name, `"catppuccin-mocha"` or `"dark"`.
    pub theme: String,
    /// Check the stream with a GET of its own before launching the player.
    /// Off by default: it doubles the backend's work for every load.
    pub probe: bool,
    /// Connect timeout for that check. The response itself is never timed.
    pub probe_timeout_secs: u64,
    /// Log file name inside the state directory, or an absolute path.
    pub log_file: String,
    /// Never launch a player; the surface only probes.
    pub headless: bool,
    pub player: PlayerSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            theme: "catppuccin-mocha".to_owned(),
            probe: false,
            probe_timeout_secs: 10,
            log_file: "vaultplay.log".to_owned(),
            headless: false,
            player: PlayerSettings::default(),
        }
    }
}

impl Settings {
    /// Parses settings from TOML text. `origin` is only used in errors.
    pub fn from_toml_str(raw: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Loads settings from `path`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] for I/O failures other than not-found, and
    /// [`ConfigError::Parse`] for malformed TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml_str(&raw, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Applies environment overrides through `lookup`, normally
    /// `|k| std::env::var(k).ok()`. Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = v;
        }
        if let Some(v) = lookup(ENV_PLAYER).filter(|v| !v.trim().is_empty()) {
            self.player.command = v;
        }
    }

    /// Validates `base_url` into a [`StreamEndpoint`].
    pub fn endpoint(&self) -> Result<StreamEndpoint, ConfigError> {
        StreamEndpoint::parse(&self.base_url)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs.max(1))
    }

    /// Resolves `log_file` against `state_dir` unless it is absolute.
    pub fn log_path(&self, state_dir: &Path) -> PathBuf {
        let p = Path::new(&self.log_file);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            state_dir.join(p)
        }
    }
}

/// `$XDG_CONFIG_HOME/vaultplay/config.toml`, else `~/.config/vaultplay/config.toml`.
pub fn default_config_path() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config").join("config.toml")
}

/// `$XDG_STATE_HOME/vaultplay`, else `~/.local/state/vaultplay`.
pub fn default_state_dir() -> PathBuf {
    xdg_dir("XDG_STATE_HOME", ".local/state")
}

fn xdg_dir(var: &str, home_fallback: &str) -> PathBuf {
    let base = std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(home_fallback))
        })
        .unwrap_or_else(|| PathBuf::from(home_fallback));
    base.join("vaultplay")
}
