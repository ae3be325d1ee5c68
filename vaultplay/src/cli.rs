//! Command-line arguments.
//!
//! Flags override the config file and environment (see `vaultplay_core::settings`).

use std::path::PathBuf;

use clap::Parser;
use vaultplay_core::Settings;

#[derive(Debug, Parser)]
#[command(name = "vaultplay", version, about = "Terminal client for the secure video streaming service")]
pub struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/vaultplay/config.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Streaming backend base URL.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Player command that receives the stream URL as its last argument.
    #[arg(long, value_name = "COMMAND")]
    pub player: Option<String>,

    /// Do not launch a player.
    #[arg(long)]
    pub headless: bool,

    /// Check the stream with a GET of its own before launching the player.
    #[arg(long)]
    pub probe: bool,

    /// Prefill the user identifier.
    #[arg(long)]
    pub uid: Option<String>,

    /// Prefill the transaction identifier.
    #[arg(long)]
    pub tid: Option<String>,

    /// Print the stream request URL for --uid/--tid and exit.
    #[arg(long)]
    pub print_url: bool,
}

impl Cli {
    /// Applies the flag overrides on top of `settings`.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(url) = &self.base_url {
            settings.base_url = url.clone();
        }
        if let Some(player) = &self.player {
            settings.player.command = player.clone();
        }
        if self.headless {
            settings.headless = true;
        }
        if self.probe {
            settings.probe = true;
        }
    }
}
