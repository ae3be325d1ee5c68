//! Messages and errors exchanged with the playback surface worker.
//!
//! Everything here is owned and `Send` so it can cross from the worker thread
//! to the main loop.

use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;
use url::Url;
use vaultplay_core::{PlayerSettings, Settings};

/// Commands sent from the main loop to the surface worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceRequest {
    /// Stop whatever is playing and start on `url`. `ticket` tags every
    /// signal produced for this load.
    Load { ticket: u64, url: Url },
    /// Halt playback, remember the target.
    Pause,
    /// Restart playback on the remembered target.
    Resume,
    /// Halt playback and forget the target.
    Stop,
}

/// What the surface observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// Playback began.
    Started,
    /// The player exited cleanly at the end of the stream.
    Finished,
    /// The stream could not be fetched or played.
    Failed,
}

/// A signal from the worker, tagged with the load it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSignal {
    pub ticket: u64,
    pub kind: SignalKind,
}

/// How the worker plays streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceConfig {
    /// `None` runs headless: nothing is launched.
    pub player: Option<PlayerSettings>,
    /// Check the stream with a GET before launching.
    pub probe: bool,
    /// Connect timeout of that check; the response wait is unbounded.
    pub probe_timeout: Duration,
}

impl From<&Settings> for SurfaceConfig {
    fn from(s: &Settings) -> Self {
        Self {
            player: (!s.headless).then(|| s.player.clone()),
            probe: s.probe,
            probe_timeout: s.probe_timeout(),
        }
    }
}

/// Reasons the worker turns into a `Failed` signal. Logged, never shown.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("probe request failed: {0}")]
    Probe(#[from] reqwest::Error),
    #[error("backend answered {0}")]
    Status(reqwest::StatusCode),
    #[error("backend sent non-playable content type {0:?}")]
    ContentType(String),
    #[error("cannot launch player {command:?}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("player exited with {0}")]
    Exit(ExitStatus),
}
