//! Error types shared by the core and the binary.

use std::path::PathBuf;

use thiserror::Error;

/// Why the current retrieval attempt failed.
///
/// The `Display` text is exactly what the operator sees. Both variants are
/// terminal for the attempt but not for the session: editing the identifiers
/// and triggering again is always allowed from `Phase::Errored`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RetrievalError {
    /// One or both identifiers were empty after trimming.
    #[error("Please enter both UID and Transaction ID")]
    Validation,
    /// The playback surface could not fetch or decode the stream.
    ///
    /// Auth rejection, decryption failure, network failure and malformed
    /// streams all collapse into this one variant.
    #[error("Failed to load video. Please check your UID and Transaction ID.")]
    Playback,
}

/// Failures while building [`crate::Settings`] or the streaming endpoint.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid streaming base url {url:?}: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("streaming base url {0:?} must use http or https")]
    Scheme(String),
}
