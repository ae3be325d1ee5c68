//! Retrieval-and-playback core for vaultplay.
//!
//! Everything in this crate is UI-free: the [`session::Session`] state machine,
//! the streaming request contract in [`request`], the error taxonomy, and the
//! [`settings::Settings`] loader. The `vaultplay` binary wraps these in a
//! terminal front end and an external player process.

pub mod error;
pub mod request;
pub mod session;
pub mod settings;

pub use error::{ConfigError, RetrievalError};
pub use request::StreamEndpoint;
pub use session::{Event, Phase, Session, Step, SurfaceCommand};
pub use settings::{PlayerSettings, Settings};
