//! Playback surface for vaultplay.
//!
//! The surface is the terminal stand-in for a media element: a background
//! `std::thread` that owns the external player process for its lifetime. The
//! main loop talks to it through `SurfaceRequest`s on a crossbeam channel and
//! hears back through `AppEvent::Surface` on the event bus. The session never
//! sees transport details; a failure is only ever the opaque `Failed` signal.
pub mod types;
pub mod worker;
