//! vaultplay: terminal client for the secure video streaming service.
//!
//! Entry point for the `vaultplay` binary. Wires together settings (`cli` +
//! `vaultplay-core`), file logging, the terminal lifecycle (`tui`), the unified
//! event bus (`event`), the playback surface worker (`surface`), and the UI.
//!
//! # Startup sequence
//!
//! 1. Parse flags, load settings, validate the streaming base URL. Errors here
//!    print to stderr; the terminal is still untouched.
//! 2. `--print-url` short-circuits: one trigger, print, exit.
//! 3. Start file logging and spawn the surface worker thread.
//! 4. `install_panic_hook()`, `register_shutdown_signals()`, `init_tui()`.
//! 5. Spawn the input/timer task and run the event loop.
//!
//! `restore_tui()` runs at the single exit point after the loop, whatever
//! ended it (quit key, shutdown signal, channel close, or a draw error).

mod app;
mod cli;
mod event;
mod logging;
mod surface;
mod theme;
mod tui;
mod ui;

use std::sync::atomic::Ordering;

use clap::Parser;
use vaultplay_core::settings::{default_config_path, default_state_dir};
use vaultplay_core::{Event, Session, Settings};

use crate::surface::types::SurfaceConfig;
use crate::ui::keybindings::{handle_key, KeyAction};

/// Builds settings from the config file, environment, and flags.
///
/// Config errors are soft failures: reported on stderr, defaults used.
fn load_settings(cli: &cli::Cli) -> Settings {
    let path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut settings = Settings::load(&path).unwrap_or_else(|e| {
        eprintln!("vaultplay: {e}; using defaults");
        Settings::default()
    });
    settings.apply_env(|k| std::env::var(k).ok());
    cli.apply(&mut settings);
    settings
}

/// Runs one trigger without a terminal and prints the request URL.
fn print_url(mut session: Session) -> std::io::Result<()> {
    session.dispatch(Event::Trigger);
    match session.stream_request_url() {
        Some(url) => {
            println!("{url}");
            Ok(())
        }
        None => {
            eprintln!("vaultplay: {}", session.error_message());
            std::process::exit(2);
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let cli = cli::Cli::parse();
    let settings = load_settings(&cli);
    let endpoint = settings
        .endpoint()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let mut session = Session::new(endpoint);
    if let Some(uid) = &cli.uid {
        session.dispatch(Event::EditUid(uid.clone()));
    }
    if let Some(tid) = &cli.tid {
        session.dispatch(Event::EditTid(tid.clone()));
    }
    if cli.print_url {
        return print_url(session);
    }

    let _log_guard = logging::init(&settings.log_path(&default_state_dir()))?;
    tracing::info!(base_url = %session.endpoint().base(), "vaultplay starting");
    let theme = theme::Theme::from_name(&settings.theme);

    let handler = event::EventHandler::new();
    let (surface_tx, surface_thread) =
        surface::worker::spawn_surface(SurfaceConfig::from(&settings), handler.tx.clone())?;
    let mut state = app::AppState::new(session).with_surface(surface_tx);

    tui::install_panic_hook();
    let shutdown = tui::register_shutdown_signals()?;
    let mut terminal = tui::init_tui()?;

    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;
    let mut draw_error = None;

    // Exits only via `break` so `restore_tui()` below is always reached.
    'event_loop: loop {
        tokio::select! {
            // Heartbeat: shutdown signals are noticed even when no events arrive.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if shutdown.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(event::AppEvent::Render) => {
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &state, &theme)) {
                            draw_error = Some(e);
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Key(key)) => {
                        if handle_key(key, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Tick) => state.tick(),
                    Some(event::AppEvent::Surface(signal)) => {
                        state.apply_surface_signal(signal);
                    }
                    // ratatui picks up the new size on the next draw.
                    Some(event::AppEvent::Resize(_, _)) => {}
                    Some(event::AppEvent::Quit) | None => break 'event_loop,
                }
                if shutdown.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    tui::restore_tui()?;

    // Dropping the state closes the request channel; the worker stops the
    // player and exits.
    drop(state);
    if surface_thread.join().is_err() {
        tracing::warn!("surface worker panicked");
    }
    tracing::info!("vaultplay exiting");

    match draw_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
