//! Terminal lifecycle for vaultplay.
//!
//! The TUI draws on stderr, leaving stdout to `--print-url`. Entering and
//! leaving the alternate screen is tracked in [`ENTERED`], so [`restore_tui`]
//! is safe to call from the panic hook, the normal exit path, or both.
//!
//! Shutdown signals only raise a flag. The event loop polls it and leaves
//! through the same exit path as the quit key, which also stops the external
//! player.

use std::io::{stderr, BufWriter, Stderr};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

/// Terminal drawing to buffered stderr.
pub type Tui = Terminal<CrosstermBackend<BufWriter<Stderr>>>;

/// Set while raw mode and the alternate screen are active.
static ENTERED: AtomicBool = AtomicBool::new(false);

/// Window title while the TUI is up.
const TITLE: &str = "vaultplay";

/// Enters raw mode and the alternate screen.
///
/// # Errors
///
/// Returns `Err` if raw mode or the screen switch fails; whatever was already
/// switched is undone first.
pub fn init_tui() -> std::io::Result<Tui> {
    enable_raw_mode()?;
    ENTERED.store(true, Ordering::SeqCst);
    let mut out = BufWriter::new(stderr());
    if let Err(e) = execute!(out, EnterAlternateScreen, SetTitle(TITLE)) {
        let _ = restore_tui();
        return Err(e);
    }
    Terminal::new(CrosstermBackend::new(out))
}

/// Leaves the alternate screen and raw mode. A no-op unless [`init_tui`]
/// succeeded and nothing restored the terminal since.
pub fn restore_tui() -> std::io::Result<()> {
    if !ENTERED.swap(false, Ordering::SeqCst) {
        return Ok(());
    }
    disable_raw_mode()?;
    execute!(stderr(), LeaveAlternateScreen)?;
    Ok(())
}

/// Chains a terminal restore in front of the current panic hook.
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_tui();
        previous(info);
    }));
}

/// Registers SIGTERM, plus SIGHUP and SIGINT on Unix, onto one flag.
///
/// SIGHUP arrives when the hosting terminal goes away; the player must be
/// stopped then as well.
pub fn register_shutdown_signals() -> std::io::Result<Arc<AtomicBool>> {
    use signal_hook::consts::SIGTERM;
    use signal_hook::flag::register;

    let shutdown = Arc::new(AtomicBool::new(false));
    register(SIGTERM, Arc::clone(&shutdown))?;
    #[cfg(unix)]
    {
        use signal_hook::consts::{SIGHUP, SIGINT};
        register(SIGHUP, Arc::clone(&shutdown))?;
        register(SIGINT, Arc::clone(&shutdown))?;
    }
    Ok(shutdown)
}
