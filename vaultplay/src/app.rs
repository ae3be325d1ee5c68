//! Central application state for vaultplay.
//!
//! `AppState` wraps the retrieval [`Session`] together with the UI-only state
//! around it: which input has focus, whether the help overlay is up, the
//! spinner frame, and the load ticket that ties playback-surface signals to
//! the load that produced them. No ratatui rendering logic lives here; the
//! render module reads this state and the keybinding dispatcher mutates it.

use crossbeam_channel::Sender;
use tracing::debug;
use vaultplay_core::{Event, Session, Step, SurfaceCommand};

use crate::surface::types::{SignalKind, SurfaceRequest, SurfaceSignal};

/// Overlay mode controlling which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Form / player interaction (default).
    #[default]
    Normal,
    /// Full-screen help overlay is shown above everything else.
    HelpOverlay,
}

/// Which identifier field receives typed characters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    #[default]
    Uid,
    Tid,
}

impl InputField {
    /// The other field; there are only two.
    pub fn toggle(self) -> Self {
        match self {
            InputField::Uid => InputField::Tid,
            InputField::Tid => InputField::Uid,
        }
    }
}

/// All mutable state passed through every render cycle.
pub struct AppState {
    /// The retrieval session controller.
    pub session: Session,
    pub mode: Mode,
    pub focus: InputField,
    /// Vertical scroll offset for the help overlay.
    pub help_scroll: u16,
    /// Spinner frame index, advanced on every tick.
    pub spinner: usize,
    /// Ticket of the most recent `Load`; older surface signals are stale.
    pub load_ticket: u64,
    /// The player of the current load exited cleanly and has not been
    /// relaunched since.
    pub playback_finished: bool,
    /// Request channel to the playback surface worker. `None` in tests and
    /// in `--print-url` mode.
    pub surface_tx: Option<Sender<SurfaceRequest>>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            mode: Mode::default(),
            focus: InputField::default(),
            help_scroll: 0,
            spinner: 0,
            load_ticket: 0,
            playback_finished: false,
            surface_tx: None,
        }
    }

    /// Attaches the playback surface worker.
    pub fn with_surface(mut self, tx: Sender<SurfaceRequest>) -> Self {
        self.surface_tx = Some(tx);
        self
    }

    /// Feeds one event to the session and forwards the resulting surface
    /// command, if any, to the worker.
    pub fn dispatch(&mut self, event: Event) -> Step {
        let step = self.session.dispatch(event);
        if let Some(command) = step.command.clone() {
            self.forward(command);
        }
        step
    }

    /// Converts a surface signal into a session event, discarding signals
    /// from superseded loads.
    pub fn apply_surface_signal(&mut self, signal: SurfaceSignal) -> Option<Step> {
        if signal.ticket != self.load_ticket {
            debug!(ticket = signal.ticket, current = self.load_ticket, "stale surface signal dropped");
            return None;
        }
        let event = match signal.kind {
            SignalKind::Started => Event::SurfaceStarted,
            SignalKind::Finished => Event::SurfaceFinished,
            SignalKind::Failed => Event::SurfaceFailed,
        };
        let step = self.dispatch(event);
        if signal.kind == SignalKind::Finished && step.accepted {
            self.playback_finished = true;
        }
        Some(step)
    }

    /// Text of the focused field.
    pub fn focused_text(&self) -> &str {
        match self.focus {
            InputField::Uid => self.session.uid(),
            InputField::Tid => self.session.tid(),
        }
    }

    /// Replaces the focused field through the session, so the read-only rule
    /// is enforced in one place.
    pub fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) -> Step {
        let mut text = self.focused_text().to_owned();
        edit(&mut text);
        let event = match self.focus {
            InputField::Uid => Event::EditUid(text),
            InputField::Tid => Event::EditTid(text),
        };
        self.dispatch(event)
    }

    pub fn tick(&mut self) {
        self.spinner = self.spinner.wrapping_add(1);
    }

    fn forward(&mut self, command: SurfaceCommand) {
        let request = match command {
            SurfaceCommand::Load(url) => {
                self.load_ticket += 1;
                self.playback_finished = false;
                SurfaceRequest::Load { ticket: self.load_ticket, url }
            }
            SurfaceCommand::Pause => SurfaceRequest::Pause,
            SurfaceCommand::Resume => {
                self.playback_finished = false;
                SurfaceRequest::Resume
            }
            SurfaceCommand::Stop => {
                self.playback_finished = false;
                SurfaceRequest::Stop
            }
        };
        if let Some(ref tx) = self.surface_tx {
            let _ = tx.send(request);
        }
    }
}
