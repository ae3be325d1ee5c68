//! The retrieval session controller.
//!
//! [`Session`] is the single owned value holding all retrieval state. It is
//! only ever mutated through [`Session::dispatch`], one [`Event`] at a time,
//! and every event runs to completion before the next one is looked at. The
//! controller never performs I/O: side effects on the playback surface are
//! returned as a [`SurfaceCommand`] inside the [`Step`] for the runtime to
//! forward.
//!
//! Invariants, held after every `dispatch`:
//!
//! - a stream request URL exists iff the phase is `Ready` or `Playing`;
//! - an error exists iff the phase is `Errored`;
//! - `uid`/`tid` only change while the phase is `Idle` or `Errored`;
//! - a visible surface implies a stream request URL.

use tracing::{debug, info, warn};
use url::Url;

use crate::error::RetrievalError;
use crate::request::StreamEndpoint;

/// Discrete state of the retrieval/playback lifecycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Nothing requested yet, or just reset.
    #[default]
    Idle,
    /// The request target is being computed. Only visible inside a trigger.
    Loading,
    /// A request URL exists and was handed to the surface.
    Ready,
    /// The surface reported that playback started.
    Playing,
    /// The last attempt failed; see [`Session::error`].
    Errored,
}

impl Phase {
    /// Whether the identifier fields (and the trigger) accept operator input.
    pub fn accepts_input(self) -> bool {
        matches!(self, Phase::Idle | Phase::Errored)
    }

    /// Whether a stream request URL is live in this phase.
    pub fn has_stream(self) -> bool {
        matches!(self, Phase::Ready | Phase::Playing)
    }

    /// Upper-case label used by the status bar and logs.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "IDLE",
            Phase::Loading => "LOADING",
            Phase::Ready => "READY",
            Phase::Playing => "PLAYING",
            Phase::Errored => "ERROR",
        }
    }
}

/// Everything that can happen to a session.
///
/// Operator actions and playback-surface signals share this one type so the
/// runtime can feed them through a single dispatch point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Replace the user identifier text.
    EditUid(String),
    /// Replace the transaction identifier text.
    EditTid(String),
    /// "Load & Play".
    Trigger,
    /// The surface began rendering the stream.
    SurfaceStarted,
    /// The surface played the stream to the end.
    SurfaceFinished,
    /// The surface could not fetch or decode the stream. No status code or
    /// body is carried.
    SurfaceFailed,
    /// Hide the surface and pause playback, keeping the loaded stream.
    Dismiss,
    /// Show the surface again for the already loaded stream.
    Reopen,
    /// Start over from the initial value.
    Reset,
}

/// Instruction for the playback surface produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCommand {
    /// (Re)initialise the surface on this request target.
    Load(Url),
    /// Halt playback but keep the target for a later `Resume`.
    Pause,
    /// Resume on the remembered target without recomputing it.
    Resume,
    /// Halt playback and forget the target.
    Stop,
}

/// Outcome of one [`Session::dispatch`] call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Step {
    /// Whether the event changed anything. Rejected events leave the session
    /// untouched.
    pub accepted: bool,
    /// Phases entered while handling the event, in order.
    pub phases: Vec<Phase>,
    /// Side effect for the playback surface, if any.
    pub command: Option<SurfaceCommand>,
}

impl Step {
    fn rejected() -> Self {
        Self::default()
    }

    fn accepted() -> Self {
        Self { accepted: true, ..Self::default() }
    }
}

/// The single long-lived retrieval session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    endpoint: StreamEndpoint,
    uid: String,
    tid: String,
    stream_request_url: Option<Url>,
    phase: Phase,
    error: Option<RetrievalError>,
    surface_visible: bool,
    loaded_successfully: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(StreamEndpoint::default())
    }
}

impl Session {
    /// Creates the initial session value for `endpoint`: empty identifiers,
    /// `Idle`, no stream, surface hidden.
    pub fn new(endpoint: StreamEndpoint) -> Self {
        Self {
            endpoint,
            uid: String::new(),
            tid: String::new(),
            stream_request_url: None,
            phase: Phase::Idle,
            error: None,
            surface_visible: false,
            loaded_successfully: false,
        }
    }

    pub fn endpoint(&self) -> &StreamEndpoint {
        &self.endpoint
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn tid(&self) -> &str {
        &self.tid
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The live request target, if any.
    pub fn stream_request_url(&self) -> Option<&Url> {
        self.stream_request_url.as_ref()
    }

    /// The live request target as text; empty when there is none.
    pub fn stream_request_url_str(&self) -> &str {
        self.stream_request_url.as_ref().map_or("", Url::as_str)
    }

    pub fn error(&self) -> Option<RetrievalError> {
        self.error
    }

    /// The operator-facing error text; empty unless the phase is `Errored`.
    pub fn error_message(&self) -> String {
        self.error.map(|e| e.to_string()).unwrap_or_default()
    }

    pub fn surface_visible(&self) -> bool {
        self.surface_visible
    }

    /// True after a successful trigger until the next error or reset.
    pub fn loaded_successfully(&self) -> bool {
        self.loaded_successfully
    }

    /// Whether `EditUid`/`EditTid` would currently be accepted.
    pub fn inputs_editable(&self) -> bool {
        self.phase.accepts_input()
    }

    /// Applies one event and returns what happened.
    ///
    /// Never fails: validation and playback errors are recorded on the
    /// session itself.
    pub fn dispatch(&mut self, event: Event) -> Step {
        let step = match event {
            Event::EditUid(text) => self.edit(Field::Uid, text),
            Event::EditTid(text) => self.edit(Field::Tid, text),
            Event::Trigger => self.trigger(),
            Event::SurfaceStarted => self.surface_started(),
            Event::SurfaceFinished => self.surface_finished(),
            Event::SurfaceFailed => self.surface_failed(),
            Event::Dismiss => self.dismiss(),
            Event::Reopen => self.reopen(),
            Event::Reset => self.reset(),
        };
        debug_assert!(self.check_invariants().is_ok(), "{:?}", self.check_invariants());
        step
    }

    /// Verifies the session invariants, naming the first one that is broken.
    pub fn check_invariants(&self) -> Result<(), &'static str> {
        if self.stream_request_url.is_some() != self.phase.has_stream() {
            return Err("stream request url present iff phase is Ready or Playing");
        }
        if self.error.is_some() != (self.phase == Phase::Errored) {
            return Err("error present iff phase is Errored");
        }
        if self.surface_visible && self.stream_request_url.is_none() {
            return Err("visible surface requires a stream request url");
        }
        Ok(())
    }

    fn enter(&mut self, phase: Phase, step: &mut Step) {
        debug!(from = self.phase.label(), to = phase.label(), "phase change");
        self.phase = phase;
        step.phases.push(phase);
    }

    fn edit(&mut self, field: Field, text: String) -> Step {
        if !self.phase.accepts_input() {
            debug!(?field, phase = self.phase.label(), "edit rejected: inputs are read-only");
            return Step::rejected();
        }
        match field {
            Field::Uid => self.uid = text,
            Field::Tid => self.tid = text,
        }
        Step::accepted()
    }

    fn trigger(&mut self) -> Step {
        if !self.phase.accepts_input() {
            debug!(phase = self.phase.label(), "trigger rejected: retrieval already active");
            return Step::rejected();
        }

        let mut step = Step::accepted();
        if self.uid.trim().is_empty() || self.tid.trim().is_empty() {
            info!("trigger failed validation");
            self.fail(RetrievalError::Validation, &mut step);
            return step;
        }

        self.enter(Phase::Loading, &mut step);
        let url = self.endpoint.request_url(&self.uid, &self.tid);
        // The identifiers may be the whole credential; keep them below `info`.
        info!("stream request built");
        debug!(url = %url, "stream request target");

        self.stream_request_url = Some(url.clone());
        self.error = None;
        self.surface_visible = true;
        self.loaded_successfully = true;
        self.enter(Phase::Ready, &mut step);
        step.command = Some(SurfaceCommand::Load(url));
        step
    }

    fn surface_started(&mut self) -> Step {
        if self.phase != Phase::Ready {
            return Step::rejected();
        }
        let mut step = Step::accepted();
        self.enter(Phase::Playing, &mut step);
        step
    }

    fn surface_finished(&mut self) -> Step {
        if self.phase != Phase::Playing {
            return Step::rejected();
        }
        let mut step = Step::accepted();
        self.enter(Phase::Ready, &mut step);
        step
    }

    fn surface_failed(&mut self) -> Step {
        if !self.phase.has_stream() {
            debug!(phase = self.phase.label(), "stale surface failure ignored");
            return Step::rejected();
        }
        warn!(phase = self.phase.label(), "playback surface reported failure");
        let mut step = Step::accepted();
        self.fail(RetrievalError::Playback, &mut step);
        step.command = Some(SurfaceCommand::Stop);
        step
    }

    fn dismiss(&mut self) -> Step {
        if !self.surface_visible {
            return Step::rejected();
        }
        self.surface_visible = false;
        Step {
            accepted: true,
            phases: Vec::new(),
            command: Some(SurfaceCommand::Pause),
        }
    }

    fn reopen(&mut self) -> Step {
        if self.surface_visible || self.stream_request_url.is_none() {
            return Step::rejected();
        }
        self.surface_visible = true;
        Step {
            accepted: true,
            phases: Vec::new(),
            command: Some(SurfaceCommand::Resume),
        }
    }

    fn reset(&mut self) -> Step {
        let had_stream = self.stream_request_url.is_some();
        info!(phase = self.phase.label(), "session reset");
        *self = Session::new(self.endpoint.clone());
        Step {
            accepted: true,
            phases: vec![Phase::Idle],
            command: had_stream.then_some(SurfaceCommand::Stop),
        }
    }

    fn fail(&mut self, error: RetrievalError, step: &mut Step) {
        self.stream_request_url = None;
        self.surface_visible = false;
        self.loaded_successfully = false;
        self.error = Some(error);
        self.enter(Phase::Errored, step);
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Uid,
    Tid,
}
