//! Background thread that owns the external player process for its lifetime.
//!
//! All communication is via channels: `SurfaceRequest` in over crossbeam,
//! `AppEvent::Surface` out over the tokio event bus. The thread polls the
//! running player and any pending probe between requests, so exits and probe
//! outcomes are reported within one `POLL_INTERVAL`.
//!
//! A probe runs on its own short-lived thread. It has no overall deadline: the
//! backend may decrypt the whole video before answering, and a slow answer must
//! not read as a failure. Requests arriving meanwhile are handled at once and
//! supersede the probe.

use std::process::{Child, Command, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};
use url::Url;

use crate::event::AppEvent;
use crate::surface::types::{SignalKind, SurfaceConfig, SurfaceError, SurfaceRequest, SurfaceSignal};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Spawns the surface worker thread and returns the request sender.
///
/// The thread exits (stopping any player) once every sender is dropped.
pub fn spawn_surface(
    config: SurfaceConfig,
    event_tx: UnboundedSender<AppEvent>,
) -> std::io::Result<(Sender<SurfaceRequest>, JoinHandle<()>)> {
    let (tx, rx) = crossbeam_channel::unbounded();
    let handle = std::thread::Builder::new()
        .name("vaultplay-surface".to_owned())
        .spawn(move || surface_worker_loop(config, rx, event_tx))?;
    Ok((tx, handle))
}

/// Entry point of the worker thread.
pub fn surface_worker_loop(
    config: SurfaceConfig,
    rx: Receiver<SurfaceRequest>,
    event_tx: UnboundedSender<AppEvent>,
) {
    let mut surface = Surface::new(config, event_tx);
    loop {
        match rx.recv_timeout(POLL_INTERVAL) {
            Ok(request) => surface.handle(request),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                surface.halt();
                return;
            }
        }
        surface.poll_probe();
        surface.poll_player();
    }
}

struct Running {
    ticket: u64,
    child: Child,
}

/// A probe in flight; dropping it discards the outcome.
struct PendingProbe {
    ticket: u64,
    url: Url,
    outcome: Receiver<Result<(), SurfaceError>>,
}

struct Surface {
    config: SurfaceConfig,
    event_tx: UnboundedSender<AppEvent>,
    /// Target of the current load, kept across `Pause` for `Resume`.
    current: Option<(u64, Url)>,
    probing: Option<PendingProbe>,
    running: Option<Running>,
}

impl Surface {
    fn new(config: SurfaceConfig, event_tx: UnboundedSender<AppEvent>) -> Self {
        Self { config, event_tx, current: None, probing: None, running: None }
    }

    fn handle(&mut self, request: SurfaceRequest) {
        debug!(?request, "surface request");
        match request {
            SurfaceRequest::Load { ticket, url } => {
                self.halt();
                self.current = Some((ticket, url.clone()));
                if self.config.probe {
                    self.start_probe(ticket, url);
                } else {
                    self.play(ticket, &url);
                }
            }
            SurfaceRequest::Pause => self.halt(),
            SurfaceRequest::Resume => {
                if self.running.is_none() && self.probing.is_none() {
                    if let Some((ticket, url)) = self.current.clone() {
                        self.play(ticket, &url);
                    }
                }
            }
            SurfaceRequest::Stop => {
                self.halt();
                self.current = None;
            }
        }
    }

    fn start_probe(&mut self, ticket: u64, url: Url) {
        let (tx, outcome) = crossbeam_channel::bounded(1);
        let target = url.clone();
        let connect_timeout = self.config.probe_timeout;
        let spawned = std::thread::Builder::new()
            .name("vaultplay-probe".to_owned())
            .spawn(move || {
                let _ = tx.send(probe(&target, connect_timeout));
            });
        match spawned {
            Ok(_) => {
                debug!(ticket, "stream probe started");
                self.probing = Some(PendingProbe { ticket, url, outcome });
            }
            Err(e) => {
                warn!(ticket, error = %e, "cannot start stream probe; launching player directly");
                self.play(ticket, &url);
            }
        }
    }

    /// Acts on a finished probe: launch on success, report `Failed` otherwise.
    fn poll_probe(&mut self) {
        let Some(pending) = self.probing.as_ref() else {
            return;
        };
        let result = match pending.outcome.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => None,
        };
        let Some(PendingProbe { ticket, url, .. }) = self.probing.take() else {
            return;
        };
        match result {
            Some(Ok(())) => self.play(ticket, &url),
            Some(Err(e)) => {
                warn!(ticket, error = %e, "stream probe failed");
                self.signal(ticket, SignalKind::Failed);
            }
            None => {
                warn!(ticket, "stream probe ended without an outcome");
                self.signal(ticket, SignalKind::Failed);
            }
        }
    }

    /// Launches the player (or, headless, just reports the start).
    fn play(&mut self, ticket: u64, url: &Url) {
        let Some(player) = self.config.player.as_ref() else {
            info!(ticket, "headless surface: stream accepted");
            self.signal(ticket, SignalKind::Started);
            return;
        };

        let spawned = Command::new(&player.command)
            .args(&player.args)
            .arg(url.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SurfaceError::Spawn {
                command: player.command.clone(),
                source,
            });

        match spawned {
            Ok(child) => {
                info!(ticket, pid = child.id(), command = %player.command, "player started");
                self.running = Some(Running { ticket, child });
                self.signal(ticket, SignalKind::Started);
            }
            Err(e) => {
                warn!(ticket, error = %e, "player launch failed");
                self.signal(ticket, SignalKind::Failed);
            }
        }
    }

    /// Reports a player that exited on its own.
    fn poll_player(&mut self) {
        let Some(running) = self.running.as_mut() else {
            return;
        };
        let status = match running.child.try_wait() {
            Ok(Some(status)) => status,
            Ok(None) => return,
            Err(e) => {
                warn!(error = %e, "cannot poll player");
                return;
            }
        };
        let ticket = running.ticket;
        self.running = None;
        if status.success() {
            info!(ticket, "player finished");
            self.signal(ticket, SignalKind::Finished);
        } else {
            warn!(ticket, error = %SurfaceError::Exit(status), "player failed");
            self.signal(ticket, SignalKind::Failed);
        }
    }

    /// Abandons any pending probe and kills the running player without
    /// reporting anything.
    fn halt(&mut self) {
        if let Some(pending) = self.probing.take() {
            debug!(ticket = pending.ticket, "pending stream probe abandoned");
        }
        if let Some(mut running) = self.running.take() {
            debug!(ticket = running.ticket, "stopping player");
            let _ = running.child.kill();
            let _ = running.child.wait();
        }
    }

    fn signal(&self, ticket: u64, kind: SignalKind) {
        let _ = self
            .event_tx
            .send(AppEvent::Surface(SurfaceSignal { ticket, kind }));
    }
}

/// GET against the request target, inspecting only the status line and
/// headers.
///
/// This is a second full request: the backend does its decryption work for it
/// just as it does for the player. Only connecting is time-limited; the
/// response itself may take as long as the backend needs.
fn probe(url: &Url, connect_timeout: Duration) -> Result<(), SurfaceError> {
    let client = reqwest::blocking::Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(None::<Duration>)
        .build()?;
    let response = client.get(url.as_str()).send()?;
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    check_probe(response.status(), content_type.as_deref())
}

/// Decides whether a probe response looks playable.
///
/// A missing content type is given the benefit of the doubt; the player has
/// the final word.
pub fn check_probe(status: StatusCode, content_type: Option<&str>) -> Result<(), SurfaceError> {
    if !status.is_success() {
        return Err(SurfaceError::Status(status));
    }
    match content_type {
        None => Ok(()),
        Some(ct) => {
            let essence = ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
            if essence.starts_with("video/") || essence == "application/octet-stream" {
                Ok(())
            } else {
                Err(SurfaceError::ContentType(ct.to_owned()))
            }
        }
    }
}
