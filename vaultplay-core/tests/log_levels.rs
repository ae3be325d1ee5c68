//! Integration test for what the session writes to the log at `info`.

use std::io::Write;
use std::sync::{Arc, Mutex};

use tracing::Level;
use vaultplay_core::{Event, Session};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn log_at(level: Level, run: impl FnOnce()) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, run);
    let bytes = captured.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

fn load_then_fail(session: &mut Session) {
    session.dispatch(Event::EditUid("uid-7f3a".into()));
    session.dispatch(Event::EditTid("tid-c91e".into()));
    session.dispatch(Event::Trigger);
    session.dispatch(Event::SurfaceFailed);
    session.dispatch(Event::Reset);
}

#[test]
fn identifiers_stay_out_of_info_logs() {
    let mut session = Session::default();
    let out = log_at(Level::INFO, || load_then_fail(&mut session));
    assert!(out.contains("stream request built"), "{out}");
    assert!(out.contains("playback surface reported failure"), "{out}");
    assert!(!out.contains("uid-7f3a"), "{out}");
    assert!(!out.contains("tid-c91e"), "{out}");
}

#[test]
fn request_target_is_available_at_debug() {
    let mut session = Session::default();
    let out = log_at(Level::DEBUG, || load_then_fail(&mut session));
    assert!(out.contains("uid=uid-7f3a&tid=tid-c91e"), "{out}");
}
