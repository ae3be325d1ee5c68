//! Integration tests for the retrieval session state machine.
//!
//! Exercises: validation failures, URL construction, reset from every phase,
//! invariants under random event sequences, surface failure, dismiss/reopen.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vaultplay_core::{Event, Phase, RetrievalError, Session, StreamEndpoint, SurfaceCommand};

const VALIDATION_MSG: &str = "Please enter both UID and Transaction ID";
const PLAYBACK_MSG: &str = "Failed to load video. Please check your UID and Transaction ID.";

fn with_ids(uid: &str, tid: &str) -> Session {
    let mut s = Session::default();
    s.dispatch(Event::EditUid(uid.to_owned()));
    s.dispatch(Event::EditTid(tid.to_owned()));
    s
}

fn ready(uid: &str, tid: &str) -> Session {
    let mut s = with_ids(uid, tid);
    s.dispatch(Event::Trigger);
    assert_eq!(s.phase(), Phase::Ready);
    s
}

fn playing(uid: &str, tid: &str) -> Session {
    let mut s = ready(uid, tid);
    s.dispatch(Event::SurfaceStarted);
    assert_eq!(s.phase(), Phase::Playing);
    s
}

fn errored() -> Session {
    let mut s = Session::default();
    s.dispatch(Event::Trigger);
    assert_eq!(s.phase(), Phase::Errored);
    s
}

#[test]
fn blank_identifiers_fail_validation() {
    let cases = [
        ("", ""),
        ("u1", ""),
        ("", "t1"),
        ("   ", "t1"),
        ("u1", "\t\n "),
        (" ", " "),
    ];
    for (uid, tid) in cases {
        let mut s = with_ids(uid, tid);
        let step = s.dispatch(Event::Trigger);
        assert_eq!(s.phase(), Phase::Errored, "uid={uid:?} tid={tid:?}");
        assert_eq!(s.error_message(), VALIDATION_MSG);
        assert_eq!(s.error(), Some(RetrievalError::Validation));
        assert_eq!(s.stream_request_url_str(), "");
        assert!(!s.surface_visible());
        assert_eq!(step.command, None, "no request may be issued");
        assert_eq!(step.phases, vec![Phase::Errored]);
    }
}

#[test]
fn trigger_builds_request_url() {
    let mut s = with_ids("u1", "t1");
    let step = s.dispatch(Event::Trigger);
    assert_eq!(step.phases, vec![Phase::Loading, Phase::Ready]);
    assert_eq!(s.phase(), Phase::Ready);
    assert_eq!(
        s.stream_request_url_str(),
        "http://localhost:8000/video/stream?uid=u1&tid=t1"
    );
    assert!(s.surface_visible());
    assert_eq!(s.error_message(), "");
    assert_eq!(
        step.command,
        Some(SurfaceCommand::Load(s.stream_request_url().unwrap().clone()))
    );
}

#[test]
fn trigger_percent_encodes_identifiers() {
    let mut s = with_ids("a b", "t&1");
    s.dispatch(Event::Trigger);
    assert_eq!(
        s.stream_request_url_str(),
        "http://localhost:8000/video/stream?uid=a%20b&tid=t%261"
    );
}

#[test]
fn untrimmed_values_are_encoded_as_typed() {
    let mut s = with_ids(" u1", "t1 ");
    s.dispatch(Event::Trigger);
    assert_eq!(
        s.stream_request_url_str(),
        "http://localhost:8000/video/stream?uid=%20u1&tid=t1%20"
    );
}

#[test]
fn trigger_uses_configured_endpoint() {
    let ep = StreamEndpoint::parse("https://vault.example.org/media/").unwrap();
    let mut s = Session::new(ep);
    s.dispatch(Event::EditUid("u".into()));
    s.dispatch(Event::EditTid("t".into()));
    s.dispatch(Event::Trigger);
    assert_eq!(
        s.stream_request_url_str(),
        "https://vault.example.org/media/video/stream?uid=u&tid=t"
    );
}

#[test]
fn reset_from_every_phase_yields_initial_value() {
    let mut dismissed = playing("u1", "t1");
    dismissed.dispatch(Event::Dismiss);
    let starts = [
        Session::default(),
        with_ids("u1", "t1"),
        ready("u1", "t1"),
        playing("u1", "t1"),
        dismissed,
        errored(),
    ];
    for mut s in starts {
        s.dispatch(Event::Reset);
        assert_eq!(s, Session::default());
        assert_eq!(s.uid(), "");
        assert_eq!(s.tid(), "");
        assert_eq!(s.stream_request_url_str(), "");
        assert_eq!(s.error_message(), "");
        assert!(!s.surface_visible());
        assert_eq!(s.phase(), Phase::Idle);

        s.dispatch(Event::Reset);
        assert_eq!(s, Session::default(), "reset is idempotent");
    }
}

fn random_event(rng: &mut StdRng) -> Event {
    const IDS: [&str; 5] = ["", "  ", "u1", "a b", "t/1?"];
    match rng.gen_range(0..10) {
        0 => Event::EditUid(IDS[rng.gen_range(0..IDS.len())].to_owned()),
        1 => Event::EditTid(IDS[rng.gen_range(0..IDS.len())].to_owned()),
        2 | 3 => Event::Trigger,
        4 => Event::SurfaceFailed,
        5 => Event::Dismiss,
        6 => Event::Reopen,
        7 => Event::SurfaceStarted,
        8 => Event::SurfaceFinished,
        _ => Event::Reset,
    }
}

#[test]
fn invariants_hold_under_random_event_sequences() {
    let mut finished_playbacks = 0;
    for seed in 0..200u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut s = Session::default();
        for i in 0..60 {
            let before = s.clone();
            let event = random_event(&mut rng);
            let step = s.dispatch(event.clone());

            if let Err(broken) = s.check_invariants() {
                panic!("seed {seed} step {i}: {event:?} broke `{broken}`: {s:?}");
            }
            assert_eq!(
                !s.stream_request_url_str().is_empty(),
                matches!(s.phase(), Phase::Ready | Phase::Playing)
            );
            assert_eq!(!s.error_message().is_empty(), s.phase() == Phase::Errored);
            assert!(!s.surface_visible() || !s.stream_request_url_str().is_empty());
            assert_ne!(s.phase(), Phase::Loading, "Loading never outlives a dispatch");

            if !before.inputs_editable() && !matches!(event, Event::Reset | Event::SurfaceFailed) {
                assert_eq!(s.uid(), before.uid());
                assert_eq!(s.tid(), before.tid());
            }
            if !step.accepted {
                assert_eq!(s, before, "rejected events must not mutate");
            }
            if event == Event::SurfaceFinished && step.accepted {
                assert_eq!(before.phase(), Phase::Playing);
                assert_eq!(s.phase(), Phase::Ready);
                assert_eq!(s.stream_request_url(), before.stream_request_url());
                assert_eq!(s.surface_visible(), before.surface_visible());
                finished_playbacks += 1;
            }
        }
    }
    assert!(finished_playbacks > 0, "Playing -> Ready was never exercised");
}

#[test]
fn surface_failure_from_ready_regardless_of_visibility() {
    for dismiss_first in [false, true] {
        let mut s = ready("u1", "t1");
        if dismiss_first {
            s.dispatch(Event::Dismiss);
            assert!(!s.surface_visible());
        }
        let step = s.dispatch(Event::SurfaceFailed);
        assert_eq!(s.phase(), Phase::Errored);
        assert_eq!(s.error_message(), PLAYBACK_MSG);
        assert_eq!(s.stream_request_url_str(), "");
        assert!(!s.surface_visible());
        assert!(!s.loaded_successfully());
        assert_eq!(step.command, Some(SurfaceCommand::Stop));
        assert_eq!(s.uid(), "u1", "identifiers survive for a retry");
    }
}

#[test]
fn surface_failure_while_playing() {
    let mut s = playing("u1", "t1");
    s.dispatch(Event::SurfaceFailed);
    assert_eq!(s.phase(), Phase::Errored);
    assert_eq!(s.error(), Some(RetrievalError::Playback));
}

#[test]
fn dismiss_and_reopen_keep_the_stream() {
    let mut s = playing("u1", "t1");
    let url = s.stream_request_url().cloned();

    let step = s.dispatch(Event::Dismiss);
    assert_eq!(step.command, Some(SurfaceCommand::Pause));
    assert!(!s.surface_visible());
    assert_eq!(s.stream_request_url().cloned(), url);
    assert_eq!(s.phase(), Phase::Playing);
    assert_eq!((s.uid(), s.tid()), ("u1", "t1"));

    let step = s.dispatch(Event::Reopen);
    assert_eq!(step.command, Some(SurfaceCommand::Resume), "no Load: url is not recomputed");
    assert!(s.surface_visible());
    assert_eq!(s.stream_request_url().cloned(), url);
    assert_eq!(s.phase(), Phase::Playing);
}

#[test]
fn reopen_without_stream_is_rejected() {
    let mut s = Session::default();
    assert!(!s.dispatch(Event::Reopen).accepted);
    assert!(!s.surface_visible());
}

#[test]
fn session_is_reusable_after_error() {
    let mut s = ready("bad", "id");
    s.dispatch(Event::SurfaceFailed);
    s.dispatch(Event::EditUid("good".into()));
    s.dispatch(Event::Trigger);
    assert_eq!(s.phase(), Phase::Ready);
    assert_eq!(
        s.stream_request_url_str(),
        "http://localhost:8000/video/stream?uid=good&tid=id"
    );
}
