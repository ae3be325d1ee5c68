//! Integration test for loading settings from disk.

use std::io::Write;

use vaultplay_core::{ConfigError, Settings};

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let s = Settings::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(s, Settings::default());
}

#[test]
fn full_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
base_url = "https://vault.example.org"
theme = "dark"
probe = true
probe_timeout_secs = 3
headless = true

[player]
command = "ffplay"
args = ["-autoexit"]
"#
    )
    .unwrap();

    let s = Settings::load(file.path()).unwrap();
    assert_eq!(s.base_url, "https://vault.example.org");
    assert_eq!(s.theme, "dark");
    assert!(s.probe);
    assert!(s.headless);
    assert_eq!(s.player.command, "ffplay");
    assert_eq!(s.player.args, vec!["-autoexit".to_owned()]);
    assert_eq!(
        s.endpoint().unwrap().request_url("u", "t").as_str(),
        "https://vault.example.org/video/stream?uid=u&tid=t"
    );
}

#[test]
fn malformed_file_is_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "base_url = [").unwrap();
    assert!(matches!(
        Settings::load(file.path()),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn bad_base_url_is_reported_by_endpoint() {
    let s = Settings {
        base_url: "localhost:8000".to_owned(),
        ..Settings::default()
    };
    assert!(s.endpoint().is_err());
}
