//! Integration tests for the `tremote` binary.
//!
//! Only failure paths are exercised here: they end before the terminal is
//! taken over, so they run fine without a tty.

use std::fs;
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Get the path to the built `tremote` binary.
fn tremote_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tremote"))
}

fn run(args: &[&str], home: &TempDir) -> Output {
    Command::new(tremote_bin())
        .args(args)
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .output()
        .unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// A local port nothing listens on.
fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[test]
fn unreachable_daemon_exits_with_error() {
    let home = TempDir::new().unwrap();
    let target = format!("127.0.0.1:{}", closed_port());
    let output = run(&[&target], &home);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.starts_with("error: "), "{err}");
    assert!(err.contains(&target), "{err}");
}

#[test]
fn invalid_target_is_rejected() {
    let home = TempDir::new().unwrap();
    let output = run(&["nas:notaport"], &home);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid daemon address 'nas:notaport'"));
}

#[test]
fn missing_config_file_is_reported() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("absent.toml");
    let output = run(&["-c", missing.to_str().unwrap()], &home);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("absent.toml"));
}

#[test]
fn config_file_supplies_daemon_address() {
    let home = TempDir::new().unwrap();
    let port = closed_port();
    let dir = home.path().join(".config").join("tremote");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("config.toml"),
        format!("[daemon]\nhost = \"127.0.0.1\"\nport = {}\n", port),
    )
    .unwrap();

    let output = run(&[], &home);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(&format!("127.0.0.1:{}", port)));
}

#[test]
fn log_file_records_the_failure() {
    let home = TempDir::new().unwrap();
    let log = home.path().join("tremote.log");
    let target = format!("127.0.0.1:{}", closed_port());
    let output = run(&[&target, "--log-file", log.to_str().unwrap()], &home);

    assert_eq!(output.status.code(), Some(1));
    let text = fs::read_to_string(&log).unwrap();
    assert!(text.contains("starting"), "{text}");
}
