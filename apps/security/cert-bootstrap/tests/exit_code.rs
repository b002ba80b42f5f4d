//! Process-level behavior of the `cert-bootstrap` binary.

use std::process::Command;
use std::time::{Duration, Instant};

#[test]
fn test_exhausted_retries_exit_non_zero() {
    let start = Instant::now();

    // nothing listens on port 1, so every attempt is refused
    let output = Command::new(env!("CARGO_BIN_EXE_cert-bootstrap"))
        .args([
            "--host",
            "127.0.0.1",
            "--port",
            "1",
            "--retry-attempts",
            "2",
            "--retry-delay-secs",
            "0",
        ])
        .env("CASSANDRA_CONNECT_TIMEOUT_SECS", "2")
        .env("RUST_LOG", "info")
        .env_remove("APP_ENV")
        .output()
        .expect("failed to spawn cert-bootstrap");

    assert_eq!(output.status.code(), Some(1));
    assert!(start.elapsed() < Duration::from_secs(30));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.matches("Attempting to connect to Cassandra").count(),
        2,
        "expected two connection attempts in:\n{stdout}"
    );
}

#[test]
fn test_invalid_flag_is_rejected() {
    let status = Command::new(env!("CARGO_BIN_EXE_cert-bootstrap"))
        .args(["--retry-attempts", "0"])
        .status()
        .expect("failed to spawn cert-bootstrap");

    assert!(!status.success());
}
