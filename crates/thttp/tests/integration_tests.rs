use assert_cmd::Command;
use predicates::prelude::*;

/// Test CLI help output
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("thttp").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--serve"))
        .stdout(predicate::str::contains("--put"));
}

/// Test CLI version output
#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("thttp").unwrap();
    cmd.arg("--version").assert().success();
}

/// Nothing to fetch, serve or put prints usage and fails
#[test]
fn test_no_operation_fails_with_usage() {
    let mut cmd = Command::cargo_bin("thttp").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

/// A serve directory that does not exist is rejected before binding
#[test]
fn test_missing_serve_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("missing");

    let mut cmd = Command::cargo_bin("thttp").unwrap();
    cmd.arg("--serve")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot serve"));
}

/// Fetching from a closed port reports the URL and fails
#[test]
fn test_fetch_connection_refused() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let url = format!("http://127.0.0.1:{}/file.txt", port);
    let mut cmd = Command::cargo_bin("thttp").unwrap();
    cmd.arg(&url)
        .assert()
        .failure()
        .stderr(predicate::str::contains(url.as_str()));
}

/// Uploading to a closed port fails after reading stdin
#[test]
fn test_put_connection_refused() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let mut cmd = Command::cargo_bin("thttp").unwrap();
    cmd.arg("--put")
        .arg(format!("http://127.0.0.1:{}/upload", port))
        .write_stdin("payload")
        .assert()
        .failure();
}
