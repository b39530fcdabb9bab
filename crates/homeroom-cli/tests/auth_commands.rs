//! Integration tests for the headless auth commands.
//!
//! Each test runs the real binary against a wiremock backend, with
//! HOMEROOM_HOME pointed at a temp dir so session files are isolated.


use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use fixtures::{can_bind_localhost, login_ok_json, temp_home, user_json};
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{bearer_token, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_login_persists_session_across_invocations() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": "head@brookfield.test",
            "password": "Brookfield!1",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(login_ok_json("tok-af9b2c11223344")),
        )
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("homeroom")
        .env("HOMEROOM_HOME", home.path())
        .env("HOMEROOM_API_URL", server.uri())
        .args(["login", "--email", "head@brookfield.test"])
        .write_stdin("Brookfield!1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as Dana Reed"))
        .stdout(predicate::str::contains("tok-af9b2c11..."));

    assert!(home.path().join("session.json").exists());

    // The stored token survives into a fresh process: whoami revalidates it.
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(bearer_token("tok-af9b2c11223344"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": user_json() })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("homeroom")
        .env("HOMEROOM_HOME", home.path())
        .env("HOMEROOM_API_URL", server.uri())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dana Reed"))
        .stdout(predicate::str::contains("Administrator"));
}

#[tokio::test]
async fn test_login_wrong_password_shows_remaining_attempts() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Invalid credentials",
            "attemptsRemaining": 2,
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("homeroom")
        .env("HOMEROOM_HOME", home.path())
        .env("HOMEROOM_API_URL", server.uri())
        .args(["login", "--email", "a@b.com"])
        .write_stdin("bad\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 attempts remaining"));

    assert!(!home.path().join("session.json").exists());
}

#[tokio::test]
async fn test_login_locked_account_reports_wait() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(423).set_body_json(json!({
            "accountLocked": true,
            "remainingTime": 90,
            "message": "Account temporarily locked.",
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("homeroom")
        .env("HOMEROOM_HOME", home.path())
        .env("HOMEROOM_API_URL", server.uri())
        .args(["login", "--email", "head@brookfield.test"])
        .write_stdin("Brookfield!1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Account temporarily locked."))
        .stderr(predicate::str::contains("Try again in 90s"));
}

#[test]
fn test_logout_works_offline() {
    let home = temp_home();
    fs::write(
        home.path().join("session.json"),
        r#"{"token":"tok-stale"}"#,
    )
    .unwrap();

    // Nothing listens on this address; logout must not care.
    cargo_bin_cmd!("homeroom")
        .env("HOMEROOM_HOME", home.path())
        .env("HOMEROOM_API_URL", "http://127.0.0.1:9")
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out."));

    assert!(!home.path().join("session.json").exists());

    cargo_bin_cmd!("homeroom")
        .env("HOMEROOM_HOME", home.path())
        .env("HOMEROOM_API_URL", "http://127.0.0.1:9")
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("No session to clear."));
}

#[tokio::test]
async fn test_whoami_clears_rejected_token() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;

    fs::write(
        home.path().join("session.json"),
        r#"{"token":"tok-expired"}"#,
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("homeroom")
        .env("HOMEROOM_HOME", home.path())
        .env("HOMEROOM_API_URL", server.uri())
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in."));

    // The rejected token is gone; the next check never leaves the machine.
    assert!(!home.path().join("session.json").exists());

    cargo_bin_cmd!("homeroom")
        .env("HOMEROOM_HOME", home.path())
        .env("HOMEROOM_API_URL", "http://127.0.0.1:9")
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in."));
}

#[tokio::test]
async fn test_forgot_password_request() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/forgot-password"))
        .and(body_json(json!({ "email": "head@brookfield.test" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("homeroom")
        .env("HOMEROOM_HOME", home.path())
        .env("HOMEROOM_API_URL", server.uri())
        .args(["forgot-password", "--email", "head@brookfield.test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reset link is on its way"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_session_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(login_ok_json("tok-af9b2c11223344")),
        )
        .mount(&server)
        .await;

    cargo_bin_cmd!("homeroom")
        .env("HOMEROOM_HOME", home.path())
        .env("HOMEROOM_API_URL", server.uri())
        .args(["login", "--email", "head@brookfield.test"])
        .write_stdin("Brookfield!1\n")
        .assert()
        .success();

    let mode = fs::metadata(home.path().join("session.json"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}
