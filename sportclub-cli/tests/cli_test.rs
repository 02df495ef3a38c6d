use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn sportclub(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sportclub").unwrap();
    cmd.env("SPORTCLUB_HOME", home.path())
        .env_remove("SPORTCLUB_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn point_at(home: &TempDir, url: &str) {
    fs::write(
        home.path().join("config.toml"),
        format!("[api]\nbase_url = \"{}\"\ntimeout_seconds = 5\n", url),
    )
    .unwrap();
}

#[test]
fn test_help_command() {
    let home = TempDir::new().unwrap();
    sportclub(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Terminal client for the SportCenter club"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("diary"));
}

#[test]
fn test_version_command() {
    let home = TempDir::new().unwrap();
    sportclub(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_completions_command() {
    let home = TempDir::new().unwrap();
    sportclub(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_sportclub"));
}

#[test]
fn test_about_is_public() {
    let home = TempDir::new().unwrap();
    sportclub(&home)
        .arg("about")
        .assert()
        .success()
        .stdout(predicate::str::contains("About"));
}

#[test]
fn test_open_protected_page_anonymously_redirects() {
    let home = TempDir::new().unwrap();
    sportclub(&home)
        .args(["open", "/diary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("redirects to /login"))
        .stdout(predicate::str::contains("sportclub login"));
}

#[test]
fn test_protected_command_anonymously_shows_hint() {
    let home = TempDir::new().unwrap();
    sportclub(&home)
        .args(["diary", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Diary requires login"));
}

#[test]
fn test_status_reports_stored_session() {
    let home = TempDir::new().unwrap();
    sportclub(&home)
        .args(["status", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("anonymous"));

    fs::write(home.path().join("storage.json"), r#"{"token":"abc"}"#).unwrap();

    sportclub(&home)
        .args(["status", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("logged in"))
        .stdout(predicate::str::contains("/diary"));
}

#[test]
fn test_login_persists_credential_and_logout_clears_it() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/users/login")
        .with_status(200)
        .with_body(r#"{"token":"abc"}"#)
        .create();

    let home = TempDir::new().unwrap();
    point_at(&home, &server.url());

    sportclub(&home)
        .args(["login", "--username", "ivan", "--password", "x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in"));

    let stored = fs::read_to_string(home.path().join("storage.json")).unwrap();
    assert!(stored.contains("\"abc\""));

    sportclub(&home)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));

    let stored = fs::read_to_string(home.path().join("storage.json")).unwrap();
    assert!(!stored.contains("abc"));
}

#[test]
fn test_login_failure_exits_nonzero() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/users/login")
        .with_status(401)
        .with_body(r#"{"error":"Invalid credentials"}"#)
        .create();

    let home = TempDir::new().unwrap();
    point_at(&home, &server.url());

    sportclub(&home)
        .args(["login", "--username", "ivan", "--password", "bad"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid credentials"));

    assert!(!home.path().join("storage.json").exists());
}

#[test]
fn test_sections_join_conflict_exits_nonzero() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/sections/")
        .with_status(200)
        .with_body(r#"{"sections":[{"id":1,"name":"Boxing"}]}"#)
        .create();
    server
        .mock("POST", "/sections/join")
        .match_header("authorization", "Bearer abc")
        .with_status(409)
        .with_body(r#"{"error":"already joined"}"#)
        .create();

    let home = TempDir::new().unwrap();
    point_at(&home, &server.url());
    fs::write(home.path().join("storage.json"), r#"{"token":"abc"}"#).unwrap();

    sportclub(&home)
        .args(["sections", "join", "1"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("already joined"));
}

#[test]
fn test_diary_add_parses_description() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/training/")
        .with_status(200)
        .with_body(r#"{"trainings":[]}"#)
        .create();
    server
        .mock("GET", "/sections/")
        .with_status(200)
        .with_body(r#"{"sections":[{"id":3,"name":"Swimming"}]}"#)
        .create();
    let post = server
        .mock("POST", "/training/")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "section_id": 3,
            "duration": 45,
            "intensity": 7
        })))
        .with_status(201)
        .with_body(r#"{"message":"Training added"}"#)
        .create();

    let home = TempDir::new().unwrap();
    point_at(&home, &server.url());
    fs::write(home.path().join("storage.json"), r#"{"token":"abc"}"#).unwrap();

    sportclub(&home)
        .args(["diary", "add", "swimming 45 min, intensity 7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Training saved"));

    post.assert();
}

#[test]
fn test_config_init_writes_defaults() {
    let home = TempDir::new().unwrap();
    sportclub(&home)
        .args(["config", "init"])
        .assert()
        .success();

    let written = fs::read_to_string(home.path().join("config.toml")).unwrap();
    assert!(written.contains("base_url"));

    sportclub(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
