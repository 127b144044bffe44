//! End-to-end tests for the `zrunner` binary.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// `zrunner` running in `dir`, isolated from the user's config and env.
fn zrunner(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("zrunner");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("ZRUNNER_API_KEY")
        .env_remove("ZRUNNER_PAT")
        .env_remove("RUST_LOG")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy");
    cmd
}

fn init_project(dir: &Path, name: &str) {
    zrunner(dir).args(["init", name]).assert().success();
}

/// Answer one request with `status` and `body`; the request head is sent back.
fn stub_server(status: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut head = String::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if line == "\r\n" || line.is_empty() {
                break;
            }
            head.push_str(&line.to_ascii_lowercase());
        }
        let length = head
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .map(|v| v.trim().parse::<usize>().unwrap())
            .unwrap_or(0);
        let mut buf = vec![0u8; length];
        reader.read_exact(&mut buf).unwrap();

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();
        tx.send(head).unwrap();
    });

    (format!("http://{addr}/api/v1/zrunner/pipeline"), rx)
}

// ── help / completions ────────────────────────────────────────────────────────

#[test]
fn help_lists_commands() {
    let temp = TempDir::new().unwrap();
    zrunner(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("pipeline"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    zrunner(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn completions_for_bash() {
    let temp = TempDir::new().unwrap();
    zrunner(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zrunner"));
}

// ── init / pipeline ───────────────────────────────────────────────────────────

#[test]
fn init_creates_project_tree() {
    let temp = TempDir::new().unwrap();
    zrunner(temp.path())
        .args(["init", "demo_project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project.yml"))
        .stdout(predicate::str::contains("Project created"));

    let root = temp.path().join("demo_project");
    for file in [
        "project.yml",
        "go.mod",
        "example-pipeline/pipeline.yml",
        "example-pipeline/block_handlers.go",
        "example-pipeline/event_handlers.go",
    ] {
        assert!(root.join(file).is_file(), "{file} missing");
    }
    let manifest = std::fs::read_to_string(root.join("project.yml")).unwrap();
    assert!(manifest.contains("demo_project"));
}

#[test]
fn init_alias_without_dir_uses_cwd() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("here");
    std::fs::create_dir(&project).unwrap();

    zrunner(&project).arg("create").assert().success();

    assert!(project.join("project.yml").is_file());
}

#[test]
fn init_with_json_output_lists_files() {
    let temp = TempDir::new().unwrap();
    zrunner(temp.path())
        .args(["--output-format", "json", "init", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("["))
        .stdout(predicate::str::contains("go.mod"))
        .stdout(predicate::str::contains("Project created").not());
}

#[test]
fn pipeline_create_adds_folder() {
    let temp = TempDir::new().unwrap();
    init_project(temp.path(), "demo");

    zrunner(temp.path())
        .args(["pipeline", "create", "transfers", "--dir", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pipeline 'transfers' created"));

    let pipeline = temp.path().join("demo/transfers/pipeline.yml");
    let text = std::fs::read_to_string(pipeline).unwrap();
    assert!(text.contains("transfers"));
}

#[test]
fn invalid_pipeline_name_is_user_error() {
    let temp = TempDir::new().unwrap();
    zrunner(temp.path())
        .args(["pipeline", "create", "bad name!"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid pipeline name"));

    assert!(!temp.path().join("bad name!").exists());
}

// ── deploy ────────────────────────────────────────────────────────────────────

#[test]
fn dry_run_prints_redacted_payload() {
    let temp = TempDir::new().unwrap();
    init_project(temp.path(), "demo_project");

    zrunner(temp.path())
        .args([
            "deploy",
            "--dry-run",
            "--api-key",
            "secret-key",
            "--path",
            "demo_project",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"project\": \"demo_project\""))
        .stdout(predicate::str::contains("\"zsource_version\": \"0.1.0\""))
        .stdout(predicate::str::contains("\"api_key\": \"***\""))
        .stdout(predicate::str::contains("secret-key").not());
}

#[test]
fn deploy_reads_api_key_from_env() {
    let temp = TempDir::new().unwrap();
    init_project(temp.path(), "demo");

    zrunner(temp.path())
        .env("ZRUNNER_API_KEY", "from-env")
        .args(["deploy", "--dry-run", "--path", "demo"])
        .assert()
        .success();
}

#[test]
fn deploy_without_api_key_is_usage_error() {
    let temp = TempDir::new().unwrap();
    zrunner(temp.path())
        .args(["deploy", "--dry-run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--api-key"));
}

#[test]
fn deploy_without_project_is_not_found() {
    let temp = TempDir::new().unwrap();
    zrunner(temp.path())
        .args(["deploy", "--api-key", "k"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No project.yml found"));
}

#[test]
fn deploy_with_mismatched_folder_is_user_error() {
    let temp = TempDir::new().unwrap();
    init_project(temp.path(), "before");
    std::fs::rename(temp.path().join("before"), temp.path().join("after")).unwrap();

    zrunner(temp.path())
        .args(["deploy", "--dry-run", "--api-key", "k"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn deploy_submits_to_endpoint() {
    let temp = TempDir::new().unwrap();
    init_project(temp.path(), "demo");
    let (endpoint, requests) = stub_server("200 OK", "ok");

    zrunner(temp.path())
        .args([
            "deploy",
            "--path",
            "demo",
            "--api-key",
            "live-key",
            "--endpoint",
            &endpoint,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("submitted for deployment"));

    let head = requests.recv().unwrap();
    assert!(head.starts_with("post /api/v1/zrunner/pipeline"));
    assert!(head.contains("x-api-key: live-key"));
}

#[test]
fn rejected_deploy_exits_with_remote_code() {
    let temp = TempDir::new().unwrap();
    init_project(temp.path(), "demo");
    let (endpoint, _requests) = stub_server("500 Internal Server Error", "bad request");

    zrunner(temp.path())
        .args([
            "deploy",
            "--path",
            "demo",
            "--api-key",
            "k",
            "--endpoint",
            &endpoint,
        ])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("bad request"));
}

// ── config ────────────────────────────────────────────────────────────────────

#[test]
fn config_init_then_get() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("zrunner.toml");
    let file_arg = file.to_str().unwrap();

    zrunner(temp.path())
        .args(["--config", file_arg, "config", "init"])
        .assert()
        .success();
    assert!(file.is_file());

    zrunner(temp.path())
        .args(["--config", file_arg, "config", "get", "deploy.timeout_secs"])
        .assert()
        .success()
        .stdout(predicate::str::diff("30\n"));
}

#[test]
fn config_env_override_is_visible() {
    let temp = TempDir::new().unwrap();
    zrunner(temp.path())
        .env("ZRUNNER_DEPLOY__ENDPOINT", "http://override.invalid")
        .args(["config", "get", "deploy.endpoint"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://override.invalid"));
}

#[test]
fn missing_config_file_is_configuration_error() {
    let temp = TempDir::new().unwrap();
    zrunner(temp.path())
        .args(["--config", "absent.toml", "config", "list"])
        .assert()
        .code(4);
}

#[test]
fn zero_timeout_from_environment_is_configuration_error() {
    let temp = TempDir::new().unwrap();
    zrunner(temp.path())
        .env("ZRUNNER_DEPLOY__TIMEOUT_SECS", "0")
        .args(["config", "get", "deploy.timeout_secs"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("timeout_secs"));
}

#[test]
fn unknown_config_key_is_configuration_error() {
    let temp = TempDir::new().unwrap();
    zrunner(temp.path())
        .args(["config", "get", "nope.nothing"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}
