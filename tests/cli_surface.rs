use std::path::{Path, PathBuf};
use std::process::{Command, Output};

mod common;

struct CliEnv {
    _dir: tempfile::TempDir,
    workdir: PathBuf,
    config: PathBuf,
}

fn cli_env() -> CliEnv {
    let dir = tempfile::tempdir().unwrap();
    let workdir = dir.path().join("project");
    // A marker directory pins the workspace key for the whole test.
    std::fs::create_dir_all(workdir.join(".git")).unwrap();
    let config = dir.path().join("config.json");
    CliEnv {
        workdir,
        config,
        _dir: dir,
    }
}

fn binspect(server: &common::ServerGuard, env: &CliEnv, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_binspect"))
        .args(args)
        .env("BINSPECT_CONFIG", &env.config)
        .env("BINSPECT_URL", &server.base_url)
        .current_dir(&env.workdir)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn public_id_from_config(server: &common::ServerGuard, config: &Path) -> String {
    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(config).unwrap()).unwrap();
    let id = doc["activeBinId"].as_str().unwrap().to_string();
    let client = reqwest::blocking::Client::new();
    let bin: serde_json::Value = client
        .get(format!("{}/bins/{}", server.base_url, id))
        .bearer_auth(common::API_KEY)
        .send()
        .unwrap()
        .json()
        .unwrap();
    bin["publicId"].as_str().unwrap().to_string()
}

#[test]
fn init_show_and_diff_round_trip() {
    let server = common::spawn_server().unwrap();
    let env = cli_env();

    let out = binspect(&server, &env, &["login", "--api-key", common::API_KEY]);
    assert!(out.status.success(), "{}", stderr(&out));

    let out = binspect(&server, &env, &["init", "orders"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("Created bin orders"));

    let out = binspect(&server, &env, &["bin"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("orders"));

    let out = binspect(&server, &env, &["requests"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("No requests yet"));

    let public_id = public_id_from_config(&server, &env.config);
    common::capture(&server, &public_id, "/ping", "pong").unwrap();

    let out = binspect(&server, &env, &["requests"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("/ping"));

    // Not a terminal, but an explicit ref works.
    let out = binspect(&server, &env, &["show", "1"]);
    assert!(out.status.success(), "{}", stderr(&out));
    let shown = stdout(&out);
    assert!(shown.contains("path: /ping"));
    assert!(shown.contains("pong"));

    // Missing ref without a terminal is a hard failure.
    let out = binspect(&server, &env, &["show"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("no request specified"));

    let out = binspect(&server, &env, &["diff", "1", "1"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("No material differences"));
}

#[test]
fn stale_stored_bin_is_cleared_and_reported() {
    let server = common::spawn_server().unwrap();
    let env = cli_env();

    binspect(&server, &env, &["login", "--api-key", common::API_KEY]);
    let out = binspect(&server, &env, &["init", "ephemeral"]);
    assert!(out.status.success(), "{}", stderr(&out));

    // Delete the bin behind the CLI's back.
    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&env.config).unwrap()).unwrap();
    let id = doc["activeBinId"].as_str().unwrap();
    let client = reqwest::blocking::Client::new();
    let resp = client
        .delete(format!("{}/bins/{}", server.base_url, id))
        .bearer_auth(common::API_KEY)
        .send()
        .unwrap();
    assert!(resp.status().is_success());

    let out = binspect(&server, &env, &["bin"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("no longer exists"));

    // The stored selection was cleared as a side effect.
    let out = binspect(&server, &env, &["bin"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("no active bin"));
}

#[test]
fn export_and_config_surface() {
    let server = common::spawn_server().unwrap();
    let env = cli_env();

    binspect(&server, &env, &["login", "--api-key", common::API_KEY]);
    let out = binspect(&server, &env, &["init", "exports"]);
    assert!(out.status.success(), "{}", stderr(&out));

    let public_id = public_id_from_config(&server, &env.config);
    common::capture(&server, &public_id, "/data", "x=1").unwrap();

    let out = binspect(&server, &env, &["export", "--format", "curl"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("curl -X POST"));

    let out = binspect(&server, &env, &["export", "--format", "yaml"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("unknown export format"));

    let out = binspect(&server, &env, &["config", "show"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains(&server.base_url));

    let out = binspect(&server, &env, &["whoami"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("dev@localhost"));
}
