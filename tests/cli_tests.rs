//! CLI integration tests against the built binary.

use std::path::Path;
use std::process::{Command, Output};

fn rival(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rival-server"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("PORT")
        .env_remove("HOST")
        .output()
        .expect("Failed to run rival-server")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    let output = rival(dir.path(), &["--help"]);

    assert!(output.status.success());
    let text = stdout(&output);
    for command in ["serve", "analyze", "config"] {
        assert!(text.contains(command), "help is missing '{}'", command);
    }
}

#[test]
fn test_version() {
    let dir = tempfile::tempdir().unwrap();
    let output = rival(dir.path(), &["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_config_without_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let output = rival(dir.path(), &["--no-color", "config"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("127.0.0.1:8000"));
    assert!(text.contains("llama-3.3-70b-versatile"));
    assert!(text.contains("Configuration is valid"));
}

#[test]
fn test_config_never_prints_secret_values() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_rival-server"))
        .current_dir(dir.path())
        .args(["--no-color", "config"])
        .env("GROQ_API_KEY", "gsk_super_secret_value")
        .output()
        .expect("Failed to run rival-server");

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(!text.contains("gsk_super_secret_value"));
    assert!(text.contains("GROQ_API_KEY: set"));
}

#[test]
fn test_config_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("custom.toml"),
        "[server]\nport = 9100\n\n[pipeline]\nretrieve_k = 4\n",
    )
    .unwrap();

    let output = rival(dir.path(), &["--no-color", "--config", "custom.toml", "config"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("127.0.0.1:9100"));
    assert!(text.contains("retrieve_k: 4"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("rival.toml"),
        "[rag]\nchunk_size = 100\nchunk_overlap = 200\n",
    )
    .unwrap();

    let output = rival(dir.path(), &["--no-color", "config", "--validate"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("chunk_overlap"));
}

#[test]
fn test_analyze_requires_topic() {
    let dir = tempfile::tempdir().unwrap();
    let output = rival(dir.path(), &["analyze"]);

    assert!(!output.status.success());
}
