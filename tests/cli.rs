use assert_cmd::Command;
use tempfile::tempdir;

use typingo::config::Config;
use typingo::mode::Mode;

#[test]
fn prints_version() {
    Command::cargo_bin("typingo")
        .unwrap()
        .arg("--version")
        .assert()
        .success();
}

#[test]
fn write_config_saves_flags() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    Command::cargo_bin("typingo")
        .unwrap()
        .args(["--config", path.to_str().unwrap()])
        .args(["--mode", "hard", "--words", "10", "--offline", "--write-config"])
        .assert()
        .success();

    let saved: Config = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(saved.mode, Mode::Hard);
    assert_eq!(saved.hard_words, 10);
    assert!(saved.offline);
}

#[test]
fn refuses_to_run_without_a_tty() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("typingo")
        .unwrap()
        .args(["--config", dir.path().join("c.json").to_str().unwrap()])
        .write_stdin("")
        .assert()
        .failure();
}

#[test]
fn rejects_unknown_mode() {
    Command::cargo_bin("typingo")
        .unwrap()
        .args(["--mode", "sprint"])
        .assert()
        .failure();
}
