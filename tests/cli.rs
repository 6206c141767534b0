use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary home directory
fn temp_home_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp dir
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".equipment-visualizer").join("config.json")
}

const BINARY_NAME: &str = "equipment-visualizer";

/// Command isolated from the caller's home directory and credentials.
fn isolated_command(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.env("HOME", home.path())
        .env_remove("API_URL")
        .env_remove("API_USERNAME")
        .env_remove("API_PASSWORD");
    cmd
}

#[test]
/// Help command should list the subcommands.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Usage"))
        .stdout(contains("upload"))
        .stdout(contains("export"));
}

#[test]
/// Logout command should delete an existing config file.
fn logout_deletes_config_file() {
    let tmp = temp_home_dir();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, "{}").unwrap();

    // Ensure the file exists
    assert!(config_path.exists());

    isolated_command(&tmp)
        .arg("logout")
        .assert()
        .success()
        .stdout(contains("Logging out"));

    // Confirm the file was deleted
    assert!(!config_path.exists());
}

#[test]
/// Login stores the credentials for later runs.
fn login_creates_config_file() {
    let tmp = temp_home_dir();
    let config_path = config_file_path(&tmp);
    assert!(!config_path.exists());

    isolated_command(&tmp)
        .args(["login", "--username", "admin", "--password", "secret"])
        .assert()
        .success()
        .stdout(contains("Logged in"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("\"username\": \"admin\""));
    assert!(contents.contains("\"password\": \"secret\""));
}

#[test]
/// Without credentials the command fails before making any request.
fn history_without_credentials_fails() {
    let tmp = temp_home_dir();

    isolated_command(&tmp)
        .arg("history")
        .assert()
        .failure()
        .stderr(contains("Missing API username"));
}

#[test]
/// Only CSV files are accepted for upload.
fn upload_rejects_non_csv_file() {
    let tmp = temp_home_dir();
    let notes = tmp.path().join("notes.txt");
    fs::write(&notes, "not a csv").unwrap();

    isolated_command(&tmp)
        .args(["upload", "--username", "admin", "--password", "secret", "--file"])
        .arg(&notes)
        .assert()
        .failure()
        .stderr(contains("Only .csv files can be uploaded"));
}
