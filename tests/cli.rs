use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary home directory
fn temp_home() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp dir
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".hotelsat").join("config.json")
}

const BINARY_NAME: &str = "hotelsat-admin";

// Nothing listens here; commands that reach the network fail fast.
const UNREACHABLE_SERVER: &str = "http://127.0.0.1:9";

fn command(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.env("HOME", home.path())
        .env("HOTELSAT_API_URL", UNREACHABLE_SERVER)
        .env_remove("RUST_LOG");
    cmd
}

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Usage"))
        .stdout(contains("hotels"))
        .stdout(contains("test-webhook"))
        .stdout(contains("compare"))
        .stdout(contains("trend"));
}

#[test]
/// A blank hotel name is rejected locally with a warning.
fn hotels_add_with_blank_name_warns() {
    let home = temp_home();
    command(&home)
        .args(["hotels", "add", "--name", "   "])
        .assert()
        .failure()
        .stdout(contains("[WARN]"))
        .stdout(contains("Le nom de l'hôtel est requis"));
}

#[test]
/// The same hotel twice is one hotel, which is not enough to compare.
fn compare_same_hotel_twice_warns() {
    let home = temp_home();
    command(&home)
        .args(["compare", "3", "3"])
        .assert()
        .failure()
        .stdout(contains("[WARN]"))
        .stdout(contains("Au moins 2 hôtels sont requis"));
}

#[test]
fn trend_rejects_zero_days() {
    let home = temp_home();
    command(&home)
        .args(["trend", "3", "--days", "0"])
        .assert()
        .failure()
        .stderr(contains("--days"));
}

#[test]
/// An unreachable server is reported as a single error line.
fn hotels_list_reports_transport_error() {
    let home = temp_home();
    let output = command(&home)
        .args(["hotels", "list"])
        .assert()
        .failure()
        .stdout(contains("Erreur lors du chargement des hôtels"))
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    assert_eq!(stdout.matches("[ERROR]").count(), 1);
}

#[test]
/// An unknown start section is rejected with the list of known sections.
fn start_rejects_unknown_section() {
    let home = temp_home();
    command(&home)
        .args(["start", "--section", "settings"])
        .assert()
        .failure()
        .stderr(contains("automation"));
}

#[test]
/// Configure should persist the server URL and export directory.
fn configure_writes_config_file() {
    let home = temp_home();
    let config_path = config_file_path(&home);

    command(&home)
        .args([
            "configure",
            "--api-url",
            "https://sat.example.com",
            "--export-dir",
            "/srv/exports",
        ])
        .assert()
        .success()
        .stdout(contains("Configuration saved"));

    let saved = fs::read_to_string(&config_path).unwrap();
    assert!(saved.contains("https://sat.example.com"));
    assert!(saved.contains("/srv/exports"));
}

#[test]
fn configure_rejects_invalid_url() {
    let home = temp_home();
    command(&home)
        .args(["configure", "--api-url", "sat.example.com"])
        .assert()
        .failure()
        .stdout(contains("Invalid API URL"));
    assert!(!config_file_path(&home).exists());
}

#[test]
/// Reset command should delete an existing config file.
fn reset_deletes_config_file() {
    let home = temp_home();
    let config_path = config_file_path(&home);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, "{}").unwrap();

    // Ensure the file exists
    assert!(config_path.exists());

    command(&home)
        .arg("reset")
        .assert()
        .success()
        .stdout(contains("Configuration cleared"));

    // Confirm the file was deleted
    assert!(!config_path.exists());
}

#[test]
#[ignore] // Requires a HotelSat server on localhost:5000.
fn hotels_list_against_local_server() {
    let home = temp_home();
    Command::cargo_bin(BINARY_NAME)
        .unwrap()
        .env("HOME", home.path())
        .env_remove("HOTELSAT_API_URL")
        .args(["hotels", "list"])
        .assert()
        .success();
}
