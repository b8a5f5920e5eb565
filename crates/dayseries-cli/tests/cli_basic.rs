//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command with `DAYSERIES_HOME` pointed at `home`.
fn run_cli(home: &TempDir, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_dayseries"))
        .env("DAYSERIES_HOME", home.path())
        .env_remove("DAYSERIES_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_get_on_empty_series() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&home, &["get", "2023-01-01"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("no value for 2023-01-01"));
}

#[test]
fn test_set_then_get() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&home, &["set", "2023-01-02", "20.5"]);
    assert_eq!(code, 0, "set failed");
    assert!(stdout.contains("recorded 2023-01-02 = 20.5"));

    let (code, stdout, _) = run_cli(&home, &["set", "2023-01-02", "21"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("updated"));

    let (code, stdout, _) = run_cli(&home, &["get", "2023-01-02", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["value"], 21.0);
    assert!(home.path().join("time_series.json").exists());
}

#[test]
fn test_negative_values_are_accepted() {
    let home = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(&home, &["set", "2023-01-02", "-3.5"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    let (_, stdout, _) = run_cli(&home, &["get", "2023-01-02"]);
    assert_eq!(stdout.trim(), "-3.5");
}

#[test]
fn test_series_json_has_averages() {
    let home = TempDir::new().unwrap();
    for (date, value) in [("2023-01-01", "10"), ("2023-01-02", "20"), ("2023-01-04", "40")] {
        let (code, _, _) = run_cli(&home, &["set", date, value]);
        assert_eq!(code, 0);
    }

    let (code, stdout, _) = run_cli(&home, &["series", "--window", "3", "--json"]);
    assert_eq!(code, 0);
    let view: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let avgs: Vec<f64> = view["points"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["avg"].as_f64().unwrap())
        .collect();
    assert_eq!(avgs, vec![15.0, 15.0, 40.0]);
    assert_eq!(view["points"][2]["dateDisplay"], "01.04");
}

#[test]
fn test_even_window_is_an_error() {
    let home = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(&home, &["series", "--window", "4"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid window size 4"));
}

#[test]
fn test_bad_date_is_an_error() {
    let home = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(&home, &["get", "not-a-date"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_data_flag_overrides_configured_file() {
    let home = TempDir::new().unwrap();
    let other = home.path().join("elsewhere.json");
    let other_str = other.to_str().unwrap();

    let (code, _, _) = run_cli(&home, &["--data", other_str, "set", "2023-05-05", "1"]);
    assert_eq!(code, 0);
    assert!(other.exists());
    assert!(!home.path().join("time_series.json").exists());
}

#[test]
fn test_config_window_is_used_by_series() {
    let home = TempDir::new().unwrap();
    let (code, _, _) = run_cli(&home, &["config", "set", "smoothing.window_size", "5"]);
    assert_eq!(code, 0);

    let (_, stdout, _) = run_cli(&home, &["config", "get", "smoothing.window_size"]);
    assert_eq!(stdout.trim(), "5");

    let (code, stdout, _) = run_cli(&home, &["series", "--json"]);
    assert_eq!(code, 0);
    let view: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(view["window"], 5);
}

#[test]
fn test_config_rejects_even_window() {
    let home = TempDir::new().unwrap();
    let (code, _, _) = run_cli(&home, &["config", "set", "smoothing.window_size", "6"]);
    assert_ne!(code, 0);
}

#[test]
fn test_malformed_series_file_fails_load() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("time_series.json"),
        r#"{"data":[{"date":"2023-01-01","value":1},{"date":"2023-01-01","value":2}]}"#,
    )
    .unwrap();

    let (code, _, stderr) = run_cli(&home, &["series"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Malformed record at index 1"));
}

#[test]
fn test_config_get_unset_data_file_shows_default_path() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&home, &["config", "get", "storage.data_file"]);
    assert_eq!(code, 0);
    let expected = home.path().join("time_series.json");
    assert_eq!(stdout.trim(), expected.display().to_string());

    let (_, stdout, _) = run_cli(&home, &["config", "list"]);
    assert!(!stdout.contains("null"));
}

#[test]
fn test_far_future_date_is_rejected_and_file_stays_loadable() {
    let home = TempDir::new().unwrap();
    let (code, _, _) = run_cli(&home, &["set", "2023-01-01", "1"]);
    assert_eq!(code, 0);

    let (code, _, stderr) = run_cli(&home, &["set", "+12345-06-07", "2"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));

    let (code, stdout, _) = run_cli(&home, &["get", "2023-01-01"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1");
}
