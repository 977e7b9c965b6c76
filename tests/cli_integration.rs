mod common;

use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cooling-flex"))
        .args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("cooling-flex process should run")
}

#[test]
fn default_report_uses_bundled_assets() {
    let output = run_cli(&["--outdoor", "35", "--units", "1000"]);
    assert!(
        output.status.success(),
        "run failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    assert!(stdout.contains("1. BASELINE"));
    assert!(stdout.contains("2. LOAD-SHED"));
    assert!(stdout.contains("REDUCED"));
    assert!(stdout.contains("IMPACT (MW) - 1,000 units"));
    assert!(stdout.contains("Load-Shed Capacity: -10.14% shift in demand potential."));
    assert!(stdout.contains("Virtual Power Plant"));
}

#[test]
fn saturation_model_override() {
    let output = run_cli(&[
        "--model",
        "assets/saturation_model.json",
        "--outdoor",
        "44",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("INCREASED"));
    assert!(stdout.contains("'Saturation'"));
}

#[test]
fn settings_file_is_accepted() {
    let output = run_cli(&["--config", "config/dashboard.toml"]);
    assert!(
        output.status.success(),
        "run failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn missing_model_fails_with_diagnostic() {
    let output = run_cli(&["--model", "assets/does_not_exist.json"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot read model asset"), "stderr={stderr}");
}

#[test]
fn out_of_range_input_fails() {
    let output = run_cli(&["--outdoor", "60"]);
    assert!(!output.status.success());

    let output = run_cli(&["--units", "0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unit_count must be >= 1"));
}

#[test]
fn unknown_flag_fails() {
    let output = run_cli(&["--preset", "baseline"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown argument: --preset"));
}

#[test]
fn sweep_out_writes_csv() {
    let path = common::scratch_path("cli_sweep.csv");
    let path_str = path.to_string_lossy().into_owned();
    let output = run_cli(&["--units", "250", "--sweep-out", &path_str]);
    assert!(output.status.success());

    let mut rdr = csv::ReaderBuilder::new()
        .from_path(&path)
        .expect("sweep csv should exist");
    let records: Vec<csv::StringRecord> = rdr.records().filter_map(Result::ok).collect();
    let _ = std::fs::remove_file(&path);

    assert_eq!(records.len(), 53);
    assert!(records.iter().all(|r| &r[5] == "250"));
}
