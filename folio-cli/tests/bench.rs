use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("folio-babel")
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn bench_report(cmd: &mut assert_cmd::Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn bench_reports_latency_snapshot() {
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("bench")
        .arg(fixture_path("kitchensink.md"))
        .arg("--iterations")
        .arg("3");

    let report = bench_report(&mut cmd);
    assert_eq!(report["iterations"], 3);
    assert_eq!(report["compiles"], 6);
    assert_eq!(report["latency"]["samples"], 6);
    let p50 = report["latency"]["p50_ms"].as_f64().unwrap();
    let p95 = report["latency"]["p95_ms"].as_f64().unwrap();
    assert!(p95 >= p50);
    assert!(report["html_bytes"].as_u64().unwrap() > 0);
}

#[test]
fn bench_window_comes_from_config() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("folio.toml");
    fs::write(&config_path, "[worker]\nlatency_window = 4\n").unwrap();

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("bench")
        .arg(fixture_path("kitchensink.md"))
        .arg("-n")
        .arg("5")
        .arg("--config")
        .arg(config_path.as_os_str());

    let report = bench_report(&mut cmd);
    assert_eq!(report["compiles"], 10);
    assert_eq!(report["latency"]["samples"], 4);
}
