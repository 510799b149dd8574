use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn page_uses_render_settings_from_config() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("post.md");
    fs::write(&input_path, "# Hello\n").unwrap();

    let config_path = dir.path().join("folio.toml");
    fs::write(
        &config_path,
        r#"[render]
title = "From config"
custom_css = ".folio-document { max-width: 40rem; }"
"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg(input_path.as_os_str())
        .arg("--to")
        .arg("page")
        .arg("--config")
        .arg(config_path.as_os_str());

    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.contains("<title>From config</title>"));
    assert!(stdout.contains(".folio-document { max-width: 40rem; }"));
}

#[test]
fn extra_parameters_override_config() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("post.md");
    fs::write(&input_path, "# Hello\n").unwrap();

    let config_path = dir.path().join("folio.toml");
    fs::write(&config_path, "[render]\ntitle = \"From config\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg(input_path.as_os_str())
        .arg("--to")
        .arg("page")
        .arg("--config")
        .arg(config_path.as_os_str())
        .arg("--extra-title")
        .arg("From flag");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("<title>From flag</title>"));
}

#[test]
fn missing_config_file_fails() {
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("blocks").arg("--config").arg("/nonexistent/folio.toml");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}
