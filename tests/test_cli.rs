mod common;

use common::test_prelude::*;
use common::test_utils::write_config;

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("fake-emb").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("follow"))
        .stdout(contains("placement"))
        .stdout(contains("embed"));
}

#[test]
fn test_placement_subtracts_titlebar() {
    let mut cmd = Command::cargo_bin("fake-emb").unwrap();
    cmd.env_remove("FAKE_EMB_CONFIG")
        .args(["placement", "--rect", "10,20,300,400"])
        .assert()
        .success()
        .stdout(contains("x = 10"))
        .stdout(contains("width = 300"))
        .stdout(contains("height = 375"))
        .stdout(contains("fullscreen = false"));
}

#[test]
fn test_config_file_is_honoured() -> Result<(), Box<dyn std::error::Error>> {
    let config = write_config("target_class = \"GameWindow\"\ntitlebar_offset = 0\n")?;
    let mut cmd = Command::cargo_bin("fake-emb")?;
    cmd.arg("--config")
        .arg(&config.path)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("target_class = \"GameWindow\""))
        .stdout(contains("titlebar_offset = 0"))
        .stdout(contains("dock_height_offset = 50"));

    let mut cmd = Command::cargo_bin("fake-emb")?;
    cmd.env("FAKE_EMB_CONFIG", &config.path)
        .args(["placement", "--rect", "0,0,100,100"])
        .assert()
        .success()
        .stdout(contains("height = 100"));
    Ok(())
}

#[test]
fn test_class_flag_overrides_config() {
    let mut cmd = Command::cargo_bin("fake-emb").unwrap();
    cmd.env_remove("FAKE_EMB_CONFIG")
        .args(["--class", "Custom", "config"])
        .assert()
        .success()
        .stdout(contains("target_class = \"Custom\""));
}

#[test]
fn test_bad_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let config = write_config("tick_interval_ms = 0\n")?;
    let mut cmd = Command::cargo_bin("fake-emb")?;
    cmd.arg("--config")
        .arg(&config.path)
        .arg("config")
        .assert()
        .failure()
        .stderr(contains("tick_interval_ms"));
    Ok(())
}

#[test]
fn test_bad_rect_is_rejected() {
    let mut cmd = Command::cargo_bin("fake-emb").unwrap();
    cmd.args(["placement", "--rect", "1,2,3"])
        .assert()
        .failure()
        .stderr(contains("x,y,w,h"));
}

#[cfg(not(windows))]
#[test]
fn test_window_commands_need_windows() {
    let mut cmd = Command::cargo_bin("fake-emb").unwrap();
    cmd.env_remove("FAKE_EMB_CONFIG")
        .arg("list")
        .assert()
        .failure()
        .stderr(contains("Win32"));
}

#[test]
fn test_embed_without_parent_is_a_usage_error() {
    let mut cmd = Command::cargo_bin("fake-emb").unwrap();
    cmd.env_remove("FAKE_EMB_CONFIG")
        .args(["embed", "--rect", "0,0,640,480"])
        .assert()
        .failure()
        .stderr(contains("--parent"));
}
