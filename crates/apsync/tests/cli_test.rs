#![allow(clippy::unwrap_used)]
// Smoke tests for the apsync binary: argument surface and config
// validation. Nothing here talks to a controller or a NetBox.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn apsync(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("apsync").unwrap();
    // Isolate from the developer's environment and any apsync.toml in cwd.
    cmd.env_remove("APSYNC_WLC_HOST")
        .env_remove("APSYNC_WLC_USERNAME")
        .env_remove("APSYNC_WLC_PASSWORD")
        .env_remove("APSYNC_NETBOX_URL")
        .env_remove("APSYNC_NETBOX_TOKEN")
        .current_dir(workdir.path());
    cmd
}

#[test]
fn help_lists_both_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    apsync(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("show"));
}

#[test]
fn no_args_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    apsync(&dir).assert().failure();
}

#[test]
fn sync_without_config_exits_nonzero_with_field_name() {
    let dir = tempfile::tempdir().unwrap();
    apsync(&dir)
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("wlc-host"));
}

#[test]
fn show_does_not_require_netbox_settings() {
    // With only the controller half missing, the complaint must be about
    // the controller, not NetBox.
    let dir = tempfile::tempdir().unwrap();
    apsync(&dir)
        .arg("show")
        .arg("--netbox-url")
        .arg("http://example.invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("wlc-host"));
}

#[test]
fn config_file_satisfies_the_controller_half() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("apsync.toml"),
        "wlc_host = \"wlc.example.invalid\"\n\
         wlc_username = \"admin\"\n\
         wlc_password = \"secret\"\n",
    )
    .unwrap();

    // The controller settings come from the file, so the first complaint
    // moves on to the missing NetBox half.
    apsync(&dir)
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("netbox-url"));
}

#[test]
fn invalid_netbox_url_is_rejected_before_connecting() {
    let dir = tempfile::tempdir().unwrap();
    apsync(&dir)
        .args([
            "sync",
            "--wlc-host",
            "wlc.example.invalid",
            "--wlc-username",
            "admin",
            "--wlc-password",
            "secret",
            "--netbox-url",
            "not a url",
            "--netbox-token",
            "token",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("netbox-url"));
}
