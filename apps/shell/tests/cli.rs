use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const CONFIG: &str = r#"
[log]
level = "warn"

[entitlements]
features = ["feat:customRoles", "feat:oidc"]

[entitlements.quotas]
"quota:aiCredits" = 500
"quota:insights:maxHistoryDays" = 30
"#;

fn write_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("entitle.toml");
    fs::write(&path, contents).expect("write config");
    (dir, path)
}

fn entitle(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("entitle").expect("binary should be built");
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn check_prints_whether_any_feature_is_licensed() {
    let (dir, path) = write_config(CONFIG);

    entitle(&dir)
        .arg("--config")
        .arg(&path)
        .args(["check", "feat:customRoles"])
        .assert()
        .success()
        .stdout("true\n");

    entitle(&dir)
        .arg("--config")
        .arg(&path)
        .args(["check", "feat:saml", "feat:ldap"])
        .assert()
        .success()
        .stdout("false\n");

    entitle(&dir)
        .arg("--config")
        .arg(&path)
        .args(["check", "feat:saml", "feat:oidc"])
        .assert()
        .success()
        .stdout("true\n");
}

#[test]
fn check_rejects_unknown_feature_names() {
    let (dir, path) = write_config(CONFIG);

    entitle(&dir)
        .arg("--config")
        .arg(&path)
        .args(["check", "feat:teleportation"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Unknown license feature"))
        .stderr(predicate::str::contains("feat:teleportation"));
}

#[test]
fn value_prints_raw_value_or_absent() {
    let (dir, path) = write_config(CONFIG);

    entitle(&dir)
        .arg("--config")
        .arg(&path)
        .args(["value", "quota:aiCredits"])
        .assert()
        .success()
        .stdout("500\n");

    entitle(&dir)
        .arg("--config")
        .arg(&path)
        .args(["value", "feat:oidc"])
        .assert()
        .success()
        .stdout("true\n");

    entitle(&dir)
        .arg("--config")
        .arg(&path)
        .args(["value", "quota:users"])
        .assert()
        .success()
        .stdout("absent\n");
}

#[test]
fn report_json_lists_provider_backed_answers() {
    let (dir, path) = write_config(CONFIG);

    let output = entitle(&dir)
        .arg("--config")
        .arg(&path)
        .args(["report", "--json"])
        .output()
        .expect("run entitle report");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    let entries = report["entries"].as_array().expect("entries array");

    let find = |accessor: &str| {
        entries
            .iter()
            .find(|entry| entry["accessor"] == accessor)
            .unwrap_or_else(|| panic!("missing {accessor}"))
    };

    assert_eq!(find("is_custom_roles_licensed")["value"], true);
    assert_eq!(find("is_provisioning_licensed")["value"], true);
    assert_eq!(find("get_max_ai_credits")["value"], 500);
    assert_eq!(find("get_insights_max_history")["value"], 30);
    assert_eq!(find("get_insights_retention_max_age")["value"], 180);
    assert_eq!(find("is_sharing_licensed")["source"], "fixed");
}

#[test]
fn report_table_runs_without_a_config_file() {
    let dir = tempfile::tempdir().expect("temp dir");

    let mut cmd = Command::cargo_bin("entitle").expect("binary should be built");
    cmd.current_dir(dir.path())
        .env("ENTITLE__LOG__LEVEL", "warn")
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("is_custom_roles_licensed"))
        .stdout(predicate::str::contains("get_max_ai_credits"));
}

#[test]
fn explicit_missing_config_fails() {
    let dir = tempfile::tempdir().expect("temp dir");

    entitle(&dir)
        .args(["--config", "missing.toml", "report"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}
