//! Binary-level tests for the `scholar` CLI.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
    "users": [
        {"id": "u-root", "name": "root", "email": "root@x.com", "role": "Super-Administrator"},
        {"id": "u-inst", "name": "inst", "full_name": "Ins Tructor", "email": "inst@x.com",
         "role": "Instructor", "parent_id": "u-root"},
        {"id": "u-ta", "name": "ta", "email": "ta@x.com", "role": "Teaching Assistant",
         "parent_id": "u-inst", "instructor_id": "u-inst"},
        {"id": "u-stu", "name": "stu", "email": "stu@x.com", "role": "Student", "handle": "stu42"}
    ],
    "courses": [
        {"id": "c1", "name": "OODD", "instructor_id": "u-inst",
         "teaching_assistants": ["u-ta"], "participants": ["u-stu"]}
    ]
}"#;

fn fixture() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let data = dir.path().join("data.json");
    fs::write(&data, SNAPSHOT).expect("write snapshot");
    (dir, data)
}

fn scholar(data: &Path) -> Command {
    let mut cmd = Command::cargo_bin("scholar").expect("binary");
    cmd.env_remove("SCHOLAR_CONFIG").arg("--data").arg(data);
    cmd
}

#[test]
fn users_list_as_instructor() {
    let (_dir, data) = fixture();
    scholar(&data)
        .args(["users", "list", "--as", "inst"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stu@x.com"))
        .stdout(predicate::str::contains("root@x.com").not());
}

#[test]
fn users_list_json() {
    let (_dir, data) = fixture();
    scholar(&data)
        .args(["--format", "json", "users", "list", "--as", "root"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"root\""));
}

#[test]
fn can_impersonate_allowed_and_denied() {
    let (_dir, data) = fixture();
    scholar(&data)
        .args(["users", "can-impersonate", "--as", "ta", "stu"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ta can impersonate stu"));

    scholar(&data)
        .args(["users", "can-impersonate", "--as", "stu", "ta"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("stu cannot impersonate ta"))
        .stderr(predicate::str::contains("permission denied"));
}

#[test]
fn instructor_resolution() {
    let (_dir, data) = fixture();
    scholar(&data)
        .args(["users", "instructor", "ta@x.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ta works under inst (u-inst)"));

    scholar(&data)
        .args(["users", "instructor", "stu"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid role"));
}

#[test]
fn unknown_user_fails() {
    let (_dir, data) = fixture();
    scholar(&data)
        .args(["users", "show", "nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("user not found: nobody"));
}

#[test]
fn roster_export_selected_groups() {
    let (_dir, data) = fixture();
    scholar(&data)
        .args(["roster", "export", "--role-and-parent", "--handle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ROLE"))
        .stdout(predicate::str::contains("stu42"))
        .stdout(predicate::str::contains("EMAIL").not());
}

#[test]
fn roster_import_writes_snapshot() {
    let (dir, data) = fixture();
    let rows = dir.path().join("rows.json");
    fs::write(
        &rows,
        r#"[["stu", "Stu Dent", "student@x.com"], ["new", "New Comer", "new@x.com"]]"#,
    )
    .expect("write rows");

    scholar(&data)
        .args(["roster", "import", "--as", "ta", "--write"])
        .arg(&rows)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 created, 1 updated"));

    let saved = fs::read_to_string(&data).expect("read snapshot");
    assert!(saved.contains("student@x.com"));
    assert!(saved.contains("\"name\": \"new\""));
}

#[test]
fn roster_import_rejects_short_rows() {
    let (dir, data) = fixture();
    let rows = dir.path().join("rows.json");
    fs::write(&rows, r#"[["only", "two"]]"#).expect("write rows");

    scholar(&data)
        .args(["roster", "import", "--as", "inst"])
        .arg(&rows)
        .assert()
        .failure()
        .stderr(predicate::str::contains("row 1: expected 3 columns, found 2"));
}

#[test]
fn config_file_is_validated() {
    let (dir, data) = fixture();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"available_users_limit": 0}"#).expect("write config");

    scholar(&data)
        .arg("--config")
        .arg(&config)
        .args(["users", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}
