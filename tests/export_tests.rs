use predicates::str::contains;
use std::fs;

mod common;
use common::{init_cli_db, pd, setup_test_db, temp_out};

fn seed(db_path: &str) {
    init_cli_db(db_path);

    pd().args([
        "--db",
        db_path,
        "service",
        "add",
        "English Service",
        "--last",
        "2024-02-11",
        "--description",
        "Morning liturgy",
        "--auto",
    ])
    .assert()
    .success();

    pd().args(["--db", db_path, "derive", "--as-of", "2024-03-01"])
        .assert()
        .success();
}

#[test]
fn test_export_csv() {
    let db_path = setup_test_db("export_csv");
    let out = temp_out("export_csv", "csv");
    seed(&db_path);

    pd().args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("1 event(s) exported."));

    let content = fs::read_to_string(&out).expect("csv written");
    let mut lines = content.lines();
    assert!(lines.next().unwrap().starts_with("id,title,event_date,formatted_date"));
    let row = lines.next().unwrap();
    assert!(row.contains("English Service - February 11, 2024"));
    assert!(row.contains("2024-02-11"));
}

#[test]
fn test_export_json() {
    let db_path = setup_test_db("export_json");
    let out = temp_out("export_json", "json");
    seed(&db_path);

    pd().args(["--db", &db_path, "export", "--format", "json", "--file", &out, "--past"])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("json written");
    let v: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let arr = v.as_array().expect("array");
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["title"], "English Service - February 11, 2024");
    assert_eq!(arr[0]["event_date"], "2024-02-11");
    assert_eq!(arr[0]["formatted_date"], "February 11, 2024");
    assert_eq!(arr[0]["source_service"], 1);
    assert_eq!(arr[0]["is_active"], true);
}

#[test]
fn test_export_refuses_to_overwrite_without_force() {
    let db_path = setup_test_db("export_overwrite");
    let out = temp_out("export_overwrite", "csv");
    seed(&db_path);
    fs::write(&out, "keep me").unwrap();

    // stdin is empty, so the overwrite prompt is declined
    pd().args(["--db", &db_path, "export", "--file", &out])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(contains("existing file not overwritten"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    pd().args(["--db", &db_path, "export", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("English Service"));
}

#[test]
fn test_export_respects_as_of_and_service() {
    let db_path = setup_test_db("export_as_of_service");
    let out = temp_out("export_as_of_service", "json");
    seed(&db_path);

    // the only event is dated 2024-02-11, not before itself
    pd().args([
        "--db", &db_path, "export", "--format", "json", "--file", &out, "--past", "--as-of",
        "2024-02-11",
    ])
    .assert()
    .success()
    .stdout(contains("0 event(s) exported."));

    pd().args([
        "--db", &db_path, "export", "--format", "json", "--file", &out, "--service", "1",
        "--force",
    ])
    .assert()
    .success()
    .stdout(contains("1 event(s) exported."));

    pd().args([
        "--db", &db_path, "export", "--format", "json", "--file", &out, "--service", "7",
        "--force",
    ])
    .assert()
    .success()
    .stdout(contains("0 event(s) exported."));

    let content = fs::read_to_string(&out).expect("json written");
    let v: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert!(v.as_array().expect("array").is_empty());
}
