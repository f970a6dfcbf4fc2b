use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db, init_db_with_day, ok, pp, setup_test_db, temp_out};

#[test]
fn routine_is_saved_applied_and_exported() {
    let db_path = setup_test_db("routine_cycle");
    let out = temp_out("routine_cycle", "json");
    init_db_with_day(&db_path, "2025-09-01");

    pp().args(["--db", &db_path, "routine", "save", "2025-09-01", "--name", "School day"])
        .assert()
        .success()
        .stdout(contains("Saved routine 'School day' with 2 activities"));

    pp().args([
        "--db",
        &db_path,
        "routine",
        "apply",
        "school day",
        "2025-09-02",
        "--period",
        "afternoon",
    ])
    .assert()
    .success()
    .stdout(contains("Applied 2 activities"));

    ok(&db_path, &["routine", "export", "School day", "--file", &out]);
    let body = fs::read_to_string(&out).expect("exported routine");
    assert!(body.contains("School day"));

    // a fresh database can read the exported document back
    let other_db = setup_test_db("routine_cycle_import");
    init_db(&other_db);
    pp().args(["--db", &other_db, "routine", "import", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Imported routine 'School day' with 2 activities"));

    pp().args(["--db", &other_db, "routine", "list"])
        .assert()
        .success()
        .stdout(contains("School day"));
}

#[test]
fn empty_selection_cannot_be_saved() {
    let db_path = setup_test_db("routine_empty");
    init_db(&db_path);

    pp().args(["--db", &db_path, "routine", "save", "2025-09-01", "--name", "Nothing"])
        .assert()
        .failure()
        .stderr(contains("Missing required field"));
}

#[test]
fn backup_and_restore_bring_back_every_collection() {
    let db_path = setup_test_db("backup_restore");
    let out = temp_out("backup_restore", "json");
    init_db_with_day(&db_path, "2025-09-01");

    pp().args(["--db", &db_path, "backup", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Backup written"));

    pp().args(["--db", &db_path, "backup", "--file", &out])
        .assert()
        .failure();

    ok(&db_path, &["clear", "2025-09-01"]);
    ok(&db_path, &["restore", "--file", &out]);

    pp().args(["--db", &db_path, "day", "2025-09-01"])
        .assert()
        .success()
        .stdout(contains("Desayuno").and(contains("Cena")));
}

#[test]
fn compressed_backup_can_be_restored() {
    let db_path = setup_test_db("backup_zip");
    let out = temp_out("backup_zip", "json");
    let zipped = temp_out("backup_zip", "zip");
    init_db_with_day(&db_path, "2025-09-01");

    ok(&db_path, &["backup", "--file", &out, "--compress"]);
    assert!(std::path::Path::new(&zipped).exists());

    ok(&db_path, &["clear", "2025-09-01"]);
    ok(&db_path, &["restore", "--file", &zipped]);

    pp().args(["--db", &db_path, "day", "2025-09-01"])
        .assert()
        .success()
        .stdout(contains("Desayuno"));
}

#[test]
fn foreign_documents_are_not_restored() {
    let db_path = setup_test_db("backup_foreign");
    let out = temp_out("backup_foreign", "json");
    init_db(&db_path);
    fs::write(&out, r#"{"app":"other","version":1}"#).expect("write");

    pp().args(["--db", &db_path, "restore", "--file", &out])
        .assert()
        .failure()
        .stderr(contains("Invalid backup document"));
}
