#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn pp() -> Command {
    cargo_bin_cmd!("pictoplan")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_pictoplan.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Run a command against the given DB and expect success
pub fn ok(db_path: &str, args: &[&str]) {
    pp().arg("--db").arg(db_path).args(args).assert().success();
}

/// Initialize the DB without touching the user config file
pub fn init_db(db_path: &str) {
    pp().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize the DB and put breakfast (morning) and dinner (evening) on `date`
pub fn init_db_with_day(db_path: &str, date: &str) {
    init_db(db_path);
    ok(db_path, &["add", date, "breakfast", "--time", "08:00"]);
    ok(db_path, &["add", date, "dinner", "--time", "20:30"]);
}
