#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use parishdesk::db::initialize::init_db;
use parishdesk::db::pool::DbPool;
use parishdesk::db::queries::insert_service;
use parishdesk::models::{ServiceConfig, ServiceType};
use chrono::NaiveDate;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn pd() -> Command {
    cargo_bin_cmd!("parishdesk")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_parishdesk.sqlite", name));
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

/// `init` a fresh database through the CLI (test mode: no config file)
pub fn init_cli_db(db_path: &str) {
    pd().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Fresh migrated in-memory database
pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("migrate");
    pool
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Store a service with auto-generation on and return it with its id set
pub fn stored_service(
    pool: &DbPool,
    name: &str,
    last: Option<NaiveDate>,
    description: &str,
) -> ServiceConfig {
    let mut svc = ServiceConfig::new(name, ServiceType::Sunday);
    svc.last_occurrence_date = last;
    svc.auto_generate = true;
    svc.description = description.to_string();
    svc.id = insert_service(&pool.conn, &svc).expect("insert service");
    svc
}

pub fn count_events(pool: &DbPool) -> i64 {
    pool.conn
        .query_row("SELECT COUNT(*) FROM derived_events", [], |r| r.get(0))
        .expect("count events")
}
