use parishdesk::db::initialize::init_db;
use parishdesk::db::migrate::table_exists;
use parishdesk::db::pool::DbPool;
use predicates::str::contains;

mod common;
use common::{memory_pool, pd, setup_test_db};

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("init_creates_schema");

    pd().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Initialization completed"));

    let pool = DbPool::new(&db_path).unwrap();
    assert!(table_exists(&pool.conn, "services").unwrap());
    assert!(table_exists(&pool.conn, "derived_events").unwrap());
    assert!(table_exists(&pool.conn, "log").unwrap());
}

#[test]
fn test_migrations_run_once() {
    let pool = memory_pool();
    init_db(&pool.conn).unwrap();

    let applied: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(applied, 3);
}

#[test]
fn test_config_print_shows_overridden_database() {
    let db_path = setup_test_db("config_print");

    pd().args(["--db", &db_path, "config", "--print"])
        .assert()
        .success()
        .stdout(contains("past_events_limit"))
        .stdout(contains(db_path.as_str()));
}
