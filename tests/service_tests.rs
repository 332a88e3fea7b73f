use parishdesk::db::pool::DbPool;
use parishdesk::db::queries::{
    EventFilter, ServiceFilter, load_events, load_service, load_services,
};
use parishdesk::models::ServiceType;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_cli_db, memory_pool, pd, setup_test_db, stored_service, ymd};

#[test]
fn test_service_add_and_list() {
    let db_path = setup_test_db("service_add_list");
    init_cli_db(&db_path);

    pd().args([
        "--db",
        &db_path,
        "service",
        "add",
        "English Service",
        "--type",
        "sunday",
        "--schedule",
        "Sundays, 7:00-8:30am",
        "--last",
        "2024-02-11",
        "--auto",
    ])
    .assert()
    .success()
    .stdout(contains("Service #1 'English Service' registered."));

    pd().args([
        "--db",
        &db_path,
        "service",
        "add",
        "Youth Service",
        "--type",
        "YOUTH",
        "--inactive",
    ])
    .assert()
    .success();

    pd().args(["--db", &db_path, "service", "list"])
        .assert()
        .success()
        .stdout(contains("English Service"))
        .stdout(contains("2024-02-11"))
        .stdout(contains("Youth Service").not());

    pd().args(["--db", &db_path, "service", "list", "--all"])
        .assert()
        .success()
        .stdout(contains("Youth Service"));
}

#[test]
fn test_service_add_rejects_blank_name() {
    let db_path = setup_test_db("service_blank_name");
    init_cli_db(&db_path);

    pd().args(["--db", &db_path, "service", "add", "   "])
        .assert()
        .failure()
        .stderr(contains("Validation error"));
}

#[test]
fn test_service_add_rejects_bad_date_and_type() {
    let db_path = setup_test_db("service_bad_input");
    init_cli_db(&db_path);

    pd().args([
        "--db",
        &db_path,
        "service",
        "add",
        "English Service",
        "--last",
        "2024-13-01",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid date format"));

    pd().args([
        "--db",
        &db_path,
        "service",
        "add",
        "English Service",
        "--type",
        "vespers",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid service type"));
}

#[test]
fn test_service_edit_updates_fields() {
    let db_path = setup_test_db("service_edit");
    init_cli_db(&db_path);

    pd().args([
        "--db",
        &db_path,
        "service",
        "add",
        "Kiswahili Service",
        "--last",
        "2024-01-07",
    ])
    .assert()
    .success();

    pd().args([
        "--db",
        &db_path,
        "service",
        "edit",
        "1",
        "--last",
        "2024-01-14",
        "--auto",
        "--description",
        "Ibada ya Kiswahili",
    ])
    .assert()
    .success()
    .stdout(contains("Service #1 'Kiswahili Service' updated."));

    let pool = DbPool::new(&db_path).unwrap();
    let svc = load_service(&pool.conn, 1).unwrap().unwrap();
    assert_eq!(svc.last_occurrence_date, Some(ymd(2024, 1, 14)));
    assert!(svc.auto_generate);
    assert_eq!(svc.description, "Ibada ya Kiswahili");

    pd().args(["--db", &db_path, "service", "edit", "1", "--clear-last", "--no-auto"])
        .assert()
        .success();

    let svc = load_service(&pool.conn, 1).unwrap().unwrap();
    assert_eq!(svc.last_occurrence_date, None);
    assert!(!svc.auto_generate);
}

#[test]
fn test_service_edit_requires_changes_and_existing_id() {
    let db_path = setup_test_db("service_edit_errors");
    init_cli_db(&db_path);

    pd().args(["--db", &db_path, "service", "add", "English Service"])
        .assert()
        .success();

    pd().args(["--db", &db_path, "service", "edit", "1"])
        .assert()
        .failure()
        .stderr(contains("nothing to update"));

    pd().args(["--db", &db_path, "service", "edit", "42", "--order", "3"])
        .assert()
        .failure()
        .stderr(contains("Service #42 not found"));
}

#[test]
fn test_service_delete_keeps_derived_events() {
    let db_path = setup_test_db("service_delete_keeps_events");
    init_cli_db(&db_path);

    pd().args([
        "--db",
        &db_path,
        "service",
        "add",
        "English Service",
        "--last",
        "2024-02-11",
        "--auto",
    ])
    .assert()
    .success();

    pd().args(["--db", &db_path, "derive", "--as-of", "2024-03-01"])
        .assert()
        .success();

    pd().args(["--db", &db_path, "service", "del", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("deleted"));

    let pool = DbPool::new(&db_path).unwrap();
    let all = ServiceFilter {
        include_inactive: true,
        ..ServiceFilter::default()
    };
    assert!(load_services(&pool.conn, &all).unwrap().is_empty());

    let events = load_events(
        &pool.conn,
        &EventFilter {
            include_inactive: true,
            ..EventFilter::default()
        },
    )
    .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "English Service - February 11, 2024");
    assert_eq!(events[0].source_service, None);
}

#[test]
fn test_service_edit_trims_name() {
    let db_path = setup_test_db("service_edit_trim");
    init_cli_db(&db_path);

    pd().args(["--db", &db_path, "service", "add", "English Service"])
        .assert()
        .success();

    pd().args([
        "--db",
        &db_path,
        "service",
        "edit",
        "1",
        "--name",
        "  Evening Service  ",
    ])
    .assert()
    .success()
    .stdout(contains("Service #1 'Evening Service' updated."));

    let pool = DbPool::new(&db_path).unwrap();
    let svc = load_service(&pool.conn, 1).unwrap().unwrap();
    assert_eq!(svc.name, "Evening Service");
}

fn list_names(pool: &DbPool, filter: &ServiceFilter) -> Vec<String> {
    load_services(&pool.conn, filter)
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect()
}

#[test]
fn test_load_services_filters() {
    let pool = memory_pool();
    stored_service(&pool, "English Service", None, "Morning liturgy");
    stored_service(&pool, "Kiswahili Service", None, "Ibada ya Kiswahili");

    let mut youth = stored_service(&pool, "Youth Service", None, "Praise night");
    youth.service_type = ServiceType::Youth;
    youth.auto_generate = false;
    youth.is_active = false;
    parishdesk::db::queries::update_service(&pool.conn, &youth).unwrap();

    let everything = ServiceFilter {
        include_inactive: true,
        ..ServiceFilter::default()
    };

    assert_eq!(
        list_names(&pool, &ServiceFilter::default()),
        ["English Service", "Kiswahili Service"]
    );
    assert_eq!(list_names(&pool, &everything).len(), 3);

    let by_type = ServiceFilter {
        service_type: Some(ServiceType::Youth),
        ..everything.clone()
    };
    assert_eq!(list_names(&pool, &by_type), ["Youth Service"]);

    let manual = ServiceFilter {
        auto_generate: Some(false),
        ..everything.clone()
    };
    assert_eq!(list_names(&pool, &manual), ["Youth Service"]);

    // name or description, any case
    let by_description = ServiceFilter {
        search: Some("LITURGY".into()),
        ..everything.clone()
    };
    assert_eq!(list_names(&pool, &by_description), ["English Service"]);

    let by_name = ServiceFilter {
        search: Some("kiswahili".into()),
        ..everything.clone()
    };
    assert_eq!(list_names(&pool, &by_name), ["Kiswahili Service"]);

    // wildcards are literal
    let wildcard = ServiceFilter {
        search: Some("%".into()),
        ..everything
    };
    assert!(list_names(&pool, &wildcard).is_empty());
}

#[test]
fn test_service_list_filters_by_type_auto_and_search() {
    let db_path = setup_test_db("service_list_filters");
    init_cli_db(&db_path);

    pd().args([
        "--db",
        &db_path,
        "service",
        "add",
        "English Service",
        "--description",
        "Morning liturgy",
        "--auto",
    ])
    .assert()
    .success();

    pd().args([
        "--db",
        &db_path,
        "service",
        "add",
        "Youth Service",
        "--type",
        "youth",
        "--description",
        "Praise night",
    ])
    .assert()
    .success();

    pd().args(["--db", &db_path, "service", "list", "--type", "youth"])
        .assert()
        .success()
        .stdout(contains("Youth Service"))
        .stdout(contains("English Service").not());

    pd().args(["--db", &db_path, "service", "list", "--auto"])
        .assert()
        .success()
        .stdout(contains("English Service"))
        .stdout(contains("Youth Service").not());

    pd().args(["--db", &db_path, "service", "list", "--no-auto"])
        .assert()
        .success()
        .stdout(contains("Youth Service"))
        .stdout(contains("English Service").not());

    pd().args(["--db", &db_path, "service", "list", "--search", "praise"])
        .assert()
        .success()
        .stdout(contains("Youth Service"))
        .stdout(contains("English Service").not());

    pd().args(["--db", &db_path, "service", "list", "--search", "vespers"])
        .assert()
        .success()
        .stdout(contains("No services found."));

    pd().args(["--db", &db_path, "service", "list", "--type", "vespers"])
        .assert()
        .failure()
        .stderr(contains("Invalid service type"));
}
