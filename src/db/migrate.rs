use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// One schema step. `version` is recorded in the `log` table once applied.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "0001_create_services",
        description: "Created services table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS services (
            id                    INTEGER PRIMARY KEY AUTOINCREMENT,
            name                  TEXT NOT NULL CHECK(length(trim(name)) > 0),
            service_type          TEXT NOT NULL DEFAULT 'sunday'
                                  CHECK(service_type IN ('sunday','midweek','youth','special')),
            schedule_text         TEXT NOT NULL DEFAULT '',
            description           TEXT NOT NULL DEFAULT '',
            last_occurrence_date  TEXT,
            auto_generate         INTEGER NOT NULL DEFAULT 0,
            is_active             INTEGER NOT NULL DEFAULT 1,
            display_order         INTEGER NOT NULL DEFAULT 0,
            created_at            TEXT NOT NULL,
            updated_at            TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "0002_create_derived_events",
        description: "Created derived_events table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS derived_events (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            title           TEXT NOT NULL,
            event_date      TEXT NOT NULL,
            source_service  INTEGER REFERENCES services(id) ON DELETE SET NULL,
            description     TEXT NOT NULL DEFAULT '',
            is_active       INTEGER NOT NULL DEFAULT 1,
            display_order   INTEGER NOT NULL DEFAULT 0,
            created_at      TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "0003_index_derived_events",
        description: "Indexed derived_events by date and source",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_derived_events_date ON derived_events(event_date);
        CREATE INDEX IF NOT EXISTS idx_derived_events_source ON derived_events(source_service);
        "#,
    },
];

/// Ensure that the `log` table exists. Migrations record themselves there.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    tx.commit()?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Check if a table exists in the current database.
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Public entry point: run all pending migrations, in order.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            apply(conn, m)?;
        }
    }

    Ok(())
}
