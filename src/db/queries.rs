use crate::errors::{AppError, AppResult};
use crate::models::{DerivedEvent, ServiceConfig, ServiceType};
use chrono::{Local, NaiveDate};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

const SERVICE_COLUMNS: &str = "id, name, service_type, schedule_text, description,
     last_occurrence_date, auto_generate, is_active, display_order";

const EVENT_COLUMNS: &str =
    "id, title, event_date, source_service, description, is_active, display_order, created_at";

fn conversion_failure(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_date_column(idx: usize, raw: String) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| conversion_failure(idx, AppError::InvalidDate(raw)))
}

pub fn map_service_row(row: &Row) -> Result<ServiceConfig> {
    let type_str: String = row.get("service_type")?;
    let service_type = ServiceType::from_db_str(&type_str)
        .ok_or_else(|| conversion_failure(2, AppError::InvalidServiceType(type_str.clone())))?;

    let last_occurrence_date = match row.get::<_, Option<String>>("last_occurrence_date")? {
        Some(raw) => Some(parse_date_column(5, raw)?),
        None => None,
    };

    Ok(ServiceConfig {
        id: row.get("id")?,
        name: row.get("name")?,
        service_type,
        schedule_text: row.get("schedule_text")?,
        description: row.get("description")?,
        last_occurrence_date,
        auto_generate: row.get::<_, i32>("auto_generate")? == 1,
        is_active: row.get::<_, i32>("is_active")? == 1,
        display_order: row.get("display_order")?,
    })
}

pub fn map_event_row(row: &Row) -> Result<DerivedEvent> {
    let date_str: String = row.get("event_date")?;

    Ok(DerivedEvent {
        id: row.get("id")?,
        title: row.get("title")?,
        event_date: parse_date_column(2, date_str)?,
        source_service: row.get("source_service")?,
        description: row.get("description")?,
        is_active: row.get::<_, i32>("is_active")? == 1,
        display_order: row.get("display_order")?,
        created_at: row.get("created_at")?,
    })
}

fn date_to_db(d: Option<NaiveDate>) -> Option<String> {
    d.map(|d| d.format("%Y-%m-%d").to_string())
}

fn where_clause(clauses: &[String]) -> String {
    if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    }
}

// ---------------------------------------------------------------------
// services
// ---------------------------------------------------------------------

/// Insert a new service and return its id.
pub fn insert_service(conn: &Connection, svc: &ServiceConfig) -> AppResult<i64> {
    svc.validate()?;
    let now = Local::now().to_rfc3339();

    conn.execute(
        "INSERT INTO services (name, service_type, schedule_text, description,
                               last_occurrence_date, auto_generate, is_active,
                               display_order, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
        params![
            svc.name.trim(),
            svc.service_type.code(),
            svc.schedule_text,
            svc.description,
            date_to_db(svc.last_occurrence_date),
            svc.auto_generate as i32,
            svc.is_active as i32,
            svc.display_order,
            now,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Update every field of an existing service (all but id).
pub fn update_service(conn: &Connection, svc: &ServiceConfig) -> AppResult<()> {
    svc.validate()?;

    let changed = conn.execute(
        "UPDATE services
         SET name = ?1, service_type = ?2, schedule_text = ?3, description = ?4,
             last_occurrence_date = ?5, auto_generate = ?6, is_active = ?7,
             display_order = ?8, updated_at = ?9
         WHERE id = ?10",
        params![
            svc.name.trim(),
            svc.service_type.code(),
            svc.schedule_text,
            svc.description,
            date_to_db(svc.last_occurrence_date),
            svc.auto_generate as i32,
            svc.is_active as i32,
            svc.display_order,
            Local::now().to_rfc3339(),
            svc.id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound {
            kind: "Service",
            id: svc.id,
        });
    }
    Ok(())
}

pub fn load_service(conn: &Connection, id: i64) -> AppResult<Option<ServiceConfig>> {
    let sql = format!("SELECT {SERVICE_COLUMNS} FROM services WHERE id = ?1");
    let svc = conn.query_row(&sql, [id], map_service_row).optional()?;
    Ok(svc)
}

/// Selection used by `service list`. `None` fields do not filter.
#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    pub include_inactive: bool,
    pub service_type: Option<ServiceType>,
    pub auto_generate: Option<bool>,
    /// Case-insensitive match against name or description.
    pub search: Option<String>,
}

impl ServiceFilter {
    /// Every service with auto-generation switched on, active or not.
    pub fn auto_generating() -> Self {
        Self {
            include_inactive: true,
            auto_generate: Some(true),
            ..Self::default()
        }
    }
}

/// Services in display order.
pub fn load_services(conn: &Connection, filter: &ServiceFilter) -> AppResult<Vec<ServiceConfig>> {
    let mut clauses: Vec<String> = Vec::new();
    let mut args: Vec<Value> = Vec::new();

    if !filter.include_inactive {
        clauses.push("is_active = 1".into());
    }
    if let Some(t) = filter.service_type {
        args.push(Value::Text(t.code().to_string()));
        clauses.push(format!("service_type = ?{}", args.len()));
    }
    if let Some(auto) = filter.auto_generate {
        args.push(Value::Integer(auto as i64));
        clauses.push(format!("auto_generate = ?{}", args.len()));
    }
    if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        // instr() avoids escaping LIKE wildcards in the search term.
        args.push(Value::Text(term.to_lowercase()));
        let n = args.len();
        clauses.push(format!(
            "(instr(lower(name), ?{n}) > 0 OR instr(lower(description), ?{n}) > 0)"
        ));
    }

    let sql = format!(
        "SELECT {SERVICE_COLUMNS} FROM services {}
         ORDER BY display_order ASC, service_type ASC, name ASC",
        where_clause(&clauses)
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args), map_service_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Delete a service. Events derived from it stay, with `source_service`
/// set to NULL. Returns false when no such service exists.
pub fn delete_service(conn: &mut Connection, id: i64) -> AppResult<bool> {
    let tx = conn.transaction()?;

    // Also covered by ON DELETE SET NULL, but connections opened without
    // `foreign_keys = ON` would otherwise leave dangling ids.
    tx.execute(
        "UPDATE derived_events SET source_service = NULL WHERE source_service = ?1",
        [id],
    )?;
    let deleted = tx.execute("DELETE FROM services WHERE id = ?1", [id])?;

    tx.commit()?;
    Ok(deleted > 0)
}

// ---------------------------------------------------------------------
// derived events
// ---------------------------------------------------------------------

/// Selection used by `events list` and `export`.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Only events dated strictly before this day.
    pub before: Option<NaiveDate>,
    pub include_inactive: bool,
    /// Only events derived from this service.
    pub source_service: Option<i64>,
    pub limit: Option<usize>,
}

impl EventFilter {
    /// What the public sermons page shows: active events before `today`,
    /// newest first.
    pub fn past(today: NaiveDate, limit: usize) -> Self {
        Self {
            before: Some(today),
            limit: Some(limit),
            ..Self::default()
        }
    }
}

pub fn load_events(conn: &Connection, filter: &EventFilter) -> AppResult<Vec<DerivedEvent>> {
    let mut clauses: Vec<String> = Vec::new();
    let mut args: Vec<Value> = Vec::new();

    if !filter.include_inactive {
        clauses.push("is_active = 1".into());
    }
    if let Some(d) = filter.before {
        args.push(Value::Text(d.format("%Y-%m-%d").to_string()));
        clauses.push(format!("event_date < ?{}", args.len()));
    }
    if let Some(id) = filter.source_service {
        args.push(Value::Integer(id));
        clauses.push(format!("source_service = ?{}", args.len()));
    }

    let limit_sql = filter
        .limit
        .map(|n| format!("LIMIT {n}"))
        .unwrap_or_default();

    let sql = format!(
        "SELECT {EVENT_COLUMNS} FROM derived_events {}
         ORDER BY event_date DESC, display_order ASC, id DESC {limit_sql}",
        where_clause(&clauses)
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args), map_event_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_event(conn: &Connection, id: i64) -> AppResult<Option<DerivedEvent>> {
    let sql = format!("SELECT {EVENT_COLUMNS} FROM derived_events WHERE id = ?1");
    let ev = conn.query_row(&sql, [id], map_event_row).optional()?;
    Ok(ev)
}

/// Returns false when no such event exists.
pub fn set_event_active(conn: &Connection, id: i64, active: bool) -> AppResult<bool> {
    let changed = conn.execute(
        "UPDATE derived_events SET is_active = ?1 WHERE id = ?2",
        params![active as i32, id],
    )?;
    Ok(changed > 0)
}

/// Returns false when no such event exists.
pub fn delete_event(conn: &Connection, id: i64) -> AppResult<bool> {
    let deleted = conn.execute("DELETE FROM derived_events WHERE id = ?1", [id])?;
    Ok(deleted > 0)
}
