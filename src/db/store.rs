//! Event store boundary used by the deriver.

use crate::errors::{AppError, AppResult};
use crate::models::{DerivedEvent, NewDerivedEvent};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, params};

/// Persistence contract the deriver needs: a duplicate check and an insert.
///
/// Implementations report failures as [`AppError::Persistence`].
pub trait EventStore {
    /// True when some event dated `event_date` has a title containing
    /// `title_substring` (case-sensitive).
    fn exists_event(&self, title_substring: &str, event_date: NaiveDate) -> AppResult<bool>;

    /// Store a new active event and return it as persisted.
    fn insert_event(&mut self, fields: NewDerivedEvent) -> AppResult<DerivedEvent>;
}

/// [`EventStore`] over the `derived_events` table.
pub struct SqliteEventStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteEventStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl EventStore for SqliteEventStore<'_> {
    fn exists_event(&self, title_substring: &str, event_date: NaiveDate) -> AppResult<bool> {
        // instr() is case-sensitive, LIKE is not.
        let mut stmt = self
            .conn
            .prepare_cached(
                "SELECT 1 FROM derived_events
                 WHERE event_date = ?1 AND instr(title, ?2) > 0
                 LIMIT 1",
            )
            .map_err(AppError::persistence)?;

        stmt.exists(params![event_date.format("%Y-%m-%d").to_string(), title_substring])
            .map_err(AppError::persistence)
    }

    fn insert_event(&mut self, fields: NewDerivedEvent) -> AppResult<DerivedEvent> {
        let created_at = Local::now().to_rfc3339();

        self.conn
            .execute(
                "INSERT INTO derived_events
                     (title, event_date, source_service, description, is_active, display_order, created_at)
                 VALUES (?1, ?2, ?3, ?4, 1, 0, ?5)",
                params![
                    fields.title,
                    fields.event_date.format("%Y-%m-%d").to_string(),
                    fields.source_service,
                    fields.description,
                    created_at,
                ],
            )
            .map_err(AppError::persistence)?;

        // No read-back: once the INSERT succeeds the event exists.
        Ok(DerivedEvent {
            id: self.conn.last_insert_rowid(),
            title: fields.title,
            event_date: fields.event_date,
            source_service: fields.source_service,
            description: fields.description,
            is_active: true,
            display_order: 0,
            created_at,
        })
    }
}
