use crate::db::log::audit_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries::{self, EventFilter};
use crate::errors::{AppError, AppResult};
use crate::models::DerivedEvent;

/// Operations on stored derived events (listing, visibility, deletion).
/// Creation belongs to the deriver only.
pub struct EventLogic;

impl EventLogic {
    pub fn list(pool: &DbPool, filter: &EventFilter) -> AppResult<Vec<DerivedEvent>> {
        queries::load_events(&pool.conn, filter)
    }

    pub fn set_active(pool: &mut DbPool, id: i64, active: bool) -> AppResult<()> {
        if !queries::set_event_active(&pool.conn, id, active)? {
            return Err(AppError::NotFound { kind: "Event", id });
        }

        let (op, verb) = if active {
            ("event_activate", "Activated")
        } else {
            ("event_deactivate", "Deactivated")
        };
        audit_or_warn(
            &pool.conn,
            op,
            &format!("event #{id}"),
            &format!("{verb} event #{id}"),
        );
        Ok(())
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<DerivedEvent> {
        let ev = queries::load_event(&pool.conn, id)?.ok_or(AppError::NotFound {
            kind: "Event",
            id,
        })?;

        queries::delete_event(&pool.conn, id)?;

        audit_or_warn(
            &pool.conn,
            "event_del",
            &format!("event #{id}"),
            &format!("Deleted event '{}'", ev.title),
        );
        Ok(ev)
    }
}
