use crate::models::DerivedEvent;
use crate::utils::date::format_long;
use serde::Serialize;

/// Flat, read-only view of a derived event, shaped like the public API
/// payload (raw date plus a display date).
#[derive(Debug, Clone, Serialize)]
pub struct EventExport {
    pub id: i64,
    pub title: String,
    pub event_date: String,
    pub formatted_date: String,
    pub source_service: Option<i64>,
    pub description: String,
    pub is_active: bool,
    pub created_at: String,
}

impl From<&DerivedEvent> for EventExport {
    fn from(ev: &DerivedEvent) -> Self {
        Self {
            id: ev.id,
            title: ev.title.clone(),
            event_date: ev.date_str(),
            formatted_date: format_long(ev.event_date),
            source_service: ev.source_service,
            description: ev.description.clone(),
            is_active: ev.is_active,
            created_at: ev.created_at.clone(),
        }
    }
}
