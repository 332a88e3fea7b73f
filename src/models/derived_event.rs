use chrono::NaiveDate;
use serde::Serialize;

/// A past event materialized from one occurrence of a recurring service.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedEvent {
    pub id: i64,
    pub title: String,
    pub event_date: NaiveDate,          // ⇔ derived_events.event_date (TEXT "YYYY-MM-DD")
    pub source_service: Option<i64>,    // ⇔ services.id, NULL once the service is deleted
    pub description: String,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: String,             // ISO8601
}

impl DerivedEvent {
    pub fn date_str(&self) -> String {
        self.event_date.format("%Y-%m-%d").to_string()
    }
}

/// Fields for an event that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewDerivedEvent {
    pub title: String,
    pub event_date: NaiveDate,
    pub source_service: Option<i64>,
    pub description: String,
}
