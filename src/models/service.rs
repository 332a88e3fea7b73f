use super::service_type::ServiceType;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::Serialize;

/// A recurring church service as stored in the `services` table.
///
/// This is the definition of the service, not one occurrence of it.
/// `last_occurrence_date` is maintained by the operator; the deriver
/// only reads it.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceConfig {
    pub id: i64,
    pub name: String,
    pub service_type: ServiceType,
    pub schedule_text: String,
    pub description: String,
    pub last_occurrence_date: Option<NaiveDate>, // None ⇔ never run
    pub auto_generate: bool,
    pub is_active: bool,
    pub display_order: i32,
}

impl ServiceConfig {
    /// Build an unsaved service (`id = 0`) with the display defaults.
    pub fn new(name: &str, service_type: ServiceType) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            service_type,
            schedule_text: String::new(),
            description: String::new(),
            last_occurrence_date: None,
            auto_generate: false,
            is_active: true,
            display_order: 0,
        }
    }

    /// True when the recorded occurrence is strictly before `today`.
    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        self.last_occurrence_date.is_some_and(|d| d < today)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation(
                "service name must not be empty".into(),
            ));
        }
        Ok(())
    }
}
