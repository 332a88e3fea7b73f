//! Past-event derivation from recurring services.
//!
//! A service produces at most one derived event per occurrence date. The
//! duplicate check is a substring match on the title combined with an exact
//! date match, so a renamed service ("Kiswahili Service" → "Kiswahili
//! Service (Main)") no longer recognizes its earlier events.

use crate::db::store::EventStore;
use crate::errors::AppResult;
use crate::models::{NewDerivedEvent, ServiceConfig};
use crate::utils::date;
use chrono::NaiveDate;
use serde::Serialize;

pub const DEFAULT_DESCRIPTION_PREFIX: &str = "Past service: ";

/// Title of the event derived from `service` for `date`,
/// e.g. `English Service - February 11, 2024`.
pub fn event_title(service_name: &str, date: NaiveDate) -> String {
    format!("{} - {}", service_name, date::format_long(date))
}

/// One service whose derivation failed inside a batch.
#[derive(Debug, Clone, Serialize)]
pub struct DeriveFailure {
    pub service_id: i64,
    pub service_name: String,
    pub error: String,
}

/// Outcome of [`EventDeriver::derive_all_due`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub created: usize,
    pub skipped: usize,
    pub failures: Vec<DeriveFailure>,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

pub struct EventDeriver {
    today: NaiveDate,
    description_prefix: String,
}

impl EventDeriver {
    /// Deriver evaluating "past due" against `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            description_prefix: DEFAULT_DESCRIPTION_PREFIX.to_string(),
        }
    }

    pub fn with_description_prefix(mut self, prefix: &str) -> Self {
        self.description_prefix = prefix.to_string();
        self
    }

    /// Create the past event for `service` if it is due.
    ///
    /// Returns `Ok(false)` without touching the store when auto-generation
    /// is off, no occurrence is recorded, the occurrence is today or later,
    /// or a matching event already exists. The service itself is never
    /// modified.
    pub fn derive_if_due<S: EventStore + ?Sized>(
        &self,
        store: &mut S,
        service: &ServiceConfig,
    ) -> AppResult<bool> {
        if !service.auto_generate {
            return Ok(false);
        }

        let Some(occurred) = service.last_occurrence_date else {
            return Ok(false);
        };

        if occurred >= self.today {
            return Ok(false);
        }

        if store.exists_event(&service.name, occurred)? {
            return Ok(false);
        }

        store.insert_event(NewDerivedEvent {
            title: event_title(&service.name, occurred),
            event_date: occurred,
            source_service: Some(service.id),
            description: format!("{}{}", self.description_prefix, service.description),
        })?;

        Ok(true)
    }

    /// Run [`derive_if_due`](Self::derive_if_due) for every service.
    ///
    /// A failing service is recorded in the report and the batch goes on.
    pub fn derive_all_due<S: EventStore + ?Sized>(
        &self,
        store: &mut S,
        services: &[ServiceConfig],
    ) -> BatchReport {
        let mut report = BatchReport::default();

        for service in services {
            match self.derive_if_due(store, service) {
                Ok(true) => report.created += 1,
                Ok(false) => report.skipped += 1,
                Err(e) => report.failures.push(DeriveFailure {
                    service_id: service.id,
                    service_name: service.name.clone(),
                    error: e.to_string(),
                }),
            }
        }

        report
    }
}
