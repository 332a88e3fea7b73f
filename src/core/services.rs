use crate::db::log::audit_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries::{self, ServiceFilter};
use crate::errors::{AppError, AppResult};
use crate::models::{ServiceConfig, ServiceType};
use chrono::NaiveDate;

/// Field changes for `service edit`. `None` leaves a field untouched.
#[derive(Debug, Default, Clone)]
pub struct ServiceUpdate {
    pub name: Option<String>,
    pub service_type: Option<ServiceType>,
    pub schedule_text: Option<String>,
    pub description: Option<String>,
    pub last_occurrence_date: Option<NaiveDate>,
    pub clear_last_occurrence: bool,
    pub auto_generate: Option<bool>,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
}

impl ServiceUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.service_type.is_none()
            && self.schedule_text.is_none()
            && self.description.is_none()
            && self.last_occurrence_date.is_none()
            && !self.clear_last_occurrence
            && self.auto_generate.is_none()
            && self.is_active.is_none()
            && self.display_order.is_none()
    }

    fn apply_to(self, svc: &mut ServiceConfig) {
        if let Some(v) = self.name {
            svc.name = v.trim().to_string();
        }
        if let Some(v) = self.service_type {
            svc.service_type = v;
        }
        if let Some(v) = self.schedule_text {
            svc.schedule_text = v;
        }
        if let Some(v) = self.description {
            svc.description = v;
        }
        if self.clear_last_occurrence {
            svc.last_occurrence_date = None;
        }
        if let Some(v) = self.last_occurrence_date {
            svc.last_occurrence_date = Some(v);
        }
        if let Some(v) = self.auto_generate {
            svc.auto_generate = v;
        }
        if let Some(v) = self.is_active {
            svc.is_active = v;
        }
        if let Some(v) = self.display_order {
            svc.display_order = v;
        }
    }
}

/// Service registry operations behind the `service` command.
pub struct ServiceLogic;

impl ServiceLogic {
    pub fn add(pool: &mut DbPool, svc: &ServiceConfig) -> AppResult<i64> {
        let id = queries::insert_service(&pool.conn, svc)?;

        audit_or_warn(
            &pool.conn,
            "service_add",
            &format!("service #{id}"),
            &format!("Registered service '{}'", svc.name.trim()),
        );

        Ok(id)
    }

    pub fn get(pool: &DbPool, id: i64) -> AppResult<ServiceConfig> {
        queries::load_service(&pool.conn, id)?.ok_or(AppError::NotFound {
            kind: "Service",
            id,
        })
    }

    pub fn list(pool: &DbPool, filter: &ServiceFilter) -> AppResult<Vec<ServiceConfig>> {
        queries::load_services(&pool.conn, filter)
    }

    pub fn edit(pool: &mut DbPool, id: i64, update: ServiceUpdate) -> AppResult<ServiceConfig> {
        if update.is_empty() {
            return Err(AppError::Validation("nothing to update".into()));
        }

        let mut svc = Self::get(pool, id)?;
        update.apply_to(&mut svc);
        queries::update_service(&pool.conn, &svc)?;

        audit_or_warn(
            &pool.conn,
            "service_edit",
            &format!("service #{id}"),
            &format!("Updated service '{}'", svc.name),
        );

        Ok(svc)
    }

    /// Delete a service; its derived events are kept and unlinked.
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        let svc = Self::get(pool, id)?;

        if !queries::delete_service(&mut pool.conn, id)? {
            return Err(AppError::NotFound {
                kind: "Service",
                id,
            });
        }

        audit_or_warn(
            &pool.conn,
            "service_del",
            &format!("service #{id}"),
            &format!("Deleted service '{}'", svc.name),
        );

        Ok(())
    }

    /// Services a `derive` run should consider: the given ids, or every
    /// service with auto-generation on when `ids` is empty.
    pub fn select_for_derivation(pool: &DbPool, ids: &[i64]) -> AppResult<Vec<ServiceConfig>> {
        if ids.is_empty() {
            return queries::load_services(&pool.conn, &ServiceFilter::auto_generating());
        }

        ids.iter().map(|id| Self::get(pool, *id)).collect()
    }
}
