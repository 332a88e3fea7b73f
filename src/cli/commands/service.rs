use super::ask_confirmation;
use crate::cli::parser::{Commands, ServiceAction, ServiceFields};
use crate::config::Config;
use crate::core::services::{ServiceLogic, ServiceUpdate};
use crate::db::pool::DbPool;
use crate::db::queries::ServiceFilter;
use crate::errors::{AppError, AppResult};
use crate::models::{ServiceConfig, ServiceType};
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{color_for_active, color_for_past_due, paint};
use crate::utils::table::Table;
use crate::utils::{date, truncate, yes_no};
use chrono::NaiveDate;

fn parse_type(code: &str) -> AppResult<ServiceType> {
    ServiceType::from_code(code).ok_or_else(|| {
        AppError::InvalidServiceType(format!(
            "'{}'. Use one of: sunday, midweek, youth, special",
            code
        ))
    })
}

fn parse_last(s: &Option<String>) -> AppResult<Option<NaiveDate>> {
    s.as_ref()
        .map(|s| date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone())))
        .transpose()
}

/// `--flag` / `--no-flag` pair → tri-state.
fn tri_state(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Service { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        ServiceAction::Add {
            name,
            fields,
            auto,
            inactive,
        } => {
            let service_type = match &fields.service_type {
                Some(code) => parse_type(code)?,
                None => ServiceType::Sunday,
            };

            let mut svc = ServiceConfig::new(name, service_type);
            svc.schedule_text = fields.schedule.clone().unwrap_or_default();
            svc.description = fields.description.clone().unwrap_or_default();
            svc.last_occurrence_date = parse_last(&fields.last)?;
            svc.auto_generate = *auto;
            svc.is_active = !*inactive;
            svc.display_order = fields.order.unwrap_or(0);

            let id = ServiceLogic::add(&mut pool, &svc)?;
            success(format!("Service #{} '{}' registered.", id, svc.name.trim()));
        }

        ServiceAction::List {
            all,
            service_type,
            auto,
            no_auto,
            search,
        } => {
            let filter = ServiceFilter {
                include_inactive: *all,
                service_type: service_type.as_deref().map(parse_type).transpose()?,
                auto_generate: tri_state(*auto, *no_auto),
                search: search.clone(),
            };
            let services = ServiceLogic::list(&pool, &filter)?;
            header(&cfg.site_header, "Services");

            if services.is_empty() {
                info("No services found.");
                return Ok(());
            }
            print!("{}", render_services(&services, date::today()));
        }

        ServiceAction::Edit {
            id,
            name,
            fields,
            clear_last,
            auto,
            no_auto,
            active,
            inactive,
        } => {
            let update = build_update(
                name,
                fields,
                *clear_last,
                (*auto, *no_auto),
                (*active, *inactive),
            )?;
            let svc = ServiceLogic::edit(&mut pool, *id, update)?;
            success(format!("Service #{} '{}' updated.", svc.id, svc.name));
        }

        ServiceAction::Del { id, yes } => {
            let svc = ServiceLogic::get(&pool, *id)?;

            let prompt = format!(
                "Delete service #{} '{}'? Derived events are kept but unlinked.",
                svc.id, svc.name
            );
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            ServiceLogic::delete(&mut pool, *id)?;
            success(format!("Service #{} '{}' deleted.", svc.id, svc.name));
        }
    }

    Ok(())
}

fn build_update(
    name: &Option<String>,
    fields: &ServiceFields,
    clear_last: bool,
    auto: (bool, bool),
    active: (bool, bool),
) -> AppResult<ServiceUpdate> {
    Ok(ServiceUpdate {
        name: name.clone(),
        service_type: fields.service_type.as_deref().map(parse_type).transpose()?,
        schedule_text: fields.schedule.clone(),
        description: fields.description.clone(),
        last_occurrence_date: parse_last(&fields.last)?,
        clear_last_occurrence: clear_last,
        auto_generate: tri_state(auto.0, auto.1),
        is_active: tri_state(active.0, active.1),
        display_order: fields.order,
    })
}

/// Services table; past-due dates in yellow, inactive rows grey.
pub fn render_services(services: &[ServiceConfig], today: NaiveDate) -> String {
    let mut table = Table::with_headers(&[
        "ID", "Name", "Type", "Schedule", "Last", "Auto", "Past due", "Active", "Order",
    ]);

    for s in services {
        let row_color = color_for_active(s.is_active);
        let past_due = s.is_past_due(today);

        table.add_row(vec![
            s.id.to_string(),
            paint(row_color, &truncate(&s.name, 40)),
            s.service_type.code().to_string(),
            truncate(&s.schedule_text, 30),
            paint(
                color_for_past_due(past_due),
                &date::format_optional(s.last_occurrence_date),
            ),
            yes_no(s.auto_generate).to_string(),
            yes_no(past_due).to_string(),
            yes_no(s.is_active).to_string(),
            s.display_order.to_string(),
        ]);
    }

    table.render()
}
