use super::ask_confirmation;
use crate::cli::parser::{Commands, EventsAction};
use crate::config::Config;
use crate::core::events::EventLogic;
use crate::db::pool::DbPool;
use crate::db::queries::{self, EventFilter};
use crate::errors::{AppError, AppResult};
use crate::models::DerivedEvent;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{color_for_active, paint};
use crate::utils::table::Table;
use crate::utils::{date, truncate, yes_no};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Events { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        EventsAction::List {
            past,
            all,
            as_of,
            service,
            limit,
        } => {
            let mut filter = if *past {
                let today = date::reference_date(as_of.as_deref())?;
                EventFilter::past(today, limit.unwrap_or(cfg.past_events_limit))
            } else {
                EventFilter {
                    include_inactive: *all,
                    limit: *limit,
                    ..EventFilter::default()
                }
            };
            filter.source_service = *service;

            let events = EventLogic::list(&pool, &filter)?;
            header(
                &cfg.site_header,
                if *past { "Past events" } else { "Derived events" },
            );

            if events.is_empty() {
                info("No events found.");
                return Ok(());
            }
            print!("{}", render_events(&events));
        }

        EventsAction::Deactivate { id } => {
            EventLogic::set_active(&mut pool, *id, false)?;
            success(format!("Event #{} deactivated.", id));
        }

        EventsAction::Activate { id } => {
            EventLogic::set_active(&mut pool, *id, true)?;
            success(format!("Event #{} activated.", id));
        }

        EventsAction::Del { id, yes } => {
            let ev = queries::load_event(&pool.conn, *id)?
                .ok_or(AppError::NotFound { kind: "Event", id: *id })?;

            let prompt = format!(
                "Delete event #{} '{}'? This action is irreversible.",
                ev.id, ev.title
            );
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            EventLogic::delete(&mut pool, *id)?;
            success(format!("Event #{} '{}' deleted.", ev.id, ev.title));
        }
    }

    Ok(())
}

pub fn render_events(events: &[DerivedEvent]) -> String {
    let mut table = Table::with_headers(&["ID", "Date", "Title", "Service", "Active"]);

    for ev in events {
        table.add_row(vec![
            ev.id.to_string(),
            ev.date_str(),
            paint(color_for_active(ev.is_active), &truncate(&ev.title, 60)),
            ev.source_service
                .map(|id| format!("#{id}"))
                .unwrap_or_else(|| "--".to_string()),
            yes_no(ev.is_active).to_string(),
        ]);
    }

    table.render()
}
