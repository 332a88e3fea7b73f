use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::derive::{BatchReport, EventDeriver};
use crate::core::services::ServiceLogic;
use crate::db::log::audit_or_warn;
use crate::db::pool::DbPool;
use crate::db::store::SqliteEventStore;
use crate::errors::AppResult;
use crate::ui::messages::{error, header, info, success};
use crate::utils::date;

/// Handle the `derive` command: the operator-facing trigger for
/// past-event generation.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Derive { ids, as_of } = cmd {
        let today = date::reference_date(as_of.as_deref())?;

        let pool = DbPool::new(&cfg.database)?;
        let services = ServiceLogic::select_for_derivation(&pool, ids)?;

        header(&cfg.site_header, format!("Past events as of {}", today));

        if services.is_empty() {
            info("No services with automatic event generation.");
            return Ok(());
        }

        let deriver =
            EventDeriver::new(today).with_description_prefix(&cfg.event_description_prefix);
        let report = {
            let mut store = SqliteEventStore::new(&pool.conn);
            deriver.derive_all_due(&mut store, &services)
        };

        print_report(&report);

        audit_or_warn(
            &pool.conn,
            "derive",
            &format!("as of {}", today),
            &format!(
                "created={} skipped={} failed={}",
                report.created,
                report.skipped,
                report.failures.len()
            ),
        );
    }

    Ok(())
}

fn print_report(report: &BatchReport) {
    if report.created > 0 {
        success(format!("Created {} past event(s).", report.created));
    } else {
        info("No new past events were created.");
    }

    if report.skipped > 0 {
        info(format!("{} service(s) not due or already recorded.", report.skipped));
    }

    for f in &report.failures {
        error(format!(
            "Service #{} '{}' failed: {}",
            f.service_id, f.service_name, f.error
        ));
    }
}
