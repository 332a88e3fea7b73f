use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::EventFilter;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        past,
        all,
        as_of,
        service,
        force,
    } = cmd
    {
        let mut filter = if *past {
            EventFilter::past(date::reference_date(as_of.as_deref())?, cfg.past_events_limit)
        } else {
            EventFilter {
                include_inactive: *all,
                ..EventFilter::default()
            }
        };
        filter.source_service = *service;

        let pool = DbPool::new(&cfg.database)?;
        let n = ExportLogic::export(&pool, format, file, &filter, *force)?;
        println!("{} event(s) exported.", n);
    }
    Ok(())
}
