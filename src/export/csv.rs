use super::model::EventExport;
use crate::errors::AppResult;
use csv::Writer;
use std::path::Path;

/// Write the events as CSV with a header row.
pub fn write_csv(path: &Path, events: &[EventExport]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;

    for ev in events {
        wtr.serialize(ev)?;
    }

    // header is only emitted by serialize(); keep it for empty exports too
    if events.is_empty() {
        wtr.write_record([
            "id",
            "title",
            "event_date",
            "formatted_date",
            "source_service",
            "description",
            "is_active",
            "created_at",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
