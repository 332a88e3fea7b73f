use super::model::EventExport;
use crate::errors::AppResult;
use std::path::Path;

/// Write the events as pretty-printed JSON.
pub fn write_json(path: &Path, events: &[EventExport]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(events)?;
    std::fs::write(path, json)?;
    Ok(())
}
