use super::fs_utils::ensure_writable;
use super::model::EventExport;
use super::{ExportFormat, csv, json, notify_export_success};
use crate::db::pool::DbPool;
use crate::db::queries::{EventFilter, load_events};
use crate::errors::{AppError, AppResult};
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the derived events selected by `filter` to `file`.
    /// Returns the number of exported events.
    pub fn export(
        pool: &DbPool,
        format: &ExportFormat,
        file: &str,
        filter: &EventFilter,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            return Err(AppError::Export(format!(
                "directory '{}' does not exist",
                parent.display()
            )));
        }

        ensure_writable(path, force)?;

        let rows: Vec<EventExport> = load_events(&pool.conn, filter)?
            .iter()
            .map(EventExport::from)
            .collect();

        match format {
            ExportFormat::Csv => csv::write_csv(path, &rows)?,
            ExportFormat::Json => json::write_json(path, &rows)?,
        }

        notify_export_success(format.as_str(), path);
        Ok(rows.len())
    }
}
