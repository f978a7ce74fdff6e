use crate::errors::ServerError;
use crate::spreadsheets::{Cell, ExportRow};
use csv::Writer;

/// Header row plus one row per record.
pub fn export_csv<R: ExportRow>(rows: &[R]) -> Result<Vec<u8>, ServerError> {
    let mut writer = Writer::from_writer(Vec::new());

    writer
        .write_record(R::HEADERS)
        .map_err(|e| ServerError::ExportError(format!("Failed to write CSV header: {e}")))?;

    for row in rows {
        writer
            .write_record(row.cells().iter().map(Cell::csv_field))
            .map_err(|e| ServerError::ExportError(format!("Failed to write CSV row: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| ServerError::ExportError(format!("Failed to flush CSV: {e}")))
}
