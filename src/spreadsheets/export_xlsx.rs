use crate::errors::ServerError;
use crate::spreadsheets::{Cell, ExportRow};
use rust_xlsxwriter::{Format, Workbook};

/// One worksheet named `sheet`: a bold header row, then one row per record.
/// Numbers are written as numbers, missing numbers as blank cells.
pub fn export_xlsx<R: ExportRow>(rows: &[R], sheet: &str) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet)
        .map_err(|e| ServerError::ExportError(format!("Invalid sheet name '{sheet}': {e}")))?;

    let bold = Format::new().set_bold();

    for (col, header) in R::HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(|e| {
                ServerError::ExportError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;

        for (col, cell) in row.cells().into_iter().enumerate() {
            let c = col as u16;
            let written = match cell {
                Cell::Text(s) => worksheet.write_string(r, c, s).map(|_| ()),
                Cell::Number(Some(v)) if v.is_finite() => worksheet.write_number(r, c, v).map(|_| ()),
                Cell::Number(_) => Ok(()),
                Cell::Count(n) => worksheet.write_number(r, c, n as f64).map(|_| ()),
            };
            written.map_err(|e| {
                ServerError::ExportError(format!(
                    "Failed to write row {r} column '{}': {}",
                    R::HEADERS.get(col).copied().unwrap_or("?"),
                    e
                ))
            })?;
        }
    }

    worksheet.autofit();

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::ExportError(format!("Failed to save workbook: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::summary_row;

    #[test]
    fn workbook_is_a_zip_container() {
        let rows = vec![
            summary_row("apartment", "2", "1", Some(1350.0)),
            summary_row("condos", "1", "1", None),
        ];

        let bytes = export_xlsx(&rows, "Rent Summary").unwrap();

        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn rejects_unusable_sheet_name() {
        let rows = vec![summary_row("apartment", "2", "1", Some(1350.0))];
        let result = export_xlsx(&rows, "bad[name]");
        assert!(matches!(result, Err(ServerError::ExportError(_))));
    }
}
