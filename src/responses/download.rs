// responses/download.rs
use crate::errors::{ResultResp, ServerError};
use astra::{Body, ResponseBuilder};

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn content_type(&self) -> String {
        match self {
            ExportFormat::Csv => mime::TEXT_CSV_UTF_8.to_string(),
            ExportFormat::Xlsx => XLSX_CONTENT_TYPE.to_string(),
        }
    }

    /// `"csv"` or `"xlsx"`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "csv" => Some(ExportFormat::Csv),
            "xlsx" => Some(ExportFormat::Xlsx),
            _ => None,
        }
    }
}

/// Return a file as an attachment download.
pub fn download_response(buffer: Vec<u8>, format: ExportFormat, stem: &str) -> ResultResp {
    let filename = format!("{stem}.{}", format.extension());

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", format.content_type())
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(buffer))
        .map_err(|_| ServerError::InternalError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_download_headers() {
        let resp =
            download_response(b"a,b\n".to_vec(), ExportFormat::Csv, "rent_summary_63122").unwrap();

        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "text/csv; charset=utf-8");
        assert_eq!(
            resp.headers()["Content-Disposition"],
            "attachment; filename=\"rent_summary_63122.csv\""
        );
    }

    #[test]
    fn extensions_round_trip() {
        for format in [ExportFormat::Csv, ExportFormat::Xlsx] {
            assert_eq!(ExportFormat::from_extension(format.extension()), Some(format));
        }
        assert_eq!(ExportFormat::from_extension("pdf"), None);
    }
}
