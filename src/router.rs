use crate::errors::{ResultResp, ServerError};
use crate::pipeline::{run_search, Geocoding};
use crate::responses::{download_response, html_response, ExportFormat};
use crate::spreadsheets::{export_csv, export_xlsx, ExportRow};
use crate::state::AppState;
use crate::templates::pages::{home_page, results_page};
use astra::Request;
use std::collections::HashMap;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    debug!(method, path, "Request");

    match (method, path) {
        ("GET", "/") => html_response(home_page()),
        ("GET", "/search") => {
            let zip = zip_param(&req)?;
            let results = run_search(state, &zip, Geocoding::Run);
            html_response(results_page(&results))
        }
        ("GET", p) if p.starts_with("/export/") => export(&req, &p["/export/".len()..], state),
        _ => Err(ServerError::NotFound),
    }
}

/// `/export/{table}.{csv|xlsx}?zip=NNNNN`
fn export(req: &Request, file: &str, state: &AppState) -> ResultResp {
    let (table, ext) = file.rsplit_once('.').ok_or(ServerError::NotFound)?;
    let format = ExportFormat::from_extension(ext).ok_or(ServerError::NotFound)?;
    if table != "rent-summary" && table != "investments" {
        return Err(ServerError::NotFound);
    }

    let zip = zip_param(req)?;
    let page_searched_at = parse_query(req)
        .get("searched")
        .and_then(|t| t.parse::<i64>().ok())
        .and_then(|t| DateTime::<Utc>::from_timestamp(t, 0));
    info!(
        zip = %zip,
        table,
        format = format.extension(),
        page_searched_at = ?page_searched_at,
        "Export re-fetches listings; rows may differ from the page they were linked from"
    );
    let results = run_search(state, &zip, Geocoding::Skip);

    match table {
        "rent-summary" => {
            let bytes = encode(&results.rent_summary, format, "Rent Summary")?;
            download_response(bytes, format, &format!("rent_summary_{zip}"))
        }
        _ => {
            let bytes = encode(&results.investments, format, "Investments")?;
            download_response(bytes, format, &format!("investments_{zip}"))
        }
    }
}

fn encode<R: ExportRow>(
    rows: &[R],
    format: ExportFormat,
    sheet: &str,
) -> Result<Vec<u8>, ServerError> {
    match format {
        ExportFormat::Csv => export_csv(rows),
        ExportFormat::Xlsx => export_xlsx(rows, sheet),
    }
}

fn zip_param(req: &Request) -> Result<String, ServerError> {
    let params = parse_query(req);
    let zip = params.get("zip").map(|z| z.trim()).unwrap_or("");
    validate_zip(zip)?;
    Ok(zip.to_string())
}

/// Exactly five ASCII digits.
pub fn validate_zip(zip: &str) -> Result<(), ServerError> {
    if zip.len() == 5 && zip.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ServerError::BadRequest(format!(
            "'{zip}' is not a 5-digit ZIP code"
        )))
    }
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_validation() {
        assert!(validate_zip("63122").is_ok());
        for bad in ["", "6312", "631222", "6312a", "６３１２２"] {
            assert!(
                matches!(validate_zip(bad), Err(ServerError::BadRequest(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
