mod download;
mod html;

pub use download::{download_response, ExportFormat};
pub use html::{html_response, html_with_status};
