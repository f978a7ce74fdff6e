mod export_csv;
mod export_xlsx;
mod table;

pub use export_csv::export_csv;
pub use export_xlsx::export_xlsx;
pub use table::{Cell, ExportRow};
