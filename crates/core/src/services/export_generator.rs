use tracing::debug;

use crate::models::export::ExportFile;
use crate::models::price::PriceRow;

pub const CSV_EXTENSION: &str = "csv";
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

const DELIMITER: &str = ",";
const LINE_SEPARATOR: &str = "\n";

/// Serializes loaded price rows into a downloadable CSV file.
///
/// The output is a plain join: header line from `PriceRow::FIELDS`, then one
/// line per row, no trailing newline. Fields are NOT quoted or escaped, so a
/// value containing `,` or a newline (only possible in `Date`) shifts the
/// columns of that line. Missing numbers are written as empty fields.
pub struct ExportGenerator;

impl ExportGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Build `<symbol>_prices.csv` from `rows`.
    /// Returns `None` when there is nothing to export.
    #[must_use]
    pub fn build_export(&self, rows: &[PriceRow], symbol: &str) -> Option<ExportFile> {
        if rows.is_empty() {
            debug!(symbol, "nothing to export");
            return None;
        }

        let mut lines = Vec::with_capacity(rows.len() + 1);
        lines.push(PriceRow::FIELDS.join(DELIMITER));
        lines.extend(rows.iter().map(render_row));
        let content = lines.join(LINE_SEPARATOR);

        debug!(symbol, rows = rows.len(), bytes = content.len(), "built CSV export");

        Some(ExportFile {
            filename: export_filename(symbol),
            mime_type: CSV_MIME_TYPE.to_string(),
            content: content.into_bytes(),
        })
    }
}

impl Default for ExportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[must_use]
pub fn export_filename(symbol: &str) -> String {
    format!("{symbol}_prices.{CSV_EXTENSION}")
}

fn render_row(row: &PriceRow) -> String {
    let mut cells = Vec::with_capacity(PriceRow::FIELDS.len());
    cells.push(row.date.clone());
    cells.extend(row.values().iter().map(|v| render_cell(*v)));
    cells.join(DELIMITER)
}

fn render_cell(value: Option<f64>) -> String {
    match value {
        // -0.0 would otherwise print as "-0"
        Some(v) if v == 0.0 => "0".to_string(),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}
