//! CSV output

use crate::output::Table;
use crate::Result;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Writes a table as CSV: one header row, then one line per record, with
/// the configured placeholder standing in for absent values. The output is
/// UTF-8; quoting follows standard CSV rules.
pub fn write_csv(table: &Table, path: &Path, missing_value: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = fs::File::create(path)?;
    write_csv_to(table, file, missing_value)
}

fn write_csv_to<W: Write>(table: &Table, writer: W, missing_value: &str) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(table.columns())?;
    for row in table.rows() {
        csv.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or(missing_value)))?;
    }
    csv.flush()?;
    Ok(())
}
