//! Column realignment for export.
//!
//! The import skipped the workbook's first header row; the export has to give
//! it back. The normalized column names become a synthetic second header row,
//! the columns are renamed positionally to the original labels, and the "nan"
//! literals left by forced-text columns are cleared.

use crate::error::ScheduleError;
use crate::table::{ScheduleTable, Value};

/// Reshapes the normalized table into the layout the CAD re-import expects.
///
/// # Errors
///
/// A column-count mismatch between the raw header and the working table is a
/// configuration error, not something to mis-align silently.
pub fn realign(table: &mut ScheduleTable, raw_header: &[String]) -> Result<(), ScheduleError> {
    if raw_header.len() != table.width() {
        return Err(ScheduleError::HeaderMismatch {
            expected: raw_header.len(),
            found: table.width(),
        });
    }

    let names: Vec<Value> = table
        .columns()
        .iter()
        .map(|name| Value::Text(name.to_owned()))
        .collect();
    table.prepend_row(names);
    table.rename_columns(raw_header.to_vec());
    table.map_cells(|value| match value {
        Value::Text(text) if text == "nan" => Value::Text(String::new()),
        other => other,
    });
    Ok(())
}
