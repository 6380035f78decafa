//! # Workbook Ingestion
//!
//! Reads the door-schedule worksheet once via calamine and splits it into the
//! two artifacts the rest of the pipeline works with: the raw header row (the
//! worksheet's first row, needed again at export time) and the working table
//! (named after the second header row, holding the data rows beneath it).

use crate::error::ScheduleError;
use crate::table::{ScheduleTable, Value};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::collections::HashMap;
use std::path::Path;

/// The original file's true header row, captured before the second header row
/// takes over as the working column names.
pub type RawHeaderRow = Vec<String>;

/// A sparsely-populated worksheet with its data boundaries.
///
/// Cells are stored in reading order with a position index for lookup; gaps
/// are materialized as missing values only when the working table is built.
#[derive(Debug)]
pub struct Sheet {
    name: String,
    row_lower_bound: usize,
    row_upper_bound: usize,
    column_lower_bound: usize,
    column_upper_bound: usize,
    values: Vec<Value>,
    indexes: HashMap<(usize, usize), usize>,
}

/// Convert 0-based row & column indexes to an Excel-style cell position.
pub fn cell_position(row: usize, column: usize) -> String {
    let row = (row + 1).to_string();
    let mut column: u32 = column as u32 + 1;
    let mut position = String::new();
    while column > 0 {
        column -= 1;
        let digit = char::from_u32(65 + column % 26).expect("Hardcode letters");
        column /= 26;
        position.insert(0, digit)
    }
    position.push_str(row.as_str());
    position
}

/// Opens the workbook at `path` and loads the named worksheet.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed, if the worksheet
/// does not exist, or if it holds no data at all.
pub fn open_schedule<P: AsRef<Path>>(path: P, sheet_name: &str) -> Result<Sheet, ScheduleError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
        return Err(ScheduleError::SheetNotFound {
            name: sheet_name.to_owned(),
        });
    }

    let range = workbook.worksheet_range(sheet_name)?;
    if range.is_empty() {
        return Err(ScheduleError::EmptySheet {
            name: sheet_name.to_owned(),
        });
    }

    let start = range
        .start()
        .map(|(row, column)| (row as usize, column as usize))
        .expect("non-empty range");
    let end = range
        .end()
        .map(|(row, column)| (row as usize, column as usize))
        .expect("non-empty range");

    let mut values = Vec::new();
    let mut indexes = HashMap::new();
    for (row, column, data) in range.used_cells() {
        indexes.insert((start.0 + row, start.1 + column), values.len());
        values.push(to_value(data));
    }

    Ok(Sheet {
        name: sheet_name.to_owned(),
        row_lower_bound: start.0,
        row_upper_bound: end.0,
        column_lower_bound: start.1,
        column_upper_bound: end.1,
        values,
        indexes,
    })
}

impl Sheet {
    /// Builds a sheet directly from dense rows anchored at the origin.
    #[cfg(test)]
    pub(crate) fn from_rows(name: &str, rows: Vec<Vec<Value>>) -> Self {
        let mut values = Vec::new();
        let mut indexes = HashMap::new();
        let mut column_upper_bound = 0;
        for (row, cells) in rows.iter().enumerate() {
            column_upper_bound = column_upper_bound.max(cells.len().saturating_sub(1));
            for (column, value) in cells.iter().enumerate() {
                indexes.insert((row, column), values.len());
                values.push(value.clone());
            }
        }
        Self {
            name: name.to_owned(),
            row_lower_bound: 0,
            row_upper_bound: rows.len().saturating_sub(1),
            column_lower_bound: 0,
            column_upper_bound,
            values,
            indexes,
        }
    }

    fn get(&self, row: usize, column: usize) -> Option<&Value> {
        self.indexes
            .get(&(row, column))
            .and_then(|index| self.values.get(*index))
    }

    fn columns(&self) -> std::ops::RangeInclusive<usize> {
        self.column_lower_bound..=self.column_upper_bound
    }

    /// Splits the sheet into the raw header row and the working table.
    ///
    /// The raw header keeps its cell texts verbatim (empty cells stay empty);
    /// the working table takes its column names from the second row, falling
    /// back to generated `column{n}` names for gaps, and its data rows from
    /// the third row onward.
    pub fn import(self) -> Result<(RawHeaderRow, ScheduleTable), ScheduleError> {
        let header_row = self.row_lower_bound;
        let working_header_row = header_row + 1;
        if working_header_row > self.row_upper_bound {
            return Err(ScheduleError::MissingHeaderRow { name: self.name });
        }

        let raw_header: RawHeaderRow = self
            .columns()
            .map(|column| {
                self.get(header_row, column)
                    .map(ToString::to_string)
                    .unwrap_or_default()
            })
            .collect();

        let columns: Vec<String> = self
            .columns()
            .map(|column| {
                match self.get(working_header_row, column) {
                    Some(value) if !value.is_missing() => value.to_string(),
                    // Default name convention for unnamed columns
                    _ => format!("column{}", column - self.column_lower_bound + 1),
                }
            })
            .collect();

        let rows: Vec<Vec<Value>> = ((working_header_row + 1)..=self.row_upper_bound)
            .map(|row| {
                self.columns()
                    .map(|column| self.get(row, column).cloned().unwrap_or(Value::Missing))
                    .collect()
            })
            .collect();

        Ok((raw_header, ScheduleTable::new(columns, rows)))
    }
}

/// Maps a calamine cell onto the pipeline's value model.
///
/// Datetime cells are rendered as text up front (the schedule treats them as
/// labels, not quantities); error cells degrade to missing.
fn to_value(data: &Data) -> Value {
    match data {
        Data::Empty => Value::Missing,
        Data::Int(number) => Value::Int(*number),
        Data::Float(number) => Value::Float(*number),
        Data::String(text) => Value::Text(text.to_owned()),
        Data::Bool(value) => Value::Text(value.to_string()),
        Data::DateTime(datetime) => match datetime.as_datetime() {
            Some(datetime) if datetime.time() == chrono::NaiveTime::MIN => {
                Value::Text(datetime.date().format("%Y-%m-%d").to_string())
            }
            Some(datetime) => Value::Text(datetime.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => Value::Float(datetime.as_f64()),
        },
        Data::DateTimeIso(text) => Value::Text(text.to_owned()),
        Data::DurationIso(text) => Value::Text(text.to_owned()),
        Data::Error(_) => Value::Missing,
    }
}
