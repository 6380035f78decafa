//! In-memory model of the door schedule: an ordered sequence of named columns
//! over rows of heterogeneous cell values.

use std::fmt::Display;

/// A single cell value as it exists between the pipeline stages.
///
/// Input cells are heterogeneous: numbers, numeric-looking strings with
/// locale-variant separators, placeholder strings, or nothing at all.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Absent or unparseable-as-required data (pandas' NaN counterpart)
    Missing,
    /// Integer-valued numbers, including coerced integral floats
    Int(i64),
    /// Numbers with a fractional part
    Float(f64),
    /// Everything textual
    Text(String),
}

impl Value {
    /// Returns true for the missing sentinel.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Numeric view of the cell; text and missing cells have none.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(number) => Some(*number as f64),
            Self::Float(number) => Some(*number),
            _ => None,
        }
    }

    /// Text rendering used when a whole column is forced to strings.
    /// Missing values take the literal "nan" so the export realignment can
    /// recognize and clear them afterwards.
    pub fn to_forced_text(&self) -> String {
        match self {
            Self::Missing => "nan".to_owned(),
            // A coerced "nan" literal round-trips as a NaN float; keep the
            // lowercase spelling so it stays recognizable
            Self::Float(number) if number.is_nan() => "nan".to_owned(),
            other => other.to_string(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => Ok(()),
            Self::Int(number) => write!(f, "{number}"),
            Self::Float(number) => write!(f, "{number}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

/// The working table of the door schedule.
///
/// Column order is significant: it must survive the pipeline unchanged so the
/// export can be renamed positionally back to the original header labels.
/// Rows are kept rectangular; short rows are padded with [`Value::Missing`].
#[derive(Clone, Debug)]
pub struct ScheduleTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl ScheduleTable {
    /// Creates a table from column names and rows, padding or truncating every
    /// row to the column count.
    pub fn new(columns: Vec<String>, mut rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        for row in &mut rows {
            row.resize(width, Value::Missing);
        }
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Index of the first column with the given name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn cell(&self, row: usize, column: usize) -> &Value {
        &self.rows[row][column]
    }

    pub fn cell_mut(&mut self, row: usize, column: usize) -> &mut Value {
        &mut self.rows[row][column]
    }

    /// Iterates the cells of one column, top to bottom.
    pub fn column_values(&self, column: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().map(move |row| &row[column])
    }

    /// Overwrites an existing column in place. `values` must match the height.
    pub fn replace_column(&mut self, column: usize, values: Vec<Value>) {
        debug_assert_eq!(values.len(), self.height());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[column] = value;
        }
    }

    /// Writes a named column: overwrites it when present, appends it at the
    /// end otherwise. Shorter value vectors are padded with missing cells.
    pub fn upsert_column(&mut self, name: &str, mut values: Vec<Value>) {
        values.resize(self.height(), Value::Missing);
        match self.column_index(name) {
            Some(column) => self.replace_column(column, values),
            None => {
                self.columns.push(name.to_owned());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
    }

    /// Rewrites every cell of one column through `transform`.
    pub fn map_column(&mut self, column: usize, mut transform: impl FnMut(Value) -> Value) {
        for row in &mut self.rows {
            let value = std::mem::replace(&mut row[column], Value::Missing);
            row[column] = transform(value);
        }
    }

    /// Rewrites every cell of the table through `transform`.
    pub fn map_cells(&mut self, mut transform: impl FnMut(Value) -> Value) {
        for row in &mut self.rows {
            for cell in row {
                let value = std::mem::replace(cell, Value::Missing);
                *cell = transform(value);
            }
        }
    }

    /// Inserts a row before all existing rows, shifting them down by one.
    pub fn prepend_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.width(), Value::Missing);
        self.rows.insert(0, row);
    }

    /// Relabels the columns positionally. The caller validates the count.
    pub fn rename_columns(&mut self, columns: Vec<String>) {
        debug_assert_eq!(columns.len(), self.width());
        self.columns = columns;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(Vec::as_slice)
    }
}
