//! Measurement derivation.
//!
//! Source measurements are recorded in meters with locale-variant decimal
//! notation; the CAD re-import expects integer millimeter strings with an
//! explicit placeholder for absent data. The same derivation runs over four
//! column pairs and is idempotent: the placeholder survives re-coercion as
//! missing and numeric sources are stable after the first strict pass.

use crate::error::ScheduleError;
use crate::pipeline::coerce::{coerce, normalize_numeric};
use crate::table::{ScheduleTable, Value};

/// Rendered in the destination column when the source has no numeric value.
pub const PLACEHOLDER: &str = "---";

/// The clear-width source column; its placeholder cells are blanked before
/// coercion begins.
pub const PRIMARY_WIDTH_COLUMN: &str = "Breite Lichtmass";

/// (source, destination) column pairs, derived in this order.
pub const MEASUREMENTS: &[(&str, &str)] = &[
    (
        "Breite Lichtmass",
        "Lichtes Durchgangsmass Breite in mm (Zeichenfolge)",
    ),
    (
        "Höhe Lichtmass",
        "Lichtes Durchgangsmass Höhe in mm (Zeichenfolge)",
    ),
    ("Breite Rohbau", "Rohbaumass Breite in mm (Zeichenfolge)"),
    ("Höhe Rohbau", "Rohbaumass Höhe in mm (Zeichenfolge)"),
];

/// Strict numeric coercion: whatever still fails to read as a number after
/// best-effort coercion becomes missing.
fn to_strict_numeric(value: Value) -> Value {
    match coerce(value) {
        Value::Int(number) => Value::Int(number),
        Value::Float(number) if number.is_nan() => Value::Missing,
        Value::Float(number) => Value::Float(number),
        _ => Value::Missing,
    }
}

/// Converts one meter measurement to its millimeter display string.
fn to_millimeter_string(value: &Value) -> Value {
    let derived = match value.as_number() {
        Some(number) => normalize_numeric(Value::Float((number * 1000.0).round())),
        None => Value::Missing,
    };
    match derived {
        Value::Missing => Value::Text(PLACEHOLDER.to_owned()),
        number => Value::Text(number.to_string()),
    }
}

/// Derives `destination` from `source`, overwriting both: the source column
/// is left strictly numeric, the destination holds millimeter strings.
pub fn derive_column(
    table: &mut ScheduleTable,
    source: &str,
    destination: &str,
) -> Result<(), ScheduleError> {
    let column = table
        .column_index(source)
        .ok_or_else(|| ScheduleError::MissingColumn {
            name: source.to_owned(),
        })?;

    let numeric: Vec<Value> = table
        .column_values(column)
        .map(|value| to_strict_numeric(value.clone()))
        .collect();
    let derived: Vec<Value> = numeric.iter().map(to_millimeter_string).collect();

    table.replace_column(column, numeric);
    table.upsert_column(destination, derived);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Value {
        Value::Text(value.to_owned())
    }

    fn table(cells: Vec<Value>) -> ScheduleTable {
        ScheduleTable::new(
            vec!["Breite Lichtmass".to_owned()],
            cells.into_iter().map(|cell| vec![cell]).collect(),
        )
    }

    fn derived(table: &ScheduleTable, row: usize) -> &Value {
        let column = table.column_index("mm").unwrap();
        table.cell(row, column)
    }

    #[test]
    fn numeric_law() {
        let mut table = table(vec![text("0,9"), Value::Float(1.0), Value::Int(2)]);
        derive_column(&mut table, "Breite Lichtmass", "mm").unwrap();

        assert_eq!(*derived(&table, 0), text("900"));
        assert_eq!(*derived(&table, 1), text("1000"));
        assert_eq!(*derived(&table, 2), text("2000"));
    }

    #[test]
    fn placeholder_law() {
        let mut table = table(vec![Value::Missing, text("abc"), Value::Float(f64::NAN)]);
        derive_column(&mut table, "Breite Lichtmass", "mm").unwrap();

        for row in 0..3 {
            assert_eq!(*derived(&table, row), text("---"));
        }
    }

    #[test]
    fn source_column_is_left_strictly_numeric() {
        let mut table = table(vec![text("0,9"), text("abc")]);
        derive_column(&mut table, "Breite Lichtmass", "mm").unwrap();

        assert_eq!(*table.cell(0, 0), Value::Float(0.9));
        assert_eq!(*table.cell(1, 0), Value::Missing);
    }

    #[test]
    fn derivation_is_idempotent() {
        let mut table = table(vec![text("2,25"), text("---"), Value::Missing]);
        derive_column(&mut table, "Breite Lichtmass", "mm").unwrap();
        let first: Vec<Value> = (0..3).map(|row| derived(&table, row).clone()).collect();

        derive_column(&mut table, "Breite Lichtmass", "mm").unwrap();
        let second: Vec<Value> = (0..3).map(|row| derived(&table, row).clone()).collect();
        assert_eq!(first, second);
        assert_eq!(first[0], text("2250"));
        assert_eq!(first[1], text("---"));
    }

    #[test]
    fn existing_destination_column_is_overwritten() {
        let mut table = ScheduleTable::new(
            vec!["Breite Lichtmass".to_owned(), "mm".to_owned()],
            vec![vec![text("1,5"), text("stale")]],
        );
        derive_column(&mut table, "Breite Lichtmass", "mm").unwrap();
        assert_eq!(table.width(), 2);
        assert_eq!(*table.cell(0, 1), text("1500"));
    }

    #[test]
    fn missing_source_column_is_an_error() {
        let mut table = table(vec![text("1")]);
        assert!(matches!(
            derive_column(&mut table, "Höhe Lichtmass", "mm"),
            Err(ScheduleError::MissingColumn { .. })
        ));
    }
}
