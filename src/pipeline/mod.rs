//! # Normalization Pipeline
//!
//! The fixed sequence of in-place transformations between import and export:
//!
//! 1. the `"---"` placeholder in the primary width column becomes missing,
//! 2. every cell of every column goes through best-effort coercion,
//! 3. the four measurement columns are derived (meters to millimeter strings),
//! 4. the wall-type column is recoded from the wall-structure text.
//!
//! One run per uploaded file; there is no partial-failure recovery. A missing
//! expected column aborts the run.

pub mod align;
pub mod coerce;
pub mod measure;
pub mod walltype;

use crate::error::ScheduleError;
use crate::table::{ScheduleTable, Value};
use tracing::info;

/// Runs the whole normalization pipeline on the working table.
pub fn run(table: &mut ScheduleTable) -> Result<(), ScheduleError> {
    // The primary width column uses "---" as its hand-maintained placeholder
    let primary = table
        .column_index(measure::PRIMARY_WIDTH_COLUMN)
        .ok_or_else(|| ScheduleError::MissingColumn {
            name: measure::PRIMARY_WIDTH_COLUMN.to_owned(),
        })?;
    table.map_column(primary, |value| match value {
        Value::Text(text) if text == measure::PLACEHOLDER => Value::Missing,
        other => other,
    });

    table.map_cells(coerce::coerce);
    info!(rows = table.height(), "cells coerced");

    for (source, destination) in measure::MEASUREMENTS {
        measure::derive_column(table, source, destination)?;
        info!(source, destination, "measurement column derived");
    }

    walltype::recode(table)?;
    info!("wall types recoded");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Value {
        Value::Text(value.to_owned())
    }

    fn schedule() -> ScheduleTable {
        ScheduleTable::new(
            vec![
                "Wandstruktur".to_owned(),
                "Wandtyp (Zeichenfolge)".to_owned(),
                "Türtyp (Optionen-Set)".to_owned(),
                "Breite Lichtmass".to_owned(),
                "Höhe Lichtmass".to_owned(),
                "Breite Rohbau".to_owned(),
                "Höhe Rohbau".to_owned(),
            ],
            vec![vec![
                text("MW 150"),
                text("alt"),
                text("T30"),
                text("0,9"),
                text("2,10"),
                text("1,0"),
                text("2,25"),
            ]],
        )
    }

    #[test]
    fn end_to_end_scenario() {
        let mut table = schedule();
        run(&mut table).unwrap();

        let cell = |name: &str| {
            let column = table.column_index(name).unwrap();
            table.cell(0, column).clone()
        };
        assert_eq!(
            cell("Lichtes Durchgangsmass Breite in mm (Zeichenfolge)"),
            text("900")
        );
        assert_eq!(
            cell("Lichtes Durchgangsmass Höhe in mm (Zeichenfolge)"),
            text("2100")
        );
        assert_eq!(cell("Rohbaumass Breite in mm (Zeichenfolge)"), text("1000"));
        assert_eq!(cell("Rohbaumass Höhe in mm (Zeichenfolge)"), text("2250"));
        assert_eq!(cell("Wandtyp (Zeichenfolge)"), text("MW"));
    }

    #[test]
    fn placeholder_in_primary_width_column_becomes_missing() {
        let mut table = schedule();
        let width = table.column_index("Breite Lichtmass").unwrap();
        *table.cell_mut(0, width) = text("---");
        run(&mut table).unwrap();

        let derived = table
            .column_index("Lichtes Durchgangsmass Breite in mm (Zeichenfolge)")
            .unwrap();
        assert_eq!(*table.cell(0, derived), text("---"));
        assert_eq!(*table.cell(0, width), Value::Missing);
    }

    #[test]
    fn missing_measurement_column_aborts() {
        let mut table = ScheduleTable::new(vec!["Wandstruktur".to_owned()], vec![vec![text("x")]]);
        assert!(matches!(
            run(&mut table),
            Err(ScheduleError::MissingColumn { .. })
        ));
    }

    #[test]
    fn rerunning_the_pipeline_reproduces_the_same_table() {
        let mut table = schedule();
        run(&mut table).unwrap();
        let first = format!("{table:?}");
        run(&mut table).unwrap();
        assert_eq!(format!("{table:?}"), first);
    }
}
