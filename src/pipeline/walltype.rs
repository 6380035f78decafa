//! Wall-type recode.
//!
//! The wall-structure field is free text with embedded construction-type
//! abbreviations ("BE 200 + SB", "MW 150"). An ordered rule table maps the
//! first recognized abbreviation to the wall-type label; rows without a
//! recognizable (or textual) structure keep whatever wall type they had.

use crate::error::ScheduleError;
use crate::table::{ScheduleTable, Value};

pub const STRUCTURE_COLUMN: &str = "Wandstruktur";
pub const WALL_TYPE_COLUMN: &str = "Wandtyp (Zeichenfolge)";

/// (label, keywords) rules, evaluated in declared order; the first category
/// with any substring match wins. "SB" is the site-cast concrete shorthand
/// that also maps to "BE".
const WALL_TYPES: &[(&str, &[&str])] = &[
    ("BE", &["BE", "SB"]),
    ("MW", &["MW"]),
    ("LB", &["LB"]),
    ("GS", &["GS"]),
    ("NS", &["NS"]),
];

/// Returns the wall-type label for a structure text, if any keyword matches.
/// Matching is case-sensitive substring containment.
fn classify(structure: &str) -> Option<&'static str> {
    for (label, keywords) in WALL_TYPES {
        for keyword in *keywords {
            if structure.contains(keyword) {
                return Some(label);
            }
        }
    }
    None
}

/// Recodes the wall-type column from the wall-structure column, then forces
/// every wall-type cell to text (missing cells become the "nan" literal, which
/// the export realignment clears).
pub fn recode(table: &mut ScheduleTable) -> Result<(), ScheduleError> {
    let structure = table
        .column_index(STRUCTURE_COLUMN)
        .ok_or_else(|| ScheduleError::MissingColumn {
            name: STRUCTURE_COLUMN.to_owned(),
        })?;
    let wall_type = table
        .column_index(WALL_TYPE_COLUMN)
        .ok_or_else(|| ScheduleError::MissingColumn {
            name: WALL_TYPE_COLUMN.to_owned(),
        })?;

    for row in 0..table.height() {
        let label = match table.cell(row, structure) {
            Value::Text(text) => classify(text),
            _ => None,
        };
        if let Some(label) = label {
            *table.cell_mut(row, wall_type) = Value::Text(label.to_owned());
        }
    }
    table.map_column(wall_type, |value| Value::Text(value.to_forced_text()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Value {
        Value::Text(value.to_owned())
    }

    fn recoded(structure: Value, prior: Value) -> Value {
        let mut table = ScheduleTable::new(
            vec![STRUCTURE_COLUMN.to_owned(), WALL_TYPE_COLUMN.to_owned()],
            vec![vec![structure, prior]],
        );
        recode(&mut table).unwrap();
        table.cell(0, 1).clone()
    }

    #[test]
    fn both_concrete_keywords_map_to_be() {
        assert_eq!(recoded(text("BE 200"), text("alt")), text("BE"));
        assert_eq!(recoded(text("Wand SB 180"), text("alt")), text("BE"));
    }

    #[test]
    fn single_keyword_categories() {
        assert_eq!(recoded(text("MW 150"), text("alt")), text("MW"));
        assert_eq!(recoded(text("LB 100"), text("alt")), text("LB"));
        assert_eq!(recoded(text("GS"), text("alt")), text("GS"));
        assert_eq!(recoded(text("NS 125"), text("alt")), text("NS"));
    }

    #[test]
    fn unmatched_text_keeps_prior_value() {
        assert_eq!(recoded(text("Holz 60"), text("alt")), text("alt"));
    }

    #[test]
    fn non_text_structure_keeps_prior_value() {
        assert_eq!(recoded(Value::Int(150), text("alt")), text("alt"));
        assert_eq!(recoded(Value::Missing, text("alt")), text("alt"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(recoded(text("mw 150"), text("alt")), text("alt"));
    }

    #[test]
    fn column_is_forced_to_text_afterwards() {
        assert_eq!(recoded(text("Holz"), Value::Missing), text("nan"));
        assert_eq!(recoded(text("Holz"), Value::Int(2)), text("2"));
    }

    #[test]
    fn missing_columns_are_errors() {
        let mut table = ScheduleTable::new(vec!["x".to_owned()], vec![]);
        assert!(matches!(
            recode(&mut table),
            Err(ScheduleError::MissingColumn { .. })
        ));
    }
}
