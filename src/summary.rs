//! Door-type frequency counts, the data behind the dashboard bar chart.

use crate::table::{ScheduleTable, Value};

pub const DOOR_TYPE_COLUMN: &str = "Türtyp (Optionen-Set)";

/// Label used for the missing-category bucket.
pub const MISSING_LABEL: &str = "NaN/None";

/// Door-type labels with their occurrence counts, ordered by descending
/// count (stable for ties, so equal counts keep first-seen order).
#[derive(Debug, Default)]
pub struct DoorTypeSummary {
    pub counts: Vec<(String, usize)>,
}

/// Counts the door-type categories of the normalized table. A schedule
/// without the door-type column yields an empty summary rather than an error;
/// the summary is informational only.
pub fn door_type_counts(table: &ScheduleTable) -> DoorTypeSummary {
    let Some(column) = table.column_index(DOOR_TYPE_COLUMN) else {
        return DoorTypeSummary::default();
    };

    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in table.column_values(column) {
        let label = match value {
            Value::Missing => MISSING_LABEL.to_owned(),
            other => other.to_string(),
        };
        match counts.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    DoorTypeSummary { counts }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Value {
        Value::Text(value.to_owned())
    }

    fn table(cells: Vec<Value>) -> ScheduleTable {
        ScheduleTable::new(
            vec![DOOR_TYPE_COLUMN.to_owned()],
            cells.into_iter().map(|cell| vec![cell]).collect(),
        )
    }

    #[test]
    fn counts_are_ordered_by_frequency() {
        let summary = door_type_counts(&table(vec![
            text("T30"),
            text("Standard"),
            text("T30"),
            Value::Missing,
            text("T30"),
            Value::Missing,
        ]));
        assert_eq!(
            summary.counts,
            vec![
                ("T30".to_owned(), 3),
                (MISSING_LABEL.to_owned(), 2),
                ("Standard".to_owned(), 1),
            ]
        );
    }

    #[test]
    fn numeric_categories_keep_their_rendering() {
        let summary = door_type_counts(&table(vec![Value::Int(9), Value::Int(9)]));
        assert_eq!(summary.counts, vec![("9".to_owned(), 2)]);
    }

    #[test]
    fn absent_column_yields_empty_summary() {
        let table = ScheduleTable::new(vec!["x".to_owned()], vec![]);
        assert!(door_type_counts(&table).counts.is_empty());
    }
}
