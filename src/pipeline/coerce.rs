//! Best-effort cell coercion.
//!
//! The schedule is maintained by hand, so numbers arrive as strings with a
//! comma decimal separator ("0,9") or an apostrophe thousands separator
//! ("2'500"). Coercion never fails: what cannot be read as a number passes
//! through unchanged.

use crate::table::Value;

/// Attempts to interpret a cell as a number.
///
/// Text cells have commas replaced by periods and apostrophes removed, then
/// parse as floating point; integral results become integers. Text that does
/// not parse is returned unchanged. Non-text cells pass through as-is.
pub fn coerce(value: Value) -> Value {
    match value {
        Value::Text(text) => {
            let normalized = text.replace(',', ".").replace('\'', "");
            match normalized.trim().parse::<f64>() {
                Ok(number) if number.is_finite() && number.fract() == 0.0 => {
                    Value::Int(number as i64)
                }
                Ok(number) => Value::Float(number),
                Err(_) => Value::Text(text),
            }
        }
        other => other,
    }
}

/// Normalizes an already-numeric cell: NaN becomes missing, any other float
/// truncates to its integer value. Non-numeric cells pass through.
pub fn normalize_numeric(value: Value) -> Value {
    match value {
        Value::Float(number) if number.is_nan() => Value::Missing,
        Value::Float(number) => Value::Int(number.trunc() as i64),
        other => other,
    }
}
