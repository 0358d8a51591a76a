// src/process/coerce.rs

use serde_json::{Number, Value};

use super::{
    normalize::{AVAILABLE_CAR, TOTAL_CAR},
    table::Table,
};

pub const NUMERIC_COLUMNS: &[&str] = &[TOTAL_CAR, AVAILABLE_CAR];

/// Trim whitespace and strip one pair of outer quotes.
pub fn clean_str(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].trim()
    } else {
        trimmed
    }
}

/// Best-effort numeric value of a cell; anything unparseable is zero.
pub fn to_number(value: &Value) -> Number {
    match value {
        Value::Number(n) => n.clone(),
        Value::String(s) => parse_number(clean_str(s)).unwrap_or_else(|| Number::from(0)),
        Value::Bool(b) => Number::from(u8::from(*b)),
        _ => Number::from(0),
    }
}

fn parse_number(s: &str) -> Option<Number> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::from(i));
    }
    let f = s.parse::<f64>().ok().filter(|f| f.is_finite())?;
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(Number::from(f as i64))
    } else {
        Number::from_f64(f)
    }
}

/// Make every numeric column exist and hold only numbers.
pub fn coerce_numeric(table: &mut Table) {
    for &col in NUMERIC_COLUMNS {
        if table.has_column(col) {
            table.map_column(col, |v| Value::Number(to_number(v)));
        } else {
            table.add_column(col, Value::from(0));
        }
    }
}
