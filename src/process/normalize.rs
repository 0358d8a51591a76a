// src/process/normalize.rs

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::table::Table;

pub const NAME_ID: &str = "nameId";
pub const ADDRESS: &str = "address";
pub const DISTRICT: &str = "district";
pub const TOTAL_CAR: &str = "totalCar";
pub const AVAILABLE_CAR: &str = "availableCar";

/// Canonical name → source spellings, case-sensitive, tried in order.
pub const COLUMN_ALIASES: &[(&str, &[&str])] = &[
    (NAME_ID, &["name", "Name"]),
    (ADDRESS, &["address", "Address"]),
    (TOTAL_CAR, &["car_total", "TotalSpace"]),
    (AVAILABLE_CAR, &["car", "SurplusSpace"]),
    (DISTRICT, &["zone", "Zone"]),
];

/// Build a table from payload items. Items that are not JSON objects are skipped.
pub fn table_from_items(items: Vec<Value>) -> Table {
    let total = items.len();
    let records: Vec<Map<String, Value>> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(obj) => Some(obj),
            _ => None,
        })
        .collect();
    if records.len() < total {
        warn!(
            skipped = total - records.len(),
            "ignoring payload items that are not objects"
        );
    }
    Table::from_records(records)
}

/// Rename known spellings to canonical columns.
///
/// For each canonical name the first alias present is renamed; later aliases
/// pass through untouched. A canonical column that already exists is left
/// alone, so applying this twice is the same as applying it once.
pub fn rename_columns(table: &mut Table) {
    for (canonical, aliases) in COLUMN_ALIASES {
        if table.has_column(canonical) {
            continue;
        }
        if let Some(alias) = aliases.iter().find(|a| table.has_column(a)) {
            debug!(from = %alias, to = %canonical, "renaming column");
            table.rename_column(alias, canonical);
        }
    }
}

/// Full normalization: rename, then make `address`/`district` exist as strings.
pub fn normalize(mut table: Table) -> Table {
    rename_columns(&mut table);
    for col in [ADDRESS, DISTRICT] {
        table.add_column(col, Value::String(String::new()));
        table.map_column(col, |v| Value::String(stringify(v)));
    }
    table
}

/// Text form of a cell for substring search.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(v: Value) -> Table {
        table_from_items(v.as_array().unwrap().clone())
    }

    #[test]
    fn pascal_case_source_is_renamed() {
        let t = normalize(table(json!([
            {"Name": "站前", "Zone": "北區", "TotalSpace": "100", "SurplusSpace": "3", "Extra": 1}
        ])));
        assert_eq!(
            t.columns(),
            ["nameId", "district", "totalCar", "availableCar", "Extra", "address"]
        );
        assert_eq!(t.str_value(0, ADDRESS), "");
    }

    #[test]
    fn first_alias_wins() {
        let mut t = table(json!([{"Name": "upper", "name": "lower"}]));
        rename_columns(&mut t);
        assert_eq!(t.value(0, NAME_ID), Some(&json!("lower")));
        assert!(t.has_column("Name"));
    }

    #[test]
    fn renaming_is_idempotent() {
        let mut once = table(json!([
            {"name": "a", "Name": "b", "car": 1, "SurplusSpace": 2, "zone": "北區"}
        ]));
        rename_columns(&mut once);
        let mut twice = once.clone();
        rename_columns(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn address_and_district_become_strings() {
        let t = normalize(table(json!([
            {"address": 12, "zone": null},
            {"address": "North Rd"}
        ])));
        assert_eq!(t.str_value(0, ADDRESS), "12");
        assert_eq!(t.str_value(0, DISTRICT), "");
        assert_eq!(t.str_value(1, ADDRESS), "North Rd");
    }

    #[test]
    fn non_object_items_are_skipped() {
        let t = table(json!([1, {"name": "a"}, "x"]));
        assert_eq!(t.len(), 1);
    }
}
