// src/process/table.rs

use serde_json::{Map, Value};

/// Column-ordered record set built from heterogeneous JSON objects.
///
/// Columns are the union of record keys in first-appearance order; a record
/// missing a key holds `Value::Null` in that column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn from_records(records: Vec<Map<String, Value>>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|c| record.remove(c).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Rename `from` to `to`. Returns false if `from` is missing or `to` already exists.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        if self.has_column(to) {
            return false;
        }
        match self.column_index(from) {
            Some(idx) => {
                self.columns[idx] = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Append a column holding `fill` in every row. No-op if it already exists.
    pub fn add_column(&mut self, name: &str, fill: Value) {
        if self.has_column(name) {
            return;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(fill.clone());
        }
    }

    /// Replace every value of `name` with `f(value)`.
    pub fn map_column(&mut self, name: &str, f: impl Fn(&Value) -> Value) {
        if let Some(idx) = self.column_index(name) {
            for row in &mut self.rows {
                row[idx] = f(&row[idx]);
            }
        }
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// String content of a cell; `""` for missing columns and non-string values.
    pub fn str_value(&self, row: usize, column: &str) -> &str {
        self.value(row, column)
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Keep the rows for which `keep(table, row_index)` holds.
    pub fn retain_rows(&mut self, keep: impl Fn(&Table, usize) -> bool) {
        let mask: Vec<bool> = (0..self.len()).map(|i| keep(self, i)).collect();
        let mut flags = mask.into_iter();
        self.rows.retain(|_| flags.next().unwrap_or(false));
    }

    /// Values of `columns` (in that order) for each row; missing columns are skipped.
    pub fn project<'a>(&'a self, columns: &[&str]) -> Vec<Vec<&'a Value>> {
        let idxs: Vec<usize> = columns
            .iter()
            .filter_map(|c| self.column_index(c))
            .collect();
        self.rows
            .iter()
            .map(|row| idxs.iter().map(|&i| &row[i]).collect())
            .collect()
    }
}
