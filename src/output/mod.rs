// src/output/mod.rs

use serde_json::Value;
use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    clock::RunStamp,
    config::Config,
    process::{
        normalize::{stringify, ADDRESS, AVAILABLE_CAR, NAME_ID, TOTAL_CAR},
        Table,
    },
};

pub const TIMESTAMP: &str = "timestamp";

/// Output columns in file order. Columns the table lacks are left out.
pub const OUTPUT_COLUMNS: &[&str] = &[TIMESTAMP, NAME_ID, ADDRESS, TOTAL_CAR, AVAILABLE_CAR];

/// Spreadsheet tools need it to read the file as UTF-8.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("permission denied writing {}", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("encoding CSV rows for {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl WriteError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::PermissionDenied => WriteError::PermissionDenied { path, source },
            _ => WriteError::Io { path, source },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub header_written: bool,
    pub columns: Vec<String>,
}

/// `<output_dir>/<prefix>YYYYMMDD.csv` for the run's Taipei date.
pub fn daily_path(config: &Config, stamp: &RunStamp) -> PathBuf {
    config
        .output_dir
        .join(format!("{}{}.csv", config.file_prefix, stamp.file_date()))
}

/// CSV text of one cell. Integral floats lose their `.0`.
pub fn render_cell(value: &Value) -> String {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (f as i64).to_string(),
            _ => n.to_string(),
        },
        other => stringify(other),
    }
}

/// Stamp every row with the run timestamp and append the batch to `path`.
///
/// A BOM and header row are written only when `path` did not exist. The
/// whole batch goes out in a single `write_all` on an append-mode handle.
pub fn append_rows(mut table: Table, stamp: &RunStamp, path: &Path) -> Result<WriteSummary, WriteError> {
    table.add_column(TIMESTAMP, Value::String(stamp.timestamp()));
    let columns: Vec<&str> = OUTPUT_COLUMNS
        .iter()
        .copied()
        .filter(|c| table.has_column(c))
        .collect();

    let file_exists = path.exists();
    let buf = encode(&table, &columns, !file_exists)
        .map_err(|source| WriteError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), bytes = buf.len(), file_exists, "appending batch");

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| WriteError::from_io(path, e))?;
    file.write_all(&buf)
        .map_err(|e| WriteError::from_io(path, e))?;

    info!(path = %path.display(), rows = table.len(), "appended rows");
    Ok(WriteSummary {
        path: path.to_path_buf(),
        rows: table.len(),
        header_written: !file_exists,
        columns: columns.iter().map(|c| c.to_string()).collect(),
    })
}

fn encode(table: &Table, columns: &[&str], with_header: bool) -> Result<Vec<u8>, csv::Error> {
    let mut buf = Vec::new();
    if with_header {
        buf.extend_from_slice(UTF8_BOM);
    }
    {
        let mut wtr = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut buf);
        if with_header {
            wtr.write_record(columns)?;
        }
        for row in table.project(columns) {
            wtr.write_record(row.into_iter().map(render_cell))?;
        }
        wtr.flush()?;
    }
    Ok(buf)
}
