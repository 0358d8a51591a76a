// src/process/mod.rs

use serde_json::Value;
use std::fmt;
use tracing::info;

pub mod coerce;
pub mod filter;
pub mod normalize;
pub mod shape;
pub mod table;

pub use filter::DistrictMatcher;
pub use shape::Payload;
pub use table::Table;

/// Reasons a run ends without writing anything. None of these are errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    EmptyPayload,
    UnrecognizedShape(&'static str),
    /// Nothing matched the district; `fetched` is the pre-filter row count.
    NoDistrictRows { fetched: usize },
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::EmptyPayload => write!(f, "server returned no records; nothing saved"),
            Skip::UnrecognizedShape(kind) => {
                write!(f, "server returned a top-level {kind}, not records; nothing saved")
            }
            Skip::NoDistrictRows { fetched } => write!(
                f,
                "fetched {fetched} rows but none are in the North District; nothing saved"
            ),
        }
    }
}

/// Shape → table → canonical columns → district rows → numeric columns.
pub fn select_district_rows(body: Value, matcher: &DistrictMatcher) -> Result<Table, Skip> {
    let payload = Payload::classify(body);
    if let Payload::Unrecognized(kind) = payload {
        return Err(Skip::UnrecognizedShape(kind));
    }

    let mut table = normalize::normalize(normalize::table_from_items(payload.into_items()));
    if table.is_empty() {
        return Err(Skip::EmptyPayload);
    }

    let fetched = table.len();
    let kept = filter::retain_district(&mut table, matcher);
    info!(fetched, kept, "filtered to North District");
    if kept == 0 {
        return Err(Skip::NoDistrictRows { fetched });
    }

    coerce::coerce_numeric(&mut table);
    Ok(table)
}
