// src/pipeline.rs

use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::{
    clock::RunStamp,
    config::Config,
    fetch::{fetch_payload, FetchError, Session},
    output::{append_rows, daily_path, WriteError, WriteSummary},
    process::{select_district_rows, DistrictMatcher, Skip},
};

/// How a run ended when nothing went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Written(WriteSummary),
    Skipped(Skip),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Fetch once, keep North District rows, append them to the day's CSV.
pub async fn run(config: &Config, stamp: &RunStamp) -> Result<RunOutcome, PipelineError> {
    let session = Session::new(config)?;
    let body = fetch_payload(&session, config, stamp).await?;
    Ok(store_payload(body, config, stamp)?)
}

/// Everything after the fetch. No file is touched unless rows survive the filter.
pub fn store_payload(
    body: Value,
    config: &Config,
    stamp: &RunStamp,
) -> Result<RunOutcome, WriteError> {
    let matcher = DistrictMatcher::from_config(config);
    let table = match select_district_rows(body, &matcher) {
        Ok(table) => table,
        Err(skip) => return Ok(RunOutcome::Skipped(skip)),
    };

    let path = daily_path(config, stamp);
    info!(rows = table.len(), path = %path.display(), "saving North District rows");
    append_rows(table, stamp, &path).map(RunOutcome::Written)
}
