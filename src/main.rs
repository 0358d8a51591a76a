use anyhow::Result;
use tainan_parking::{
    clock::RunStamp,
    config::Config,
    output::WriteError,
    pipeline::{self, PipelineError, RunOutcome},
};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) one stamp for the whole run ──────────────────────────────
    let stamp = RunStamp::now();
    let config = Config::tainan_north();

    // ─── 3) run, reporting every failure as console text ─────────────
    // The scheduler only sees the log; the exit status is always success.
    let handle = tokio::spawn(async move { pipeline::run(&config, &stamp).await });
    match handle.await {
        Ok(Ok(RunOutcome::Written(summary))) => {
            info!(
                "saved {} North District rows to {}",
                summary.rows,
                summary.path.display()
            );
        }
        Ok(Ok(RunOutcome::Skipped(skip))) => warn!("{}", skip),
        Ok(Err(PipelineError::Fetch(e))) if e.is_parse() => {
            error!("JSON parse failed, the server may be under maintenance: {}", e);
        }
        Ok(Err(PipelineError::Fetch(e))) => error!("network error: {}", e),
        Ok(Err(PipelineError::Write(e @ WriteError::PermissionDenied { .. }))) => {
            error!("save failed (permission error): {}", e);
        }
        Ok(Err(PipelineError::Write(e))) => error!("save failed: {}", e),
        Err(join_err) => error!("unexpected error: {}", join_err),
    }

    Ok(())
}
