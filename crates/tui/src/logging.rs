use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info";

/// Route tracing output to an append-only log file.
///
/// The terminal UI owns stdout, so nothing is ever written there. `RUST_LOG`
/// directives are layered on top of `filter`.
pub fn init_tracing(log_path: &Path, filter: Option<&str>) -> Result<()> {
    let directive: Directive = filter
        .unwrap_or(DEFAULT_FILTER)
        .parse()
        .with_context(|| format!("invalid log directive {:?}", filter.unwrap_or_default()))?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .try_init();
    Ok(())
}
