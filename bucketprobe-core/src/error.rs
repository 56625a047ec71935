use thiserror::Error;

/// Errors surfaced by the probing engine.
///
/// Only setup faults live here. Per-probe network and subprocess failures
/// are classified as [`crate::ProbeOutcome::NotAccessible`] and never abort
/// a run.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("required external tool not found: {0}")]
    ToolMissing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
