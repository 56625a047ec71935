//! CLI surface and input loading.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use bucketprobe_core::{ChannelSelection, DEFAULT_WORKERS, ScanConfig, WriteProbe};

/// S3 bucket accessibility checker.
///
/// Probes a base bucket name (and optionally a catalogue of name
/// variations) for public accessibility across every AWS region, via direct
/// HTTP endpoints and/or the AWS CLI.
#[derive(Debug, Parser)]
#[command(name = "bucketprobe", version, about)]
pub struct Cli {
    /// Base bucket name to probe.
    #[arg(short, long, required_unless_present = "file", conflicts_with = "file")]
    pub bucket: Option<String>,

    /// File of bucket names, one per line. Blank lines and lines starting
    /// with '#' are ignored. Requires --web-only or --cli-only.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Direct HTTP checks only.
    #[arg(short, long, conflicts_with = "cli_only")]
    pub web_only: bool,

    /// AWS CLI checks only.
    #[arg(short, long)]
    pub cli_only: bool,

    /// Expand each base name into its variation catalogue (web channel).
    #[arg(long)]
    pub variations: bool,

    /// Show all access attempts, not only findings.
    #[arg(short, long)]
    pub verbose: bool,

    /// Concurrent HTTP probe workers.
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Per-request timeout for direct HTTP probes, in seconds.
    #[arg(long, default_value_t = 5)]
    pub timeout_secs: u64,

    /// Skip static-website endpoint shapes.
    #[arg(long)]
    pub no_website: bool,

    /// DANGEROUS: attempt an unauthenticated PUT of a marker object on each
    /// target. This writes to third-party storage.
    #[arg(long)]
    pub test_write: bool,

    /// After a successful PUT, try to read the marker object back.
    #[arg(long, requires = "test_write")]
    pub test_read: bool,

    /// After a successful PUT, try to delete the marker object.
    #[arg(long, requires = "test_write")]
    pub test_delete: bool,

    /// Content of the marker object staged by --test-write.
    #[arg(long, default_value = "bucketprobe write check")]
    pub payload: String,
}

impl Cli {
    pub fn channels(&self) -> ChannelSelection {
        if self.web_only {
            ChannelSelection::WebOnly
        } else if self.cli_only {
            ChannelSelection::CliOnly
        } else {
            ChannelSelection::Both
        }
    }

    pub fn scan_config(&self) -> ScanConfig {
        let write_probe = self.test_write.then(|| WriteProbe {
            payload: format!("{}\n", self.payload.trim_end()),
            verify_get: self.test_read,
            delete_after: self.test_delete,
        });
        ScanConfig {
            channels: self.channels(),
            expand_variations: self.variations,
            workers: self.workers,
            request_timeout: Duration::from_secs(self.timeout_secs),
            include_website: !self.no_website,
            write_probe,
        }
    }

    /// Resolve the list of base names from `--bucket` or `--file`.
    ///
    /// A names file drives a large cross-product, so it refuses to run with
    /// both channels enabled; the caller must pick one.
    pub fn load_names(&self) -> Result<Vec<String>> {
        if let Some(path) = &self.file {
            if !self.web_only && !self.cli_only {
                bail!("--file requires --web-only or --cli-only");
            }
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read names file {}", path.display()))?;
            let names: Vec<String> = contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string)
                .collect();
            if names.is_empty() {
                bail!("names file {} contains no bucket names", path.display());
            }
            return Ok(names);
        }

        let base = self
            .bucket
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();
        if base.is_empty() {
            bail!("bucket name must not be empty");
        }
        Ok(vec![base.to_string()])
    }
}
