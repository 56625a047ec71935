//! Run-level configuration for a scan.

use std::time::Duration;

/// Default width of the web channel's bounded worker pool.
pub const DEFAULT_WORKERS: usize = 30;

/// Well-known key the opt-in write check stages its marker object under.
pub const PROBE_OBJECT_KEY: &str = "bucketprobe-write-check.txt";

/// Which probe channels a run drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelSelection {
    #[default]
    Both,
    WebOnly,
    CliOnly,
}

impl ChannelSelection {
    pub fn web_enabled(self) -> bool {
        matches!(self, ChannelSelection::Both | ChannelSelection::WebOnly)
    }

    pub fn cli_enabled(self) -> bool {
        matches!(self, ChannelSelection::Both | ChannelSelection::CliOnly)
    }
}

/// Opt-in write-capability testing.
///
/// These checks PUT (and optionally GET back and DELETE) a marker object on
/// the target bucket. That is a real side effect on third-party storage, so
/// this is never on by default.
#[derive(Debug, Clone)]
pub struct WriteProbe {
    /// Content of the staged marker object.
    pub payload: String,
    /// GET the marker object back after a successful PUT.
    pub verify_get: bool,
    /// DELETE the marker object after a successful PUT.
    pub delete_after: bool,
}

impl Default for WriteProbe {
    fn default() -> Self {
        Self {
            payload: "bucketprobe write check\n".to_string(),
            verify_get: false,
            delete_after: false,
        }
    }
}

/// Everything a run needs to know, fixed at startup.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub channels: ChannelSelection,
    /// Expand base names through the variation catalogue (web channel only;
    /// the tool channel always probes exact names).
    pub expand_variations: bool,
    /// Width of the web channel's worker pool.
    pub workers: usize,
    /// Per-request timeout for direct HTTP probes.
    pub request_timeout: Duration,
    /// Include static-website endpoint shapes in the web channel.
    pub include_website: bool,
    /// Write-capability testing; `None` means listing checks only.
    pub write_probe: Option<WriteProbe>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            channels: ChannelSelection::default(),
            expand_variations: false,
            workers: DEFAULT_WORKERS,
            request_timeout: Duration::from_secs(5),
            include_website: true,
            write_probe: None,
        }
    }
}
