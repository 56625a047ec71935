//! Explicitly constructed per-run state shared by every component.

use tokio_util::sync::CancellationToken;

use crate::config::ScanConfig;
use crate::error::Result;
use crate::ledger::DiscoveryLedger;

/// Everything a probe needs, built once at startup and passed by `Arc`.
///
/// There are no ambient singletons: the ledger, the cancellation token and
/// the HTTP client all live here.
#[derive(Debug)]
pub struct ScanContext {
    pub config: ScanConfig,
    pub ledger: DiscoveryLedger,
    cancel: CancellationToken,
    http: reqwest::Client,
}

impl ScanContext {
    /// `base` is the originally requested bucket name (the first one, when
    /// probing a list of names).
    pub fn new(base: &str, config: ScanConfig) -> Result<Self> {
        // Certificate validation is disabled on purpose: probes target
        // third-party hosts through many host-naming shapes (bare names,
        // website endpoints) where certificate mismatches are routine, and
        // nothing authenticated flows over these connections.
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(true)
            .redirect(reqwest::redirect::Policy::none())
            .user_agent("Mozilla/5.0")
            .build()?;
        Ok(Self {
            config,
            ledger: DiscoveryLedger::new(base),
            cancel: CancellationToken::new(),
            http,
        })
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Token cloned into spawned work; observers await `cancelled()`.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Request a cooperative stop. Idempotent and non-blocking; in-flight
    /// probes finish their current network or subprocess call and return.
    pub fn request_stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
