//! Shared discovery state for both probe channels.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use parking_lot::Mutex;
use tokio::sync::watch;

#[derive(Debug, Default)]
struct LedgerState {
    checked: HashSet<String>,
    found: BTreeMap<String, BTreeSet<String>>,
}

/// Concurrency-safe record of which endpoints have been checked and which
/// (candidate, region) pairs are confirmed accessible.
///
/// The ledger is the single source of truth consumed by both channels and
/// by the final summary. Internal sets are never handed out for mutation;
/// all writes go through [`mark_checked`](Self::mark_checked) and
/// [`record_finding`](Self::record_finding), and findings only ever grow
/// during a run.
#[derive(Debug)]
pub struct DiscoveryLedger {
    base: String,
    state: Mutex<LedgerState>,
    base_found_tx: watch::Sender<bool>,
}

impl DiscoveryLedger {
    /// `base` is the originally requested name; recording a finding for it
    /// raises the one-shot base-found signal.
    pub fn new(base: impl Into<String>) -> Self {
        let (base_found_tx, _) = watch::channel(false);
        Self {
            base: base.into(),
            state: Mutex::new(LedgerState::default()),
            base_found_tx,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Atomically test-and-insert an endpoint into the checked set.
    ///
    /// Returns `true` exactly once per endpoint URL; a `false` return means
    /// some other caller got there first and this probe must be skipped.
    pub fn mark_checked(&self, endpoint: &str) -> bool {
        self.state.lock().checked.insert(endpoint.to_string())
    }

    /// Record a confirmed accessibility finding for a candidate.
    ///
    /// The candidate entry is created if absent; `region`, when given, is
    /// added to its accessible-regions set. An entry with an empty region
    /// set means "accessible, no specific region attributable".
    pub fn record_finding(&self, candidate: &str, region: Option<&str>) {
        {
            let mut state = self.state.lock();
            let regions = state.found.entry(candidate.to_string()).or_default();
            if let Some(r) = region {
                regions.insert(r.to_string());
            }
        }
        if candidate == self.base {
            self.base_found_tx.send_replace(true);
        }
    }

    /// Whether a (candidate, region) pair is already known accessible.
    ///
    /// With `region = None` this is true as soon as the candidate was found
    /// anywhere, which lets the channels skip the redundant no-region probe.
    pub fn is_found(&self, candidate: &str, region: Option<&str>) -> bool {
        let state = self.state.lock();
        match state.found.get(candidate) {
            Some(regions) => region.is_none_or(|r| regions.contains(r)),
            None => false,
        }
    }

    /// Read-only copy of the findings for summary reporting.
    pub fn snapshot(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.state.lock().found.clone()
    }

    /// Number of endpoints checked so far.
    pub fn checked_count(&self) -> usize {
        self.state.lock().checked.len()
    }

    /// Whether the originally requested name has been confirmed accessible.
    ///
    /// By policy this does not stop the run; remaining variations and
    /// regions are still probed to completion.
    pub fn base_found(&self) -> bool {
        *self.base_found_tx.borrow()
    }

    /// One-shot signal observers can await for the base name being found.
    pub fn base_found_signal(&self) -> watch::Receiver<bool> {
        self.base_found_tx.subscribe()
    }
}
