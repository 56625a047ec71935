//! Core engine for probing candidate S3 bucket names across regions.
//!
//! The engine takes one or more base names, optionally expands them into a
//! deterministic catalogue of name variations, and checks each candidate for
//! public accessibility over two channels:
//!
//! - the **tool channel** drives the AWS CLI as a subprocess, probing exact
//!   names sequentially across every region;
//! - the **web channel** issues raw HTTP(S) requests against synthesized
//!   virtual-hosted, path-style, website and dual-stack endpoints through a
//!   bounded pool of concurrent tasks.
//!
//! Both channels report into a shared [`DiscoveryLedger`], which deduplicates
//! endpoint checks and records confirmed findings, and both honour a
//! cooperative cancellation token owned by the [`ScanContext`].
//!
//! All probing is unauthenticated. Write-capability testing (PUT/GET/DELETE
//! of a marker object) has side effects on the target and is a strict opt-in,
//! see [`WriteProbe`].

pub mod classify;
pub mod config;
pub mod context;
pub mod endpoint;
pub mod error;
pub mod ledger;
pub mod regions;
pub mod tool;
pub mod tool_probe;
pub mod variations;
pub mod web_probe;

pub use classify::{ProbeOutcome, WriteOutcome, classify_listing, error_token, parse_object_total};
pub use config::{ChannelSelection, DEFAULT_WORKERS, PROBE_OBJECT_KEY, ScanConfig, WriteProbe};
pub use context::ScanContext;
pub use endpoint::{Endpoint, Scheme, endpoints_for};
pub use error::{Result, ScanError};
pub use ledger::DiscoveryLedger;
pub use regions::{REGIONS, all_region_slots, region_label};
pub use tool::{AwsCli, ToolInvoker, ToolOutput};
pub use variations::generate_variations;

use std::sync::Arc;

/// Run the configured channels to completion (or until cancelled).
///
/// The AWS CLI is located up front when the tool channel is enabled; a
/// missing binary fails here, before any probing starts. Everything after
/// that point is non-fatal: individual probe failures are recorded against
/// their one endpoint and the run continues.
pub async fn run_scan(ctx: Arc<ScanContext>, bases: Vec<String>) -> Result<()> {
    let candidates = if ctx.config.expand_variations {
        expand_bases(&bases)
    } else {
        bases.clone()
    };

    let tool = if ctx.config.channels.cli_enabled() {
        Some(AwsCli::locate()?)
    } else {
        None
    };

    let tool_channel = async {
        if let Some(tool) = &tool {
            tool_probe::run_tool_channel(&ctx, tool, &bases).await;
        }
    };
    let web_channel = async {
        if ctx.config.channels.web_enabled() {
            web_probe::run_web_channel(&ctx, candidates.clone()).await;
        }
    };
    tokio::join!(tool_channel, web_channel);
    Ok(())
}

/// Expand every base name through the variation catalogue, deduplicating
/// across bases while preserving first-occurrence order.
fn expand_bases(bases: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    for base in bases {
        out.extend(generate_variations(base));
    }
    let mut seen = std::collections::HashSet::new();
    out.retain(|name| seen.insert(name.clone()));
    out
}
