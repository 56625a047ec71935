//! Direct-protocol probe channel.
//!
//! Walks the full cross-product of candidate names, region slots and
//! endpoint shapes through a bounded pool of concurrent tasks. Ordering of
//! completion is unspecified; the ledger's checked set guarantees every
//! endpoint is probed at most once, and the cancellation token is consulted
//! before each unit of work so queued endpoints are dropped on shutdown.

use std::sync::Arc;

use futures::StreamExt;
use tracing::{debug, info};

use crate::classify::{ProbeOutcome, WriteOutcome, classify_listing};
use crate::config::{PROBE_OBJECT_KEY, WriteProbe};
use crate::context::ScanContext;
use crate::endpoint::{Endpoint, endpoints_for};
use crate::regions::{all_region_slots, region_label};

/// Probe every endpoint for every candidate name.
pub async fn run_web_channel(ctx: &Arc<ScanContext>, candidates: Vec<String>) {
    let width = ctx.config.workers.max(1);
    let include_website = ctx.config.include_website;

    let endpoints = candidates.into_iter().flat_map(move |bucket| {
        let mut eps = Vec::new();
        for region in all_region_slots() {
            eps.extend(endpoints_for(&bucket, region, include_website));
        }
        eps
    });

    futures::stream::iter(endpoints)
        .for_each_concurrent(width, |endpoint| {
            let ctx = Arc::clone(ctx);
            async move {
                probe_endpoint(&ctx, endpoint).await;
            }
        })
        .await;
}

/// Check a single endpoint: listing classification first, then the opt-in
/// write-capability checks.
///
/// The checked-set insertion is the gate for all side effects; a second
/// caller for the same URL returns without touching the network.
pub async fn probe_endpoint(ctx: &ScanContext, endpoint: Endpoint) {
    if ctx.is_cancelled() {
        return;
    }
    let url = endpoint.url();
    if !ctx.ledger.mark_checked(&url) {
        return;
    }
    // A pair already confirmed by the other channel is not re-reported.
    if ctx.ledger.is_found(&endpoint.bucket, endpoint.region) {
        return;
    }

    let outcome = fetch_and_classify(ctx, &url).await;
    report_outcome(ctx, &endpoint, &url, &outcome);

    if let Some(probe) = &ctx.config.write_probe {
        if ctx.is_cancelled() {
            return;
        }
        let ops = write_checks(ctx, &endpoint, probe).await;
        report_outcome(ctx, &endpoint, &url, &ProbeOutcome::Operations(ops));
    }
}

fn report_outcome(ctx: &ScanContext, endpoint: &Endpoint, url: &str, outcome: &ProbeOutcome) {
    match outcome {
        ProbeOutcome::AccessibleListing => finding(ctx, endpoint, url, "listable"),
        ProbeOutcome::AccessibleDeniedButPresent => {
            finding(ctx, endpoint, url, "present, listing denied")
        }
        ProbeOutcome::Operations(ops) if ops.any_success() => {
            ctx.ledger.record_finding(&endpoint.bucket, endpoint.region);
            info!(
                channel = "web",
                url = %url,
                put = ops.put,
                get = ops.get,
                delete = ops.delete,
                "write-capability finding"
            );
        }
        ProbeOutcome::Operations(_) => {}
        ProbeOutcome::NotAccessible(code) => {
            debug!(channel = "web", url = %url, code = %code, "not listable");
        }
    }
}

async fn fetch_and_classify(ctx: &ScanContext, url: &str) -> ProbeOutcome {
    match ctx.http().get(url).send().await {
        Ok(resp) => {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            classify_listing(status, &body)
        }
        Err(err) => ProbeOutcome::NotAccessible(transport_token(&err)),
    }
}

fn transport_token(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "Timeout".to_string()
    } else if err.is_connect() {
        "ConnectError".to_string()
    } else {
        "RequestError".to_string()
    }
}

fn finding(ctx: &ScanContext, endpoint: &Endpoint, url: &str, kind: &str) {
    ctx.ledger.record_finding(&endpoint.bucket, endpoint.region);
    info!(
        channel = "web",
        bucket = %endpoint.bucket,
        region = region_label(endpoint.region),
        url = %url,
        kind,
        "accessible bucket found"
    );
}

/// PUT a marker object under the endpoint, then optionally GET it back and
/// DELETE it. Each step runs at most once; get and delete are gated on a
/// successful put.
async fn write_checks(ctx: &ScanContext, endpoint: &Endpoint, probe: &WriteProbe) -> WriteOutcome {
    let mut ops = WriteOutcome::default();
    let object_url = endpoint.object_url(PROBE_OBJECT_KEY);

    ops.put = match ctx
        .http()
        .put(&object_url)
        .body(probe.payload.clone())
        .send()
        .await
    {
        Ok(resp) => resp.status().is_success(),
        Err(err) => {
            debug!(channel = "web", url = %object_url, error = %err, "put failed");
            false
        }
    };

    if ops.put && probe.verify_get {
        ops.get = match ctx.http().get(&object_url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(err) => {
                debug!(channel = "web", url = %object_url, error = %err, "readback failed");
                false
            }
        };
    }

    if ops.put && probe.delete_after {
        ops.delete = match ctx.http().delete(&object_url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(err) => {
                debug!(channel = "web", url = %object_url, error = %err, "delete failed");
                false
            }
        };
    }

    ops
}
