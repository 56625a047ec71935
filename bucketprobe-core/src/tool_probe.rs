//! External-tool probe channel.
//!
//! Probes exact bucket names (no variations) sequentially, one tool
//! invocation at a time: per bucket, the no-region slot first, then every
//! region in catalogue order. Subprocess failures are never fatal; each one
//! is evidence about a single (bucket, region) pair only.

use std::io::Write;

use tracing::{debug, info, warn};

use crate::classify::{WriteOutcome, error_token, parse_object_total};
use crate::config::{PROBE_OBJECT_KEY, WriteProbe};
use crate::context::ScanContext;
use crate::regions::{all_region_slots, region_label};
use crate::tool::ToolInvoker;

/// Run the channel over every base name.
pub async fn run_tool_channel(ctx: &ScanContext, tool: &dyn ToolInvoker, buckets: &[String]) {
    for bucket in buckets {
        for region in all_region_slots() {
            if ctx.is_cancelled() {
                return;
            }
            if ctx.ledger.is_found(bucket, region) {
                continue;
            }
            probe_bucket_region(ctx, tool, bucket, region).await;
        }
    }
}

fn region_args(region: Option<&str>) -> Vec<String> {
    match region {
        Some(r) => vec!["--region".to_string(), r.to_string()],
        None => Vec::new(),
    }
}

async fn probe_bucket_region(
    ctx: &ScanContext,
    tool: &dyn ToolInvoker,
    bucket: &str,
    region: Option<&str>,
) {
    let label = region_label(region);

    let mut args = vec![
        "s3".to_string(),
        "ls".to_string(),
        format!("s3://{bucket}"),
        "--no-sign-request".to_string(),
        "--summarize".to_string(),
    ];
    args.extend(region_args(region));

    match tool.invoke(&args).await {
        Ok(out) if out.success() => {
            if let Some(total) = parse_object_total(&out.combined) {
                ctx.ledger.record_finding(bucket, region);
                info!(
                    channel = "cli",
                    bucket = %bucket,
                    region = label,
                    objects = total,
                    "listable bucket found"
                );
            } else {
                debug!(channel = "cli", bucket = %bucket, region = label, "no object total in output");
            }
        }
        Ok(out) => {
            let code = error_token(&out.combined);
            debug!(channel = "cli", bucket = %bucket, region = label, code = %code, "not accessible");
        }
        Err(err) => {
            warn!(channel = "cli", bucket = %bucket, region = label, error = %err, "tool invocation failed");
        }
    }

    if ctx.is_cancelled() {
        return;
    }

    if let Some(probe) = &ctx.config.write_probe {
        let ops = run_write_checks(tool, bucket, region, probe).await;
        if ops.any_success() {
            ctx.ledger.record_finding(bucket, region);
            info!(
                channel = "cli",
                bucket = %bucket,
                region = label,
                put = ops.put,
                get = ops.get,
                delete = ops.delete,
                "write-capability finding"
            );
        }
    }
}

/// PUT a staged marker object, then optionally GET it back and DELETE it.
///
/// Read and delete are gated on a successful put; each step runs at most
/// once and its own failure is independent evidence.
async fn run_write_checks(
    tool: &dyn ToolInvoker,
    bucket: &str,
    region: Option<&str>,
    probe: &WriteProbe,
) -> WriteOutcome {
    let mut ops = WriteOutcome::default();
    let label = region_label(region);

    let staged = match stage_payload(&probe.payload) {
        Ok(staged) => staged,
        Err(err) => {
            warn!(channel = "cli", bucket = %bucket, error = %err, "failed to stage write payload");
            return ops;
        }
    };

    let target = format!("s3://{bucket}/{PROBE_OBJECT_KEY}");
    let mut put_args = vec![
        "s3".to_string(),
        "cp".to_string(),
        staged.path().to_string_lossy().into_owned(),
        target.clone(),
        "--no-sign-request".to_string(),
    ];
    put_args.extend(region_args(region));
    ops.put = invocation_succeeded(tool, &put_args, bucket, label, "put").await;

    if ops.put && probe.verify_get {
        let readback = staged.path().with_extension("readback");
        let mut get_args = vec![
            "s3".to_string(),
            "cp".to_string(),
            target.clone(),
            readback.to_string_lossy().into_owned(),
            "--no-sign-request".to_string(),
        ];
        get_args.extend(region_args(region));
        ops.get = invocation_succeeded(tool, &get_args, bucket, label, "get").await;
        let _ = std::fs::remove_file(&readback);
    }

    if ops.put && probe.delete_after {
        let mut rm_args = vec![
            "s3".to_string(),
            "rm".to_string(),
            target,
            "--no-sign-request".to_string(),
        ];
        rm_args.extend(region_args(region));
        ops.delete = invocation_succeeded(tool, &rm_args, bucket, label, "delete").await;
    }

    ops
}

fn stage_payload(payload: &str) -> std::io::Result<tempfile::NamedTempFile> {
    let mut staged = tempfile::NamedTempFile::new()?;
    staged.write_all(payload.as_bytes())?;
    staged.flush()?;
    Ok(staged)
}

async fn invocation_succeeded(
    tool: &dyn ToolInvoker,
    args: &[String],
    bucket: &str,
    label: &str,
    step: &str,
) -> bool {
    match tool.invoke(args).await {
        Ok(out) if out.success() => true,
        Ok(out) => {
            let code = error_token(&out.combined);
            debug!(channel = "cli", bucket = %bucket, region = label, step, code = %code, "operation refused");
            false
        }
        Err(err) => {
            warn!(channel = "cli", bucket = %bucket, region = label, step, error = %err, "tool invocation failed");
            false
        }
    }
}
