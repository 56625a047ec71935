mod options;

use std::pin::pin;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bucketprobe_core::{ScanContext, ScanError, run_scan};

use crate::options::Cli;

/// A required external tool is missing.
const EXIT_TOOL_MISSING: u8 = 2;
/// Interrupt-triggered shutdown completed.
const EXIT_INTERRUPT: u8 = 130;

/// How long in-flight probes get to observe the cancellation token.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(3);

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "bucketprobe=debug,bucketprobe_core=debug"
    } else {
        "bucketprobe=info,bucketprobe_core=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            match err.downcast_ref::<ScanError>() {
                Some(ScanError::ToolMissing(_)) => ExitCode::from(EXIT_TOOL_MISSING),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let names = cli.load_names()?;
    let config = cli.scan_config();

    info!(
        base = %names[0],
        names = names.len(),
        channels = ?config.channels,
        variations = config.expand_variations,
        "starting scan"
    );

    let ctx = Arc::new(ScanContext::new(&names[0], config)?);

    // Ctrl-C sets the token once; probes observe it cooperatively.
    tokio::spawn({
        let ctx = Arc::clone(&ctx);
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, stopping");
                ctx.request_stop();
            }
        }
    });

    let cancel = ctx.cancel_token();
    let mut scan = pin!(run_scan(Arc::clone(&ctx), names));
    let interrupted = tokio::select! {
        // keep the interrupt branch first so a shutdown that races scan
        // completion still reports the interrupt exit code
        biased;
        _ = cancel.cancelled() => {
            // Bounded grace period: queued work is dropped immediately, but
            // probes mid-request may still need to return.
            if tokio::time::timeout(SHUTDOWN_GRACE, &mut scan).await.is_err() {
                warn!("shutdown grace period elapsed, abandoning in-flight probes");
            }
            true
        }
        result = &mut scan => {
            result?;
            false
        }
    };

    print_summary(&ctx);
    if interrupted {
        Ok(ExitCode::from(EXIT_INTERRUPT))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn print_summary(ctx: &ScanContext) {
    let snapshot = ctx.ledger.snapshot();
    let base = ctx.ledger.base();

    println!();
    if snapshot.is_empty() {
        println!("No accessible buckets found.");
        return;
    }

    if ctx.ledger.base_found() {
        println!("Base bucket '{base}' is accessible!");
    } else {
        println!(
            "Found {} accessible bucket(s), but not the base bucket '{base}'.",
            snapshot.len()
        );
    }
    for (bucket, regions) in &snapshot {
        if regions.is_empty() {
            println!("  s3://{bucket}");
        } else {
            let regions = regions.iter().cloned().collect::<Vec<_>>().join(", ");
            println!("  s3://{bucket}  [{regions}]");
        }
    }
}
