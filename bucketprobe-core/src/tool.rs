//! External storage tool collaborator.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{Result, ScanError};

/// Exit status and merged stdout/stderr of one tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub combined: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Interface to the external storage-listing tool.
///
/// Kept as a seam so the probe channel can be exercised against canned
/// transcripts without spawning processes.
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    async fn invoke(&self, args: &[String]) -> Result<ToolOutput>;
}

/// The real AWS CLI, invoked as a short-lived blocking subprocess.
#[derive(Debug, Clone)]
pub struct AwsCli {
    program: PathBuf,
}

impl AwsCli {
    /// Resolve the `aws` binary on PATH.
    ///
    /// Failing here is the one fatal setup fault of the tool channel; it
    /// happens before any probing starts.
    pub fn locate() -> Result<Self> {
        let program =
            which::which("aws").map_err(|_| ScanError::ToolMissing("aws".to_string()))?;
        Ok(Self { program })
    }
}

#[async_trait]
impl ToolInvoker for AwsCli {
    async fn invoke(&self, args: &[String]) -> Result<ToolOutput> {
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await?;
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(ToolOutput {
            status: output.status.code(),
            combined,
        })
    }
}
