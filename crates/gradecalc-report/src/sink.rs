//! Export destinations.
//!
//! Copy and export are single fire-and-forget writes. [`deliver`] never
//! returns an error: whatever happens becomes a [`Notification`], and the
//! calculator state is never touched.

use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::export::ExportReport;

/// Somewhere an export artifact can be written.
#[async_trait]
pub trait ExportSink: Send + Sync {
    /// Human-readable sink name (e.g. "file").
    fn name(&self) -> &str;

    /// Write `contents`; returns the path written, if the sink has one.
    async fn write(&self, file_name: &str, contents: &str) -> Result<Option<PathBuf>>;
}

/// Writes into a directory, creating it if needed.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ExportSink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    async fn write(&self, file_name: &str, contents: &str) -> Result<Option<PathBuf>> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        let path = self.dir.join(file_name);
        tokio::fs::write(&path, contents)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(Some(path))
    }
}

/// Prints to stdout. Stands in for the clipboard in a terminal.
#[derive(Debug, Clone, Default)]
pub struct StdoutSink;

#[async_trait]
impl ExportSink for StdoutSink {
    fn name(&self) -> &str {
        "stdout"
    }

    async fn write(&self, _file_name: &str, contents: &str) -> Result<Option<PathBuf>> {
        let mut out = tokio::io::stdout();
        out.write_all(contents.as_bytes()).await?;
        out.write_all(b"\n").await?;
        out.flush().await?;
        Ok(None)
    }
}

/// Keeps every write in memory. Useful in tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    writes: Mutex<Vec<(String, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(file name, contents)` pairs in write order.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes
            .lock()
            .map(|w| w.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ExportSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    async fn write(&self, file_name: &str, contents: &str) -> Result<Option<PathBuf>> {
        self.writes
            .lock()
            .map_err(|_| anyhow::anyhow!("memory sink lock poisoned"))?
            .push((file_name.to_string(), contents.to_string()));
        Ok(None)
    }
}

/// Outcome of a copy or export, shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Failure(String),
}

impl Notification {
    pub fn is_success(&self) -> bool {
        matches!(self, Notification::Success(_))
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Success(msg) | Notification::Failure(msg) => write!(f, "{msg}"),
        }
    }
}

/// Write to a sink and turn the outcome into a notification.
pub async fn deliver(
    sink: &dyn ExportSink,
    file_name: &str,
    contents: &str,
    success: &str,
    failure: &str,
) -> Notification {
    match sink.write(file_name, contents).await {
        Ok(Some(path)) => {
            tracing::info!(sink = sink.name(), "wrote {}", path.display());
            Notification::Success(format!("{success} ({})", path.display()))
        }
        Ok(None) => Notification::Success(success.to_string()),
        Err(e) => {
            tracing::error!(sink = sink.name(), "export failed: {e:#}");
            Notification::Failure(failure.to_string())
        }
    }
}

/// Export the full text report.
pub async fn export_report(sink: &dyn ExportSink, report: &ExportReport) -> Notification {
    deliver(
        sink,
        &report.file_name(),
        &report.render(),
        "Report exported successfully!",
        "❌ Failed to export report",
    )
    .await
}

/// Copy the short summary.
pub async fn copy_result(sink: &dyn ExportSink, report: &ExportReport) -> Notification {
    deliver(
        sink,
        "clipboard",
        &report.copy_summary(),
        "Result copied to clipboard!",
        "❌ Failed to copy result",
    )
    .await
}
