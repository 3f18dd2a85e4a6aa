use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use fs2::FileExt;
use portfolio_models::audit::AuditRecord;
use portfolio_persistence_contracts::audit::AuditLogRepository;
use tokio::sync::Mutex;
use tracing::trace;

/// Audit log stored as a plain text file with one record per line.
///
/// Every append holds an exclusive lock on the file, so other processes
/// writing the same log never interleave with it.
#[derive(Debug, Clone)]
pub struct FileAuditLog {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Inner {
                path: path.into(),
                write_lock: Mutex::new(()),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }
}

impl AuditLogRepository for FileAuditLog {
    async fn append(&self, record: &AuditRecord) -> anyhow::Result<()> {
        let mut line = record.to_line();
        line.push('\n');

        // keeps concurrent appends of this process from piling up blocking threads
        let _guard = self.inner.write_lock.lock().await;

        let path = self.inner.path.clone();
        tokio::task::spawn_blocking(move || append_locked(&path, line.as_bytes()))
            .await
            .context("Audit log writer panicked")??;

        trace!(path = %self.inner.path.display(), status = %record.status, "appended audit record");

        Ok(())
    }
}

fn append_locked(path: &Path, line: &[u8]) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open audit log {}", path.display()))?;

    FileExt::lock_exclusive(&file)
        .with_context(|| format!("Failed to lock audit log {}", path.display()))?;
    let result = file.write_all(line).and_then(|()| file.flush());
    // closing the file releases the lock as well
    let _ = FileExt::unlock(&file);

    result.with_context(|| format!("Failed to write audit log {}", path.display()))
}
