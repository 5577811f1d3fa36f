use std::path::{Path, PathBuf};
use std::sync::Arc;
use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

const LINE_TIMESTAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Append-only log of successfully delivered submissions.
///
/// Appends are serialized through an in-process mutex and the file is
/// opened in append mode, so concurrent requests cannot interleave
/// partial lines.
#[derive(Clone, Debug)]
pub struct AuditLog {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl AuditLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Arc::new(Mutex::new(())) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one line for a delivered submission. Best-effort: a
    /// write failure is logged and never fails the request.
    pub async fn record(&self, name: &str, email: &str, urgency: &str) {
        let timestamp = OffsetDateTime::now_utc().format(&LINE_TIMESTAMP).unwrap_or_default();
        let line = format!("{timestamp} - New inquiry from: {name} ({email}) - Priority: {urgency}\n");

        if let Err(e) = self.append(line.as_bytes()).await {
            tracing::warn!(error = %e, path = %self.path.display(), "failed to append audit line");
        }
    }

    /// Verifies the log file can be opened for append.
    ///
    /// # Errors
    /// Returns the underlying I/O error when it cannot.
    pub async fn check(&self) -> std::io::Result<()> {
        let _guard = self.lock.lock().await;
        tokio::fs::OpenOptions::new().create(true).append(true).open(&self.path).await.map(|_| ())
    }

    async fn append(&self, bytes: &[u8]) -> std::io::Result<()> {
        let _guard = self.lock.lock().await;
        let mut file =
            tokio::fs::OpenOptions::new().create(true).append(true).open(&self.path).await?;
        file.write_all(bytes).await?;
        file.flush().await
    }
}
