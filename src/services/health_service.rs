use crate::adapters::audit::AuditLog;
use crate::adapters::mailer::Mailer;
use std::sync::Arc;

/// Readiness checks over the components the pipeline depends on.
#[derive(Clone, Debug)]
pub struct HealthService {
    audit: AuditLog,
    mailer: Arc<dyn Mailer>,
}

impl HealthService {
    #[must_use]
    pub fn new(audit: AuditLog, mailer: Arc<dyn Mailer>) -> Self {
        Self { audit, mailer }
    }

    /// Checks that the audit log is writable.
    ///
    /// # Errors
    /// Returns a string describing the failure when it is not.
    pub async fn check_audit_log(&self) -> Result<(), String> {
        self.audit
            .check()
            .await
            .map_err(|e| format!("Audit log unwritable at {}: {e}", self.audit.path().display()))
    }

    /// Checks connectivity to the mail transport.
    ///
    /// # Errors
    /// Returns a string describing the failure when it is unreachable.
    pub async fn check_mailer(&self) -> Result<(), String> {
        self.mailer.check().await.map_err(|e| format!("Mail transport unavailable: {e}"))
    }
}
