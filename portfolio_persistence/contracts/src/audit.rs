use std::future::Future;

use portfolio_models::audit::AuditRecord;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait AuditLogRepository: Send + Sync + 'static {
    /// Appends one record as a single, complete line.
    ///
    /// Concurrent calls never interleave their output.
    fn append(&self, record: &AuditRecord) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockAuditLogRepository {
    pub fn with_append(mut self, record: AuditRecord, result: bool) -> Self {
        self.expect_append()
            .once()
            .with(mockall::predicate::eq(record))
            .return_once(move |_| {
                Box::pin(std::future::ready(if result {
                    Ok(())
                } else {
                    Err(anyhow::anyhow!("disk full"))
                }))
            });
        self
    }
}
