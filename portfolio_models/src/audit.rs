use chrono::{DateTime, Utc};

/// Outcome of a delivery attempt, as recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditStatus {
    Success,
    Failed,
}

impl std::fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
        .fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub timestamp: DateTime<Utc>,
    pub status: AuditStatus,
    pub name: String,
    pub email: String,
    pub subject: String,
}

impl AuditRecord {
    /// Renders the record as a single log line, without the trailing
    /// newline.
    pub fn to_line(&self) -> String {
        format!(
            "{} | {} | Name: {} | Email: {} | Subject: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.status,
            single_line(&self.name),
            single_line(&self.email),
            single_line(&self.subject),
        )
    }
}

fn single_line(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
