use std::sync::Arc;

use chrono::{DateTime, Utc};
use portfolio_core_contact_contracts::{ContactSendMessageError, ContactService};
use portfolio_email_contracts::{Email, EmailBody, EmailService};
use portfolio_models::{
    audit::{AuditRecord, AuditStatus},
    contact::{ContactMessage, ContactSubmission},
    email_address::{EmailAddress, EmailAddressWithName},
};
use portfolio_persistence_contracts::audit::AuditLogRepository;
use portfolio_shared_contracts::time::TimeService;
use portfolio_templates_contracts::{
    ContactNotificationTemplate, ContactNotificationTextTemplate, TemplateService,
};
use tracing::{debug, error, warn};

const SENT_AT_FORMAT: &str = "%B %-d, %Y at %-I:%M %p";

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Time, Email, Template, AuditLog> {
    pub time: Time,
    pub email: Email,
    pub template: Template,
    pub audit_log: AuditLog,
    pub config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// Address that receives all contact messages.
    pub recipient: Arc<EmailAddress>,
    pub site_name: Arc<str>,
}

impl<Time, EmailS, TemplateS, AuditLog> ContactService
    for ContactServiceImpl<Time, EmailS, TemplateS, AuditLog>
where
    Time: TimeService,
    EmailS: EmailService,
    TemplateS: TemplateService,
    AuditLog: AuditLogRepository,
{
    async fn send_message(
        &self,
        submission: ContactSubmission,
        host: Option<String>,
    ) -> Result<(), ContactSendMessageError> {
        let submission = submission.sanitize();

        if submission.is_spam() {
            debug!("rejecting submission with filled honeypot field");
            return Err(ContactSendMessageError::Spam);
        }

        let message = submission.validate()?;

        let now = self.time.now();
        let sent = match self.deliver(&message, host.as_deref(), now).await {
            Ok(true) => true,
            Ok(false) => {
                error!("mail server rejected contact message");
                false
            }
            Err(err) => {
                error!("failed to send contact message: {err:#}");
                false
            }
        };

        let record = AuditRecord {
            timestamp: now,
            status: if sent {
                AuditStatus::Success
            } else {
                AuditStatus::Failed
            },
            name: message.author.name.to_string(),
            email: message.author.email.to_string(),
            subject: message.subject.to_string(),
        };
        if let Err(err) = self.audit_log.append(&record).await {
            warn!("failed to write audit log: {err:#}");
        }

        if !sent {
            return Err(ContactSendMessageError::Send {
                recipient: (*self.config.recipient).clone(),
            });
        }

        Ok(())
    }
}

impl<Time, EmailS, TemplateS, AuditLog> ContactServiceImpl<Time, EmailS, TemplateS, AuditLog>
where
    Time: TimeService,
    EmailS: EmailService,
    TemplateS: TemplateService,
    AuditLog: AuditLogRepository,
{
    async fn deliver(
        &self,
        message: &ContactMessage,
        host: Option<&str>,
        now: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let notification = ContactNotificationTemplate {
            name: message.author.name.to_string(),
            email: message.author.email.to_string(),
            subject: message.subject.to_string(),
            message: message.content.to_string(),
            sent_at: now.format(SENT_AT_FORMAT).to_string(),
        };
        let html = self.template.render(&notification)?;
        let text = self
            .template
            .render(&ContactNotificationTextTemplate(notification))?;

        self.email
            .send(Email {
                recipient: (*self.config.recipient).clone().into(),
                sender: self.sender(host),
                subject: format!("[{}] {}", self.config.site_name, message.subject),
                body: EmailBody::Alternative { text, html },
                reply_to: Some(
                    message
                        .author
                        .email
                        .clone()
                        .with_name(message.author.name.to_string()),
                ),
            })
            .await
    }

    /// `<site name> <noreply@host>`, if the request host is usable as a mail
    /// domain.
    fn sender(&self, host: Option<&str>) -> Option<EmailAddressWithName> {
        let host = host?;
        let domain = host
            .rsplit_once(':')
            .filter(|(_, port)| port.bytes().all(|b| b.is_ascii_digit()))
            .map_or(host, |(domain, _)| domain);

        EmailAddress::from_parts("noreply", domain)
            .map(|address| address.with_name(self.config.site_name.to_string()))
    }
}
