use std::sync::Arc;

use portfolio_api_rest::RestServer;
use portfolio_config::Config;
use portfolio_core_contact_impl::{ContactServiceConfig, ContactServiceImpl};
use portfolio_email_contracts::EmailService;
use portfolio_persistence_file::FileAuditLog;
use portfolio_shared_impl::time::TimeServiceImpl;
use portfolio_templates_impl::TemplateServiceImpl;
use tracing::{info, warn};

use crate::email;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to smtp server");
    let email = email::connect(&config.email).await?;
    // Delivery failures are reported per submission, so an unreachable
    // server must not prevent startup.
    if let Err(err) = email.ping().await {
        warn!("Smtp server is not reachable: {err:#}");
    }

    let template = TemplateServiceImpl::new()?;

    info!("Appending audit log to {}", config.contact.audit_log.display());
    let audit_log = FileAuditLog::new(config.contact.audit_log);

    let contact = ContactServiceImpl {
        time: TimeServiceImpl,
        email,
        template,
        audit_log,
        config: ContactServiceConfig {
            recipient: Arc::new(config.contact.email),
            site_name: config.contact.site_name.into(),
        },
    };

    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    RestServer::new(contact)
        .serve(config.http.host, config.http.port)
        .await
}
