use anyhow::Context;
use meridian_config::{SmtpConfig, SmtpSecurity};
use meridian_email_impl::{EmailServiceConfig, EmailServiceImpl, SmtpCredentials};

/// Configure the transport to the SMTP server
pub fn connect(config: &SmtpConfig) -> anyhow::Result<EmailServiceImpl> {
    let security = match config.security {
        SmtpSecurity::None => meridian_email_impl::SmtpSecurity::None,
        SmtpSecurity::Opportunistic => meridian_email_impl::SmtpSecurity::Opportunistic,
        SmtpSecurity::Starttls => meridian_email_impl::SmtpSecurity::StartTls,
        SmtpSecurity::Tls => meridian_email_impl::SmtpSecurity::Tls,
    };

    let credentials = config
        .user
        .clone()
        .zip(config.pass.clone())
        .map(|(user, pass)| SmtpCredentials { user, pass });

    EmailServiceImpl::new(EmailServiceConfig {
        host: config.host.clone(),
        port: config.port,
        security,
        credentials,
        timeout: config.timeout.into(),
    })
    .with_context(|| format!("Failed to configure SMTP transport for {}", config.host))
}
