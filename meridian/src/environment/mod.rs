use anyhow::Context;
use meridian_api_rest::RestServerConfig;
use meridian_config::Config;
use meridian_core_contact_impl::{
    relay::{ContactRelayConfig, ContactRelayServiceImpl},
    ContactFeatureServiceImpl,
};
use meridian_core_health_impl::{HealthFeatureConfig, HealthFeatureServiceImpl};
use meridian_models::email_address::EmailAddress;
use types::{Email, RestServer, Template};

pub mod types;

/// Wire up the rest server and all services it depends on.
pub fn rest_server(config: &Config, email: Email, template: Template) -> anyhow::Result<RestServer> {
    let health = HealthFeatureServiceImpl::new(email.clone(), health_feature_config(config));
    let relay = ContactRelayServiceImpl::new(email, template, contact_relay_config(config)?);
    let contact = ContactFeatureServiceImpl::new(relay);

    Ok(RestServer::new(health, contact, rest_server_config(config)?))
}

pub fn rest_server_config(config: &Config) -> anyhow::Result<RestServerConfig> {
    RestServerConfig::new(&config.http.allowed_origins)
}

pub fn health_feature_config(config: &Config) -> HealthFeatureConfig {
    HealthFeatureConfig {
        cache_ttl: config.health.cache_ttl.into(),
    }
}

pub fn contact_relay_config(config: &Config) -> anyhow::Result<ContactRelayConfig> {
    let recipient = match &config.contact.recipient {
        Some(recipient) => recipient.clone(),
        None => default_sender(config).context("No recipient for contact requests configured")?,
    };

    Ok(ContactRelayConfig {
        recipient: recipient.without_name().into(),
        sender_override: config.smtp.from.clone().map(Into::into),
        subject_prefix: config.contact.subject_prefix.as_str().into(),
    })
}

/// The configured sender override, falling back to the smtp user.
pub fn default_sender(config: &Config) -> anyhow::Result<EmailAddress> {
    if let Some(from) = &config.smtp.from {
        return Ok(from.clone());
    }

    config
        .smtp
        .user
        .as_deref()
        .context("Neither smtp.from nor smtp.user is set")?
        .parse()
        .context("smtp.user is not a valid email address")
}
