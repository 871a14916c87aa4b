use meridian_config::Config;
use meridian_email_contracts::EmailService;
use meridian_templates_impl::TemplateServiceImpl;
use tracing::{info, warn};

use crate::{email, environment};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to smtp server");
    let email = email::connect(&config.smtp)?;
    match email.ping().await {
        Ok(()) => info!("SMTP server is reachable"),
        Err(err) => warn!("SMTP server is not reachable, contact requests will fail: {err:#}"),
    }

    let template = TemplateServiceImpl::new()?;
    let server = environment::rest_server(&config, email, template)?;

    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
