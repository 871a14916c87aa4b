use anyhow::Context;
use clap::Subcommand;
use meridian_config::Config;
use meridian_email_contracts::{Email, EmailBody, EmailService};
use meridian_models::email_address::EmailAddressWithName;
use tracing::info;

use crate::{email, environment};

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let sender = environment::default_sender(&config)?.without_name();
    let email_service = email::connect(&config.smtp)?;

    let receipt = email_service
        .send(Email {
            sender,
            recipient,
            reply_to: None,
            subject: "Email Deliverability Test".into(),
            body: EmailBody::Text("Email deliverability seems to be working!".into()),
        })
        .await
        .context("Failed to send test email")?;

    info!(message_id = %receipt.message_id, "Test email sent");
    println!("{}", receipt.message_id);

    Ok(())
}
