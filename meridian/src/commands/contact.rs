use anyhow::Context;
use clap::Subcommand;
use meridian_client::ContactClient;
use meridian_config::Config;
use meridian_models::{
    contact::{ContactRequest, ContactRequestMessage, ContactRequestName, ContactRequestSubject},
    email_address::EmailAddress,
};
use url::Url;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Submit a contact request to a running server
    Submit {
        /// Base url of the server. Defaults to the configured http listener.
        #[arg(long)]
        url: Option<Url>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: EmailAddress,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            ContactCommand::Submit {
                url,
                name,
                email,
                subject,
                message,
            } => {
                let url = match url {
                    Some(url) => url,
                    None => local_url(&config)?,
                };
                let request = ContactRequest {
                    name: ContactRequestName::try_new(name)?,
                    email,
                    subject: ContactRequestSubject::try_new(subject)?,
                    message: ContactRequestMessage::try_new(message)?,
                };
                submit(url, request).await
            }
        }
    }
}

async fn submit(url: Url, request: ContactRequest) -> anyhow::Result<()> {
    let receipt = ContactClient::new(url)?
        .submit(&request)
        .await
        .context("Failed to submit contact request")?;

    println!("{}", receipt.message_id);

    Ok(())
}

fn local_url(config: &Config) -> anyhow::Result<Url> {
    let host = match config.http.host {
        host if host.is_unspecified() && host.is_ipv4() => "127.0.0.1".into(),
        host if host.is_unspecified() => "[::1]".into(),
        host if host.is_ipv6() => format!("[{host}]"),
        host => host.to_string(),
    };

    format!("http://{host}:{}/", config.http.port)
        .parse()
        .context("Failed to build server url")
}
