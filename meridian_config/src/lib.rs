use std::{net::IpAddr, path::Path};

use anyhow::Context;
use config::{File, FileFormat};
use meridian_models::{email_address::EmailAddress, Sensitive};
use serde::Deserialize;

pub use crate::duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variables that take precedence over the config files, mapped
/// to the keys they replace. Empty values are treated as unset.
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("SMTP_HOST", "smtp.host"),
    ("SMTP_PORT", "smtp.port"),
    ("SMTP_USER", "smtp.user"),
    ("SMTP_PASS", "smtp.pass"),
    ("SMTP_FROM", "smtp.from"),
];

/// Environment variable holding a colon separated list of config files.
pub const CONFIG_PATHS_VAR: &str = "MERIDIAN_CONFIG";

/// Load the config files listed in `MERIDIAN_CONFIG` (or the default config)
/// and apply the overrides from the process environment.
pub fn load() -> anyhow::Result<Config> {
    let paths: Vec<String> = match std::env::var(CONFIG_PATHS_VAR) {
        Ok(paths) if !paths.is_empty() => paths.split(':').map(Into::into).collect(),
        _ => vec![DEFAULT_CONFIG_PATH.to_owned()],
    };

    load_with_env(&paths, |var| std::env::var(var).ok())
}

/// Load the config files at `paths` and apply the overrides provided by
/// `env`. Later files override earlier ones.
pub fn load_with_env(
    paths: &[impl AsRef<Path>],
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    let builder = ENV_OVERRIDES
        .iter()
        .filter_map(|&(var, key)| Some((var, key, env(var).filter(|value| !value.is_empty())?)))
        .try_fold(builder, |builder, (var, key, value)| {
            builder
                .set_override(key, value)
                .with_context(|| format!("Failed to apply {var}"))
        })?;

    builder
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub smtp: SmtpConfig,
    pub contact: ContactConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Browser origins allowed to submit the contact form.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub pass: Option<Sensitive<String>>,
    /// Sender address used instead of the address of the inquirer.
    pub from: Option<EmailAddress>,
    #[serde(default)]
    pub security: SmtpSecurity,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmtpSecurity {
    None,
    #[default]
    Opportunistic,
    Starttls,
    Tls,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Mailbox inquiries are delivered to. Defaults to `smtp.user`.
    pub recipient: Option<EmailAddress>,
    pub subject_prefix: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}
