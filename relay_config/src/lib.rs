use std::{collections::HashMap, net::IpAddr, path::Path};

use anyhow::{anyhow, Context};
use config::{Environment, File, FileFormat};
pub use duration::Duration;
use relay_models::{contact::SubmissionSchema, email_address::EmailAddressWithName, Sensitive};
use serde::Deserialize;
use url::Url;

mod duration;

/// The built-in defaults, overridden by every other source.
pub const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Colon separated list of additional config files.
pub const CONFIG_PATHS_VAR: &str = "RELAY_CONFIG";

const ENV_PREFIX: &str = "RELAY";

/// Conventional environment variables that are accepted in addition to the
/// `RELAY_` prefixed ones.
const ENV_ALIASES: &[(&str, &str)] = &[
    ("EMAIL_USER", "email.smtp.username"),
    ("EMAIL_PASS", "email.smtp.password"),
    ("EMAIL_API_KEY", "email.api.key"),
    ("CONTACT_EMAIL", "contact.recipient"),
    ("PORT", "http.port"),
];

const CORS_ORIGINS_VAR: &str = "CORS_ORIGINS";

/// Comma separated, read here because environment values are kept as
/// strings.
const ALLOWED_ORIGINS_VAR: &str = "RELAY_HTTP__ALLOWED_ORIGINS";

/// Load the config from the defaults, the files listed in `RELAY_CONFIG` and
/// the process environment.
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var_os(CONFIG_PATHS_VAR)
        .map(|paths| std::env::split_paths(&paths).collect::<Vec<_>>())
        .unwrap_or_default();
    load_with_env(&paths, &std::env::vars().collect())
}

pub fn load_with_env(
    paths: &[impl AsRef<Path>],
    env: &HashMap<String, String>,
) -> anyhow::Result<Config> {
    let builder =
        config::Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    let builder = paths.iter().try_fold(builder, |builder, path| {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let source = File::from_str(&content, FileFormat::Toml);
        anyhow::Ok(builder.add_source(source))
    })?;

    let builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .source(Some(env.clone())),
    );

    let lookup = |var: &str| env.get(var).filter(|value| !value.is_empty()).cloned();

    let builder = ENV_ALIASES
        .iter()
        .try_fold(builder, |builder, &(var, key)| {
            builder.set_override_option(key, lookup(var))
        })?
        .set_override_option(
            "http.allowed_origins",
            lookup(ALLOWED_ORIGINS_VAR).map(|origins| split_list(&origins)),
        )?
        .set_override_option(
            "http.allowed_origins",
            lookup(CORS_ORIGINS_VAR).map(|origins| split_list(&origins)),
        )?;

    builder
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub transport: EmailTransport,
    pub from: Option<EmailAddressWithName>,
    pub timeout: Duration,
    pub smtp: SmtpConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailTransport {
    Smtp,
    Api,
}

#[derive(Debug, Deserialize)]
pub struct SmtpConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<Sensitive<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    pub endpoint: Url,
    pub key: Option<Sensitive<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub recipient: EmailAddressWithName,
    pub site_name: String,
    pub schema: SubmissionSchema,
    pub html: bool,
}

impl SmtpConfig {
    /// Username and password, if both are set and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|x| !x.is_empty())?;
        let password = self
            .password
            .as_deref()
            .map(String::as_str)
            .filter(|x| !x.is_empty())?;
        Some((username, password))
    }
}

impl ApiConfig {
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref().map(String::as_str).filter(|x| !x.is_empty())
    }
}

impl EmailConfig {
    /// Whether the credentials of the selected transport are present. This
    /// does not check whether they are valid.
    pub fn credentials_configured(&self) -> bool {
        match self.transport {
            EmailTransport::Smtp => self.smtp.credentials().is_some(),
            EmailTransport::Api => self.api.key().is_some(),
        }
    }

    /// The mailbox outbound emails are sent from. Falls back to the smtp
    /// username, displayed as `site_name`.
    pub fn sender(&self, site_name: &str) -> anyhow::Result<EmailAddressWithName> {
        if let Some(from) = &self.from {
            return Ok(from.clone());
        }

        let username = self
            .smtp
            .username
            .as_deref()
            .filter(|x| !x.is_empty())
            .ok_or_else(|| anyhow!("Neither email.from nor email.smtp.username is set"))?;

        username
            .parse::<relay_models::email_address::EmailAddress>()
            .map(|address| address.with_name(site_name.into()))
            .with_context(|| format!("Failed to use smtp username {username:?} as sender"))
    }
}
