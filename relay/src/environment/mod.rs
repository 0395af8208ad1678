use chrono::{DateTime, Utc};
use relay_api_rest::RestServerConfig;
use relay_config::Config;
use relay_core_contact_impl::ContactFeatureConfig;
use relay_core_health_impl::HealthFeatureConfig;
use types::{ContactFeature, Email, HealthFeature, RestServer, Time};

pub mod types;

/// Builds the services for `serve` from the config and the email transport.
pub struct Provider {
    config: ConfigProvider,
    email: Email,
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self { config, email }
    }

    pub fn rest_server(&self) -> RestServer {
        RestServer::new(
            self.health_feature(),
            self.contact_feature(),
            self.config.rest_server_config.clone(),
        )
    }

    fn contact_feature(&self) -> ContactFeature {
        ContactFeature::new(
            self.email.clone(),
            self.config.contact_feature_config.clone(),
        )
    }

    fn health_feature(&self) -> HealthFeature {
        HealthFeature::new(
            Time::default(),
            self.email.clone(),
            self.config.health_feature_config.clone(),
        )
    }
}

/// Service configs derived from the application config.
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    rest_server_config: RestServerConfig,
    contact_feature_config: ContactFeatureConfig,
    health_feature_config: HealthFeatureConfig,
}

impl ConfigProvider {
    pub fn new(config: &Config, started_at: DateTime<Utc>) -> Self {
        // API
        let rest_server_config = RestServerConfig {
            allowed_origins: config.http.allowed_origins.clone().into(),
        };

        // Core
        let contact_feature_config = ContactFeatureConfig {
            recipient: config.contact.recipient.clone().into(),
            site_name: config.contact.site_name.as_str().into(),
            schema: config.contact.schema,
            html: config.contact.html,
        };

        let health_feature_config = HealthFeatureConfig {
            email_configured: config.email.credentials_configured(),
            started_at,
        };

        Self {
            rest_server_config,
            contact_feature_config,
            health_feature_config,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use relay_models::contact::SubmissionSchema;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Config {
        let env = vars
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect::<HashMap<_, _>>();
        relay_config::load_with_env(&[] as &[&str], &env).unwrap()
    }

    #[test]
    fn config_provider() {
        let started_at = "2024-11-01T12:00:00Z".parse().unwrap();
        let sut = ConfigProvider::new(
            &config(&[
                ("CONTACT_EMAIL", "office@example.com"),
                ("RELAY_CONTACT__SCHEMA", "extended"),
                ("CORS_ORIGINS", "https://www.example.com"),
                ("EMAIL_USER", "relay@example.com"),
                ("EMAIL_PASS", "secret"),
            ]),
            started_at,
        );

        assert_eq!(sut.contact_feature_config.recipient.email(), "office@example.com");
        assert_eq!(sut.contact_feature_config.schema, SubmissionSchema::Extended);
        assert_eq!(&*sut.contact_feature_config.site_name, "Contact Form");
        assert!(sut.health_feature_config.email_configured);
        assert_eq!(sut.health_feature_config.started_at, started_at);
        assert_eq!(
            &*sut.rest_server_config.allowed_origins,
            ["https://www.example.com".to_owned()]
        );
    }

    #[test]
    fn email_not_configured() {
        let sut = ConfigProvider::new(&config(&[]), Utc::now());
        assert!(!sut.health_feature_config.email_configured);
    }
}
