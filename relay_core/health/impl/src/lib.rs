use std::time::Duration;

use chrono::{DateTime, Utc};
use relay_core_health_contracts::{HealthFeatureService, HealthStatus};
use relay_email_contracts::{EmailDeliveryError, EmailService};
use relay_shared_contracts::time::TimeService;
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct HealthFeatureServiceImpl<Time, Email> {
    time: Time,
    email: Email,
    config: HealthFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub email_configured: bool,
    pub started_at: DateTime<Utc>,
}

impl<Time, Email> HealthFeatureServiceImpl<Time, Email> {
    pub fn new(time: Time, email: Email, config: HealthFeatureConfig) -> Self {
        Self {
            time,
            email,
            config,
        }
    }
}

impl<Time, Email> HealthFeatureService for HealthFeatureServiceImpl<Time, Email>
where
    Time: TimeService,
    Email: EmailService,
{
    fn get_status(&self) -> HealthStatus {
        let now = self.time.now();
        HealthStatus {
            email_configured: self.config.email_configured,
            timestamp: now,
            uptime: (now - self.config.started_at)
                .to_std()
                .unwrap_or(Duration::ZERO),
        }
    }

    #[tracing::instrument(skip_all)]
    async fn verify_delivery(&self) -> Result<(), EmailDeliveryError> {
        self.email
            .verify()
            .await
            .inspect(|_| info!("email transport verified"))
            .inspect_err(|err| {
                error!(class = err.class(), "Failed to verify email transport: {err}")
            })
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use chrono::TimeDelta;
    use relay_email_contracts::MockEmailService;
    use relay_shared_contracts::time::MockTimeService;
    use relay_utils::assert_matches;

    use super::*;

    fn started_at() -> DateTime<Utc> {
        "2024-11-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn get_status() {
        // Arrange
        let now = started_at() + TimeDelta::milliseconds(90_500);
        let time = MockTimeService::new().with_now(now);
        let sut = HealthFeatureServiceImpl::new(
            time,
            MockEmailService::new(),
            HealthFeatureConfig {
                email_configured: true,
                started_at: started_at(),
            },
        );

        // Act
        let result = sut.get_status();

        // Assert
        assert_eq!(
            result,
            HealthStatus {
                email_configured: true,
                timestamp: now,
                uptime: Duration::from_millis(90_500),
            }
        );
    }

    #[test]
    fn get_status_not_configured() {
        // Arrange
        let time = MockTimeService::new().with_now(started_at());
        let sut = HealthFeatureServiceImpl::new(
            time,
            MockEmailService::new(),
            HealthFeatureConfig {
                email_configured: false,
                started_at: started_at(),
            },
        );

        // Act
        let result = sut.get_status();

        // Assert
        assert!(!result.email_configured);
        assert_eq!(result.uptime, Duration::ZERO);
    }

    #[tokio::test]
    async fn verify_delivery_ok() {
        // Arrange
        let email = MockEmailService::new().with_verify(Ok(()));
        let sut = HealthFeatureServiceImpl::new(
            MockTimeService::new(),
            email,
            HealthFeatureConfig {
                email_configured: true,
                started_at: started_at(),
            },
        );

        // Act
        let result = sut.verify_delivery().await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn verify_delivery_auth_error() {
        // Arrange
        let email = MockEmailService::new()
            .with_verify(Err(EmailDeliveryError::Auth(anyhow!("535 rejected"))));
        let sut = HealthFeatureServiceImpl::new(
            MockTimeService::new(),
            email,
            HealthFeatureConfig {
                email_configured: true,
                started_at: started_at(),
            },
        );

        // Act
        let result = sut.verify_delivery().await;

        // Assert
        assert_matches!(result, Err(EmailDeliveryError::Auth(_)));
    }
}
