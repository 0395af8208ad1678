use std::{future::Future, time::Duration};

use chrono::{DateTime, Utc};
use relay_email_contracts::EmailDeliveryError;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait HealthFeatureService: Send + Sync + 'static {
    fn get_status(&self) -> HealthStatus;

    /// Ask the email provider whether the configured transport and
    /// credentials are usable. Never cached.
    fn verify_delivery(&self) -> impl Future<Output = Result<(), EmailDeliveryError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthStatus {
    /// Whether credentials for the selected transport are present.
    pub email_configured: bool,
    pub timestamp: DateTime<Utc>,
    pub uptime: Duration,
}

#[cfg(feature = "mock")]
impl MockHealthFeatureService {
    pub fn with_get_status(mut self, status: HealthStatus) -> Self {
        self.expect_get_status().once().return_const(status);
        self
    }

    pub fn with_verify_delivery(mut self, result: Result<(), EmailDeliveryError>) -> Self {
        self.expect_verify_delivery()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }
}
