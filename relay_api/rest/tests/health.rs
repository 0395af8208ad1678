use std::time::Duration;

use anyhow::anyhow;
use axum::http::StatusCode;
use common::{get, router, send};
use pretty_assertions::assert_eq;
use relay_core_contact_contracts::MockContactFeatureService;
use relay_core_health_contracts::{HealthStatus, MockHealthFeatureService};
use relay_email_contracts::EmailDeliveryError;
use relay_utils::relay_version;
use serde_json::json;

mod common;

#[tokio::test]
async fn health() {
    // Arrange
    let health = MockHealthFeatureService::new().with_get_status(HealthStatus {
        email_configured: true,
        timestamp: "2024-11-01T12:00:00Z".parse().unwrap(),
        uptime: Duration::from_millis(1500),
    });
    let sut = router(health, MockContactFeatureService::new());

    // Act
    let response = send(sut, get("/api/health")).await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({
            "status": "healthy",
            "message": "Server is running smoothly",
            "emailConfigured": true,
            "timestamp": "2024-11-01T12:00:00Z",
            "uptime": 1.5,
            "version": relay_version(),
            "environment": if cfg!(debug_assertions) { "development" } else { "production" },
        })
    );
}

#[tokio::test]
async fn test_email_ok() {
    // Arrange
    let health = MockHealthFeatureService::new().with_verify_delivery(Ok(()));
    let sut = router(health, MockContactFeatureService::new());

    // Act
    let response = send(sut, get("/api/test-email")).await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({"success": true, "message": "Email transporter is configured correctly"})
    );
}

#[tokio::test]
async fn test_email_auth_error() {
    // Arrange
    let health = MockHealthFeatureService::new().with_verify_delivery(Err(
        EmailDeliveryError::Auth(anyhow!("535 password hunter2 rejected")),
    ));
    let sut = router(health, MockContactFeatureService::new());

    // Act
    let response = send(sut, get("/api/test-email")).await;

    // Assert
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["success"], json!(false));
    let error = response.body["error"].as_str().unwrap();
    assert!(error.starts_with("Email configuration error: "));
    assert!(!error.contains("hunter2"));
}
