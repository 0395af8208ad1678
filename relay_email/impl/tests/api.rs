use std::time::Duration;

use relay_email_contracts::{Email, EmailBody, EmailDeliveryError, EmailService};
use relay_email_impl::{api::ApiEmailServiceImpl, EmailServiceImpl};
use relay_testing::email_api::FakeEmailApi;
use relay_utils::assert_matches;

const KEY: &str = "test-key";

#[tokio::test]
async fn send_email() {
    let (api, sut) = setup(Some(KEY)).await;

    sut.send(email("admin@example.com", Some("<p>Hello</p>")))
        .await
        .unwrap();

    let received = api.received();
    assert_eq!(received.len(), 1);
    let mail = &received[0];
    assert!(mail.from.contains("noreply@example.com"));
    assert_eq!(mail.to.len(), 1);
    assert!(mail.to[0].contains("admin@example.com"));
    assert_eq!(mail.reply_to.len(), 1);
    assert!(mail.reply_to[0].contains("jane@example.com"));
    assert_eq!(mail.subject, "New Contact Form Message from Jane Doe");
    assert_eq!(mail.text, "Hello");
    assert_eq!(mail.html.as_deref(), Some("<p>Hello</p>"));
}

#[tokio::test]
async fn send_text_only() {
    let (api, sut) = setup(Some(KEY)).await;

    sut.send(email("admin@example.com", None)).await.unwrap();

    assert_eq!(api.received()[0].html, None);
}

#[tokio::test]
async fn send_twice_delivers_twice() {
    let (api, sut) = setup(Some(KEY)).await;

    sut.send(email("admin@example.com", None)).await.unwrap();
    sut.send(email("admin@example.com", None)).await.unwrap();

    assert_eq!(api.received().len(), 2);
}

#[tokio::test]
async fn send_invalid_key() {
    let (api, sut) = setup(Some("wrong-key")).await;

    let result = sut.send(email("admin@example.com", None)).await;

    assert_matches!(result, Err(EmailDeliveryError::Auth(_)));
    assert!(api.received().is_empty());
}

#[tokio::test]
async fn send_without_key() {
    let (_api, sut) = setup(None).await;

    let result = sut.send(email("admin@example.com", None)).await;

    assert_matches!(result, Err(EmailDeliveryError::Auth(_)));
}

#[tokio::test]
async fn send_rejected_recipient() {
    let (api, sut) = setup(Some(KEY)).await;

    let result = sut.send(email("bounce@example.invalid", None)).await;

    assert_matches!(result, Err(EmailDeliveryError::Envelope(_)));
    assert!(api.received().is_empty());
}

#[tokio::test]
async fn send_unreachable() {
    let sut: EmailServiceImpl = ApiEmailServiceImpl::new(
        "http://127.0.0.1:1/".parse().unwrap(),
        Some(KEY.into()),
        Duration::from_secs(2),
        "noreply@example.com".parse().unwrap(),
    )
    .unwrap()
    .into();

    let result = sut.send(email("admin@example.com", None)).await;

    assert_matches!(result, Err(EmailDeliveryError::Other(_)));
}

#[tokio::test]
async fn verify() {
    let (_api, sut) = setup(Some(KEY)).await;
    sut.verify().await.unwrap();

    let (_api, sut) = setup(Some("wrong-key")).await;
    assert_matches!(sut.verify().await, Err(EmailDeliveryError::Auth(_)));
}

#[tokio::test]
async fn errors_do_not_contain_key() {
    let (_api, sut) = setup(Some("wrong-key")).await;

    let err = sut.verify().await.unwrap_err();

    assert!(!format!("{err} {err:?}").contains("wrong-key"));
}

async fn setup(key: Option<&str>) -> (FakeEmailApi, EmailServiceImpl) {
    let api = FakeEmailApi::spawn(KEY).await.unwrap();
    let sut = ApiEmailServiceImpl::new(
        api.endpoint.clone(),
        key.map(Into::into),
        Duration::from_secs(5),
        "Contact Form <noreply@example.com>".parse().unwrap(),
    )
    .unwrap()
    .into();
    (api, sut)
}

fn email(recipient: &str, html: Option<&str>) -> Email {
    Email {
        recipient: recipient.parse().unwrap(),
        reply_to: Some("Jane Doe <jane@example.com>".parse().unwrap()),
        subject: "New Contact Form Message from Jane Doe".into(),
        body: EmailBody {
            text: "Hello".into(),
            html: html.map(Into::into),
        },
    }
}
