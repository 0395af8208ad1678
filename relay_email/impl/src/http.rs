use std::{ops::Deref, sync::LazyLock, time::Duration};

use relay_utils::relay_version;

pub static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    let repository = env!("CARGO_PKG_REPOSITORY");
    let version = relay_version();

    format!("Contact Relay ({repository}, Version {version})")
});

#[derive(Debug, Clone)]
pub struct HttpClient(reqwest::Client);

impl HttpClient {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        reqwest::Client::builder()
            .user_agent(&*USER_AGENT)
            .timeout(timeout)
            .build()
            .map(Self)
    }
}

impl Deref for HttpClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
