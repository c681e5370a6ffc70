use crate::config::RemoteConfig;
use crate::errors::CounterError;
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;

/// A shared counter living outside this process.
pub trait RemoteCounter: Send + Sync {
    /// Atomically increments the counter and returns its new value.
    fn hit(&self) -> impl Future<Output = Result<u64, CounterError>> + Send;

    /// Reads the counter without incrementing it.
    fn get(&self) -> impl Future<Output = Result<u64, CounterError>> + Send;
}

#[derive(Debug, Deserialize)]
struct CounterValue {
    value: u64,
}

/// countapi-style HTTP counter: `GET {base}/hit/{ns}/{key}` and
/// `GET {base}/get/{ns}/{key}`, both answering `{"value": n}`.
#[derive(Debug, Clone)]
pub struct HttpCounter {
    client: Client,
    hit_url: String,
    get_url: String,
}

impl HttpCounter {
    pub fn new(config: &RemoteConfig) -> Result<Self, CounterError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            hit_url: config.hit_url(),
            get_url: config.get_url(),
        })
    }

    async fn fetch_value(&self, url: &str) -> Result<u64, CounterError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CounterError::RemoteUnavailable(format!(
                "{url} answered {status}"
            )));
        }
        let body: CounterValue = response.json().await?;
        Ok(body.value)
    }
}

impl RemoteCounter for HttpCounter {
    async fn hit(&self) -> Result<u64, CounterError> {
        self.fetch_value(&self.hit_url).await
    }

    async fn get(&self) -> Result<u64, CounterError> {
        self.fetch_value(&self.get_url).await
    }
}
