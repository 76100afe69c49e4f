use crate::config::ClientConfig;
use crate::encoding::TextEncoding;
use crate::sdk_error::SdkError;
use log::warn;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;

/// Carries one envelope to the carrier and brings back whatever it answered.
///
/// Implementations return the body regardless of the HTTP status, SOAP faults arrive as errors 500. Only a failed
/// exchange is an error.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, url: &str, envelope: &str) -> Result<String, SdkError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    encoding: TextEncoding,
    retries: u32,
}

impl HttpTransport {
    /// The carrier's test deployment runs on a certificate that does not validate, so neither does this client.
    pub fn new(config: &ClientConfig) -> Result<Self, SdkError> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(config.timeout())
            .build()
            .map_err(|error| SdkError::InvalidConfig {
                reason: error.to_string(),
            })?;

        Ok(Self {
            client,
            encoding: config.encoding,
            retries: config.retries,
        })
    }

    async fn post_once(&self, url: &str, body: Vec<u8>) -> Result<String, SdkError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(&self.encoding.content_type()).map_err(|error| {
                SdkError::InvalidConfig {
                    reason: error.to_string(),
                }
            })?,
        );

        let response = self
            .client
            .post(url)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(into_sdk_error)?;

        let status = response.status();
        let text = response.text().await.map_err(into_sdk_error)?;

        if !status.is_success() {
            warn!("{url} answered with HTTP status {status}");
        }

        Ok(text)
    }
}

fn into_sdk_error(error: reqwest::Error) -> SdkError {
    if error.is_timeout() {
        SdkError::Timeout
    } else {
        SdkError::Transport {
            reason: error.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn post(&self, url: &str, envelope: &str) -> Result<String, SdkError> {
        let body = self.encoding.encode(envelope);

        let mut attempt = 0;
        loop {
            match self.post_once(url, body.clone()).await {
                Err(error) if error.is_retryable() && attempt < self.retries => {
                    attempt += 1;
                    warn!("{error}, retrying ({attempt}/{})", self.retries);
                    tokio::time::sleep(Duration::from_millis(500 * u64::from(attempt))).await;
                }

                result => return result,
            }
        }
    }
}
