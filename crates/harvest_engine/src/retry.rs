use harvest_logging::{harvest_debug, harvest_warn};
use reqwest::{Client, RequestBuilder};

use crate::{EngineError, HttpSettings};

pub fn build_client(settings: &HttpSettings) -> Result<Client, EngineError> {
    Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .user_agent(settings.user_agent.clone())
        .build()
        .map_err(|err| EngineError::Client(err.to_string()))
}

/// Sends a request until the server answers with a success status.
///
/// There is no backoff and no attempt cap: failed statuses, transport errors
/// and unreadable bodies are logged and the request is rebuilt and sent again
/// immediately. An outage therefore stalls the caller until the process is
/// stopped.
#[derive(Debug, Clone)]
pub struct RequestRetrier {
    client: Client,
}

impl RequestRetrier {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Run `build` once per attempt and return the first successful body.
    ///
    /// The request is rebuilt for every attempt since sending consumes it.
    pub async fn execute<F>(&self, mut build: F) -> String
    where
        F: FnMut(&Client) -> RequestBuilder,
    {
        let mut attempt: u64 = 0;
        loop {
            attempt += 1;
            harvest_debug!("http attempt {}", attempt);

            let response = match build(&self.client).send().await {
                Ok(response) => response,
                Err(err) => {
                    harvest_warn!("Error: {}", err);
                    continue;
                }
            };

            let status = response.status();
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    harvest_warn!("Error: {} (failed to read body: {})", status.as_u16(), err);
                    continue;
                }
            };

            if status.is_success() {
                return body;
            }
            harvest_warn!("Error: {}", status.as_u16());
            harvest_warn!("Body: {}", body);
        }
    }
}
