use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use harvest_core::{AccessToken, Credentials, DecodeError};
use harvest_logging::harvest_info;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use thiserror::Error;

use crate::{Endpoints, RequestRetrier};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token endpoint answered with something other than a token,
    /// usually an error payload caused by bad credentials.
    #[error("failed to decode access token: {source}")]
    Decode { body: String, source: DecodeError },
}

/// Obtains the run's bearer token.
#[async_trait::async_trait]
pub trait TokenSource: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken, AuthError>;
}

/// `Basic` authorization header value for the OAuth client.
pub fn basic_authorization(client_id: &str, client_secret: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{client_id}:{client_secret}")))
}

/// Password grant form body. Values are substituted verbatim, so credentials
/// must not contain characters that need URL escaping.
pub fn password_grant_body(username: &str, password: &str) -> String {
    format!("grant_type=password&username={username}&password={password}")
}

/// Password-grant OAuth2 against the token endpoint.
#[derive(Debug, Clone)]
pub struct Authenticator {
    retrier: RequestRetrier,
    endpoints: Endpoints,
}

impl Authenticator {
    pub fn new(retrier: RequestRetrier, endpoints: Endpoints) -> Self {
        Self { retrier, endpoints }
    }
}

#[async_trait::async_trait]
impl TokenSource for Authenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken, AuthError> {
        let url = self.endpoints.token_url();
        let authorization =
            basic_authorization(&credentials.client_id, &credentials.client_secret);
        let body = password_grant_body(&credentials.username, &credentials.password);

        let response = self
            .retrier
            .execute(|client| {
                client
                    .post(&url)
                    .header(AUTHORIZATION, &authorization)
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(body.clone())
            })
            .await;

        match serde_json::from_str::<AccessToken>(&response) {
            Ok(token) => {
                harvest_info!(
                    "Authenticated as {} (token_type={} scope={} expires_in={}s)",
                    credentials.username,
                    token.token_type,
                    token.scope,
                    token.expires_in
                );
                Ok(token)
            }
            Err(err) => Err(AuthError::Decode {
                body: response,
                source: err.into(),
            }),
        }
    }
}
