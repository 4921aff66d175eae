use harvest_core::{collect_page, decode_listing, AccessToken, Credentials, Item, PageResult};
use harvest_logging::{harvest_debug, harvest_error};
use reqwest::header::AUTHORIZATION;

use crate::{Endpoints, RequestRetrier};

/// Acceptance check supplied by the driver for each candidate item.
pub type Acceptance<'a> = &'a (dyn Fn(&Item) -> bool + Send + Sync);

/// Reads one page of the listing starting after `cursor`.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    async fn read_page(
        &self,
        credentials: &Credentials,
        token: &AccessToken,
        cursor: &str,
        is_accepted: Acceptance<'_>,
    ) -> PageResult;
}

/// [`PageSource`] over the HTTP listing endpoint.
#[derive(Debug, Clone)]
pub struct PageReader {
    retrier: RequestRetrier,
    endpoints: Endpoints,
}

impl PageReader {
    pub fn new(retrier: RequestRetrier, endpoints: Endpoints) -> Self {
        Self { retrier, endpoints }
    }
}

#[async_trait::async_trait]
impl PageSource for PageReader {
    async fn read_page(
        &self,
        credentials: &Credentials,
        token: &AccessToken,
        cursor: &str,
        is_accepted: Acceptance<'_>,
    ) -> PageResult {
        let url = self
            .endpoints
            .listing_url(&credentials.collection, cursor, credentials.page_size);
        let bearer = format!("bearer {}", token.access_token);
        harvest_debug!("GET {}", url);

        let body = self
            .retrier
            .execute(|client| client.get(&url).header(AUTHORIZATION, &bearer))
            .await;

        match decode_listing(&body) {
            Ok(page) => collect_page(&page, is_accepted),
            Err(err) => {
                harvest_error!("Failed to decode listing page\n\tResponse: {}\n\tError: {}", body, err);
                PageResult::failed(err)
            }
        }
    }
}
