use std::time::Duration;

use harvest_core::{Credentials, DriverState, Item, RunState};
use harvest_logging::{harvest_debug, harvest_error, harvest_info};

use crate::{
    build_client, AuthError, Authenticator, Endpoints, EngineError, HttpSettings, PageReader,
    PageSource, RequestRetrier, TokenSource,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestOutcome {
    /// Accepted `"title body"` texts in acceptance order.
    pub bodies: Vec<String>,
    pub pages_read: usize,
}

/// Authenticates once, then walks the listing page by page until the target
/// count is reached or a page contributes nothing new.
///
/// A page that fails to decode is requested again with the same cursor after
/// the usual delay. Combined with the unbounded request retry this means an
/// outage stalls the run rather than ending it.
pub struct CollectionDriver<T, P> {
    credentials: Credentials,
    tokens: T,
    pages: P,
}

impl CollectionDriver<Authenticator, PageReader> {
    /// Driver backed by the HTTP token and listing endpoints.
    pub fn over_http(
        credentials: Credentials,
        endpoints: Endpoints,
        settings: &HttpSettings,
    ) -> Result<Self, EngineError> {
        let retrier = RequestRetrier::new(build_client(settings)?);
        Ok(Self::new(
            credentials,
            Authenticator::new(retrier.clone(), endpoints.clone()),
            PageReader::new(retrier, endpoints),
        ))
    }
}

impl<T, P> CollectionDriver<T, P>
where
    T: TokenSource,
    P: PageSource,
{
    pub fn new(credentials: Credentials, tokens: T, pages: P) -> Self {
        Self {
            credentials,
            tokens,
            pages,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub async fn run(&self) -> Result<HarvestOutcome, AuthError> {
        let mut state = DriverState::Authenticating;
        harvest_debug!("driver state {:?}", state);

        let token = match self.tokens.authenticate(&self.credentials).await {
            Ok(token) => token,
            Err(err) => {
                state = DriverState::Aborted;
                match &err {
                    AuthError::Decode { body, source } => {
                        harvest_error!("Response: {}, Error: {}", body, source);
                    }
                }
                harvest_debug!("driver state {:?}", state);
                return Err(err);
            }
        };

        let delay_seconds = self.credentials.delay_seconds;
        let delay = Duration::from_secs(delay_seconds);
        let mut run = RunState::new(self.credentials.item_limit);
        state = DriverState::Paging;
        harvest_debug!("driver state {:?}", state);

        while state == DriverState::Paging {
            if run.pages_read() > 0 {
                tokio::time::sleep(delay).await;
            }

            let is_new = |item: &Item| run.is_new(item);
            let page = self
                .pages
                .read_page(&self.credentials, &token, run.cursor(), &is_new)
                .await;
            state = run.merge(page);

            harvest_info!(
                "Read {} items. Sleeping {} sec.",
                run.accumulated().len(),
                delay_seconds
            );
        }

        harvest_debug!(
            "driver state {:?} after {} pages ({} identities)",
            state,
            run.pages_read(),
            run.seen_count()
        );
        let pages_read = run.pages_read();
        Ok(HarvestOutcome {
            bodies: run.into_accumulated(),
            pages_read,
        })
    }
}
