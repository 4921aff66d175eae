//! Harvest core: pure data model, page flattening and run-state bookkeeping.
mod credentials;
mod model;
mod page;
mod run;

pub use credentials::{ConfigError, Credentials, PropertyKey, UNBOUNDED_ITEM_COUNT};
pub use model::{AccessToken, Item, ListingChild, ListingData, ListingPage};
pub use page::{collect_page, decode_listing, DecodeError, PageResult};
pub use run::{DriverState, RunState};
