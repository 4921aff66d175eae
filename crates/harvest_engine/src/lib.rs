//! Harvest engine: authenticated listing reads, the collection loop and output.
mod auth;
mod driver;
mod filename;
mod page_reader;
mod persist;
mod retry;
mod types;

pub use auth::{basic_authorization, password_grant_body, AuthError, Authenticator, TokenSource};
pub use driver::{CollectionDriver, HarvestOutcome};
pub use filename::output_filename;
pub use page_reader::{Acceptance, PageReader, PageSource};
pub use persist::{ensure_output_dir, write_json_array, AtomicFileWriter, PersistError};
pub use retry::{build_client, RequestRetrier};
pub use types::{Endpoints, EngineError, HttpSettings};
