mod config;

use std::path::Path;
use std::process::ExitCode;

use harvest_core::Credentials;
use harvest_engine::{write_json_array, CollectionDriver, Endpoints, HttpSettings};
use harvest_logging::{harvest_error, harvest_info, LogDestination};

const EXIT_CONFIG: u8 = 2;

fn main() -> ExitCode {
    let level = harvest_logging::parse_level(std::env::var("HARVEST_LOG").ok().as_deref());
    harvest_logging::initialize(LogDestination::Both, level);

    let credentials = match config::resolve_path(
        std::env::args().nth(1),
        std::env::var(config::ENV_PATH).ok(),
    )
    .and_then(|path| config::load_credentials(&path))
    {
        Ok(credentials) => credentials,
        Err(err) => {
            harvest_error!("Wrong configuration: {:#}", err);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            harvest_error!("Failed to start runtime: {}", err);
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(harvest(credentials))
}

async fn harvest(credentials: Credentials) -> ExitCode {
    let collection = credentials.collection.clone();
    let driver =
        match CollectionDriver::over_http(credentials, Endpoints::default(), &HttpSettings::default())
        {
            Ok(driver) => driver,
            Err(err) => {
                harvest_error!("{}", err);
                return ExitCode::FAILURE;
            }
        };

    // Auth failures are logged by the driver with the raw response.
    let Ok(outcome) = driver.run().await else {
        return ExitCode::FAILURE;
    };
    harvest_info!(
        "Collected {} items from r/{} in {} pages",
        outcome.bodies.len(),
        collection,
        outcome.pages_read
    );

    match write_json_array(Path::new("."), &collection, &outcome.bodies) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            harvest_error!("Failed to write output for r/{}: {}", collection, err);
            ExitCode::FAILURE
        }
    }
}
