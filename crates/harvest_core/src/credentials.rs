use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Target item count used when `reddit.read.limit` is absent.
pub const UNBOUNDED_ITEM_COUNT: usize = usize::MAX;

const DEFAULT_PAGE_SIZE: u32 = 100;
const MAX_PAGE_SIZE: u32 = 100;
const DEFAULT_DELAY_SECONDS: u64 = 10;

/// Keys understood in the properties file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKey {
    Username,
    Password,
    AppId,
    AppSecret,
    Collection,
    ItemLimit,
    PageSize,
    DelaySeconds,
}

impl PropertyKey {
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKey::Username => "reddit.username",
            PropertyKey::Password => "reddit.password",
            PropertyKey::AppId => "reddit.app_id",
            PropertyKey::AppSecret => "reddit.app_secret",
            PropertyKey::Collection => "reddit.read.subreddit",
            PropertyKey::ItemLimit => "reddit.read.limit",
            PropertyKey::PageSize => "reddit.read.batchSize",
            PropertyKey::DelaySeconds => "reddit.read.sleep-seconds",
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing property {0}")]
    MissingKey(PropertyKey),
    #[error("property {key} is not a number: {value:?}")]
    InvalidNumber { key: PropertyKey, value: String },
    #[error("property {key} out of range: {value} (allowed {min}..={max})")]
    OutOfRange {
        key: PropertyKey,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Operator-supplied account and run tunables, validated on construction.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
    pub collection: String,
    pub item_limit: usize,
    pub page_size: u32,
    pub delay_seconds: u64,
}

impl Credentials {
    /// Build from `key=value` pairs. Later duplicates win.
    pub fn from_properties<I, K, V>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let props: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let required = |key: PropertyKey| {
            props
                .get(key.as_str())
                .cloned()
                .ok_or(ConfigError::MissingKey(key))
        };

        let username = required(PropertyKey::Username)?;
        let password = required(PropertyKey::Password)?;
        let client_id = required(PropertyKey::AppId)?;
        let client_secret = required(PropertyKey::AppSecret)?;
        let collection = required(PropertyKey::Collection)?;

        let item_limit = match optional_number::<i64>(&props, PropertyKey::ItemLimit)? {
            None => UNBOUNDED_ITEM_COUNT,
            Some(value) => {
                check_range(PropertyKey::ItemLimit, value, 1, i64::MAX)?;
                usize::try_from(value).unwrap_or(UNBOUNDED_ITEM_COUNT)
            }
        };

        let page_size = match optional_number::<i64>(&props, PropertyKey::PageSize)? {
            None => DEFAULT_PAGE_SIZE,
            Some(value) => {
                check_range(PropertyKey::PageSize, value, 1, i64::from(MAX_PAGE_SIZE))?;
                // Range-checked above.
                value as u32
            }
        };

        let delay_seconds = match optional_number::<i64>(&props, PropertyKey::DelaySeconds)? {
            None => DEFAULT_DELAY_SECONDS,
            Some(value) => {
                check_range(PropertyKey::DelaySeconds, value, 1, i64::MAX)?;
                value as u64
            }
        };

        Ok(Self {
            username,
            password,
            client_id,
            client_secret,
            collection,
            item_limit,
            page_size,
            delay_seconds,
        })
    }
}

// Secrets stay out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("collection", &self.collection)
            .field("item_limit", &self.item_limit)
            .field("page_size", &self.page_size)
            .field("delay_seconds", &self.delay_seconds)
            .finish()
    }
}

fn optional_number<T: FromStr>(
    props: &HashMap<String, String>,
    key: PropertyKey,
) -> Result<Option<T>, ConfigError> {
    match props.get(key.as_str()) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber {
                key,
                value: raw.clone(),
            }),
    }
}

fn check_range(key: PropertyKey, value: i64, min: i64, max: i64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            key,
            value,
            min,
            max,
        });
    }
    Ok(())
}
