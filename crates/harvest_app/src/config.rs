//! Loads run credentials from a TOML file using the dotted `reddit.*` keys
//! (`reddit.read.batchSize`, ...).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use harvest_core::Credentials;
use harvest_logging::harvest_info;
use toml::{Table, Value};

pub const ENV_PATH: &str = "HARVEST_CONFIG";
const DEFAULT_PATH: &str = "harvest.toml";

/// Config path: CLI argument, then `$HARVEST_CONFIG` (must exist), then
/// `harvest.toml` in the working directory.
pub fn resolve_path(cli_arg: Option<String>, env_value: Option<String>) -> Result<PathBuf> {
    if let Some(arg) = cli_arg {
        return Ok(PathBuf::from(arg));
    }
    if let Some(value) = env_value {
        let path = PathBuf::from(value);
        if !path.exists() {
            return Err(anyhow!("{ENV_PATH} points to non-existent path {}", path.display()));
        }
        return Ok(path);
    }
    Ok(PathBuf::from(DEFAULT_PATH))
}

pub fn load_credentials(path: &Path) -> Result<Credentials> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    let credentials = parse_credentials(&content)
        .with_context(|| format!("invalid config in {}", path.display()))?;
    harvest_info!("Loaded configuration from {}: {:?}", path.display(), credentials);
    Ok(credentials)
}

pub fn parse_credentials(content: &str) -> Result<Credentials> {
    let table: Table = toml::from_str(content)?;
    let mut pairs = Vec::new();
    flatten("", &table, &mut pairs);
    Ok(Credentials::from_properties(pairs)?)
}

/// Turn nested tables into dotted `key=value` pairs.
fn flatten(prefix: &str, table: &Table, out: &mut Vec<(String, String)>) {
    for (key, value) in table {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Table(inner) => flatten(&full_key, inner, out),
            Value::String(text) => out.push((full_key, text.clone())),
            other => out.push((full_key, other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harvest_core::{ConfigError, PropertyKey, UNBOUNDED_ITEM_COUNT};

    const NESTED: &str = r#"
[reddit]
username = "user"
password = "pass"
app_id = "id"
app_secret = "secret"

[reddit.read]
subreddit = "rust"
limit = 500
batchSize = 50
sleep-seconds = 2
"#;

    #[test]
    fn nested_tables_map_to_dotted_keys() {
        let creds = parse_credentials(NESTED).unwrap();
        assert_eq!(creds.username, "user");
        assert_eq!(creds.client_id, "id");
        assert_eq!(creds.collection, "rust");
        assert_eq!(creds.item_limit, 500);
        assert_eq!(creds.page_size, 50);
        assert_eq!(creds.delay_seconds, 2);
    }

    #[test]
    fn quoted_dotted_keys_and_string_numbers_work() {
        let content = r#"
"reddit.username" = "user"
"reddit.password" = "pass"
"reddit.app_id" = "id"
"reddit.app_secret" = "secret"
"reddit.read.subreddit" = "rust"
"reddit.read.batchSize" = "10"
"#;
        let creds = parse_credentials(content).unwrap();
        assert_eq!(creds.page_size, 10);
        assert_eq!(creds.item_limit, UNBOUNDED_ITEM_COUNT);
    }

    #[test]
    fn out_of_range_value_is_a_config_error() {
        let content = NESTED.replace("batchSize = 50", "batchSize = 500");
        let err = parse_credentials(&content).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::OutOfRange {
                key: PropertyKey::PageSize,
                ..
            })
        ));
    }

    #[test]
    fn float_where_integer_expected_is_rejected() {
        let content = NESTED.replace("sleep-seconds = 2", "sleep-seconds = 2.5");
        let err = parse_credentials(&content).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn load_reports_missing_file_with_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let err = load_credentials(&path).unwrap_err();
        assert!(format!("{err:#}").contains("absent.toml"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("harvest.toml");
        fs::write(&path, NESTED).unwrap();
        assert_eq!(load_credentials(&path).unwrap().collection, "rust");
    }

    #[test]
    fn path_resolution_prefers_cli_then_env_then_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let env_file = dir.path().join("env.toml");
        fs::write(&env_file, NESTED).unwrap();
        let env_value = Some(env_file.display().to_string());

        assert_eq!(
            resolve_path(Some("cli.toml".into()), env_value.clone()).unwrap(),
            PathBuf::from("cli.toml")
        );
        assert_eq!(resolve_path(None, env_value).unwrap(), env_file);
        assert_eq!(resolve_path(None, None).unwrap(), PathBuf::from("harvest.toml"));
        assert!(resolve_path(None, Some(dir.path().join("nope.toml").display().to_string())).is_err());
    }
}
