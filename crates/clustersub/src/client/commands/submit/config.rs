use crate::cluster::{ClusterProfile, ConfigLookup};
use crate::common::error::SubmitError;
use crate::common::utils::str::strip_whitespace;
use std::path::Path;
use toml::{Table, Value};

const ACCOUNT_KEY: &str = "account";
const PARTITION_KEY: &str = "partition";

/// Scheduler accounting parameters taken from the config file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Never empty.
    pub account: String,
    /// `None` means that no partition flag is passed to the scheduler.
    pub partition: Option<String>,
}

/// Parsed config file with typed lookups of string keys.
pub struct ClusterConfigFile {
    table: Table,
}

impl ClusterConfigFile {
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let table: Table = toml::from_str(content)?;
        Ok(Self { table })
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Returns the value of `key` with all whitespace removed.
    /// Missing keys, empty values and non-string values are reported as `None`.
    pub fn lookup(&self, scope: ConfigLookup, key: &str) -> Option<String> {
        let value = match scope {
            ConfigLookup::Section(section) => self
                .table
                .get(section)
                .and_then(Value::as_table)
                .and_then(|table| table.get(key)),
            ConfigLookup::WholeFile => find_first(&self.table, key),
        }?;

        match value.as_str() {
            Some(value) => {
                let value = strip_whitespace(value);
                (!value.is_empty()).then(|| value.into_owned())
            }
            None => {
                log::warn!("Config key `{key}` is not a string, ignoring it");
                None
            }
        }
    }
}

/// Depth-first search in document order.
fn find_first<'a>(table: &'a Table, key: &str) -> Option<&'a Value> {
    table.iter().find_map(|(name, value)| {
        if name == key {
            Some(value)
        } else {
            value.as_table().and_then(|nested| find_first(nested, key))
        }
    })
}

fn scope_description(scope: ConfigLookup) -> String {
    match scope {
        ConfigLookup::Section(section) => format!("section [{section}]"),
        ConfigLookup::WholeFile => "file".to_string(),
    }
}

/// Resolves the scheduler account and partition for `profile` from the config file at `path`.
///
/// Profiles with a fallback account degrade to that account (and no partition) when the file
/// is missing or unreadable. Profiles without a fallback fail with a config error instead.
pub fn resolve_config(path: &Path, profile: &ClusterProfile) -> crate::Result<ResolvedConfig> {
    let scope = profile.config_lookup;

    let file = if path.is_file() {
        match ClusterConfigFile::load(path) {
            Ok(file) => Some(file),
            Err(error) => match profile.fallback_account {
                Some(_) => {
                    log::warn!("Cannot read config file {}: {error:#}", path.display());
                    None
                }
                None => {
                    return Err(SubmitError::ConfigError(format!(
                        "Cannot read config file {}: {error:#}",
                        path.display()
                    )));
                }
            },
        }
    } else {
        match profile.fallback_account {
            Some(_) => {
                log::warn!("Config file {} not found", path.display());
                None
            }
            None => {
                return Err(SubmitError::ConfigError(format!(
                    "Config file {} not found. Create it and add `{ACCOUNT_KEY} = \"<your-account>\"` to its {}",
                    path.display(),
                    scope_description(scope)
                )));
            }
        }
    };

    let account = file
        .as_ref()
        .and_then(|file| file.lookup(scope, ACCOUNT_KEY));
    let partition = file
        .as_ref()
        .and_then(|file| file.lookup(scope, PARTITION_KEY));

    let account = match (account, profile.fallback_account) {
        (Some(account), _) => account,
        (None, Some(fallback)) => {
            if file.is_some() {
                log::warn!(
                    "`{ACCOUNT_KEY}` not found in {} of {}",
                    scope_description(scope),
                    path.display()
                );
            }
            log::warn!("Using default account `{fallback}`");
            fallback.to_string()
        }
        (None, None) => {
            return Err(SubmitError::ConfigError(format!(
                "`{ACCOUNT_KEY}` not found in {} of {}. Add `{ACCOUNT_KEY} = \"<your-account>\"` to it",
                scope_description(scope),
                path.display()
            )));
        }
    };

    if partition.is_none() {
        log::debug!("No partition configured, the scheduler default will be used");
    }

    Ok(ResolvedConfig { account, partition })
}
