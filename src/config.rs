use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;

use crate::ui::ThemeKind;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".ape-kingdom";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "monkeys.sqlite";
const LOG_FILE_NAME: &str = "ape-kingdom.log";

const DB_VAR: &str = "APE_KINGDOM_DB";
const LOG_VAR: &str = "APE_KINGDOM_LOG";
const THEME_VAR: &str = "APE_KINGDOM_THEME";
const DELETE_VAR: &str = "APE_KINGDOM_DELETE";

/// What confirming a delete does to the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Report success and reload without asking the gateway to remove
    /// anything; the record comes back on the next load.
    #[default]
    Simulated,
    /// Remove the record through the gateway.
    Permanent,
}

impl DeletePolicy {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "simulated" => Ok(DeletePolicy::Simulated),
            "permanent" => Ok(DeletePolicy::Permanent),
            other => Err(anyhow!(
                "expected `simulated` or `permanent`, got `{other}`"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub log_path: PathBuf,
    pub theme: ThemeKind,
    pub delete_policy: DeletePolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<AppConfig> {
        Self::resolve(home_data_dir, |key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source. Unset
    /// variables fall back to defaults under `data_dir`.
    pub fn from_lookup<F>(data_dir: PathBuf, lookup: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve(|| Ok(data_dir.clone()), lookup)
    }

    /// `data_dir` is only consulted for paths that have no override.
    fn resolve<D, F>(data_dir: D, lookup: F) -> Result<AppConfig>
    where
        D: Fn() -> Result<PathBuf>,
        F: Fn(&str) -> Option<String>,
    {
        let path_or_default = |var: &str, file_name: &str| -> Result<PathBuf> {
            match lookup(var).filter(|value| !value.trim().is_empty()) {
                Some(value) => Ok(PathBuf::from(value)),
                None => Ok(data_dir()?.join(file_name)),
            }
        };
        let database_path = path_or_default(DB_VAR, DB_FILE_NAME)?;
        let log_path = path_or_default(LOG_VAR, LOG_FILE_NAME)?;
        let theme = lookup(THEME_VAR)
            .map(|value| ThemeKind::parse(&value))
            .transpose()
            .context(THEME_VAR)?
            .unwrap_or_default();
        let delete_policy = lookup(DELETE_VAR)
            .map(|value| DeletePolicy::parse(&value))
            .transpose()
            .context(DELETE_VAR)?
            .unwrap_or_default();

        Ok(AppConfig {
            database_path,
            log_path,
            theme,
            delete_policy,
        })
    }
}

fn home_data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(PathBuf::from("/data"), |key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_live_under_the_data_dir() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/data/monkeys.sqlite"));
        assert_eq!(config.log_path, PathBuf::from("/data/ape-kingdom.log"));
        assert_eq!(config.theme, ThemeKind::Light);
        assert_eq!(config.delete_policy, DeletePolicy::Simulated);
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            ("APE_KINGDOM_DB", "/tmp/zoo.sqlite"),
            ("APE_KINGDOM_THEME", "Dark"),
            ("APE_KINGDOM_DELETE", "permanent"),
        ])
        .unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/zoo.sqlite"));
        assert_eq!(config.theme, ThemeKind::Dark);
        assert_eq!(config.delete_policy, DeletePolicy::Permanent);
    }

    #[test]
    fn explicit_paths_skip_the_home_directory() {
        let no_home = || Err(anyhow!("could not locate home directory"));
        let lookup = |key: &str| match key {
            "APE_KINGDOM_DB" => Some("/srv/apes.sqlite".to_string()),
            "APE_KINGDOM_LOG" => Some("/var/log/apes.log".to_string()),
            _ => None,
        };
        let config = AppConfig::resolve(no_home, lookup).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/srv/apes.sqlite"));
        assert_eq!(config.log_path, PathBuf::from("/var/log/apes.log"));

        let db_only = |key: &str| lookup(key).filter(|_| key == "APE_KINGDOM_DB");
        let err = AppConfig::resolve(no_home, db_only).unwrap_err();
        assert_eq!(err.to_string(), "could not locate home directory");
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = config_from(&[("APE_KINGDOM_DELETE", "sometimes")]).unwrap_err();
        assert_eq!(err.to_string(), "APE_KINGDOM_DELETE");

        let err = config_from(&[("APE_KINGDOM_THEME", "neon")]).unwrap_err();
        assert_eq!(err.to_string(), "APE_KINGDOM_THEME");
    }
}
