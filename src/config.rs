//! Configuration Management
//!
//! Reads the optional config file for merche and merges it with flags and
//! environment variables.

use merche::{Credentials, DEFAULT_BASE_URL};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const BASE_URL_ENV: &str = "MERCHE_BASE_URL";
pub const VEHICLE_ID_ENV: &str = "MERCHE_VEHICLE_ID";

/// User configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// API root, e.g. the sandbox instead of production
    #[serde(default)]
    pub base_url: Option<String>,
    /// Vehicle used when none is given on the command line
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("merche").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                tracing::warn!("Ignoring invalid config file {:?}: {}", path, err);
                Self::default()
            }),
            Err(err) => {
                tracing::warn!("Cannot read config file {:?}: {}", path, err);
                Self::default()
            }
        }
    }

    /// Get effective base URL (CLI > env > config > production)
    pub fn effective_base_url(&self, cli: Option<&str>) -> String {
        first_set([
            cli.map(str::to_string),
            std::env::var(BASE_URL_ENV).ok(),
            self.base_url.clone(),
        ])
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Get effective vehicle id (CLI > env > config)
    pub fn effective_vehicle_id(&self, cli: Option<&str>) -> Option<String> {
        first_set([
            cli.map(str::to_string),
            std::env::var(VEHICLE_ID_ENV).ok(),
            self.vehicle_id.clone(),
        ])
    }

    /// Get credentials (env > config)
    pub fn credentials(&self) -> Option<Credentials> {
        Credentials::from_env().or_else(|| Credentials::from_optional(self.access_token.clone()))
    }
}

/// First candidate that is present and not blank
fn first_set<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use merche::mercedes::auth::ACCESS_TOKEN_ENV;
    use std::sync::{Mutex, MutexGuard};

    /// Serializes tests that touch the process environment
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Sets environment variables for one test and restores them on drop
    struct EnvGuard {
        saved: Vec<(&'static str, Option<String>)>,
        _lock: MutexGuard<'static, ()>,
    }

    impl EnvGuard {
        fn set(vars: &[(&'static str, Option<&str>)]) -> Self {
            let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            let saved = vars
                .iter()
                .map(|(key, _)| (*key, std::env::var(key).ok()))
                .collect();
            for (key, value) in vars {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
            Self { saved, _lock: lock }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.saved {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }

    fn file_config() -> Config {
        Config {
            base_url: Some("http://from-config/".to_string()),
            vehicle_id: Some("CONFIGVIN".to_string()),
            access_token: Some("config-token".to_string()),
        }
    }

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("merche-{}-{}.json", name, std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_config(
            "valid",
            r#"{"base_url":"http://localhost:8080/","vehicle_id":"EXVETESTVIN000001"}"#,
        );
        let config = Config::load_from(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080/"));
        assert_eq!(config.vehicle_id.as_deref(), Some("EXVETESTVIN000001"));
        assert!(config.access_token.is_none());
    }

    #[test]
    fn test_invalid_or_missing_file_falls_back_to_defaults() {
        let path = temp_config("invalid", "{not json");
        let config = Config::load_from(&path);
        std::fs::remove_file(&path).ok();
        assert!(config.base_url.is_none());

        let missing = std::env::temp_dir().join("merche-does-not-exist.json");
        assert!(Config::load_from(&missing).vehicle_id.is_none());
    }

    #[test]
    fn test_first_set_skips_missing_and_blank() {
        assert_eq!(
            first_set([None, Some("  ".to_string()), Some("V1".to_string())]),
            Some("V1".to_string())
        );
        assert_eq!(
            first_set([Some("cli".to_string()), Some("env".to_string())]),
            Some("cli".to_string())
        );
        assert_eq!(first_set::<2>([None, None]), None);
    }

    #[test]
    fn test_cli_value_wins() {
        let config = Config {
            base_url: Some("http://from-config/".to_string()),
            vehicle_id: Some("CONFIGVIN".to_string()),
            access_token: None,
        };
        assert_eq!(config.effective_base_url(Some("http://cli/")), "http://cli/");
        assert_eq!(config.effective_vehicle_id(Some("CLIVIN")).as_deref(), Some("CLIVIN"));
    }

    #[test]
    fn test_env_overrides_config_file() {
        let _env = EnvGuard::set(&[
            (BASE_URL_ENV, Some("http://from-env/")),
            (VEHICLE_ID_ENV, Some("ENVVIN")),
            (ACCESS_TOKEN_ENV, Some("env-token")),
        ]);
        let config = file_config();

        assert_eq!(config.effective_base_url(None), "http://from-env/");
        assert_eq!(config.effective_vehicle_id(None).as_deref(), Some("ENVVIN"));
        assert_eq!(config.credentials().unwrap().token(), "env-token");

        // CLI still wins over the environment
        assert_eq!(config.effective_base_url(Some("http://cli/")), "http://cli/");
        assert_eq!(config.effective_vehicle_id(Some("CLIVIN")).as_deref(), Some("CLIVIN"));
    }

    #[test]
    fn test_config_file_used_without_env() {
        let _env = EnvGuard::set(&[
            (BASE_URL_ENV, None),
            (VEHICLE_ID_ENV, Some("   ")),
            (ACCESS_TOKEN_ENV, None),
        ]);
        let config = file_config();

        assert_eq!(config.effective_base_url(None), "http://from-config/");
        assert_eq!(config.effective_vehicle_id(None).as_deref(), Some("CONFIGVIN"));
        assert_eq!(config.credentials().unwrap().token(), "config-token");

        let empty = Config::default();
        assert_eq!(empty.effective_base_url(None), DEFAULT_BASE_URL);
        assert!(empty.effective_vehicle_id(None).is_none());
        assert!(empty.credentials().is_none());
    }
}
