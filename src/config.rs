use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;

use crate::duration::deserialize_duration;

/// Default navigation/request timeout (60 s).
fn default_navigation() -> Duration {
    Duration::from_secs(60)
}

/// Default per-candidate element wait (15 s).
fn default_element_wait() -> Duration {
    Duration::from_secs(15)
}

/// Default table-readiness wait (15 s).
fn default_table_wait() -> Duration {
    Duration::from_secs(15)
}

/// Default post-login settle delay (3 s).
fn default_login_settle() -> Duration {
    Duration::from_secs(3)
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Browser navigation/request timeout.
    #[serde(
        default = "default_navigation",
        deserialize_with = "deserialize_duration"
    )]
    pub navigation: Duration,

    /// How long each locator candidate is polled before falling through.
    #[serde(
        default = "default_element_wait",
        deserialize_with = "deserialize_duration"
    )]
    pub element_wait: Duration,

    /// How long to wait for the report table to become ready.
    #[serde(
        default = "default_table_wait",
        deserialize_with = "deserialize_duration"
    )]
    pub table_wait: Duration,

    /// Fixed delay after submitting the login form.
    #[serde(
        default = "default_login_settle",
        deserialize_with = "deserialize_duration"
    )]
    pub login_settle: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            navigation: default_navigation(),
            element_wait: default_element_wait(),
            table_wait: default_table_wait(),
            login_settle: default_login_settle(),
        }
    }
}

/// `[console]` section: the 3CX management console being scraped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConsoleSection {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub headless: Option<bool>,
}

/// `[store]` section: the Odoo instance receiving call logs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    pub url: Option<String>,
    pub db: Option<String>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
}

/// Application configuration as written in `callsync.toml`.
///
/// Every credential field can instead come from the environment
/// (`THREECX_URL`, `THREECX_USER`, `THREECX_PASS`, `ODOO_URL`, `ODOO_DB`,
/// `ODOO_USER`, `ODOO_PASS`); environment values win over file values,
/// matching env-driven deployments.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub console: ConsoleSection,
    pub store: StoreSection,
    pub timeouts: TimeoutConfig,
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load config from a file, or return default config if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment overrides and check that every required value is
    /// present.
    pub fn resolve(self) -> Result<ResolvedConfig> {
        let console = ConsoleConfig {
            base_url: string_field(self.console.base_url, "THREECX_URL", "console.base_url")?,
            username: string_field(self.console.username, "THREECX_USER", "console.username")?,
            password: secret_field(self.console.password, "THREECX_PASS", "console.password")?,
            headless: self.console.headless.unwrap_or(true),
        };

        let store = StoreConfig {
            url: string_field(self.store.url, "ODOO_URL", "store.url")?,
            db: string_field(self.store.db, "ODOO_DB", "store.db")?,
            username: string_field(self.store.username, "ODOO_USER", "store.username")?,
            password: secret_field(self.store.password, "ODOO_PASS", "store.password")?,
        };

        Ok(ResolvedConfig {
            console,
            store,
            timeouts: self.timeouts,
        })
    }
}

fn string_field(file_value: Option<String>, env_var: &str, field: &str) -> Result<String> {
    if let Ok(value) = std::env::var(env_var) {
        if !value.is_empty() {
            return Ok(value);
        }
    }
    file_value
        .filter(|value| !value.is_empty())
        .with_context(|| format!("Missing {field} (set it in the config file or via {env_var})"))
}

fn secret_field(
    file_value: Option<SecretString>,
    env_var: &str,
    field: &str,
) -> Result<SecretString> {
    if let Ok(value) = std::env::var(env_var) {
        if !value.is_empty() {
            return Ok(SecretString::from(value));
        }
    }
    file_value.with_context(|| format!("Missing {field} (set it in the config file or via {env_var})"))
}

/// Fully resolved configuration with all required values present.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub console: ConsoleConfig,
    pub store: StoreConfig,
    pub timeouts: TimeoutConfig,
}

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub base_url: String,
    pub username: String,
    pub password: SecretString,
    pub headless: bool,
}

impl ConsoleConfig {
    pub fn login_url(&self) -> String {
        format!("{}/#/login", self.base_url.trim_end_matches('/'))
    }

    pub fn report_url(&self) -> String {
        format!(
            "{}/#/office/reports/call-reports",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: String,
    pub db: String,
    pub username: String,
    pub password: SecretString,
}
