//! Handles settings for the command line runner. Configuration is read from an optional TOML
//! file (`bank-ledger.toml` unless `--config` says otherwise) and then from `BANK_LEDGER_*`
//! environment variables, nested keys separated by `__`
//! (e.g. `BANK_LEDGER_POLICY__SAVINGS__RATE`).
use bank_ledger::Policy;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_NAME: &str = "bank-ledger";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log level for the ledger (`error`, `warn`, `info`, `debug`, `trace`)
    pub level: String,
    /// Use counting IDs instead of random ones
    pub sequential_ids: bool,
    /// Account rules
    pub policy: Policy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            sequential_ids: false,
            policy: Policy::default(),
        }
    }
}

impl Settings {
    pub fn new(path: Option<&str>) -> Result<Self, ConfigError> {
        let file = File::with_name(path.unwrap_or(DEFAULT_CONFIG_NAME)).required(path.is_some());
        let environment = Environment::with_prefix("BANK_LEDGER")
            .prefix_separator("_")
            .separator("__");
        let settings = Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()?;

        settings.try_deserialize()
    }
}
