use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

use crate::retention::RetentionPolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub retention: RetentionPolicy,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Store endpoint, host and port without a scheme (e.g. `localhost:9000`).
    pub endpoint: String,
    pub access_key: Secret<String>,
    pub secret_key: Secret<String>,
    /// Use an encrypted (https) transport.
    pub secure: bool,
    /// Bucket holding the workflow-run log files.
    pub bucket: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LogConfig {
    pub json_logs: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name("config/local").required(false))
            // Map DAGSWEEP__STORE__BUCKET=logs to store.bucket
            .add_source(Environment::with_prefix("DAGSWEEP").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                endpoint: "localhost:9000".into(),
                access_key: Secret::new(String::new()),
                secret_key: Secret::new(String::new()),
                secure: false,
                bucket: "airflow-logs".into(),
            },
            retention: RetentionPolicy::default(),
            log: LogConfig::default(),
        }
    }
}
