//! Operator configuration read from the environment

use std::time::Duration;

use crate::openstack::PROVIDER_TYPE;
use crate::{Error, Result};

/// Default metrics port
pub const DEFAULT_METRICS_PORT: u16 = 8080;

/// Default interval between re-validations of a binding
pub const DEFAULT_REQUEUE_INTERVAL_SECS: u64 = 300;

/// Runtime settings of the operator
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperatorConfig {
    /// Port of the metrics and health server
    pub metrics_port: u16,
    /// Namespace to watch; `None` watches all namespaces
    pub watch_namespace: Option<String>,
    /// Provider type whose bindings get validated
    pub provider_type: String,
    /// Delay before a binding is validated again
    pub requeue_interval: Duration,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            metrics_port: DEFAULT_METRICS_PORT,
            watch_namespace: None,
            provider_type: PROVIDER_TYPE.to_string(),
            requeue_interval: Duration::from_secs(DEFAULT_REQUEUE_INTERVAL_SECS),
        }
    }
}

impl OperatorConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = non_empty(lookup("METRICS_PORT")) {
            config.metrics_port = port
                .parse()
                .map_err(|e| Error::ConfigError(format!("METRICS_PORT {:?}: {}", port, e)))?;
        }

        config.watch_namespace = non_empty(lookup("WATCH_NAMESPACE"));

        if let Some(provider_type) = non_empty(lookup("PROVIDER_TYPE")) {
            config.provider_type = provider_type;
        }

        if let Some(secs) = non_empty(lookup("REQUEUE_INTERVAL_SECS")) {
            let secs: u64 = secs.parse().map_err(|e| {
                Error::ConfigError(format!("REQUEUE_INTERVAL_SECS {:?}: {}", secs, e))
            })?;
            if secs == 0 {
                return Err(Error::ConfigError(
                    "REQUEUE_INTERVAL_SECS must be >= 1".to_string(),
                ));
            }
            config.requeue_interval = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
