// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace to watch for ConfigMapPropagations, all namespaces when unset.
    /// Also scopes the ConfigMap watch, so source changes outside it wait for the resync.
    pub watch_namespace: Option<String>,
    /// Periodic requeue after a successful reconciliation
    pub resync_interval: Duration,
    /// Requeue delay after a failed reconciliation
    pub error_requeue: Duration,
    /// Upper bound on a single reconciliation pass
    pub reconcile_timeout: Duration,
    /// Also trigger reconciliations on configmap changes
    pub watch_configmaps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            watch_namespace: None,
            resync_interval: Duration::from_secs(300),
            error_requeue: Duration::from_secs(60),
            reconcile_timeout: Duration::from_secs(30),
            watch_configmaps: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let watch_namespace = lookup("WATCH_NAMESPACE").filter(|ns| !ns.is_empty());
        let resync_interval =
            secs_or(&lookup, "RESYNC_INTERVAL_SECS", defaults.resync_interval)?;
        let error_requeue = secs_or(&lookup, "ERROR_REQUEUE_SECS", defaults.error_requeue)?;
        let reconcile_timeout =
            secs_or(&lookup, "RECONCILE_TIMEOUT_SECS", defaults.reconcile_timeout)?;
        let watch_configmaps = match lookup("WATCH_CONFIGMAPS") {
            Some(v) => v
                .parse::<bool>()
                .with_context(|| format!("WATCH_CONFIGMAPS must be true or false, got '{}'", v))?,
            None => defaults.watch_configmaps,
        };

        Ok(Config {
            watch_namespace,
            resync_interval,
            error_requeue,
            reconcile_timeout,
            watch_configmaps,
        })
    }
}

fn secs_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> Result<Duration> {
    match lookup(key) {
        Some(v) => {
            let secs: u64 = v
                .parse()
                .with_context(|| format!("{} must be a number of seconds, got '{}'", key, v))?;
            Ok(Duration::from_secs(secs))
        }
        None => Ok(default),
    }
}
