// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CRD availability checking utilities

use crate::constants::crd::{POLL_INTERVAL_SECS, POLL_MAX_INTERVAL_SECS};
use crate::error::Result;
use crate::types::ConfigMapPropagation;
use kube::{discovery::Discovery, Client, Resource};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Wait for the ConfigMapPropagation CRD to become available in the cluster.
/// This uses exponential backoff starting at POLL_INTERVAL_SECS seconds.
pub async fn wait_for_propagation_crd(client: &Client) -> Result<()> {
    let mut interval = POLL_INTERVAL_SECS;
    let api_version = ConfigMapPropagation::api_version(&());

    loop {
        match check_propagation_crd_exists(client).await {
            Ok(true) => {
                info!("ConfigMapPropagation CRD ({}) is available", api_version);
                return Ok(());
            }
            Ok(false) => {
                info!(
                    "ConfigMapPropagation CRD ({}) not yet available, waiting {} seconds...",
                    api_version, interval
                );
            }
            Err(e) => {
                warn!(
                    "Error checking for ConfigMapPropagation CRD: {}, retrying in {} seconds...",
                    e, interval
                );
            }
        }

        sleep(Duration::from_secs(interval)).await;

        // Exponential backoff with max cap
        interval = (interval * 2).min(POLL_MAX_INTERVAL_SECS);
    }
}

/// Check if the ConfigMapPropagation CRD exists by attempting to discover it.
async fn check_propagation_crd_exists(client: &Client) -> Result<bool> {
    let group = ConfigMapPropagation::group(&());
    let discovery = Discovery::new(client.clone())
        .filter(&[group.as_ref()])
        .run()
        .await?;

    let found = discovery
        .groups()
        .filter(|g| g.name() == group)
        .flat_map(|g| g.recommended_resources())
        .any(|(ar, _)| {
            ar.kind == ConfigMapPropagation::kind(&())
                && ar.version == ConfigMapPropagation::version(&())
        });

    Ok(found)
}
