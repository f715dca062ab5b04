// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use tracing::info;

use courier::config::Config;
use courier::kubernetes::wait_for_propagation_crd;
use courier::reconcilers::PropagationReconciler;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Courier operator");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: watch_namespace={}, resync_interval={:?}, watch_configmaps={}",
        config.watch_namespace.as_deref().unwrap_or("<all>"),
        config.resync_interval,
        config.watch_configmaps
    );

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    info!("Waiting for ConfigMapPropagation CRD to become available...");
    wait_for_propagation_crd(&client).await?;

    let reconciler = PropagationReconciler::new(client, config);

    info!("Starting reconciler...");
    reconciler.run().await?;

    info!("Courier operator stopped");
    Ok(())
}
