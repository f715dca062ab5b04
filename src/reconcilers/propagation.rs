// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! ConfigMapPropagation reconciler - runs a propagation pass per changed object.

use crate::config::Config;
use crate::error::{CourierError, Result};
use crate::propagation::{provenance, reconcile_propagation, ReconcileOutcome};
use crate::store::KubeStore;
use crate::types::ConfigMapPropagation;
use futures::StreamExt;
use k8s_openapi::api::core::v1::ConfigMap;
use kube::{
    runtime::{controller::Action, reflector::ObjectRef, Controller},
    Api, Client, ResourceExt,
};
use kube_runtime::watcher::Config as WatcherConfig;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct PropagationReconciler {
    client: Client,
    store: KubeStore,
    config: Config,
}

impl PropagationReconciler {
    pub fn new(client: Client, config: Config) -> Self {
        let store = KubeStore::new(client.clone());
        Self {
            client,
            store,
            config,
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let propagations: Api<ConfigMapPropagation> = match &self.config.watch_namespace {
            Some(namespace) => Api::namespaced(self.client.clone(), namespace),
            None => Api::all(self.client.clone()),
        };

        let mut controller = Controller::new(propagations, WatcherConfig::default());

        if self.config.watch_configmaps {
            let index = controller.store();
            // Scoped like the propagations; sources elsewhere are picked up by the resync
            let configmaps: Api<ConfigMap> = configmap_api(&self.client, &self.config);
            controller = controller.watches(configmaps, WatcherConfig::default(), move |cm| {
                propagations_for_configmap(&cm, &index.state())
            });
        }

        let context = Arc::new(self);

        controller
            .shutdown_on_signal()
            .run(reconcile, error_policy, context)
            .for_each(|res| async move {
                match res {
                    Ok(o) => debug!("Reconciled configmap propagation: {:?}", o),
                    Err(e) => warn!("Reconciliation error: {:?}", e),
                }
            })
            .await;

        info!("Controller shut down");
        Ok(())
    }
}

/// ConfigMaps to watch: the watch namespace when one is configured, otherwise the whole cluster
fn configmap_api(client: &Client, config: &Config) -> Api<ConfigMap> {
    match &config.watch_namespace {
        Some(namespace) => Api::namespaced(client.clone(), namespace),
        None => Api::all(client.clone()),
    }
}

/// Propagations whose source namespace holds this configmap, or the configmap it was copied from
pub fn propagations_for_configmap(
    configmap: &ConfigMap,
    propagations: &[Arc<ConfigMapPropagation>],
) -> Vec<ObjectRef<ConfigMapPropagation>> {
    let Some(namespace) = provenance(configmap)
        .map(|p| p.namespace)
        .or_else(|| configmap.namespace())
    else {
        return Vec::new();
    };

    propagations
        .iter()
        .filter(|p| p.spec.source.namespace == namespace)
        .map(|p| ObjectRef::from_obj(p.as_ref()))
        .collect()
}

async fn reconcile(
    propagation: Arc<ConfigMapPropagation>,
    ctx: Arc<PropagationReconciler>,
) -> Result<Action> {
    let name = propagation.name_any();
    let namespace = propagation.namespace().unwrap_or_default();
    let timeout = ctx.config.reconcile_timeout;

    debug!("Reconciling configmap propagation: {}/{}", namespace, name);

    let outcome = tokio::time::timeout(
        timeout,
        reconcile_propagation(&ctx.store, &namespace, &name),
    )
    .await
    .map_err(|_| CourierError::Timeout(timeout))??;

    match outcome {
        ReconcileOutcome::Missing => Ok(Action::await_change()),
        ReconcileOutcome::Ready { pairs } => {
            info!(
                "Configmap propagation {}/{} is ready ({} pairs)",
                namespace, name, pairs
            );
            // Recheck periodically so drift in targets is corrected
            Ok(Action::requeue(ctx.config.resync_interval))
        }
    }
}

fn error_policy(
    _propagation: Arc<ConfigMapPropagation>,
    error: &CourierError,
    ctx: Arc<PropagationReconciler>,
) -> Action {
    error!("Reconciliation error: {}", error);
    Action::requeue(ctx.config.error_requeue)
}
