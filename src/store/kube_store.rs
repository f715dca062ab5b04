// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Object store backed by the Kubernetes API

use crate::constants::{MAX_WRITE_ATTEMPTS, OPERATOR_NAME};
use crate::error::{CourierError, Result};
use crate::store::{ConfigMapStore, Mutation, Operation, PropagationStore};
use crate::types::ConfigMapPropagation;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::ConfigMap;
use kube::{
    api::{DeleteParams, ListParams, ObjectMeta, Patch, PatchParams, PostParams},
    core::Selector,
    Api, Client, Resource, ResourceExt,
};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

impl KubeStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn configmaps(&self, namespace: &str) -> Api<ConfigMap> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

fn is_conflict(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(resp) if resp.code == 409)
}

fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(resp) if resp.code == 404)
}

#[async_trait]
impl ConfigMapStore for KubeStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<ConfigMap>> {
        Ok(self.configmaps(namespace).get_opt(name).await?)
    }

    async fn list(&self, namespace: &str, selector: &Selector) -> Result<Vec<ConfigMap>> {
        let lp = ListParams::default().labels_from(selector);
        let list = self.configmaps(namespace).list(&lp).await?;
        Ok(list.items)
    }

    #[instrument(skip(self, mutate))]
    async fn create_or_update(
        &self,
        namespace: &str,
        name: &str,
        mutate: Mutation<'_>,
    ) -> Result<Operation> {
        let api = self.configmaps(namespace);

        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            match api.get_opt(name).await? {
                None => {
                    let mut configmap = ConfigMap {
                        metadata: ObjectMeta {
                            name: Some(name.to_string()),
                            namespace: Some(namespace.to_string()),
                            ..Default::default()
                        },
                        ..Default::default()
                    };
                    mutate(&mut configmap);

                    match api.create(&PostParams::default(), &configmap).await {
                        Ok(_) => return Ok(Operation::Created),
                        Err(e) if is_conflict(&e) => {
                            debug!("Configmap appeared while creating (attempt {}), retrying as update", attempt);
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
                Some(existing) => {
                    let mut desired = existing.clone();
                    mutate(&mut desired);
                    if desired == existing {
                        return Ok(Operation::Unchanged);
                    }

                    match api.replace(name, &PostParams::default(), &desired).await {
                        Ok(_) => return Ok(Operation::Updated),
                        Err(e) if is_conflict(&e) => {
                            debug!("Configmap changed while updating (attempt {}), retrying", attempt);
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
            }
        }

        Err(CourierError::StoreError(format!(
            "configmap {}/{} kept changing, gave up after {} attempts",
            namespace, name, MAX_WRITE_ATTEMPTS
        )))
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<bool> {
        match self
            .configmaps(namespace)
            .delete(name, &DeleteParams::default())
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if is_not_found(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl PropagationStore for KubeStore {
    async fn get_propagation(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ConfigMapPropagation>> {
        let api: Api<ConfigMapPropagation> = Api::namespaced(self.client.clone(), namespace);
        Ok(api.get_opt(name).await?)
    }

    async fn update_status(&self, propagation: &ConfigMapPropagation) -> Result<()> {
        let namespace = propagation.namespace().unwrap_or_default();
        let api: Api<ConfigMapPropagation> = Api::namespaced(self.client.clone(), &namespace);

        let patch = serde_json::json!({
            "apiVersion": ConfigMapPropagation::api_version(&()),
            "kind": ConfigMapPropagation::kind(&()),
            "status": propagation.status,
        });

        let pp = PatchParams::apply(OPERATOR_NAME).force();
        api.patch_status(&propagation.name_any(), &pp, &Patch::Apply(&patch))
            .await
            .map_err(|e| {
                CourierError::StatusUpdateError(format!(
                    "{}/{}: {}",
                    namespace,
                    propagation.name_any(),
                    e
                ))
            })?;

        Ok(())
    }
}
