// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed access to the objects the operator reads and writes.

pub mod kube_store;
#[cfg(test)]
pub mod memory;
pub mod selector;

use crate::error::Result;
use crate::types::ConfigMapPropagation;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::ConfigMap;
use kube::core::Selector;
use std::fmt;

pub use kube_store::KubeStore;

/// Which branch a create-or-update took
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Created,
    Updated,
    Unchanged,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Created => "created",
            Operation::Updated => "updated",
            Operation::Unchanged => "unchanged",
        };
        f.write_str(s)
    }
}

/// Applies the desired fields onto a configmap, fresh or already stored
pub type Mutation<'a> = &'a (dyn Fn(&mut ConfigMap) + Send + Sync);

#[async_trait]
pub trait ConfigMapStore: Send + Sync {
    /// Fetch a configmap, `None` when it does not exist
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<ConfigMap>>;

    /// List configmaps in a namespace matching a label selector
    async fn list(&self, namespace: &str, selector: &Selector) -> Result<Vec<ConfigMap>>;

    /// Create the configmap or update it in place with `mutate` applied.
    /// Races with other writers are retried on the read-apply-write path.
    async fn create_or_update(
        &self,
        namespace: &str,
        name: &str,
        mutate: Mutation<'_>,
    ) -> Result<Operation>;

    /// Delete a configmap. Returns false when it was already gone.
    async fn delete(&self, namespace: &str, name: &str) -> Result<bool>;
}

#[async_trait]
pub trait PropagationStore: Send + Sync {
    async fn get_propagation(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ConfigMapPropagation>>;

    /// Persist the status sub-resource of the given object
    async fn update_status(&self, propagation: &ConfigMapPropagation) -> Result<()>;
}
