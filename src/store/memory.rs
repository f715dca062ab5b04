// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! In-memory object store with fault injection for exercising the reconciliation core.

use crate::constants::MAX_WRITE_ATTEMPTS;
use crate::error::{CourierError, Result};
use crate::store::{ConfigMapStore, Mutation, Operation, PropagationStore};
use crate::types::ConfigMapPropagation;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::ConfigMap;
use kube::api::ObjectMeta;
use kube::core::{Selector, SelectorExt};
use kube::ResourceExt;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

type Key = (String, String);

fn key(namespace: &str, name: &str) -> Key {
    (namespace.to_string(), name.to_string())
}

#[derive(Default)]
struct State {
    configmaps: BTreeMap<Key, ConfigMap>,
    propagations: HashMap<Key, ConfigMapPropagation>,
    failing_gets: HashSet<Key>,
    failing_writes: HashSet<Key>,
    /// Objects that appear right before the next create of that key
    racing_creates: HashMap<Key, ConfigMap>,
    fail_list: bool,
    fail_status: bool,
    status_updates: usize,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, configmap: ConfigMap) {
        let k = key(&configmap.namespace().unwrap_or_default(), &configmap.name_any());
        self.state.lock().unwrap().configmaps.insert(k, configmap);
    }

    pub fn remove(&self, namespace: &str, name: &str) {
        self.state.lock().unwrap().configmaps.remove(&key(namespace, name));
    }

    pub fn configmap(&self, namespace: &str, name: &str) -> Option<ConfigMap> {
        self.state.lock().unwrap().configmaps.get(&key(namespace, name)).cloned()
    }

    pub fn insert_propagation(&self, propagation: ConfigMapPropagation) {
        let k = key(&propagation.namespace().unwrap_or_default(), &propagation.name_any());
        self.state.lock().unwrap().propagations.insert(k, propagation);
    }

    pub fn propagation(&self, namespace: &str, name: &str) -> Option<ConfigMapPropagation> {
        self.state.lock().unwrap().propagations.get(&key(namespace, name)).cloned()
    }

    /// Make every get of this configmap fail with a store error
    pub fn fail_get(&self, namespace: &str, name: &str) {
        self.state.lock().unwrap().failing_gets.insert(key(namespace, name));
    }

    /// Make every create, update and delete of this configmap fail
    pub fn fail_write(&self, namespace: &str, name: &str) {
        self.state.lock().unwrap().failing_writes.insert(key(namespace, name));
    }

    pub fn fail_list(&self) {
        self.state.lock().unwrap().fail_list = true;
    }

    pub fn fail_status(&self) {
        self.state.lock().unwrap().fail_status = true;
    }

    /// Simulate another writer creating this configmap between our read and our create
    pub fn race_create(&self, configmap: ConfigMap) {
        let k = key(&configmap.namespace().unwrap_or_default(), &configmap.name_any());
        self.state.lock().unwrap().racing_creates.insert(k, configmap);
    }

    pub fn status_updates(&self) -> usize {
        self.state.lock().unwrap().status_updates
    }
}

fn failure(what: &str, k: &Key) -> CourierError {
    CourierError::StoreError(format!("injected {} failure for {}/{}", what, k.0, k.1))
}

#[async_trait]
impl ConfigMapStore for MemoryStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<ConfigMap>> {
        let state = self.state.lock().unwrap();
        let k = key(namespace, name);
        if state.failing_gets.contains(&k) {
            return Err(failure("get", &k));
        }
        Ok(state.configmaps.get(&k).cloned())
    }

    async fn list(&self, namespace: &str, selector: &Selector) -> Result<Vec<ConfigMap>> {
        let state = self.state.lock().unwrap();
        if state.fail_list {
            return Err(CourierError::StoreError("injected list failure".to_string()));
        }
        Ok(state
            .configmaps
            .iter()
            .filter(|((ns, _), _)| ns == namespace)
            .filter(|(_, cm)| selector.matches(cm.labels()))
            .map(|(_, cm)| cm.clone())
            .collect())
    }

    async fn create_or_update(
        &self,
        namespace: &str,
        name: &str,
        mutate: Mutation<'_>,
    ) -> Result<Operation> {
        let mut state = self.state.lock().unwrap();
        let k = key(namespace, name);
        if state.failing_writes.contains(&k) {
            return Err(failure("write", &k));
        }

        for _ in 0..MAX_WRITE_ATTEMPTS {
            match state.configmaps.get(&k).cloned() {
                None => {
                    if let Some(racer) = state.racing_creates.remove(&k) {
                        state.configmaps.insert(k.clone(), racer);
                        continue;
                    }
                    let mut configmap = ConfigMap {
                        metadata: ObjectMeta {
                            name: Some(name.to_string()),
                            namespace: Some(namespace.to_string()),
                            ..Default::default()
                        },
                        ..Default::default()
                    };
                    mutate(&mut configmap);
                    state.configmaps.insert(k, configmap);
                    return Ok(Operation::Created);
                }
                Some(existing) => {
                    let mut desired = existing.clone();
                    mutate(&mut desired);
                    if desired == existing {
                        return Ok(Operation::Unchanged);
                    }
                    state.configmaps.insert(k, desired);
                    return Ok(Operation::Updated);
                }
            }
        }

        Err(failure("conflict", &k))
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let k = key(namespace, name);
        if state.failing_writes.contains(&k) {
            return Err(failure("delete", &k));
        }
        Ok(state.configmaps.remove(&k).is_some())
    }
}

#[async_trait]
impl PropagationStore for MemoryStore {
    async fn get_propagation(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ConfigMapPropagation>> {
        Ok(self.propagation(namespace, name))
    }

    async fn update_status(&self, propagation: &ConfigMapPropagation) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_status {
            return Err(CourierError::StatusUpdateError(
                "injected status failure".to_string(),
            ));
        }
        let k = key(&propagation.namespace().unwrap_or_default(), &propagation.name_any());
        let Some(stored) = state.propagations.get_mut(&k) else {
            return Err(CourierError::StatusUpdateError(format!(
                "{}/{} not found",
                k.0, k.1
            )));
        };
        stored.status = propagation.status.clone();
        state.status_updates += 1;
        Ok(())
    }
}
