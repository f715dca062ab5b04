// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Synchronizes a single target configmap with its source

use crate::error::Result;
use crate::propagation::provenance::{provenance, set_provenance};
use crate::store::{ConfigMapStore, Operation};
use crate::types::PropagationPair;
use k8s_openapi::api::core::v1::ConfigMap;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// What a propagation did to the target; every variant counts as success
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropagationOutcome {
    Created,
    Updated,
    Unchanged,
    /// Source is gone and the target was removed
    Deleted,
    /// Source is gone and there was no target to remove
    TargetAbsent,
}

impl From<Operation> for PropagationOutcome {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Created => PropagationOutcome::Created,
            Operation::Updated => PropagationOutcome::Updated,
            Operation::Unchanged => PropagationOutcome::Unchanged,
        }
    }
}

impl fmt::Display for PropagationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PropagationOutcome::Created => "created",
            PropagationOutcome::Updated => "updated",
            PropagationOutcome::Unchanged => "unchanged",
            PropagationOutcome::Deleted => "deleted",
            PropagationOutcome::TargetAbsent => "target absent",
        };
        f.write_str(s)
    }
}

/// Empty maps are dropped by the API server, so keep them as `None` to compare equal
fn non_empty<V: Clone>(map: &Option<BTreeMap<String, V>>) -> Option<BTreeMap<String, V>> {
    map.as_ref().filter(|m| !m.is_empty()).cloned()
}

/// Overwrite the propagated fields of `target` with the source's content.
/// Data, binary data, labels and immutability are replaced wholesale, and
/// owner references are dropped since they cannot cross namespaces.
pub fn apply_source(source: &ConfigMap, pair: &PropagationPair, target: &mut ConfigMap) {
    let mut annotations = source.metadata.annotations.clone().unwrap_or_default();
    set_provenance(&mut annotations, &pair.source_namespace, &pair.source_name);

    target.data = non_empty(&source.data);
    target.binary_data = non_empty(&source.binary_data);
    target.immutable = source.immutable;
    target.metadata.labels = non_empty(&source.metadata.labels);
    target.metadata.annotations = Some(annotations);
    target.metadata.owner_references = None;
}

/// Make the target of `pair` match its source, or remove it when the source is gone.
/// Safe to call repeatedly; a second call with an unchanged source reports `Unchanged`.
#[instrument(skip_all, fields(pair = %pair))]
pub async fn propagate<S>(store: &S, pair: &PropagationPair) -> Result<PropagationOutcome>
where
    S: ConfigMapStore + ?Sized,
{
    let pair = pair.validated()?;

    let source = store
        .get(&pair.source_namespace, &pair.source_name)
        .await?
        .filter(|cm| cm.metadata.deletion_timestamp.is_none());

    let Some(source) = source else {
        let deleted = store
            .delete(&pair.target_namespace, &pair.target_name)
            .await?;
        if deleted {
            info!("Source configmap is gone, deleted target");
            return Ok(PropagationOutcome::Deleted);
        }
        debug!("Source configmap is gone and target does not exist");
        return Ok(PropagationOutcome::TargetAbsent);
    };

    let mutate = |target: &mut ConfigMap| {
        if let Some(previous) = provenance(target) {
            if previous.namespace != pair.source_namespace || previous.name != pair.source_name {
                warn!(
                    "Target was propagated from {}/{}, overwriting with {}/{}",
                    previous.namespace, previous.name, pair.source_namespace, pair.source_name
                );
            }
        }
        apply_source(&source, &pair, target);
    };

    let op = store
        .create_or_update(&pair.target_namespace, &pair.target_name, &mutate)
        .await?;

    debug!("Propagated configmap ({})", op);
    Ok(op.into())
}
