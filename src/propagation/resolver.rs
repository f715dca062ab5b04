// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Turns a ConfigMapPropagation spec into concrete propagation pairs

use crate::constants::ALL_NAMESPACES;
use crate::error::{CourierError, Result};
use crate::store::selector::parse_selector;
use crate::store::ConfigMapStore;
use crate::types::{ConfigMapPropagationSpec, PropagationPair};
use kube::ResourceExt;
use tracing::{debug, instrument};

/// Resolve the spec into pairs: explicit names first, then selector matches.
/// Each source is paired with every target namespace under its own name.
/// Pairs are not deduplicated, so a name that also matches the selector is applied twice.
#[instrument(skip_all, fields(source_namespace = %spec.source.namespace))]
pub async fn resolve<S>(spec: &ConfigMapPropagationSpec, store: &S) -> Result<Vec<PropagationPair>>
where
    S: ConfigMapStore + ?Sized,
{
    let source = &spec.source;
    let targets = &spec.target.namespaces;

    if source.namespace == ALL_NAMESPACES {
        return Err(CourierError::UnsupportedNamespace(format!(
            "'{}' (propagating from all namespaces is not supported)",
            ALL_NAMESPACES
        )));
    }

    let mut pairs = Vec::new();

    for name in source.names.iter().flatten() {
        for target_namespace in targets {
            pairs.push(PropagationPair::new(
                &source.namespace,
                name,
                target_namespace,
                name,
            ));
        }
    }

    if let Some(selector) = &source.object_selector {
        let selector = parse_selector(selector)?;
        let matched = store
            .list(&source.namespace, &selector)
            .await
            .map_err(|e| CourierError::SelectorListError(e.to_string()))?;

        debug!("Selector matched {} source configmaps", matched.len());

        for configmap in &matched {
            let name = configmap.name_any();
            for target_namespace in targets {
                pairs.push(PropagationPair::new(
                    &source.namespace,
                    &name,
                    target_namespace,
                    &name,
                ));
            }
        }
    }

    Ok(pairs)
}
