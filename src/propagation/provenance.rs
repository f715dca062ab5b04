// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Source tracking annotations on propagated configmaps

use crate::constants::annotations;
use k8s_openapi::api::core::v1::ConfigMap;
use std::collections::BTreeMap;

/// The source a propagated configmap was copied from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Provenance {
    pub namespace: String,
    pub name: String,
}

/// Record the source configmap on a set of annotations, replacing any previous source
pub fn set_provenance(annotations: &mut BTreeMap<String, String>, namespace: &str, name: &str) {
    annotations.insert(annotations::SOURCE_NAMESPACE.to_string(), namespace.to_string());
    annotations.insert(annotations::SOURCE_NAME.to_string(), name.to_string());
}

/// Read the source of a propagated configmap, `None` unless both annotations are present
pub fn provenance(configmap: &ConfigMap) -> Option<Provenance> {
    let annotations = configmap.metadata.annotations.as_ref()?;
    let namespace = annotations.get(annotations::SOURCE_NAMESPACE)?;
    let name = annotations.get(annotations::SOURCE_NAME)?;

    Some(Provenance {
        namespace: namespace.clone(),
        name: name.clone(),
    })
}
