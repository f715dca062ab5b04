// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::conditions;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use kube::CustomResource;
use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Desired state: which configmaps to copy and into which namespaces
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[kube(group = "courier.geeko.me", version = "v1", kind = "ConfigMapPropagation")]
#[kube(namespaced)]
#[kube(status = "ConfigMapPropagationStatus")]
#[kube(shortname = "cmprop")]
#[kube(
    printcolumn = r#"{"name":"Ready","type":"string","jsonPath":".status.conditions[?(@.type==\"Ready\")].status"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapPropagationSpec {
    #[schemars(schema_with = "source_schema")]
    pub source: PropagationSource,
    pub target: PropagationTarget,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropagationSource {
    /// Namespace holding the source configmaps. "*" is reserved for all namespaces.
    #[schemars(length(min = 1))]
    pub namespace: String,
    /// Explicit configmap names, propagated under the same name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,
    /// Select source configmaps by label within `namespace`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_selector: Option<LabelSelector>,
}

/// Source schema requiring `names` or `objectSelector` next to `namespace`
fn source_schema(gen: &mut SchemaGenerator) -> Schema {
    let mut schema = PropagationSource::json_schema(gen).into_object();
    schema.object().min_properties = Some(2);
    schema.extensions.insert(
        "x-kubernetes-validations".to_string(),
        serde_json::json!([{
            "rule": "has(self.names) || has(self.objectSelector)",
            "message": "one of names or objectSelector must be set"
        }]),
    );
    schema.into()
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropagationTarget {
    #[schemars(length(min = 1))]
    pub namespaces: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapPropagationStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    /// One entry per pair of the latest reconciliation pass
    #[serde(default)]
    pub propagation_status: Vec<PropagationStatusEntry>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, schemars::JsonSchema)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConditionStatus::True => "True",
            ConditionStatus::False => "False",
            ConditionStatus::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: ConditionStatus,
    pub reason: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropagationStatusEntry {
    pub source_namespace: String,
    pub source_name: String,
    pub target_namespace: String,
    pub target_name: String,
    pub status: ConditionStatus,
    pub reason: String,
    pub message: String,
}

impl ConfigMapPropagation {
    /// Look up a status condition by type
    pub fn condition(&self, condition_type: &str) -> Option<&Condition> {
        self.status
            .as_ref()
            .and_then(|s| s.conditions.iter().find(|c| c.condition_type == condition_type))
    }

    /// Check if the last reconciliation propagated every pair successfully
    pub fn is_ready(&self) -> bool {
        self.condition(conditions::READY)
            .is_some_and(|c| c.status == ConditionStatus::True)
    }
}
