// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Label selector conversion for source configmap lookups

use crate::error::{CourierError, Result};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use kube::core::Selector;

/// Convert a resource's label selector into one usable for list calls and matching.
/// An empty selector selects every configmap.
pub fn parse_selector(selector: &LabelSelector) -> Result<Selector> {
    Selector::try_from(selector.clone())
        .map_err(|e| CourierError::InvalidSelector(e.to_string()))
}
