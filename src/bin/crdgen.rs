// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Prints the ConfigMapPropagation CustomResourceDefinition as YAML.

use courier::types::ConfigMapPropagation;
use kube::CustomResourceExt;

fn main() -> anyhow::Result<()> {
    print!("{}", serde_yaml::to_string(&ConfigMapPropagation::crd())?);
    Ok(())
}
