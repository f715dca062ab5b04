// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::{CourierError, Result};
use std::fmt;

/// One concrete source configmap to target configmap mapping
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropagationPair {
    pub source_namespace: String,
    pub source_name: String,
    pub target_namespace: String,
    pub target_name: String,
}

impl PropagationPair {
    pub fn new(
        source_namespace: impl Into<String>,
        source_name: impl Into<String>,
        target_namespace: impl Into<String>,
        target_name: impl Into<String>,
    ) -> Self {
        Self {
            source_namespace: source_namespace.into(),
            source_name: source_name.into(),
            target_namespace: target_namespace.into(),
            target_name: target_name.into(),
        }
    }

    /// Check required fields and default an empty target name to the source name
    pub fn validated(&self) -> Result<PropagationPair> {
        if self.source_namespace.is_empty() {
            return Err(CourierError::ValidationError(
                "sourceNamespace cannot be empty".to_string(),
            ));
        }
        if self.source_name.is_empty() {
            return Err(CourierError::ValidationError(
                "sourceName cannot be empty".to_string(),
            ));
        }
        if self.target_namespace.is_empty() {
            return Err(CourierError::ValidationError(
                "targetNamespace cannot be empty".to_string(),
            ));
        }

        let mut pair = self.clone();
        if pair.target_name.is_empty() {
            pair.target_name = pair.source_name.clone();
        }
        Ok(pair)
    }
}

impl fmt::Display for PropagationPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} -> {}/{}",
            self.source_namespace, self.source_name, self.target_namespace, self.target_name
        )
    }
}
