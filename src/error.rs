// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::PropagationPair;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CourierError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Invalid propagation request: {0}")]
    ValidationError(String),

    #[error("Object store error: {0}")]
    StoreError(String),

    #[error("Failed to list source configmaps: {0}")]
    SelectorListError(String),

    #[error("Invalid label selector: {0}")]
    InvalidSelector(String),

    #[error("Unsupported source namespace: {0}")]
    UnsupportedNamespace(String),

    #[error("Failed to update status: {0}")]
    StatusUpdateError(String),

    #[error("Reconciliation timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Aggregate(PropagationErrors),
}

pub type Result<T> = std::result::Result<T, CourierError>;

/// A single pair that failed to propagate during a reconciliation pass
#[derive(Debug)]
pub struct PairFailure {
    pub pair: PropagationPair,
    pub error: CourierError,
}

/// Every pair failure of one reconciliation pass, reported as one error
#[derive(Debug, Default)]
pub struct PropagationErrors {
    failures: Vec<PairFailure>,
}

impl PropagationErrors {
    pub fn push(&mut self, pair: PropagationPair, error: CourierError) {
        self.failures.push(PairFailure { pair, error });
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn failures(&self) -> &[PairFailure] {
        &self.failures
    }

    /// Turn the collection into an error, or `Ok(())` when nothing failed
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CourierError::Aggregate(self))
        }
    }
}

impl fmt::Display for PropagationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} propagation request(s) failed", self.failures.len())?;
        for (i, failure) in self.failures.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{}: {}", sep, failure.pair, failure.error)?;
        }
        Ok(())
    }
}
