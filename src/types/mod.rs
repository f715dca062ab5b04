// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource and value types shared across the operator.

pub mod pair;
pub mod propagation;

pub use pair::PropagationPair;
pub use propagation::{
    Condition, ConditionStatus, ConfigMapPropagation, ConfigMapPropagationSpec,
    ConfigMapPropagationStatus, PropagationSource, PropagationStatusEntry, PropagationTarget,
};
