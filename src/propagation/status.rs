// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Status model: per-pair entries and the aggregate conditions

use crate::constants::conditions::{self, reasons};
use crate::error::CourierError;
use crate::types::{Condition, ConditionStatus, PropagationPair, PropagationStatusEntry};
use chrono::{SecondsFormat, Utc};

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl Condition {
    pub fn new(
        condition_type: &str,
        status: ConditionStatus,
        reason: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            condition_type: condition_type.to_string(),
            status,
            reason: reason.to_string(),
            message: message.into(),
            last_transition_time: Some(now()),
        }
    }
}

/// Insert or replace the condition with the same type.
/// The transition time only moves when the status value changes.
pub fn set_condition(conditions: &mut Vec<Condition>, mut condition: Condition) {
    match conditions
        .iter_mut()
        .find(|c| c.condition_type == condition.condition_type)
    {
        Some(existing) => {
            if existing.status == condition.status {
                condition.last_transition_time = existing.last_transition_time.clone();
            }
            *existing = condition;
        }
        None => conditions.push(condition),
    }
}

pub fn collected_condition(count: usize, namespace: &str, name: &str) -> Condition {
    Condition::new(
        conditions::COLLECTED_EXECUTION_REQUESTS,
        ConditionStatus::True,
        reasons::COLLECTED_EXECUTION_REQUESTS,
        format!(
            "Collected {} execution requests for ConfigMapPropagation {}/{}",
            count, namespace, name
        ),
    )
}

pub fn ready_condition(namespace: &str, name: &str) -> Condition {
    Condition::new(
        conditions::READY,
        ConditionStatus::True,
        reasons::READY,
        format!("ConfigMapPropagation {}/{} is ready", namespace, name),
    )
}

pub fn not_ready_condition(failed: usize, total: usize) -> Condition {
    Condition::new(
        conditions::READY,
        ConditionStatus::False,
        reasons::PROPAGATION_FAILED,
        format!("{} of {} propagation requests failed", failed, total),
    )
}

impl PropagationStatusEntry {
    fn for_pair(pair: &PropagationPair, status: ConditionStatus, reason: &str, message: String) -> Self {
        Self {
            source_namespace: pair.source_namespace.clone(),
            source_name: pair.source_name.clone(),
            target_namespace: pair.target_namespace.clone(),
            target_name: pair.target_name.clone(),
            status,
            reason: reason.to_string(),
            message,
        }
    }

    pub fn succeeded(pair: &PropagationPair) -> Self {
        Self::for_pair(
            pair,
            ConditionStatus::True,
            reasons::PROPAGATION_SUCCEEDED,
            "Propagated".to_string(),
        )
    }

    pub fn failed(pair: &PropagationPair, error: &CourierError) -> Self {
        Self::for_pair(
            pair,
            ConditionStatus::False,
            reasons::PROPAGATION_FAILED,
            error.to_string(),
        )
    }
}
