// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! One level-triggered reconciliation pass over a ConfigMapPropagation

use crate::error::{CourierError, PropagationErrors, Result};
use crate::propagation::propagator::propagate;
use crate::propagation::resolver::resolve;
use crate::propagation::status::{
    collected_condition, not_ready_condition, ready_condition, set_condition,
};
use crate::store::{ConfigMapStore, PropagationStore};
use crate::types::PropagationStatusEntry;
use tracing::{debug, error, info, instrument};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The ConfigMapPropagation no longer exists
    Missing,
    /// Every pair was propagated and the status persisted
    Ready { pairs: usize },
}

/// Recompute pairs from the current spec, propagate each of them and record status.
///
/// A pair failure does not stop the remaining pairs. When any pair fails the status is
/// still written and the combined error is returned so the caller retries the whole pass.
/// `Ready` is only set True after a fully successful pass; a failed pass sets it False
/// instead of leaving a True from an earlier pass in place.
/// A failure to enumerate pairs aborts before any status is written.
#[instrument(skip(store))]
pub async fn reconcile_propagation<S>(
    store: &S,
    namespace: &str,
    name: &str,
) -> Result<ReconcileOutcome>
where
    S: ConfigMapStore + PropagationStore + ?Sized,
{
    let Some(mut propagation) = store.get_propagation(namespace, name).await? else {
        debug!("ConfigMapPropagation no longer exists, nothing to reconcile");
        return Ok(ReconcileOutcome::Missing);
    };

    let pairs = resolve(&propagation.spec, store).await?;
    info!("Collected {} propagation requests", pairs.len());

    let status = propagation.status.get_or_insert_with(Default::default);
    set_condition(
        &mut status.conditions,
        collected_condition(pairs.len(), namespace, name),
    );

    let total = pairs.len();
    let mut entries = Vec::with_capacity(total);
    let mut errors = PropagationErrors::default();

    for pair in pairs {
        match propagate(store, &pair).await {
            Ok(outcome) => {
                debug!("Propagated {} ({})", pair, outcome);
                entries.push(PropagationStatusEntry::succeeded(&pair));
            }
            Err(e) => {
                error!("Unable to propagate {}: {}", pair, e);
                entries.push(PropagationStatusEntry::failed(&pair, &e));
                errors.push(pair, e);
            }
        }
    }

    status.propagation_status = entries;

    if errors.is_empty() {
        set_condition(&mut status.conditions, ready_condition(namespace, name));
        store.update_status(&propagation).await?;
        info!("All {} propagation requests succeeded", total);
        return Ok(ReconcileOutcome::Ready { pairs: total });
    }

    set_condition(
        &mut status.conditions,
        not_ready_condition(errors.len(), total),
    );
    if let Err(e) = store.update_status(&propagation).await {
        error!("Unable to record status of failed pass: {}", e);
    }

    Err(CourierError::Aggregate(errors))
}
