// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! ConfigMap propagation: pair resolution, per-pair sync, status and the reconciliation pass.

pub mod propagator;
pub mod provenance;
pub mod reconcile;
pub mod resolver;
pub mod status;

pub use propagator::{propagate, PropagationOutcome};
pub use provenance::{provenance, set_provenance, Provenance};
pub use reconcile::{reconcile_propagation, ReconcileOutcome};
pub use resolver::resolve;
