// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// API group of the ConfigMapPropagation resource
pub const API_GROUP: &str = "courier.geeko.me";

/// Annotation keys written onto every propagated configmap
pub mod annotations {
    /// Namespace of the configmap the target was propagated from
    pub const SOURCE_NAMESPACE: &str = "courier.geeko.me/source-namespace";
    /// Name of the configmap the target was propagated from
    pub const SOURCE_NAME: &str = "courier.geeko.me/source-name";
}

/// Condition types and reasons reported on a ConfigMapPropagation
pub mod conditions {
    pub const COLLECTED_EXECUTION_REQUESTS: &str = "CollectedExecutionRequests";
    pub const READY: &str = "Ready";

    pub mod reasons {
        pub const COLLECTED_EXECUTION_REQUESTS: &str = "CollectedExecutionRequests";
        pub const READY: &str = "Ready";
        pub const PROPAGATION_SUCCEEDED: &str = "PropagationSucceeded";
        pub const PROPAGATION_FAILED: &str = "PropagationFailed";
    }
}

/// Source namespace value reserved for "all namespaces"
pub const ALL_NAMESPACES: &str = "*";

/// The operator name used for server-side apply
pub const OPERATOR_NAME: &str = "courier";

/// Attempts made by create-or-update before giving up on conflicting writers
pub const MAX_WRITE_ATTEMPTS: usize = 5;

/// CRD polling configuration
pub mod crd {
    /// Initial polling interval in seconds when waiting for CRD
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}
