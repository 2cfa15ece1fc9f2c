// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Ceph principal the operator acts as on converged clusters
pub const ADMIN_USERNAME: &str = "client.admin";

/// The operator name used for logging and field management
pub const OPERATOR_NAME: &str = "rook-operator";

/// Environment variables read by the operator
pub mod env {
    /// Namespace the operator itself runs in (required)
    pub const OPERATOR_NAMESPACE: &str = "ROOK_OPERATOR_NAMESPACE";
    /// Restrict watches to a single namespace (optional, empty means all)
    pub const WATCH_NAMESPACE: &str = "ROOK_WATCH_NAMESPACE";
    /// Comma-separated `group/version/resource` triples to watch (optional)
    pub const WATCHED_RESOURCES: &str = "ROOK_WATCHED_RESOURCES";
}

/// CRD polling configuration
pub mod crd {
    /// Initial polling interval in seconds when waiting for CRD
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}

/// Capacity of each informer's event broadcast channel
pub const INFORMER_EVENT_CAPACITY: usize = 256;
