// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Identity and credentials of a Ceph cluster managed by the operator.

use crate::ceph::owner::OwnerInfo;
use crate::ceph::version::CephVersion;
use crate::constants::ADMIN_USERNAME;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::error;

/// Namespace and name of a namespaced object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NamespacedName {
    pub namespace: String,
    pub name: String,
}

impl fmt::Display for NamespacedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// A Ceph mon and the address it listens on.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MonInfo {
    pub name: String,
    pub endpoint: String,
}

impl MonInfo {
    pub fn new(name: &str, ip: &str, port: i32) -> Self {
        let endpoint = if ip.contains(':') {
            format!("[{}]:{}", ip, port)
        } else {
            format!("{}:{}", ip, port)
        };
        Self {
            name: name.to_string(),
            endpoint,
        }
    }
}

/// Ceph username and key used by the operator.
///
/// Converged clusters use the admin key; external clusters hand the operator a
/// lower-privileged one. The username is serialized as `name`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CephCred {
    #[serde(rename = "name")]
    pub username: String,
    pub secret: String,
}

/// Everything the operator needs to address and authenticate against one Ceph cluster.
#[derive(Clone, Debug, Default)]
pub struct ClusterInfo {
    pub fsid: String,
    pub monitor_secret: String,
    pub ceph_cred: CephCred,
    pub monitors: BTreeMap<String, MonInfo>,
    pub ceph_version: CephVersion,
    pub namespace: String,
    pub owner_info: Option<OwnerInfo>,
    // Most callers want the namespace; the CR name is only reachable
    // through namespaced_name().
    name: String,
}

impl ClusterInfo {
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Identity carrying only the namespace and the admin username.
    ///
    /// It cannot render mon config or produce a namespaced name and is never
    /// initialized.
    pub fn admin(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            ceph_cred: CephCred {
                username: ADMIN_USERNAME.to_string(),
                secret: String::new(),
            },
            ..Default::default()
        }
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// # Panics
    ///
    /// Panics if the name was never set. An identity without a name must not
    /// reach namespaced lookups.
    pub fn namespaced_name(&self) -> NamespacedName {
        if self.name.is_empty() {
            panic!("name is not set on the cluster info");
        }
        NamespacedName {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
        }
    }

    /// True once fsid, mon secret and ceph credentials are all filled in.
    pub fn is_initialized(&self, log_error: bool) -> bool {
        is_initialized(Some(self), log_error)
    }

    pub fn add_monitor(&mut self, mon: MonInfo) {
        self.monitors.insert(mon.name.clone(), mon);
    }

    /// Mon endpoints ordered by mon name, comma separated.
    pub fn mon_endpoints(&self) -> String {
        self.monitors
            .values()
            .map(|m| m.endpoint.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Checks run in order and stop at the first missing field, which is logged
/// when `log_error` is set.
pub fn is_initialized(cluster_info: Option<&ClusterInfo>, log_error: bool) -> bool {
    let missing = match cluster_info {
        None => Some("cluster info is nil"),
        Some(c) if c.fsid.is_empty() => Some("cluster fsid is empty"),
        Some(c) if c.monitor_secret.is_empty() => Some("monitor secret is empty"),
        Some(c) if c.ceph_cred.username.is_empty() => Some("ceph username is empty"),
        Some(c) if c.ceph_cred.secret.is_empty() => Some("ceph secret is empty"),
        Some(_) => None,
    };

    match missing {
        Some(reason) => {
            if log_error {
                error!("{}", reason);
            }
            false
        }
        None => true,
    }
}
