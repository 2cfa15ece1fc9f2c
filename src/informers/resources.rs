// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource triples and the static table of custom resources the operator can watch.

use crate::error::{Result, RookError};
use kube::core::ApiResource;
use std::fmt;
use std::str::FromStr;

/// A (group, version, resource) triple identifying a resource type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupVersionResource {
    pub group: String,
    pub version: String,
    pub resource: String,
}

impl GroupVersionResource {
    pub fn new(group: &str, version: &str, resource: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            resource: resource.to_string(),
        }
    }

    pub fn group_resource(&self) -> GroupResource {
        GroupResource {
            group: self.group.clone(),
            resource: self.resource.clone(),
        }
    }
}

/// Renders as `group/version, Resource=resource`, the form used in lookup errors.
impl fmt::Display for GroupVersionResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}, Resource={}", self.group, self.version, self.resource)
    }
}

/// Parses `group/version/resource`.
impl FromStr for GroupVersionResource {
    type Err = RookError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        match parts.as_slice() {
            [group, version, resource] if !version.is_empty() && !resource.is_empty() => {
                Ok(Self::new(group, version, resource))
            }
            _ => Err(RookError::InvalidResource(format!(
                "expected group/version/resource, got '{}'",
                s
            ))),
        }
    }
}

/// A resource type without its version.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupResource {
    pub group: String,
    pub resource: String,
}

impl fmt::Display for GroupResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.resource)
        } else {
            write!(f, "{}.{}", self.resource, self.group)
        }
    }
}

/// One row of the supported resource table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceEntry {
    pub group: &'static str,
    pub version: &'static str,
    pub resource: &'static str,
    pub kind: &'static str,
}

impl ResourceEntry {
    pub fn group_version_resource(&self) -> GroupVersionResource {
        GroupVersionResource::new(self.group, self.version, self.resource)
    }

    pub fn api_resource(&self) -> ApiResource {
        ApiResource {
            group: self.group.to_string(),
            version: self.version.to_string(),
            api_version: format!("{}/{}", self.group, self.version),
            kind: self.kind.to_string(),
            plural: self.resource.to_string(),
        }
    }
}

const fn entry(
    group: &'static str,
    version: &'static str,
    resource: &'static str,
    kind: &'static str,
) -> ResourceEntry {
    ResourceEntry {
        group,
        version,
        resource,
        kind,
    }
}

/// Every custom resource the operator knows how to watch. Adding a type is a
/// change to this table only.
pub const SUPPORTED_RESOURCES: &[ResourceEntry] = &[
    // Group=cassandra.rook.io, Version=v1alpha1
    entry("cassandra.rook.io", "v1alpha1", "clusters", "Cluster"),
    // Group=ceph.rook.io, Version=v1
    entry("ceph.rook.io", "v1", "cephblockpools", "CephBlockPool"),
    entry("ceph.rook.io", "v1", "cephclusters", "CephCluster"),
    entry("ceph.rook.io", "v1", "cephfilesystems", "CephFilesystem"),
    entry("ceph.rook.io", "v1", "cephnfses", "CephNFS"),
    entry("ceph.rook.io", "v1", "cephobjectstores", "CephObjectStore"),
    entry("ceph.rook.io", "v1", "cephobjectstoreusers", "CephObjectStoreUser"),
    // Group=cockroachdb.rook.io, Version=v1alpha1
    entry("cockroachdb.rook.io", "v1alpha1", "clusters", "Cluster"),
    // Group=edgefs.rook.io, Version=v1beta1
    entry("edgefs.rook.io", "v1beta1", "clusters", "Cluster"),
    entry("edgefs.rook.io", "v1beta1", "iscsis", "ISCSI"),
    entry("edgefs.rook.io", "v1beta1", "isgws", "ISGW"),
    entry("edgefs.rook.io", "v1beta1", "nfss", "NFS"),
    entry("edgefs.rook.io", "v1beta1", "s3s", "S3"),
    entry("edgefs.rook.io", "v1beta1", "s3xs", "S3X"),
    entry("edgefs.rook.io", "v1beta1", "swifts", "SWIFT"),
    // Group=minio.rook.io, Version=v1alpha1
    entry("minio.rook.io", "v1alpha1", "objectstores", "ObjectStore"),
    // Group=nfs.rook.io, Version=v1alpha1
    entry("nfs.rook.io", "v1alpha1", "nfsservers", "NFSServer"),
    // Group=rook.io, Version=v1alpha2
    entry("rook.io", "v1alpha2", "volumes", "Volume"),
    // Group=yugabytedb.rook.io, Version=v1alpha1
    entry("yugabytedb.rook.io", "v1alpha1", "ybclusters", "YBCluster"),
];
