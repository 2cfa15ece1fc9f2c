// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Ceph cluster identity, credentials and ownership of managed objects.

pub mod info;
pub mod owner;
pub mod version;

pub use info::{is_initialized, CephCred, ClusterInfo, MonInfo, NamespacedName};
pub use owner::{OwnerInfo, OwnerObject};
pub use version::CephVersion;
