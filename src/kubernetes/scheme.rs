// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Registry of the Rust types the operator may use as owners or dependents.

use crate::error::{Result, RookError};
use crate::types::ceph_cluster::CephCluster;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{ConfigMap, PersistentVolumeClaim, Secret, Service};
use kube::core::TypeMeta;
use kube::Resource;
use std::any::{type_name, TypeId};
use std::collections::HashMap;

/// Maps Rust types to their apiVersion and kind.
#[derive(Clone, Debug, Default)]
pub struct Scheme {
    kinds: HashMap<TypeId, TypeMeta>,
}

impl Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scheme with the CephCluster owner type and the core objects created on its behalf.
    pub fn rook() -> Self {
        let mut scheme = Self::new();
        scheme
            .register::<CephCluster>()
            .register::<ConfigMap>()
            .register::<Secret>()
            .register::<Service>()
            .register::<Deployment>()
            .register::<PersistentVolumeClaim>();
        scheme
    }

    pub fn register<K>(&mut self) -> &mut Self
    where
        K: Resource<DynamicType = ()> + 'static,
    {
        self.kinds.insert(
            TypeId::of::<K>(),
            TypeMeta {
                api_version: K::api_version(&()).into_owned(),
                kind: K::kind(&()).into_owned(),
            },
        );
        self
    }

    pub fn is_registered<K: 'static>(&self) -> bool {
        self.kinds.contains_key(&TypeId::of::<K>())
    }

    pub fn type_meta_for<K: 'static>(&self) -> Result<&TypeMeta> {
        self.lookup(TypeId::of::<K>(), type_name::<K>())
    }

    pub(crate) fn lookup(&self, id: TypeId, name: &str) -> Result<&TypeMeta> {
        self.kinds
            .get(&id)
            .ok_or_else(|| RookError::NotRegistered(name.to_string()))
    }
}
