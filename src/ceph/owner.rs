// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Ownership of the objects a cluster's controller creates.

use crate::error::{Result, RookError};
use crate::kubernetes::owner_refs::{get_controller_of, refers_to_same_object, set_owner_ref, upsert_owner_ref};
use crate::kubernetes::Scheme;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};
use kube::Resource;
use std::any::{type_name, TypeId};
use std::sync::Arc;
use tracing::debug;

/// Snapshot of an owner object: its Rust type and metadata.
#[derive(Clone, Debug)]
pub struct OwnerObject {
    type_id: TypeId,
    type_name: &'static str,
    meta: ObjectMeta,
}

impl OwnerObject {
    pub fn new<K: Resource + 'static>(owner: &K) -> Self {
        Self {
            type_id: TypeId::of::<K>(),
            type_name: type_name::<K>(),
            meta: owner.meta().clone(),
        }
    }

    pub fn meta(&self) -> &ObjectMeta {
        &self.meta
    }
}

/// How owner references are computed for dependents.
#[derive(Clone, Debug)]
pub enum OwnerInfo {
    /// Reference derived from an owner object through the type registry.
    /// With `controller` set, the reference marks the owner as managing controller.
    Scheme {
        owner: OwnerObject,
        scheme: Arc<Scheme>,
        controller: bool,
    },
    /// Precomputed reference, for callers without a type registry.
    Reference(OwnerReference),
}

impl OwnerInfo {
    /// Owner info used by a controller.
    pub fn new<K: Resource + 'static>(owner: &K, controller: bool, scheme: Arc<Scheme>) -> Self {
        OwnerInfo::Scheme {
            owner: OwnerObject::new(owner),
            scheme,
            controller,
        }
    }

    /// Owner info used outside a controller.
    pub fn with_reference(owner_ref: OwnerReference) -> Self {
        OwnerInfo::Reference(owner_ref)
    }

    /// Stamp the owner reference on `object`.
    pub fn set_owner_reference<K: Resource + 'static>(&self, object: &mut K) -> Result<()> {
        match self {
            OwnerInfo::Scheme {
                owner,
                scheme,
                controller,
            } => {
                let owner_type = scheme.lookup(owner.type_id, owner.type_name)?;
                scheme.type_meta_for::<K>()?;
                validate_owner(&owner.meta, object.meta())?;

                let name = owner.meta.name.clone().ok_or_else(|| {
                    RookError::MissingOwnerMetadata(format!("{} has no name", owner_type.kind))
                })?;
                let uid = owner.meta.uid.clone().ok_or_else(|| {
                    RookError::MissingOwnerMetadata(format!("{} {} has no uid", owner_type.kind, name))
                })?;
                let mut owner_ref = OwnerReference {
                    api_version: owner_type.api_version.clone(),
                    kind: owner_type.kind.clone(),
                    name,
                    uid,
                    ..OwnerReference::default()
                };

                if *controller {
                    if let Some(existing) = get_controller_of(object.meta()) {
                        if !refers_to_same_object(existing, &owner_ref) {
                            return Err(RookError::AlreadyOwned {
                                namespace: object.meta().namespace.clone().unwrap_or_default(),
                                name: object.meta().name.clone().unwrap_or_default(),
                                kind: existing.kind.clone(),
                                owner: existing.name.clone(),
                            });
                        }
                    }
                    owner_ref.controller = Some(true);
                    owner_ref.block_owner_deletion = Some(true);
                }

                debug!(
                    "Setting owner {} {} on {}",
                    owner_ref.kind,
                    owner_ref.name,
                    object.meta().name.as_deref().unwrap_or_default()
                );
                upsert_owner_ref(object.meta_mut(), owner_ref);
                Ok(())
            }
            OwnerInfo::Reference(owner_ref) => {
                set_owner_ref(object.meta_mut(), owner_ref);
                Ok(())
            }
        }
    }

    /// UID of the owner.
    pub fn uid(&self) -> Option<&str> {
        match self {
            OwnerInfo::Scheme { owner, .. } => owner.meta.uid.as_deref(),
            OwnerInfo::Reference(owner_ref) => Some(owner_ref.uid.as_str()),
        }
    }
}

/// A namespaced owner may only own objects in its own namespace.
fn validate_owner(owner: &ObjectMeta, object: &ObjectMeta) -> Result<()> {
    let Some(owner_ns) = owner.namespace.as_deref().filter(|ns| !ns.is_empty()) else {
        return Ok(());
    };

    match object.namespace.as_deref().filter(|ns| !ns.is_empty()) {
        None => Err(RookError::ClusterScopedDependent(owner_ns.to_string())),
        Some(ns) if ns != owner_ns => Err(RookError::CrossNamespaceOwner {
            owner_namespace: owner_ns.to_string(),
            namespace: ns.to_string(),
        }),
        Some(_) => Ok(()),
    }
}
