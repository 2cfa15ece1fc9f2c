// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::informers::{GroupResource, GroupVersionResource};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RookError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("no informer found for {0}")]
    NoInformer(GroupVersionResource),

    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    #[error("Invalid ceph version: {0}")]
    InvalidVersion(String),

    #[error("{resource} \"{name}\" not found")]
    NotFound { resource: GroupResource, name: String },

    #[error("Informer for {0} stopped before its initial sync")]
    InformerStopped(String),

    #[error("no kind is registered for the type {0}")]
    NotRegistered(String),

    #[error("Object {namespace}/{name} is already owned by another {kind} controller {owner}")]
    AlreadyOwned {
        namespace: String,
        name: String,
        kind: String,
        owner: String,
    },

    #[error("cross-namespace owner references are disallowed, owner's namespace {owner_namespace}, obj's namespace {namespace}")]
    CrossNamespaceOwner {
        owner_namespace: String,
        namespace: String,
    },

    #[error("cluster-scoped resource must not have a namespace-scoped owner, owner's namespace {0}")]
    ClusterScopedDependent(String),

    #[error("Owner is missing metadata: {0}")]
    MissingOwnerMetadata(String),
}

pub type Result<T> = std::result::Result<T, RookError>;
