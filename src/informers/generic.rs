// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resolve a resource triple to a uniform informer/lister pair.

use crate::error::{Result, RookError};
use crate::informers::factory::{Informer, SharedInformerFactory};
use crate::informers::lister::GenericLister;
use crate::informers::resources::{
    GroupResource, GroupVersionResource, ResourceEntry, SUPPORTED_RESOURCES,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Informer and lister for a resource type known only by its triple.
#[derive(Clone, Debug)]
pub struct GenericInformer {
    informer: Informer,
    resource: GroupResource,
}

impl GenericInformer {
    pub fn informer(&self) -> &Informer {
        &self.informer
    }

    /// A new lister over the informer's store. All listers observe the same index.
    pub fn lister(&self) -> GenericLister {
        GenericLister::new(
            self.informer.store(),
            self.informer.resource().clone(),
            self.resource.clone(),
        )
    }
}

/// Maps every supported resource triple to the shared informer for it.
pub struct ResourceResolver {
    factory: Arc<SharedInformerFactory>,
    table: HashMap<GroupVersionResource, &'static ResourceEntry>,
}

impl ResourceResolver {
    pub fn new(factory: Arc<SharedInformerFactory>) -> Self {
        let table = SUPPORTED_RESOURCES
            .iter()
            .map(|entry| (entry.group_version_resource(), entry))
            .collect();
        Self { factory, table }
    }

    pub fn factory(&self) -> &Arc<SharedInformerFactory> {
        &self.factory
    }

    /// Supported triples, sorted.
    pub fn supported_resources(&self) -> Vec<GroupVersionResource> {
        let mut resources: Vec<_> = self.table.keys().cloned().collect();
        resources.sort();
        resources
    }

    /// Generic access to the shared informer of the matching type.
    #[instrument(skip(self))]
    pub fn for_resource(&self, resource: &GroupVersionResource) -> Result<GenericInformer> {
        let entry = self
            .table
            .get(resource)
            .ok_or_else(|| RookError::NoInformer(resource.clone()))?;

        debug!("Resolved {} to kind {}", resource, entry.kind);
        Ok(GenericInformer {
            informer: self.factory.informer_for(&entry.api_resource()),
            resource: resource.group_resource(),
        })
    }
}
