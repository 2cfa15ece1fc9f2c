// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Watch caches for Rook custom resources and a resolver that looks them up by triple.

pub mod factory;
pub mod generic;
pub mod lister;
pub mod resources;

pub use factory::{ApiEventSource, EventSource, EventStream, Informer, InformerEvent, SharedInformerFactory};
pub use generic::{GenericInformer, ResourceResolver};
pub use lister::{GenericLister, GenericNamespaceLister};
pub use resources::{GroupResource, GroupVersionResource, ResourceEntry, SUPPORTED_RESOURCES};
